//! Category rules for merchant classification
//!
//! An ordered table of (pattern, category) pairs. Matching happens in two
//! passes: an exact case-sensitive pass over the whole table, then a
//! case-insensitive substring pass in insertion order where the first hit
//! wins, so order here is part of the configuration. The table ships with
//! a builtin set and can be replaced by a `rules.json` file.

use serde::{Deserialize, Serialize};

use super::paths::KassebogPaths;
use crate::error::KassebogError;

/// One merchant-pattern to category mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub pattern: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(pattern: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }
}

/// An ordered set of category rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRuleSet {
    rules: Vec<CategoryRule>,
}

// Builtin table. Grouped by category; substring matching makes order
// within the table significant, so keep new entries with their group.
const BUILTIN_RULES: &[(&str, &str)] = &[
    // Activities
    ("Bagsvaerd Svoemmehal", "Activities"),
    ("Fitnessworldas - NYX", "Activities"),
    ("Planetarium", "Activities"),
    ("Sportscentret", "Activities"),
    ("Vestbad", "Activities"),
    // Amazon
    ("Amazon", "Amazon"),
    ("Amazon Web Services", "Amazon"),
    // Car Services
    ("Cph Parkering a S", "Car Services"),
    ("Clean Car", "Car Services"),
    ("Ukrservice Aps", "Car Services"),
    ("Øresundsbron", "Car Services"),
    // Clothes
    ("Adidas", "Clothes"),
    ("BabySam", "Clothes"),
    ("Boozt.com", "Clothes"),
    ("Decathlon", "Clothes"),
    ("Mango", "Clothes"),
    ("Sport 24 Outlet", "Clothes"),
    ("Takko Fashion", "Clothes"),
    // Eat Out
    ("7-Eleven", "Eat Out"),
    ("Baba Kebab", "Eat Out"),
    ("Bangkok Truck", "Eat Out"),
    ("Coffee Address", "Eat Out"),
    ("Copenhagen Fal", "Eat Out"),
    ("Falafelo", "Eat Out"),
    ("Falafillo", "Eat Out"),
    ("Flere Fugle", "Eat Out"),
    ("Food and Co - Novo 9P 131", "Eat Out"),
    ("Grannys House", "Eat Out"),
    ("Imi 2610 Aps", "Eat Out"),
    ("Ismageriet", "Eat Out"),
    ("Jagger - Roedovre Centrum", "Eat Out"),
    ("Jammi", "Eat Out"),
    ("Kiosk - Rsik - Ro - Mobile Pay", "Eat Out"),
    ("Kiosk - Rsik - Rºdovr", "Eat Out"),
    ("Kiosken - Rodovre - Mobile Pay", "Eat Out"),
    ("Ksf Kiosk", "Eat Out"),
    ("Lagkagehuset", "Eat Out"),
    ("McDonald's", "Eat Out"),
    ("Monop'daily", "Eat Out"),
    ("Mcdnorrebrobycenter", "Eat Out"),
    ("Oel Og Broed", "Eat Out"),
    ("Ottoman Broenshoej Aps", "Eat Out"),
    ("Restaurant Jy", "Eat Out"),
    // Extra
    ("4 Urbs", "Extra"),
    ("Blade by J", "Extra"),
    ("Gss Copenhagen", "Extra"),
    ("Https Www.ladcyklen.dk", "Extra"),
    ("Kerstin Nellen", "Extra"),
    ("LinkedIn", "Extra"),
    ("M.A.C. Cosmetics", "Extra"),
    ("Magasin Du Nord", "Extra"),
    ("Medium", "Extra"),
    ("Royal Mermaid Amber Store", "Extra"),
    ("Simply.com", "Extra"),
    ("Søstrene Grene", "Extra"),
    ("Sp Wuerfelhaus", "Extra"),
    ("Thiele", "Extra"),
    // Fuel
    ("Circle K", "Fuel"),
    ("Noahs Q8 Korsør", "Fuel"),
    ("Q8", "Fuel"),
    ("Shell", "Fuel"),
    ("Uno-X", "Fuel"),
    // Groceries. Lidl stores match dynamically on the "lidl" substring.
    ("Aldi", "Groceries"),
    ("Apotek", "Groceries"),
    ("Bagt", "Groceries"),
    ("Bog & idé", "Groceries"),
    ("Carlsro Super", "Groceries"),
    ("Coop 365", "Groceries"),
    ("føtex", "Groceries"),
    ("Heinemann Denmark", "Groceries"),
    ("IKI", "Groceries"),
    ("Ingo", "Groceries"),
    ("KaffeKapslen.dk", "Groceries"),
    ("Kvickly", "Groceries"),
    ("Lygten Bazar", "Groceries"),
    ("Lygtenbazar Aps", "Groceries"),
    ("MobilePay Danmark", "Groceries"),
    ("Nan Lygten", "Groceries"),
    ("Netto", "Groceries"),
    ("nemlig.com", "Groceries"),
    ("REMA 1000", "Groceries"),
    ("Rimi", "Groceries"),
    // Home Maintenance
    ("Bauhaus", "Home Maintenance"),
    ("Elgiganten Danmark", "Home Maintenance"),
    ("IKEA", "Home Maintenance"),
    ("Plantorama Taas", "Home Maintenance"),
    ("Sportyfit Dk", "Home Maintenance"),
    ("Thansen", "Home Maintenance"),
    // Ice Hockey
    ("Holdsport", "Ice Hockey"),
    ("Holdsport.dk Aps", "Ice Hockey"),
    ("Mette Sauffaus", "Ice Hockey"),
    ("Puk Bageri Aps", "Ice Hockey"),
    ("Rexhockey", "Ice Hockey"),
    ("Rodovre Mighty Bulls Aps", "Ice Hockey"),
    ("Roedovre Skoejte Isho", "Ice Hockey"),
    ("Rsik - Kiosk", "Ice Hockey"),
    ("RØDOVRE SKØJTE & I", "Ice Hockey"),
    ("Skatertown Aps", "Ice Hockey"),
    ("Stine Munk", "Ice Hockey"),
    // Pet Supplies
    ("Bonnie Dyrecenter Rodovre", "Pet Supplies"),
    ("Borns Vilkfr - Ba - Mobile Pay", "Pet Supplies"),
    ("Maxi Zoo", "Pet Supplies"),
    ("Themallows.dk", "Pet Supplies"),
    // Services
    ("Ladcyklen.dk - Mobile Pay", "Services"),
    // Trip
    ("Backstuba", "Trip"),
    ("Bahne", "Trip"),
    ("Beerencafe", "Trip"),
    ("Bolt", "Trip"),
    ("Booking.com", "Trip"),
    ("Brobizz", "Trip"),
    ("Deutsche Bahn", "Trip"),
    ("Dr Hermann Koehle", "Trip"),
    ("Drivers Inn", "Trip"),
    ("EDEKA", "Trip"),
    ("Ehc Red Bull Munchen", "Trip"),
    ("Eisbar Fan Eaterie Sch", "Trip"),
    ("Enjoy by Lillebaelt Nord", "Trip"),
    ("EUROSPAR", "Trip"),
    ("Eurotrade Flughafen Mue", "Trip"),
    ("FC Bayern München", "Trip"),
    ("Freizeit Arena", "Trip"),
    ("Hauptfiliale Soelde", "Trip"),
    ("Intersport Siebzehnrübl", "Trip"),
    ("Kaefer Autowelt", "Trip"),
    ("Katpedele", "Trip"),
    ("Kaufland", "Trip"),
    ("Knextgmbh - NYX", "Trip"),
    ("Lalandia", "Trip"),
    ("Legoland", "Trip"),
    ("MLCraft", "Trip"),
    ("MPREIS", "Trip"),
    ("Mountaincarts Solden", "Trip"),
    ("MVG", "Trip"),
    ("Müller", "Trip"),
    ("Neh Svenska Ab", "Trip"),
    ("Netto Marken-Discount", "Trip"),
    ("NORMAL", "Trip"),
    ("Odontolog. Klinika Odonti", "Trip"),
    ("Oetztal Baeck", "Trip"),
    ("Panorama Restaurant", "Trip"),
    ("Parksaeule Freizeit Arena", "Trip"),
    ("PEP", "Trip"),
    ("Pension Sportalm", "Trip"),
    ("Raststaette Inntal West", "Trip"),
    ("Ryanair", "Trip"),
    ("Scandlines", "Trip"),
    ("Schiregion Hochoetz", "Trip"),
    ("Schulranzen.com", "Trip"),
    ("Sparda-Banken", "Trip"),
    ("Sport Riml", "Trip"),
    ("Stadtsparkasse München - Geldautomat", "Trip"),
    ("Travelis Denmark", "Trip"),
    ("Turkish Airlines", "Trip"),
    ("Uab Ltg Link Kaunas", "Trip"),
    ("Uab Ltg Link Vilnius", "Trip"),
    ("Werkstatt Soelden", "Trip"),
    // Trip-Fuel
    ("Aral", "Trip-Fuel"),
    ("Esso", "Trip-Fuel"),
];

impl CategoryRuleSet {
    /// Wrap an ordered list of rules
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The builtin rule table
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(pattern, category)| CategoryRule::new(*pattern, *category))
                .collect(),
        }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    /// Case-sensitive exact pattern lookup
    pub fn exact_match(&self, counterparty: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.pattern == counterparty)
            .map(|r| r.category.as_str())
    }

    /// First rule whose lowercased pattern occurs in the given lowercased name
    pub fn substring_match(&self, counterparty_lower: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| counterparty_lower.contains(&r.pattern.to_lowercase()))
            .map(|r| r.category.as_str())
    }

    /// Load rules from disk, or fall back to the builtin table
    pub fn load_or_builtin(paths: &KassebogPaths) -> Result<Self, KassebogError> {
        let rules_path = paths.rules_file();

        if rules_path.exists() {
            let contents = std::fs::read_to_string(&rules_path)
                .map_err(|e| KassebogError::Io(format!("Failed to read rules file: {}", e)))?;

            let rules: CategoryRuleSet = serde_json::from_str(&contents).map_err(|e| {
                KassebogError::Config(format!("Failed to parse rules file: {}", e))
            })?;

            tracing::debug!(count = rules.len(), "loaded category rules from file");
            Ok(rules)
        } else {
            Ok(Self::builtin())
        }
    }

    /// Save rules to disk
    pub fn save(&self, paths: &KassebogPaths) -> Result<(), KassebogError> {
        paths.ensure_directories()?;

        let rules_path = paths.rules_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| KassebogError::Config(format!("Failed to serialize rules: {}", e)))?;

        std::fs::write(&rules_path, contents)
            .map_err(|e| KassebogError::Io(format!("Failed to write rules file: {}", e)))?;

        Ok(())
    }
}
