//! Counterparty categorization
//!
//! Assigns a spending category to each transaction from its counterparty
//! name. Matching runs in three stages: an exact case-sensitive rule
//! lookup, then the dynamic Lidl check, then a case-insensitive substring
//! scan over the rules in insertion order. Anything left over lands in
//! [`NO_CATEGORY`].

use crate::config::CategoryRuleSet;

/// Category for counterparties no rule matches
pub const NO_CATEGORY: &str = "no-category";

/// All Lidl stores categorize as groceries regardless of branch suffix
const LIDL_TOKEN: &str = "lidl";
const LIDL_CATEGORY: &str = "Groceries";

/// Stateless matcher over a rule set
pub struct Categorizer<'a> {
    rules: &'a CategoryRuleSet,
}

impl<'a> Categorizer<'a> {
    /// Create a categorizer over the given rules
    pub fn new(rules: &'a CategoryRuleSet) -> Self {
        Self { rules }
    }

    /// Category for a counterparty name
    ///
    /// Exact matches win over the Lidl check, which wins over substring
    /// matches. The substring stage compares lowercase on both sides and
    /// the first rule in insertion order wins.
    pub fn categorize(&self, counterparty: &str) -> &'a str {
        let name = counterparty.trim();
        if name.is_empty() {
            return NO_CATEGORY;
        }

        if let Some(category) = self.rules.exact_match(name) {
            return category;
        }

        let lower = name.to_lowercase();
        if lower.contains(LIDL_TOKEN) {
            return LIDL_CATEGORY;
        }

        if let Some(category) = self.rules.substring_match(&lower) {
            return category;
        }

        NO_CATEGORY
    }
}
