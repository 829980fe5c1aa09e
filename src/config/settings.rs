//! User settings for kassebog
//!
//! Holds everything the pipeline is parameterized by: reporting currency
//! and FX rates, the income/cashback classification knobs, the monthly
//! limit table with its carry-over epoch, and the default CSV location.
//! Stored as JSON; every field has a default so a partial file loads.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::paths::KassebogPaths;
use crate::error::KassebogError;
use crate::models::{Money, MonthKey};

/// User settings for kassebog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Where the transaction export lives, used when no --file is given
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Currency all amounts are normalized into
    #[serde(default = "default_reporting_currency")]
    pub reporting_currency: String,

    /// Timezone transaction timestamps are normalized into
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Conversion rates into the reporting currency, keyed by currency code
    ///
    /// Codes absent from this table convert at 1.0.
    #[serde(default = "default_fx_rates")]
    pub fx_rates: BTreeMap<String, f64>,

    /// Positive amounts in this currency count as income, not refunds
    #[serde(default = "default_salary_currency")]
    pub salary_currency: String,

    /// Positive amounts whose narrative contains this token count as income
    #[serde(default = "default_cashback_token")]
    pub cashback_token: String,

    /// Per-month budget limits in the reporting currency
    #[serde(default = "default_monthly_limits")]
    pub monthly_limits: BTreeMap<MonthKey, Money>,

    /// Limit applied to months absent from the table
    #[serde(default = "default_monthly_limit")]
    pub default_monthly_limit: Money,

    /// First month the carry-over accumulation covers
    #[serde(default = "default_carry_over_start")]
    pub carry_over_start: MonthKey,

    /// Explicit weekly limit; unset derives monthly limit / 4.33
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_limit: Option<Money>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("data/transaction-history.csv")
}

fn default_reporting_currency() -> String {
    "DKK".to_string()
}

fn default_timezone() -> Tz {
    chrono_tz::Europe::Copenhagen
}

fn default_fx_rates() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("DKK".to_string(), 1.0),
        ("EUR".to_string(), 7.44),
        ("USD".to_string(), 6.35),
    ])
}

fn default_salary_currency() -> String {
    "USD".to_string()
}

fn default_cashback_token() -> String {
    "CASHBACK".to_string()
}

fn default_monthly_limits() -> BTreeMap<MonthKey, Money> {
    let mut limits = BTreeMap::from([
        (MonthKey::new(2025, 10), Money::from_whole(18_000)),
        (MonthKey::new(2025, 11), Money::from_whole(24_000)),
        (MonthKey::new(2025, 12), Money::from_whole(26_000)),
    ]);
    for month in 1..=12 {
        limits.insert(MonthKey::new(2026, month), Money::from_whole(21_000));
    }
    limits
}

fn default_monthly_limit() -> Money {
    Money::from_whole(21_000)
}

fn default_carry_over_start() -> MonthKey {
    MonthKey::new(2025, 10)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            csv_path: default_csv_path(),
            reporting_currency: default_reporting_currency(),
            timezone: default_timezone(),
            fx_rates: default_fx_rates(),
            salary_currency: default_salary_currency(),
            cashback_token: default_cashback_token(),
            monthly_limits: default_monthly_limits(),
            default_monthly_limit: default_monthly_limit(),
            carry_over_start: default_carry_over_start(),
            weekly_limit: None,
        }
    }
}

impl Settings {
    /// Budget limit for a month, falling back to the configured default
    pub fn monthly_limit(&self, month: MonthKey) -> Money {
        self.monthly_limits
            .get(&month)
            .copied()
            .unwrap_or(self.default_monthly_limit)
    }

    /// Conversion rate into the reporting currency, if configured
    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.fx_rates.get(currency).copied()
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &KassebogPaths) -> Result<Self, KassebogError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                KassebogError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                KassebogError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Create default settings
            let settings = Settings::default();
            // Don't save yet - let caller decide when to persist
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KassebogPaths) -> Result<(), KassebogError> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            KassebogError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            KassebogError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
