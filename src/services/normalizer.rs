//! Row normalization
//!
//! Turns raw export rows into [`Transaction`] values: parses timestamps
//! across the formats banks actually emit, applies the direction column
//! to the amount sign, converts to the reporting currency, and assigns a
//! category. Rows that cannot be normalized are classified rather than
//! failing the run; the pipeline counts them.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::config::{CategoryRuleSet, Settings};
use crate::ingest::RawRow;
use crate::models::{Money, Transaction};

use super::categorizer::Categorizer;

/// Naive datetime formats tried after RFC 3339
pub const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d-%m-%Y %H:%M:%S"];

/// Date-only formats, interpreted as local midnight
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Direction values that force an outflow sign
const OUTFLOW_PREFIXES: &[&str] = &["OUT", "DEBIT", "PAYMENT"];

/// Direction values that force an inflow sign
const INFLOW_PREFIXES: &[&str] = &["IN", "CREDIT"];

/// What became of one raw row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Kept(Transaction),
    Cancelled,
    BadDate,
    BadAmount,
}

/// Normalizes raw rows against the loaded settings and rules
pub struct Normalizer<'a> {
    settings: &'a Settings,
    categorizer: Categorizer<'a>,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer over settings and category rules
    pub fn new(settings: &'a Settings, rules: &'a CategoryRuleSet) -> Self {
        Self {
            settings,
            categorizer: Categorizer::new(rules),
        }
    }

    /// Normalize one raw row
    pub fn normalize(&self, row: &RawRow) -> RowOutcome {
        if is_cancelled(row.status.as_deref()) {
            return RowOutcome::Cancelled;
        }

        let timestamp = match parse_timestamp(&row.date, self.settings.timezone) {
            Some(ts) => ts,
            None => {
                debug!("Dropping row {}: unparseable date {:?}", row.line, row.date);
                return RowOutcome::BadDate;
            }
        };

        let parsed = match Money::parse(&row.amount) {
            Ok(amount) => amount,
            Err(_) => {
                debug!(
                    "Dropping row {}: unparseable amount {:?}",
                    row.line, row.amount
                );
                return RowOutcome::BadAmount;
            }
        };
        let raw_amount = apply_direction(parsed, row.direction.as_deref());

        let currency = match row.currency.as_deref() {
            Some(code) => code.trim().to_uppercase(),
            None => self.settings.reporting_currency.clone(),
        };
        let rate = match self.settings.rate(&currency) {
            Some(rate) => rate,
            None => {
                warn!(
                    "No exchange rate for {}; treating amounts as {}",
                    currency, self.settings.reporting_currency
                );
                1.0
            }
        };
        let amount_reporting = raw_amount.convert(rate);

        let counterparty = row.counterparty.clone().unwrap_or_default();
        let category = self.categorizer.categorize(&counterparty).to_string();

        RowOutcome::Kept(Transaction {
            timestamp,
            raw_amount,
            currency,
            amount_reporting,
            counterparty,
            category,
            transaction_id: row.transaction_id.clone(),
            reference: row.reference.clone(),
        })
    }
}

/// Check a status value against the cancelled markers
pub fn is_cancelled(status: Option<&str>) -> bool {
    matches!(
        status.map(|s| s.trim().to_uppercase()).as_deref(),
        Some("CANCELLED") | Some("CANCELED")
    )
}

/// Apply a direction value to an amount's sign
///
/// OUT, DEBIT and PAYMENT prefixes force an outflow, IN and CREDIT force
/// an inflow. Any other value, or none at all, leaves the parsed sign
/// authoritative.
pub fn apply_direction(amount: Money, direction: Option<&str>) -> Money {
    let upper = match direction {
        Some(d) => d.trim().to_uppercase(),
        None => return amount,
    };

    if OUTFLOW_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        -amount.abs()
    } else if INFLOW_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        amount.abs()
    } else {
        amount
    }
}

/// Parse a timestamp value into the configured timezone
///
/// Tries RFC 3339 first, then the naive datetime formats, then the
/// date-only formats at local midnight. Naive values are taken as local
/// time; when daylight saving makes a local time ambiguous the earlier
/// mapping wins, and times inside the spring-forward gap are read as UTC.
pub fn parse_timestamp(value: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&tz));
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(resolve_local(naive, tz));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(resolve_local(midnight, tz));
        }
    }

    None
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Utc.from_utc_datetime(&naive).with_timezone(&tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Copenhagen;

    fn raw_row(date: &str, amount: &str) -> RawRow {
        RawRow {
            line: 2,
            date: date.to_string(),
            amount: amount.to_string(),
            ..RawRow::default()
        }
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2025-10-03T07:15:00Z", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T09:15:00+02:00");

        let dt = parse_timestamp("2025-10-03T09:15:00+02:00", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T09:15:00+02:00");
    }

    #[test]
    fn test_parse_timestamp_naive_is_local() {
        let dt = parse_timestamp("2025-10-03 09:15:00", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T09:15:00+02:00");

        let dt = parse_timestamp("03-10-2025 09:15:00", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T09:15:00+02:00");
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        let dt = parse_timestamp("2025-10-03", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T00:00:00+02:00");

        let dt = parse_timestamp("03-10-2025", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T00:00:00+02:00");

        // slashed dates are month first
        let dt = parse_timestamp("10/03/2025", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-03T00:00:00+02:00");
    }

    #[test]
    fn test_parse_timestamp_ambiguous_takes_earlier_offset() {
        // clocks fall back 03:00 -> 02:00 on 2025-10-26 in Copenhagen
        let dt = parse_timestamp("2025-10-26 02:30:00", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-10-26T02:30:00+02:00");
    }

    #[test]
    fn test_parse_timestamp_gap_reads_as_utc() {
        // 02:30 does not exist on 2025-03-30 in Copenhagen
        let dt = parse_timestamp("2025-03-30 02:30:00", Copenhagen).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-03-30T04:30:00+02:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("", Copenhagen), None);
        assert_eq!(parse_timestamp("yesterday", Copenhagen), None);
        assert_eq!(parse_timestamp("2025-13-40", Copenhagen), None);
    }

    #[test]
    fn test_is_cancelled() {
        assert!(is_cancelled(Some("CANCELLED")));
        assert!(is_cancelled(Some("canceled")));
        assert!(is_cancelled(Some(" Cancelled ")));
        assert!(!is_cancelled(Some("COMPLETED")));
        assert!(!is_cancelled(Some("PENDING")));
        assert!(!is_cancelled(None));
    }

    #[test]
    fn test_apply_direction_forces_outflow() {
        let amount = Money::from_whole(100);
        assert_eq!(apply_direction(amount, Some("OUT")), Money::from_whole(-100));
        assert_eq!(
            apply_direction(amount, Some("DEBIT")),
            Money::from_whole(-100)
        );
        assert_eq!(
            apply_direction(Money::from_whole(-100), Some("PAYMENT")),
            Money::from_whole(-100)
        );
    }

    #[test]
    fn test_apply_direction_forces_inflow() {
        let amount = Money::from_whole(-100);
        assert_eq!(apply_direction(amount, Some("IN")), Money::from_whole(100));
        assert_eq!(
            apply_direction(amount, Some("CREDIT")),
            Money::from_whole(100)
        );
    }

    #[test]
    fn test_apply_direction_prefix_matching() {
        let amount = Money::from_whole(100);
        assert_eq!(
            apply_direction(amount, Some("OUTGOING")),
            Money::from_whole(-100)
        );
        assert_eq!(
            apply_direction(Money::from_whole(-100), Some("INBOUND")),
            Money::from_whole(100)
        );
    }

    #[test]
    fn test_apply_direction_unknown_keeps_sign() {
        assert_eq!(
            apply_direction(Money::from_whole(-100), Some("TRANSFER")),
            Money::from_whole(-100)
        );
        assert_eq!(
            apply_direction(Money::from_whole(100), None),
            Money::from_whole(100)
        );
    }

    #[test]
    fn test_normalize_converts_currency() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let mut row = raw_row("2025-10-03 09:15:00", "100.00");
        row.currency = Some("EUR".to_string());
        row.direction = Some("OUT".to_string());
        row.counterparty = Some("EDEKA".to_string());

        match normalizer.normalize(&row) {
            RowOutcome::Kept(txn) => {
                assert_eq!(txn.raw_amount, Money::from_whole(-100));
                assert_eq!(txn.currency, "EUR");
                assert_eq!(txn.amount_reporting, Money::from_whole(-744));
                assert_eq!(txn.category, "Trip");
            }
            other => panic!("expected kept row, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_missing_currency_uses_reporting() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let row = raw_row("2025-10-03", "-125.50");
        match normalizer.normalize(&row) {
            RowOutcome::Kept(txn) => {
                assert_eq!(txn.currency, "DKK");
                assert_eq!(txn.amount_reporting, Money::from_minor(-12_550));
            }
            other => panic!("expected kept row, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_unknown_currency_keeps_amount() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let mut row = raw_row("2025-10-03", "-50.00");
        row.currency = Some("SEK".to_string());

        match normalizer.normalize(&row) {
            RowOutcome::Kept(txn) => {
                assert_eq!(txn.currency, "SEK");
                assert_eq!(txn.amount_reporting, Money::from_whole(-50));
            }
            other => panic!("expected kept row, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_missing_counterparty() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let row = raw_row("2025-10-03", "-10.00");
        match normalizer.normalize(&row) {
            RowOutcome::Kept(txn) => {
                assert_eq!(txn.counterparty, "");
                assert_eq!(txn.category, "no-category");
            }
            other => panic!("expected kept row, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_drops_cancelled() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let mut row = raw_row("2025-10-03", "-10.00");
        row.status = Some("CANCELLED".to_string());
        assert_eq!(normalizer.normalize(&row), RowOutcome::Cancelled);
    }

    #[test]
    fn test_normalize_classifies_bad_rows() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let row = raw_row("not a date", "-10.00");
        assert_eq!(normalizer.normalize(&row), RowOutcome::BadDate);

        let row = raw_row("2025-10-03", "ten kroner");
        assert_eq!(normalizer.normalize(&row), RowOutcome::BadAmount);
    }

    #[test]
    fn test_cancelled_wins_over_bad_fields() {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let normalizer = Normalizer::new(&settings, &rules);

        let mut row = raw_row("not a date", "garbage");
        row.status = Some("Canceled".to_string());
        assert_eq!(normalizer.normalize(&row), RowOutcome::Cancelled);
    }
}
