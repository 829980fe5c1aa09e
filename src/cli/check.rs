//! CLI command for ingest diagnostics
//!
//! Shows what the pipeline made of an export without producing figures:
//! which headers mapped to which logical fields, how every row was
//! accounted for, which currencies appeared (and which of those have no
//! configured rate), and the date span of the surviving data.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{CategoryRuleSet, Settings};
use crate::error::KassebogResult;
use crate::services::NO_CATEGORY;

/// Handle the check command
pub fn handle_check_command(
    settings: &Settings,
    rules: &CategoryRuleSet,
    file: Option<&Path>,
) -> KassebogResult<()> {
    let path = super::resolve_input(settings, file);
    let result = super::load(settings, rules, file)?;
    let stats = &result.stats;

    println!("Ingest check: {}", path.display());
    println!("{}", "=".repeat(60));

    println!("Detected columns");
    for (field, header) in result.columns.describe(&result.headers) {
        match header {
            Some(name) => println!("  {:<16} {}", field, name),
            None => println!("  {:<16} (not present)", field),
        }
    }

    println!();
    println!("Rows");
    println!("  {:<16} {}", "total", stats.total_rows);
    println!("  {:<16} {}", "kept", stats.kept);
    println!("  {:<16} {}", "cancelled", stats.cancelled);
    println!("  {:<16} {}", "bad date", stats.bad_date);
    println!("  {:<16} {}", "bad amount", stats.bad_amount);
    println!("  {:<16} {}", "unreadable", stats.read_errors);

    if super::report_if_empty(&result) {
        return Ok(());
    }

    let currencies: BTreeSet<&str> = result
        .transactions
        .iter()
        .map(|t| t.currency.as_str())
        .collect();
    println!();
    println!("Currencies (reporting in {})", settings.reporting_currency);
    for code in currencies {
        match settings.rate(code) {
            Some(rate) => println!("  {:<16} rate {}", code, rate),
            None => println!("  {:<16} no configured rate, converting 1:1", code),
        }
    }

    let uncategorized = result
        .transactions
        .iter()
        .filter(|t| t.category == NO_CATEGORY)
        .count();
    let earliest = result.transactions.iter().map(|t| t.date()).min();
    let latest = result.transactions.latest_date();

    println!();
    println!("Data");
    if let (Some(earliest), Some(latest)) = (earliest, latest) {
        println!("  {:<16} {} to {}", "date span", earliest, latest);
    }
    println!("  {:<16} {}", "months", result.transactions.months().len());
    println!("  {:<16} {} of {}", "uncategorized", uncategorized, stats.kept);

    Ok(())
}
