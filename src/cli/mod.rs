//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod categories;
pub mod check;
pub mod months;
pub mod report;
pub mod top;

pub use categories::{handle_categories_command, CategoriesArgs};
pub use check::handle_check_command;
pub use months::{handle_months_command, MonthsArgs};
pub use report::{handle_report_command, ReportArgs};
pub use top::{handle_top_command, TopArgs};

use std::path::{Path, PathBuf};

use crate::config::{CategoryRuleSet, Settings};
use crate::error::{KassebogError, KassebogResult};
use crate::models::MonthKey;
use crate::services::{LoadResult, Pipeline};

/// The export path a command should read: the --file override, else the
/// configured default
pub(crate) fn resolve_input(settings: &Settings, file: Option<&Path>) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| settings.csv_path.clone())
}

/// Run the pipeline over the resolved export file
pub(crate) fn load(
    settings: &Settings,
    rules: &CategoryRuleSet,
    file: Option<&Path>,
) -> KassebogResult<LoadResult> {
    let path = resolve_input(settings, file);
    Pipeline::new(settings, rules).load_file(&path)
}

/// Print the empty-result notice when nothing survived the load
///
/// Distinguishes an export with no data rows from one where every row
/// was filtered out. Returns true when the caller has nothing to report
/// on and should stop.
pub(crate) fn report_if_empty(result: &LoadResult) -> bool {
    if !result.transactions.is_empty() {
        return false;
    }
    if result.stats.total_rows == 0 {
        println!("The export contains no transactions.");
    } else {
        println!(
            "No usable transactions: all {} rows were filtered out \
             ({} cancelled, {} bad dates, {} bad amounts, {} unreadable).",
            result.stats.total_rows,
            result.stats.cancelled,
            result.stats.bad_date,
            result.stats.bad_amount,
            result.stats.read_errors
        );
    }
    true
}

/// Parse a --month argument, defaulting to the newest data month
pub(crate) fn resolve_month(month: Option<&str>, result: &LoadResult) -> KassebogResult<MonthKey> {
    match month {
        Some(s) => MonthKey::parse(s).map_err(|e| {
            KassebogError::Validation(format!("{}. Use YYYY-MM (e.g., 2025-11)", e))
        }),
        None => result
            .transactions
            .latest_date()
            .map(MonthKey::from_date)
            .ok_or_else(|| KassebogError::Validation("No data to pick a month from".into())),
    }
}
