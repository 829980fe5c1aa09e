//! CLI command for the per-category expense breakdown

use std::io;
use std::path::Path;

use clap::Args;

use crate::config::{CategoryRuleSet, Settings};
use crate::error::KassebogResult;
use crate::reports::CategoryBreakdownReport;

/// Arguments for the category breakdown
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Month to break down (YYYY-MM); defaults to the newest data month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Emit CSV instead of the terminal layout
    #[arg(long)]
    pub csv: bool,
}

/// Handle the categories command
pub fn handle_categories_command(
    settings: &Settings,
    rules: &CategoryRuleSet,
    file: Option<&Path>,
    args: CategoriesArgs,
) -> KassebogResult<()> {
    let result = super::load(settings, rules, file)?;
    if super::report_if_empty(&result) {
        return Ok(());
    }

    let month = super::resolve_month(args.month.as_deref(), &result)?;
    let report = CategoryBreakdownReport::generate(settings, &result.transactions, month);

    if args.csv {
        report.export_csv(&mut io::stdout())?;
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}
