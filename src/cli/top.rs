//! CLI command for the largest expenses of a month

use std::io;
use std::path::Path;

use clap::Args;

use crate::config::{CategoryRuleSet, Settings};
use crate::error::KassebogResult;
use crate::reports::TopExpensesReport;

/// Arguments for the top expenses listing
#[derive(Args, Debug)]
pub struct TopArgs {
    /// Month to list (YYYY-MM); defaults to the newest data month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Number of expenses to show
    #[arg(short, long, default_value = "10")]
    pub count: usize,

    /// Emit CSV instead of the terminal layout
    #[arg(long)]
    pub csv: bool,
}

/// Handle the top command
pub fn handle_top_command(
    settings: &Settings,
    rules: &CategoryRuleSet,
    file: Option<&Path>,
    args: TopArgs,
) -> KassebogResult<()> {
    let result = super::load(settings, rules, file)?;
    if super::report_if_empty(&result) {
        return Ok(());
    }

    let month = super::resolve_month(args.month.as_deref(), &result)?;
    let report = TopExpensesReport::generate(settings, &result.transactions, month, args.count);

    if args.csv {
        report.export_csv(&mut io::stdout())?;
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}
