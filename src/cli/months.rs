//! CLI command for the recent-months summary

use std::io;
use std::path::Path;

use clap::Args;

use crate::config::{CategoryRuleSet, Settings};
use crate::error::KassebogResult;
use crate::reports::MonthsReport;

/// Arguments for the monthly summary
#[derive(Args, Debug)]
pub struct MonthsArgs {
    /// Number of calendar months to show, ending at the newest data month
    #[arg(short, long, default_value = "4")]
    pub count: usize,

    /// Emit CSV instead of the terminal layout
    #[arg(long)]
    pub csv: bool,
}

/// Handle the months command
pub fn handle_months_command(
    settings: &Settings,
    rules: &CategoryRuleSet,
    file: Option<&Path>,
    args: MonthsArgs,
) -> KassebogResult<()> {
    let result = super::load(settings, rules, file)?;
    if super::report_if_empty(&result) {
        return Ok(());
    }

    let report = MonthsReport::generate(settings, &result.transactions, args.count);

    if args.csv {
        report.export_csv(&mut io::stdout())?;
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}
