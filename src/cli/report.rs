//! CLI command for the budget reconciliation report

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use clap::Args;

use crate::config::{CategoryRuleSet, Settings};
use crate::error::{KassebogError, KassebogResult};
use crate::models::Money;
use crate::reports::BudgetReport;

/// Arguments for the budget report
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Month to reconcile (YYYY-MM); defaults to the newest data month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Reference date for the weekly view (YYYY-MM-DD); defaults to the
    /// newest transaction date
    #[arg(short, long)]
    pub date: Option<String>,

    /// Override the month's limit with this amount
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Emit CSV instead of the terminal layout
    #[arg(long)]
    pub csv: bool,
}

/// Handle the report command
pub fn handle_report_command(
    settings: &Settings,
    rules: &CategoryRuleSet,
    file: Option<&Path>,
    args: ReportArgs,
) -> KassebogResult<()> {
    let result = super::load(settings, rules, file)?;
    if super::report_if_empty(&result) {
        return Ok(());
    }

    let month = super::resolve_month(args.month.as_deref(), &result)?;

    let reference = args
        .date
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                KassebogError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
            })
        })
        .transpose()?;

    let user_limit = args
        .limit
        .map(|s| {
            Money::parse(&s).map_err(|e| {
                KassebogError::Validation(format!("Invalid limit amount {:?}: {}", s, e))
            })
        })
        .transpose()?;

    let report = BudgetReport::generate(settings, &result.transactions, month, user_limit, reference);

    if args.csv {
        report.export_csv(&mut io::stdout())?;
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}
