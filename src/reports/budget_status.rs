//! Budget Report
//!
//! Renders one month's budget reconciliation: the monthly limits with
//! carry-over applied, the cumulative weekly view, and the per-month
//! carry-over detail.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::KassebogResult;
use crate::models::{Money, MonthKey, TransactionSet};
use crate::services::{BudgetLedger, BudgetStatus};

/// Budget reconciliation report for one month
#[derive(Debug, Clone)]
pub struct BudgetReport {
    /// The reconciled figures
    pub status: BudgetStatus,
    /// Currency code all amounts are expressed in
    pub reporting_currency: String,
}

impl BudgetReport {
    /// Generate the report for a month
    pub fn generate(
        settings: &Settings,
        transactions: &TransactionSet,
        month: MonthKey,
        user_limit: Option<Money>,
        reference: Option<NaiveDate>,
    ) -> Self {
        let ledger = BudgetLedger::new(settings, transactions);
        Self {
            status: ledger.status(month, user_limit, reference),
            reporting_currency: settings.reporting_currency.clone(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let s = &self.status;
        let code = &self.reporting_currency;
        let mut output = String::new();

        output.push_str(&format!("Budget Report: {}\n", s.month));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        output.push_str("Monthly\n");
        output.push_str(&row("Base limit", &s.base_limit.format_with_code(code)));
        if s.user_limit != s.base_limit {
            output.push_str(&row("User limit", &s.user_limit.format_with_code(code)));
        }
        output.push_str(&row(
            "Carry-over",
            &format!("{}{}", signed(s.carry_over, code), carry_tag(s.carry_over)),
        ));
        output.push_str(&row(
            "Adjusted limit",
            &s.adjusted_limit.format_with_code(code),
        ));
        output.push_str(&row("Net spend", &s.month_net.format_with_code(code)));
        output.push_str(&row("Remaining", &s.month_remaining.format_with_code(code)));
        output.push('\n');

        output.push_str(&format!(
            "Weekly (reference {}, week {} of the month)\n",
            s.reference_date, s.weeks_elapsed
        ));
        output.push_str(&row("Weekly limit", &s.weekly_limit.format_with_code(code)));
        output.push_str(&row(
            "Allowance to date",
            &s.weekly_allowance.format_with_code(code),
        ));
        output.push_str(&row(
            "Net spend to date",
            &s.week_net.format_with_code(code),
        ));
        output.push_str(&row("Remaining", &s.week_remaining.format_with_code(code)));
        output.push_str(&row(
            &format!("Week of {}", s.week_start),
            &s.current_week_net.format_with_code(code),
        ));

        if !s.carry_trail.is_empty() {
            output.push('\n');
            output.push_str("Carry-over detail\n");
            output.push_str(&"-".repeat(72));
            output.push('\n');
            output.push_str(&format!(
                "  {:<10} {:>18} {:>18} {:>18}\n",
                "Month", "Net spend", "Limit", "Delta"
            ));
            for entry in &s.carry_trail {
                output.push_str(&format!(
                    "  {:<10} {:>18} {:>18} {:>18}\n",
                    entry.month.to_string(),
                    entry.net.format_with_code(code),
                    entry.limit.format_with_code(code),
                    signed(entry.delta, code),
                ));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KassebogResult<()> {
        let s = &self.status;
        writeln!(
            writer,
            "Month,Base Limit,User Limit,Carry Over,Adjusted Limit,Month Net,\
             Month Remaining,Reference Date,Weeks Elapsed,Weekly Limit,\
             Weekly Allowance,Week Net,Week Remaining"
        )?;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            s.month,
            s.base_limit,
            s.user_limit,
            s.carry_over,
            s.adjusted_limit,
            s.month_net,
            s.month_remaining,
            s.reference_date,
            s.weeks_elapsed,
            s.weekly_limit,
            s.weekly_allowance,
            s.week_net,
            s.week_remaining
        )?;
        Ok(())
    }
}

fn row(label: &str, value: &str) -> String {
    format!("  {:<20} {:>24}\n", label, value)
}

/// Format with an explicit plus on positive amounts
fn signed(amount: Money, code: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with_code(code))
    } else {
        amount.format_with_code(code)
    }
}

fn carry_tag(carry_over: Money) -> &'static str {
    if carry_over.is_positive() {
        " (deficit)"
    } else if carry_over.is_negative() {
        " (surplus)"
    } else {
        ""
    }
}
