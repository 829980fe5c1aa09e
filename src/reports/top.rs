//! Top Expenses Report
//!
//! The largest expense transactions of one month, largest first, with
//! the original currency shown for converted amounts.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::KassebogResult;
use crate::models::{Money, MonthKey, TransactionSet};
use crate::services::top_expenses;

/// One expense line
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub date: NaiveDate,
    pub counterparty: String,
    pub category: String,
    /// Amount in the reporting currency
    pub amount: Money,
    /// Amount in the original currency
    pub raw_amount: Money,
    pub currency: String,
}

/// Largest expenses of one month
#[derive(Debug, Clone)]
pub struct TopExpensesReport {
    pub month: MonthKey,
    /// Most negative first
    pub rows: Vec<ExpenseRow>,
    /// Total number of outflows in the month
    pub outflow_count: usize,
    /// Currency code the amount column is expressed in
    pub reporting_currency: String,
}

impl TopExpensesReport {
    /// Generate the report for a month, keeping the `count` largest
    pub fn generate(
        settings: &Settings,
        transactions: &TransactionSet,
        month: MonthKey,
        count: usize,
    ) -> Self {
        let mut sorted = top_expenses(
            transactions.in_window(month.first_day(), month.last_day()),
            usize::MAX,
        );
        let outflow_count = sorted.len();
        sorted.truncate(count);

        let rows = sorted
            .into_iter()
            .map(|t| ExpenseRow {
                date: t.date(),
                counterparty: t.counterparty.clone(),
                category: t.category.clone(),
                amount: t.amount_reporting,
                raw_amount: t.raw_amount,
                currency: t.currency.clone(),
            })
            .collect();

        Self {
            month,
            rows,
            outflow_count,
            reporting_currency: settings.reporting_currency.clone(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Top Expenses: {} (showing {} of {}, amounts in {})\n",
            self.month,
            self.rows.len(),
            self.outflow_count,
            self.reporting_currency
        ));
        output.push_str(&"=".repeat(84));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str(&format!("No expenses in {}.\n", self.month));
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>14}  {:<30} {:<16} {}\n",
            "Date", "Amount", "Counterparty", "Category", "Original"
        ));
        output.push_str(&"-".repeat(84));
        output.push('\n');

        for row in &self.rows {
            let original = if row.currency == self.reporting_currency {
                String::new()
            } else {
                row.raw_amount.format_with_code(&row.currency)
            };
            output.push_str(&format!(
                "{:<12} {:>14}  {:<30} {:<16} {}\n",
                row.date.to_string(),
                row.amount.format_grouped(),
                row.counterparty,
                row.category,
                original
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KassebogResult<()> {
        writeln!(
            writer,
            "Date,Amount,Original Amount,Currency,Counterparty,Category"
        )?;
        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                row.date, row.amount, row.raw_amount, row.currency, row.counterparty, row.category
            )?;
        }
        Ok(())
    }
}
