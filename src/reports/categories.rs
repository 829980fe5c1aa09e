//! Category Breakdown Report
//!
//! Per-category expense totals for one month with each category's share
//! of the month's spending.

use std::io::Write;

use crate::config::Settings;
use crate::error::KassebogResult;
use crate::models::{Money, MonthKey, TransactionSet};
use crate::services::expense_by_category;

/// One category's line in the breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    /// Signed outflow sum, always negative
    pub total: Money,
    pub count: usize,
    /// Share of the month's total expense
    pub percentage: f64,
}

/// Expense breakdown for one month
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub month: MonthKey,
    /// Categories, most spending first
    pub rows: Vec<CategoryRow>,
    /// Signed sum over all categories
    pub total_expense: Money,
    /// Number of expense transactions
    pub transaction_count: usize,
    /// Currency code all amounts are expressed in
    pub reporting_currency: String,
}

impl CategoryBreakdownReport {
    /// Generate the breakdown for a month
    pub fn generate(settings: &Settings, transactions: &TransactionSet, month: MonthKey) -> Self {
        let totals =
            expense_by_category(transactions.in_window(month.first_day(), month.last_day()));

        let total_expense: Money = totals.iter().map(|c| c.total).sum();
        let transaction_count = totals.iter().map(|c| c.count).sum();

        let rows = totals
            .into_iter()
            .map(|c| {
                let percentage = if total_expense.is_zero() {
                    0.0
                } else {
                    (c.total.minor().abs() as f64 / total_expense.minor().abs() as f64) * 100.0
                };
                CategoryRow {
                    category: c.category,
                    total: c.total,
                    count: c.count,
                    percentage,
                }
            })
            .collect();

        Self {
            month,
            rows,
            total_expense,
            transaction_count,
            reporting_currency: settings.reporting_currency.clone(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Category Breakdown: {} (amounts in {})\n",
            self.month, self.reporting_currency
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str(&format!("No expenses in {}.\n", self.month));
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>14} {:>7} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<28} {:>14} {:>7} {:>7.1}%\n",
                row.category,
                row.total.format_grouped(),
                row.count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>14} {:>7} {:>7.1}%\n",
            "Total",
            self.total_expense.format_grouped(),
            self.transaction_count,
            100.0
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KassebogResult<()> {
        writeln!(writer, "Month,Category,Amount,Count,Percentage")?;
        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{:.2}",
                self.month, row.category, row.total, row.count, row.percentage
            )?;
        }
        writeln!(
            writer,
            "{},TOTAL,{},{},100.00",
            self.month, self.total_expense, self.transaction_count
        )?;
        Ok(())
    }
}
