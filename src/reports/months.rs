//! Monthly Summary Report
//!
//! Totals for the last N calendar months ending at the newest data
//! month. Months inside the range without a single transaction are
//! listed as "no data" rather than silently dropped; that distinction
//! mirrors how the carry-over treats them.

use std::io::Write;

use crate::config::Settings;
use crate::error::KassebogResult;
use crate::models::{MonthKey, Transaction, TransactionSet};
use crate::services::{distinct_counterparties, period_totals, PeriodTotals};

/// Aggregates for one month with data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub totals: PeriodTotals,
    /// Number of transactions in the month
    pub transactions: usize,
    /// Number of distinct counterparty names
    pub counterparties: usize,
}

/// One month in the report range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthColumn {
    pub month: MonthKey,
    /// None when the month has no transactions at all
    pub summary: Option<MonthSummary>,
}

/// Summary over the most recent months
#[derive(Debug, Clone)]
pub struct MonthsReport {
    /// Months in ascending order
    pub months: Vec<MonthColumn>,
    /// Currency code all amounts are expressed in
    pub reporting_currency: String,
}

impl MonthsReport {
    /// Generate the report for the `count` calendar months ending at the
    /// newest transaction's month
    ///
    /// An empty transaction set yields an empty report.
    pub fn generate(settings: &Settings, transactions: &TransactionSet, count: usize) -> Self {
        let mut months = Vec::with_capacity(count);

        if let Some(latest) = transactions.latest_date() {
            let mut month = MonthKey::from_date(latest);
            let mut range = Vec::with_capacity(count);
            for _ in 0..count {
                range.push(month);
                month = month.prev();
            }

            for month in range.into_iter().rev() {
                let window: Vec<&Transaction> = transactions
                    .in_window(month.first_day(), month.last_day())
                    .collect();
                let summary = if window.is_empty() {
                    None
                } else {
                    Some(MonthSummary {
                        totals: period_totals(window.iter().copied(), settings),
                        transactions: window.len(),
                        counterparties: distinct_counterparties(window.iter().copied()),
                    })
                };
                months.push(MonthColumn { month, summary });
            }
        }

        Self {
            months,
            reporting_currency: settings.reporting_currency.clone(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Monthly Summary (amounts in {})\n",
            self.reporting_currency
        ));
        output.push_str(&"=".repeat(86));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No transactions.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<9} {:>13} {:>13} {:>13} {:>13} {:>7} {:>10}\n",
            "Month", "Expense", "Refund", "Income", "Net", "Txns", "Merchants"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');

        for column in &self.months {
            match &column.summary {
                Some(summary) => {
                    output.push_str(&format!(
                        "{:<9} {:>13} {:>13} {:>13} {:>13} {:>7} {:>10}\n",
                        column.month.to_string(),
                        summary.totals.gross_expense.format_grouped(),
                        summary.totals.refund.format_grouped(),
                        summary.totals.income.format_grouped(),
                        summary.totals.net().format_grouped(),
                        summary.transactions,
                        summary.counterparties
                    ));
                }
                None => {
                    output.push_str(&format!(
                        "{:<9} {:>13}\n",
                        column.month.to_string(),
                        "no data"
                    ));
                }
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KassebogResult<()> {
        writeln!(
            writer,
            "Month,Gross Expense,Refund,Income,Net,Transactions,Counterparties"
        )?;
        for column in &self.months {
            match &column.summary {
                Some(summary) => writeln!(
                    writer,
                    "{},{},{},{},{},{},{}",
                    column.month,
                    summary.totals.gross_expense,
                    summary.totals.refund,
                    summary.totals.income,
                    summary.totals.net(),
                    summary.transactions,
                    summary.counterparties
                )?,
                None => writeln!(writer, "{},,,,,,", column.month)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use chrono::TimeZone;
    use chrono_tz::Europe::Copenhagen;

    fn txn(y: i32, m: u32, d: u32, whole: i64, counterparty: &str) -> Transaction {
        Transaction {
            timestamp: Copenhagen.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            raw_amount: Money::from_whole(whole),
            currency: "DKK".to_string(),
            amount_reporting: Money::from_whole(whole),
            counterparty: counterparty.to_string(),
            category: "no-category".to_string(),
            transaction_id: None,
            reference: None,
        }
    }

    fn sample_set() -> TransactionSet {
        TransactionSet::new(vec![
            // October: two merchants, November: nothing, December: one
            txn(2025, 10, 3, -1_000, "Netto"),
            txn(2025, 10, 10, -2_000, "Circle K"),
            txn(2025, 10, 12, -500, "Netto"),
            txn(2025, 12, 1, -250, "Aldi"),
        ])
    }

    #[test]
    fn test_generate_covers_calendar_months() {
        let report = MonthsReport::generate(&Settings::default(), &sample_set(), 4);

        let months: Vec<MonthKey> = report.months.iter().map(|c| c.month).collect();
        assert_eq!(
            months,
            vec![
                MonthKey::new(2025, 9),
                MonthKey::new(2025, 10),
                MonthKey::new(2025, 11),
                MonthKey::new(2025, 12),
            ]
        );

        assert!(report.months[0].summary.is_none());
        assert!(report.months[2].summary.is_none());

        let october = report.months[1].summary.as_ref().unwrap();
        assert_eq!(october.totals.gross_expense, Money::from_whole(3_500));
        assert_eq!(october.transactions, 3);
        assert_eq!(october.counterparties, 2);
    }

    #[test]
    fn test_generate_empty_set() {
        let report = MonthsReport::generate(&Settings::default(), &TransactionSet::default(), 4);
        assert!(report.months.is_empty());
        assert!(report.format_terminal().contains("No transactions."));
    }

    #[test]
    fn test_format_terminal_marks_missing_months() {
        let report = MonthsReport::generate(&Settings::default(), &sample_set(), 4);
        let output = report.format_terminal();

        assert!(output.contains("2025-09"));
        assert!(output.contains("no data"));
        assert!(output.contains("3,500.00"));
        assert!(output.contains("250.00"));
    }

    #[test]
    fn test_export_csv() {
        let report = MonthsReport::generate(&Settings::default(), &sample_set(), 4);
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Month,Gross Expense,Refund,Income,Net,Transactions,Counterparties");
        assert_eq!(lines[1], "2025-09,,,,,,");
        assert_eq!(lines[2], "2025-10,3500.00,0.00,0.00,3500.00,3,2");
        assert_eq!(lines[3], "2025-11,,,,,,");
        assert_eq!(lines[4], "2025-12,250.00,0.00,0.00,250.00,1,1");
    }
}
