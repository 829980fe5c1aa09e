//! Load pipeline
//!
//! End-to-end path from an export file to a [`TransactionSet`]: detect
//! columns, read raw rows, normalize each one, and account for every
//! input row in [`RowStats`]. Bad rows never abort a load; only a
//! missing file, an unreadable header, or an absent date or amount
//! column do.

use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::config::{CategoryRuleSet, Settings};
use crate::error::KassebogResult;
use crate::ingest::{self, ColumnMap, RawExport};
use crate::models::TransactionSet;

use super::normalizer::{Normalizer, RowOutcome};

/// Per-row accounting for one load
///
/// Every data row lands in exactly one bucket, so
/// `total_rows == kept + read_errors + cancelled + bad_date + bad_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowStats {
    pub total_rows: usize,
    pub read_errors: usize,
    pub cancelled: usize,
    pub bad_date: usize,
    pub bad_amount: usize,
    pub kept: usize,
}

impl RowStats {
    /// Rows that did not survive normalization
    pub fn dropped(&self) -> usize {
        self.read_errors + self.cancelled + self.bad_date + self.bad_amount
    }
}

/// A loaded export: the surviving transactions plus row accounting
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub transactions: TransactionSet,
    pub stats: RowStats,
    pub headers: csv::StringRecord,
    pub columns: ColumnMap,
}

/// Runs exports through column detection, normalization and categorization
pub struct Pipeline<'a> {
    settings: &'a Settings,
    rules: &'a CategoryRuleSet,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over settings and category rules
    pub fn new(settings: &'a Settings, rules: &'a CategoryRuleSet) -> Self {
        Self { settings, rules }
    }

    /// Load an export file from disk
    pub fn load_file(&self, path: &Path) -> KassebogResult<LoadResult> {
        info!("Loading transactions from {}", path.display());
        let export = ingest::read_file(path)?;
        Ok(self.process(export))
    }

    /// Load an export from any reader
    pub fn load<R: Read>(&self, reader: R) -> KassebogResult<LoadResult> {
        let export = ingest::read_rows(reader)?;
        Ok(self.process(export))
    }

    fn process(&self, export: RawExport) -> LoadResult {
        let normalizer = Normalizer::new(self.settings, self.rules);

        let mut stats = RowStats {
            total_rows: export.rows.len() + export.read_errors,
            read_errors: export.read_errors,
            ..RowStats::default()
        };
        let mut transactions = Vec::with_capacity(export.rows.len());

        for row in &export.rows {
            match normalizer.normalize(row) {
                RowOutcome::Kept(txn) => transactions.push(txn),
                RowOutcome::Cancelled => stats.cancelled += 1,
                RowOutcome::BadDate => stats.bad_date += 1,
                RowOutcome::BadAmount => stats.bad_amount += 1,
            }
        }
        stats.kept = transactions.len();

        // stable sort keeps file order for equal timestamps
        transactions.sort_by_key(|t| t.timestamp);

        if stats.kept == 0 {
            warn!("No valid rows after parsing date and amount");
        } else {
            info!(
                "Kept {} of {} rows ({} cancelled, {} bad dates, {} bad amounts, {} unreadable)",
                stats.kept,
                stats.total_rows,
                stats.cancelled,
                stats.bad_date,
                stats.bad_amount,
                stats.read_errors
            );
        }

        LoadResult {
            transactions: TransactionSet::new(transactions),
            stats,
            headers: export.headers,
            columns: export.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn load(csv_data: &str) -> LoadResult {
        let settings = Settings::default();
        let rules = CategoryRuleSet::builtin();
        let pipeline = Pipeline::new(&settings, &rules);
        pipeline.load(csv_data.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_full_export() {
        let csv_data = "\
ID,Status,Direction,Created on,Target name,Target amount (after fees),Target currency
TX-1,COMPLETED,OUT,2025-10-03 09:15:00,Netto,125.50,DKK
TX-2,CANCELLED,OUT,2025-10-04 10:00:00,Circle K,400.00,DKK
TX-3,COMPLETED,OUT,2025-10-05 11:00:00,EDEKA,42.00,EUR
TX-4,COMPLETED,IN,2025-10-06 12:00:00,Acme Corp,4000.00,USD";

        let result = load(csv_data);

        assert_eq!(result.stats.total_rows, 4);
        assert_eq!(result.stats.kept, 3);
        assert_eq!(result.stats.cancelled, 1);
        assert_eq!(result.transactions.len(), 3);

        let txns: Vec<_> = result.transactions.iter().collect();
        assert_eq!(txns[0].counterparty, "Netto");
        assert_eq!(txns[0].amount_reporting, Money::from_minor(-12_550));
        assert_eq!(txns[1].counterparty, "EDEKA");
        assert_eq!(txns[1].amount_reporting, Money::from_minor(-31_248));
        assert_eq!(txns[2].counterparty, "Acme Corp");
        assert_eq!(txns[2].amount_reporting, Money::from_whole(25_400));
    }

    #[test]
    fn test_every_row_is_accounted_for() {
        let csv_data = "\
Status,date,Amount,Merchant
COMPLETED,2025-10-03,-10.00,Netto
CANCELLED,2025-10-04,-20.00,Netto
COMPLETED,garbage,-30.00,Netto
COMPLETED,2025-10-05,not a number,Netto
COMPLETED,2025-10-06,-40.00,Netto";

        let stats = load(csv_data).stats;

        assert_eq!(stats.total_rows, 5);
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.bad_date, 1);
        assert_eq!(stats.bad_amount, 1);
        assert_eq!(
            stats.total_rows,
            stats.kept + stats.read_errors + stats.cancelled + stats.bad_date + stats.bad_amount
        );
        assert_eq!(stats.dropped(), 3);
    }

    #[test]
    fn test_load_is_deterministic() {
        let csv_data = "\
date,Amount,Merchant
2025-10-05,-30.00,Netto
2025-10-03,-10.00,Circle K
2025-10-03,-20.00,Aldi";

        let first = load(csv_data);
        let second = load(csv_data);
        assert_eq!(first.transactions, second.transactions);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_transactions_sorted_by_timestamp() {
        let csv_data = "\
date,Amount,Merchant
2025-10-05,-30.00,Netto
2025-10-03,-10.00,Circle K
2025-10-04,-20.00,Aldi";

        let result = load(csv_data);
        let counterparties: Vec<_> = result
            .transactions
            .iter()
            .map(|t| t.counterparty.as_str())
            .collect();
        assert_eq!(counterparties, vec!["Circle K", "Aldi", "Netto"]);
    }

    #[test]
    fn test_empty_export_keeps_nothing() {
        let csv_data = "date,Amount\n";
        let result = load(csv_data);
        assert_eq!(result.stats.total_rows, 0);
        assert_eq!(result.stats.kept, 0);
        assert!(result.transactions.is_empty());
    }
}
