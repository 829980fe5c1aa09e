//! CSV reading and raw row extraction
//!
//! Reads an export file, detects the column layout, and pulls each record
//! into a [`RawRow`] of trimmed strings. No parsing happens here; the
//! normalizer decides what a value means. Records the csv reader itself
//! cannot decode are counted and skipped rather than failing the run.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{KassebogError, KassebogResult};

use super::columns::ColumnMap;

/// One data record as raw text, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    /// 1-based line number in the file, counting the header as line 1
    pub line: u64,
    pub date: String,
    pub amount: String,
    pub currency: Option<String>,
    pub direction: Option<String>,
    pub counterparty: Option<String>,
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub reference: Option<String>,
}

/// Everything pulled out of one export file
#[derive(Debug, Clone)]
pub struct RawExport {
    /// The header record as it appeared in the file
    pub headers: csv::StringRecord,
    pub columns: ColumnMap,
    pub rows: Vec<RawRow>,
    /// Records the csv reader could not decode at all
    pub read_errors: usize,
}

/// Read an export file from disk
///
/// # Errors
///
/// Returns `NotFound` when the file does not exist, `Csv` when the header
/// cannot be read, and `MissingColumn` when no date or amount column is
/// present.
pub fn read_file(path: &Path) -> KassebogResult<RawExport> {
    if !path.exists() {
        return Err(KassebogError::input_not_found(path.display().to_string()));
    }
    let file = File::open(path)?;
    read_rows(file)
}

/// Read an export from any reader
pub fn read_rows<R: Read>(reader: R) -> KassebogResult<RawExport> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::detect(&headers)?;

    let mut rows = Vec::new();
    let mut read_errors = 0;

    for (idx, result) in csv_reader.records().enumerate() {
        // data rows start on line 2, after the header
        let line = idx as u64 + 2;
        match result {
            Ok(record) => {
                rows.push(RawRow {
                    line,
                    date: field(&record, columns.date),
                    amount: field(&record, columns.amount),
                    currency: opt_field(&record, columns.currency),
                    direction: opt_field(&record, columns.direction),
                    counterparty: opt_field(&record, columns.counterparty),
                    status: opt_field(&record, columns.status),
                    transaction_id: opt_field(&record, columns.transaction_id),
                    reference: opt_field(&record, columns.reference),
                });
            }
            Err(e) => {
                debug!("Skipping unreadable record on line {}: {}", line, e);
                read_errors += 1;
            }
        }
    }

    Ok(RawExport {
        headers,
        columns,
        rows,
        read_errors,
    })
}

fn field(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

fn opt_field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_full_export() {
        let csv_data = "\
ID,Status,Direction,Created on,Target name,Target amount (after fees),Target currency,Reference
TX-1,COMPLETED,OUT,2025-10-03 09:15:00,Netto,125.50,DKK,Groceries week 40
TX-2,COMPLETED,IN,2025-10-05 12:00:00,Acme Corp,30000.00,USD,Salary October";

        let export = read_rows(csv_data.as_bytes()).unwrap();

        assert_eq!(export.rows.len(), 2);
        assert_eq!(export.read_errors, 0);

        let first = &export.rows[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.date, "2025-10-03 09:15:00");
        assert_eq!(first.amount, "125.50");
        assert_eq!(first.currency.as_deref(), Some("DKK"));
        assert_eq!(first.direction.as_deref(), Some("OUT"));
        assert_eq!(first.counterparty.as_deref(), Some("Netto"));
        assert_eq!(first.status.as_deref(), Some("COMPLETED"));
        assert_eq!(first.transaction_id.as_deref(), Some("TX-1"));
        assert_eq!(first.reference.as_deref(), Some("Groceries week 40"));
    }

    #[test]
    fn test_minimal_export_has_no_optional_fields() {
        let csv_data = "\
date,Amount
2025-10-03,125.50";

        let export = read_rows(csv_data.as_bytes()).unwrap();

        assert_eq!(export.rows.len(), 1);
        let row = &export.rows[0];
        assert_eq!(row.date, "2025-10-03");
        assert_eq!(row.amount, "125.50");
        assert_eq!(row.currency, None);
        assert_eq!(row.counterparty, None);
        assert_eq!(row.status, None);
    }

    #[test]
    fn test_values_are_trimmed_and_empties_dropped() {
        let csv_data = "\
date,Amount,Currency,Merchant
 2025-10-03 , 125.50 ,  ,  Netto ";

        let export = read_rows(csv_data.as_bytes()).unwrap();

        let row = &export.rows[0];
        assert_eq!(row.date, "2025-10-03");
        assert_eq!(row.amount, "125.50");
        assert_eq!(row.currency, None);
        assert_eq!(row.counterparty.as_deref(), Some("Netto"));
    }

    #[test]
    fn test_short_rows_yield_empty_required_fields() {
        let csv_data = "\
date,Amount,Currency
2025-10-03
2025-10-04,99.00,DKK";

        let export = read_rows(csv_data.as_bytes()).unwrap();

        assert_eq!(export.rows.len(), 2);
        assert_eq!(export.rows[0].amount, "");
        assert_eq!(export.rows[1].amount, "99.00");
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv_data = "\
Merchant,Currency
Netto,DKK";

        let err = read_rows(csv_data.as_bytes()).unwrap_err();
        assert!(err.is_missing_column());
    }

    #[test]
    fn test_missing_file() {
        let err = read_file(Path::new("/nonexistent/transactions.csv")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_line_numbers_count_from_header() {
        let csv_data = "\
date,Amount
2025-10-03,1.00
2025-10-04,2.00
2025-10-05,3.00";

        let export = read_rows(csv_data.as_bytes()).unwrap();
        let lines: Vec<u64> = export.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }
}
