//! Column detection for transaction exports
//!
//! Bank exports name their columns inconsistently, so each logical field
//! has a prioritized list of candidate header names. The first candidate
//! that appears among the (whitespace-trimmed) headers wins; exact,
//! case-sensitive comparison. Date and amount are required, everything
//! else degrades gracefully when absent.

use csv::StringRecord;

use crate::error::{KassebogError, KassebogResult};

pub const DATE_CANDIDATES: &[&str] = &[
    "Created on",
    "Finished on",
    "created_on",
    "finished_on",
    "date",
    "Date",
];

pub const AMOUNT_CANDIDATES: &[&str] =
    &["Target amount (after fees)", "Amount", "amount", "Value"];

pub const CURRENCY_CANDIDATES: &[&str] = &["Target currency", "Currency", "currency"];

pub const DIRECTION_CANDIDATES: &[&str] = &["Direction", "direction", "Type", "type"];

pub const COUNTERPARTY_CANDIDATES: &[&str] = &[
    "Target name",
    "Merchant",
    "merchant",
    "Counterparty",
    "counterparty",
    "Name",
];

pub const STATUS_CANDIDATES: &[&str] = &["Status", "status", "State", "state"];

pub const ID_CANDIDATES: &[&str] = &["ID", "Id", "id", "Transaction ID"];

pub const REFERENCE_CANDIDATES: &[&str] = &[
    "Reference",
    "reference",
    "Payment reference",
    "Description",
    "description",
];

/// Resolved column indexes for one export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub currency: Option<usize>,
    pub direction: Option<usize>,
    pub counterparty: Option<usize>,
    pub status: Option<usize>,
    pub transaction_id: Option<usize>,
    pub reference: Option<usize>,
}

impl ColumnMap {
    /// Detect the column layout from a header record
    ///
    /// # Errors
    ///
    /// Returns `KassebogError::MissingColumn` when no date or no amount
    /// candidate is present.
    pub fn detect(headers: &StringRecord) -> KassebogResult<Self> {
        let date = find_column(headers, DATE_CANDIDATES)
            .ok_or_else(|| KassebogError::missing_column(DATE_CANDIDATES))?;
        let amount = find_column(headers, AMOUNT_CANDIDATES)
            .ok_or_else(|| KassebogError::missing_column(AMOUNT_CANDIDATES))?;

        Ok(Self {
            date,
            amount,
            currency: find_column(headers, CURRENCY_CANDIDATES),
            direction: find_column(headers, DIRECTION_CANDIDATES),
            counterparty: find_column(headers, COUNTERPARTY_CANDIDATES),
            status: find_column(headers, STATUS_CANDIDATES),
            transaction_id: find_column(headers, ID_CANDIDATES),
            reference: find_column(headers, REFERENCE_CANDIDATES),
        })
    }

    /// Field-by-field view of the detection result for diagnostics
    pub fn describe(&self, headers: &StringRecord) -> Vec<(&'static str, Option<String>)> {
        let name = |idx: Option<usize>| {
            idx.and_then(|i| headers.get(i)).map(|h| h.trim().to_string())
        };
        vec![
            ("date", name(Some(self.date))),
            ("amount", name(Some(self.amount))),
            ("currency", name(self.currency)),
            ("direction", name(self.direction)),
            ("counterparty", name(self.counterparty)),
            ("status", name(self.status)),
            ("transaction id", name(self.transaction_id)),
            ("reference", name(self.reference)),
        ]
    }
}

/// First candidate that matches a trimmed header, in candidate priority order
fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = headers.iter().position(|h| h.trim() == *candidate) {
            return Some(idx);
        }
    }
    None
}
