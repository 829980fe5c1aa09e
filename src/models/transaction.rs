//! Normalized transaction records
//!
//! `Transaction` is the canonical record produced by the ingest pipeline:
//! timestamped in the reporting timezone, signed, converted into the
//! reporting currency, and categorized. `TransactionSet` is the read-only
//! collection the aggregation and ledger layers query. Both are rebuilt
//! from the raw source on every run; nothing here is persisted.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::fmt;

use super::money::Money;
use super::period::MonthKey;

/// A single normalized transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// When the transaction happened, in the reporting timezone
    pub timestamp: DateTime<Tz>,

    /// Signed amount in the original currency
    pub raw_amount: Money,

    /// Original currency code, trimmed and uppercased
    pub currency: String,

    /// Signed amount converted into the reporting currency
    pub amount_reporting: Money,

    /// Merchant or payee name as it appeared in the source
    pub counterparty: String,

    /// Resolved category label, possibly the "no-category" sentinel
    pub category: String,

    /// Source transaction id, when the export carries one
    pub transaction_id: Option<String>,

    /// Free-text payment reference, when the export carries one
    pub reference: Option<String>,
}

impl Transaction {
    /// Calendar date in the reporting timezone
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// The month this transaction falls in
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date())
    }

    /// Check if this is an inflow (positive reporting amount)
    pub fn is_inflow(&self) -> bool {
        self.amount_reporting.is_positive()
    }

    /// Check if this is an outflow (negative reporting amount)
    pub fn is_outflow(&self) -> bool {
        self.amount_reporting.is_negative()
    }

    /// Case-insensitive search across id, reference, and counterparty
    ///
    /// `token` is expected to be uppercase already.
    pub fn narrative_contains(&self, token: &str) -> bool {
        let hit = |s: &str| s.to_uppercase().contains(token);
        self.transaction_id.as_deref().map_or(false, hit)
            || self.reference.as_deref().map_or(false, hit)
            || hit(&self.counterparty)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date().format("%Y-%m-%d"),
            self.counterparty,
            self.amount_reporting,
            self.category
        )
    }
}

/// The full set of normalized transactions for one pipeline run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    /// Wrap a vector of transactions
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterate over all transactions
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Transactions whose local date falls in [start, end], inclusive both ends
    pub fn in_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| t.date() >= start && t.date() <= end)
    }

    /// Distinct months with at least one transaction, ascending
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.transactions.iter().map(|t| t.month()).collect();
        months.sort();
        months.dedup();
        months
    }

    /// Local date of the newest transaction
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.transactions.iter().map(|t| t.date()).max()
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
