//! Core data models for kassebog
//!
//! This module contains the data structures of the accounting domain:
//! monetary amounts, month keys, and normalized transactions.

pub mod money;
pub mod period;
pub mod transaction;

pub use money::Money;
pub use period::{week_start_monday, MonthKey};
pub use transaction::{Transaction, TransactionSet};
