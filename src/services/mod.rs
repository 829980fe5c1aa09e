//! Service layer for Kassebog
//!
//! The service layer turns raw export rows into normalized transactions
//! and derives the aggregate and budget figures the reports present.

pub mod aggregate;
pub mod categorizer;
pub mod ledger;
pub mod normalizer;
pub mod pipeline;

pub use aggregate::{
    distinct_counterparties, expense_by_category, month_totals, period_totals, top_expenses,
    CategoryTotal, PeriodTotals,
};
pub use categorizer::{Categorizer, NO_CATEGORY};
pub use ledger::{BudgetLedger, BudgetStatus, CarryOverEntry};
pub use normalizer::{Normalizer, RowOutcome};
pub use pipeline::{LoadResult, Pipeline, RowStats};
