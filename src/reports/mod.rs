//! Reports module for Kassebog
//!
//! Renders the derived figures for the terminal and for CSV export:
//! budget reconciliation, recent-month summaries, category breakdowns,
//! and top expenses.

pub mod budget_status;
pub mod categories;
pub mod months;
pub mod top;

pub use budget_status::BudgetReport;
pub use categories::{CategoryBreakdownReport, CategoryRow};
pub use months::{MonthColumn, MonthSummary, MonthsReport};
pub use top::{ExpenseRow, TopExpensesReport};
