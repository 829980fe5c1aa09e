//! Period aggregation
//!
//! Sums a window of transactions into expense, refund and income totals,
//! and provides the per-category and per-counterparty breakdowns the
//! reports build on. The split matters for budgeting: refunds offset
//! spending, income does not, so net spend is gross expense minus
//! refunds only.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::Settings;
use crate::models::{Money, MonthKey, Transaction, TransactionSet};

/// Totals for one date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodTotals {
    /// Sum of outflow magnitudes
    pub gross_expense: Money,
    /// Inflows that offset spending
    pub refund: Money,
    /// Inflows that do not offset spending
    pub income: Money,
}

impl PeriodTotals {
    /// Net spend: gross expense less refunds
    pub fn net(&self) -> Money {
        self.gross_expense - self.refund
    }
}

/// Sum a window of transactions into period totals
///
/// Outflows accumulate as gross expense. Inflows count as income when
/// they arrive in the salary currency or their narrative carries the
/// cashback token, and as refunds otherwise. Zero amounts fall in
/// neither bucket.
pub fn period_totals<'a, I>(transactions: I, settings: &Settings) -> PeriodTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let salary_currency = settings.salary_currency.trim().to_uppercase();
    let cashback_token = settings.cashback_token.trim().to_uppercase();

    let mut totals = PeriodTotals::default();
    for txn in transactions {
        if txn.is_outflow() {
            totals.gross_expense += txn.amount_reporting.abs();
        } else if txn.is_inflow() {
            let is_income = txn.currency == salary_currency
                || (!cashback_token.is_empty() && txn.narrative_contains(&cashback_token));
            if is_income {
                totals.income += txn.amount_reporting;
            } else {
                totals.refund += txn.amount_reporting;
            }
        }
    }
    totals
}

/// Period totals for one calendar month
pub fn month_totals(set: &TransactionSet, month: MonthKey, settings: &Settings) -> PeriodTotals {
    period_totals(set.in_window(month.first_day(), month.last_day()), settings)
}

/// Outflow total and count for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    /// Signed sum of the category's outflows, always negative
    pub total: Money,
    pub count: usize,
}

/// Outflow sums per category, most negative first
///
/// Categories with equal totals keep name order, so the result is
/// deterministic across runs.
pub fn expense_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
    for txn in transactions {
        if txn.is_outflow() {
            let entry = sums.entry(txn.category.as_str()).or_default();
            entry.0 += txn.amount_reporting;
            entry.1 += 1;
        }
    }

    let mut categories: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    categories.sort_by_key(|c| c.total.minor());
    categories
}

/// The `count` largest outflows, most negative first
pub fn top_expenses<'a, I>(transactions: I, count: usize) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut expenses: Vec<&Transaction> = transactions
        .into_iter()
        .filter(|t| t.is_outflow())
        .collect();
    expenses.sort_by_key(|t| t.amount_reporting.minor());
    expenses.truncate(count);
    expenses
}

/// Number of distinct counterparty names in a window
pub fn distinct_counterparties<'a, I>(transactions: I) -> usize
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|t| t.counterparty.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Copenhagen;

    fn txn(day: u32, minor: i64, currency: &str, counterparty: &str) -> Transaction {
        Transaction {
            timestamp: Copenhagen.with_ymd_and_hms(2025, 10, day, 12, 0, 0).unwrap(),
            raw_amount: Money::from_minor(minor),
            currency: currency.to_string(),
            amount_reporting: Money::from_minor(minor),
            counterparty: counterparty.to_string(),
            category: "no-category".to_string(),
            transaction_id: None,
            reference: None,
        }
    }

    #[test]
    fn test_expenses_refunds_and_income_split() {
        let transactions = vec![
            txn(1, -10_000, "DKK", "Netto"),
            txn(2, -15_000, "DKK", "Circle K"),
            txn(3, 3_000, "EUR", "Webshop Refund"),
            txn(4, 2_540_000, "USD", "Acme Corp"),
        ];
        let totals = period_totals(&transactions, &Settings::default());

        assert_eq!(totals.gross_expense, Money::from_whole(250));
        assert_eq!(totals.refund, Money::from_whole(30));
        assert_eq!(totals.income, Money::from_whole(25_400));
        assert_eq!(totals.net(), Money::from_whole(220));
    }

    #[test]
    fn test_cashback_counts_as_income() {
        let mut cashback = txn(5, 5_000, "DKK", "Bank");
        cashback.reference = Some("Monthly cashback payout".to_string());
        let plain = txn(6, 5_000, "DKK", "Webshop");

        let totals = period_totals(vec![&cashback, &plain], &Settings::default());
        assert_eq!(totals.income, Money::from_whole(50));
        assert_eq!(totals.refund, Money::from_whole(50));
    }

    #[test]
    fn test_salary_currency_counts_as_income() {
        let salary = txn(1, 100_000, "USD", "Employer");
        let totals = period_totals(vec![&salary], &Settings::default());
        assert_eq!(totals.income, Money::from_whole(1_000));
        assert_eq!(totals.refund, Money::zero());
    }

    #[test]
    fn test_zero_amounts_fall_in_no_bucket() {
        let totals = period_totals(vec![&txn(1, 0, "DKK", "Noop")], &Settings::default());
        assert_eq!(totals, PeriodTotals::default());
    }

    #[test]
    fn test_month_totals_windows_by_calendar_month() {
        let mut nov = txn(1, -7_000, "DKK", "Netto");
        nov.timestamp = Copenhagen.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap();

        let set = TransactionSet::new(vec![
            txn(1, -10_000, "DKK", "Netto"),
            txn(31, -5_000, "DKK", "Aldi"),
            nov,
        ]);
        let settings = Settings::default();

        let oct = month_totals(&set, MonthKey::new(2025, 10), &settings);
        assert_eq!(oct.gross_expense, Money::from_whole(150));

        let nov = month_totals(&set, MonthKey::new(2025, 11), &settings);
        assert_eq!(nov.gross_expense, Money::from_whole(70));
    }

    #[test]
    fn test_expense_by_category_most_negative_first() {
        let mut groceries_a = txn(1, -10_000, "DKK", "Netto");
        groceries_a.category = "Groceries".to_string();
        let mut groceries_b = txn(2, -5_000, "DKK", "Aldi");
        groceries_b.category = "Groceries".to_string();
        let mut fuel = txn(3, -40_000, "DKK", "Circle K");
        fuel.category = "Fuel".to_string();
        let refund = txn(4, 2_000, "DKK", "Webshop");

        let breakdown = expense_by_category(vec![&groceries_a, &groceries_b, &fuel, &refund]);
        assert_eq!(
            breakdown,
            vec![
                CategoryTotal {
                    category: "Fuel".to_string(),
                    total: Money::from_whole(-400),
                    count: 1,
                },
                CategoryTotal {
                    category: "Groceries".to_string(),
                    total: Money::from_whole(-150),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_top_expenses() {
        let transactions = vec![
            txn(1, -10_000, "DKK", "Netto"),
            txn(2, -40_000, "DKK", "Circle K"),
            txn(3, 99_000, "DKK", "Refund"),
            txn(4, -25_000, "DKK", "Aldi"),
        ];
        let top = top_expenses(&transactions, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].counterparty, "Circle K");
        assert_eq!(top[1].counterparty, "Aldi");
    }

    #[test]
    fn test_distinct_counterparties() {
        let transactions = vec![
            txn(1, -100, "DKK", "Netto"),
            txn(2, -200, "DKK", "Netto"),
            txn(3, -300, "DKK", "Aldi"),
        ];
        assert_eq!(distinct_counterparties(&transactions), 2);
    }
}
