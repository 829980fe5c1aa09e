//! Budget ledger
//!
//! Reconciles a month of net spend against its configured limit, folding
//! in the carry-over of surplus or deficit accumulated since the epoch
//! month. Everything here is a pure function of the transaction set and
//! the settings, recomputed on every invocation; nothing is persisted.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Settings;
use crate::models::{week_start_monday, Money, MonthKey, TransactionSet};

use super::aggregate::{month_totals, period_totals};

/// Weeks-per-month constant for deriving a weekly limit
const WEEKS_PER_MONTH: f64 = 4.33;

/// One month's contribution to the carry-over balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarryOverEntry {
    pub month: MonthKey,
    pub net: Money,
    pub limit: Money,
    /// `net - limit`: positive means a deficit, negative a surplus
    pub delta: Money,
}

/// Full budget reconciliation for one month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub month: MonthKey,
    /// Limit from the monthly table, or the configured default
    pub base_limit: Money,
    /// Limit the month reconciles against before carry-over
    pub user_limit: Money,
    /// Accumulated delta since the epoch month
    pub carry_over: Money,
    /// `user_limit - carry_over`
    pub adjusted_limit: Money,
    /// Net spend over the whole month
    pub month_net: Money,
    /// `adjusted_limit - month_net`
    pub month_remaining: Money,
    /// Date the weekly view is anchored on
    pub reference_date: NaiveDate,
    /// Weeks of the month elapsed through the reference date, 1-based
    pub weeks_elapsed: i64,
    pub weekly_limit: Money,
    /// `weekly_limit * weeks_elapsed`
    pub weekly_allowance: Money,
    /// Cumulative net spend from the 1st through the reference date
    ///
    /// The weekly view compares this against the accumulated allowance;
    /// it is a finer-grained cut of the monthly budget, not a separate
    /// pool that resets each week.
    pub week_net: Money,
    /// `weekly_allowance - week_net`
    pub week_remaining: Money,
    /// Monday of the week containing the reference date
    pub week_start: NaiveDate,
    /// Net spend inside the reference week only, for display
    pub current_week_net: Money,
    /// Months that contributed to the carry-over, oldest first
    pub carry_trail: Vec<CarryOverEntry>,
}

/// Computes budget reconciliations over a transaction set
pub struct BudgetLedger<'a> {
    settings: &'a Settings,
    transactions: &'a TransactionSet,
}

impl<'a> BudgetLedger<'a> {
    /// Create a ledger over settings and transactions
    pub fn new(settings: &'a Settings, transactions: &'a TransactionSet) -> Self {
        Self {
            settings,
            transactions,
        }
    }

    /// Carry-over accumulated over the months from the epoch up to,
    /// not including, the target month
    ///
    /// Each month in range contributes `delta = net - base_limit`. Months
    /// without a single transaction are skipped as "no data" rather than
    /// counted as zero spend. Targets at or before the epoch see an empty
    /// range and zero carry-over.
    pub fn carry_over(&self, target: MonthKey) -> (Money, Vec<CarryOverEntry>) {
        let epoch = self.settings.carry_over_start;
        let mut total = Money::zero();
        let mut trail = Vec::new();

        for month in MonthKey::range(epoch, target) {
            if !self.transactions.iter().any(|t| month.contains(t.date())) {
                debug!("Skipping {} in carry-over: no transactions", month);
                continue;
            }

            let net = month_totals(self.transactions, month, self.settings).net();
            let limit = self.settings.monthly_limit(month);
            let delta = net - limit;
            total += delta;
            trail.push(CarryOverEntry {
                month,
                net,
                limit,
                delta,
            });
        }

        (total, trail)
    }

    /// Reconcile one month against its limits
    ///
    /// `user_limit` defaults to the month's base limit. The reference
    /// date anchors the weekly view; it defaults to the newest
    /// transaction date and is clamped into the target month.
    pub fn status(
        &self,
        month: MonthKey,
        user_limit: Option<Money>,
        reference: Option<NaiveDate>,
    ) -> BudgetStatus {
        let base_limit = self.settings.monthly_limit(month);
        let user_limit = user_limit.unwrap_or(base_limit);
        let (carry_over, carry_trail) = self.carry_over(month);
        let adjusted_limit = user_limit - carry_over;

        let month_net = month_totals(self.transactions, month, self.settings).net();
        let month_remaining = adjusted_limit - month_net;

        let reference_date = reference
            .or_else(|| self.transactions.latest_date())
            .unwrap_or_else(|| month.first_day())
            .clamp(month.first_day(), month.last_day());
        let weeks_elapsed = month.weeks_elapsed(reference_date);

        let weekly_limit = match self.settings.weekly_limit {
            Some(limit) => limit,
            None => user_limit.div_f64(WEEKS_PER_MONTH),
        };
        let weekly_allowance = weekly_limit * weeks_elapsed;

        let week_net = period_totals(
            self.transactions.in_window(month.first_day(), reference_date),
            self.settings,
        )
        .net();
        let week_remaining = weekly_allowance - week_net;

        // the current week may reach back into the previous month
        let week_start = week_start_monday(reference_date);
        let current_week_net = period_totals(
            self.transactions.in_window(week_start, reference_date),
            self.settings,
        )
        .net();

        BudgetStatus {
            month,
            base_limit,
            user_limit,
            carry_over,
            adjusted_limit,
            month_net,
            month_remaining,
            reference_date,
            weeks_elapsed,
            weekly_limit,
            weekly_allowance,
            week_net,
            week_remaining,
            week_start,
            current_week_net,
            carry_trail,
        }
    }
}
