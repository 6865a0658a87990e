// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived metrics over finance records.
//!
//! Every function here is pure: inputs are borrowed snapshots, outputs are
//! freshly built values, and nothing is cached between calls. Empty inputs
//! produce zero or empty results rather than errors.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, Category, Expense, Goal, Income, IncomeSource, RecordId};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

const MS_PER_DAY: i64 = 86_400_000;
const CAUTION_PCT: i64 = 50;
const CRITICAL_PCT: i64 = 75;
const AT_RISK_DAYS: i64 = 30;
const AT_RISK_PCT: i64 = 80;

/// Adds without panicking; totals past `Decimal::MAX` stay pinned there.
fn total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sums `amount` per distinct `key`. Keys absent from `records` are absent
/// from the result.
pub fn sum_by_key<T, K, FK, FA>(records: &[T], key: FK, amount: FA) -> HashMap<K, Decimal>
where
    K: Eq + Hash,
    FK: Fn(&T) -> K,
    FA: Fn(&T) -> Decimal,
{
    let mut totals = HashMap::new();
    for r in records {
        let slot = totals.entry(key(r)).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(amount(r));
    }
    totals
}

pub fn expenses_by_category(expenses: &[Expense]) -> HashMap<Category, Decimal> {
    sum_by_key(expenses, |e| e.category, |e| e.amount)
}

pub fn incomes_by_source(incomes: &[Income]) -> HashMap<IncomeSource, Decimal> {
    sum_by_key(incomes, |i| i.source, |i| i.amount)
}

/// Largest total first; ties ordered by key.
pub fn ranked<K: Ord>(totals: HashMap<K, Decimal>) -> Vec<(K, Decimal)> {
    let mut items: Vec<_> = totals.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

/// Expenses whose calendar day falls in `[from, to]`; open ends are unbounded.
pub fn expenses_in_range(
    expenses: &[Expense],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| {
            let day = e.date.date_naive();
            from.is_none_or(|f| day >= f) && to.is_none_or(|t| day <= t)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
}

pub fn overview_totals(incomes: &[Income], expenses: &[Expense]) -> OverviewTotals {
    let total_income = total(incomes.iter().map(|i| i.amount));
    let total_expense = total(expenses.iter().map(|e| e.amount));
    OverviewTotals {
        total_income,
        total_expense,
        net_savings: total_income.saturating_sub(total_expense),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    Healthy,
    Caution,
    Critical,
    Exceeded,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetHealth::Healthy => "healthy",
            BudgetHealth::Caution => "caution",
            BudgetHealth::Critical => "critical",
            BudgetHealth::Exceeded => "exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget_id: RecordId,
    pub category: Category,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// `spent / budgeted * 100`, or zero when nothing was budgeted.
    pub percentage: Decimal,
    pub health: BudgetHealth,
}

/// Percent of `part` in `whole`; `None` when `whole` is not positive. A
/// ratio too large to represent reads as `Decimal::MAX`.
fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole <= Decimal::ZERO {
        return None;
    }
    let pct = part
        .checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX);
    Some(pct)
}

fn health(remaining: Decimal, percentage: Decimal) -> BudgetHealth {
    if remaining < Decimal::ZERO {
        BudgetHealth::Exceeded
    } else if percentage > Decimal::from(CRITICAL_PCT) {
        BudgetHealth::Critical
    } else if percentage > Decimal::from(CAUTION_PCT) {
        BudgetHealth::Caution
    } else {
        BudgetHealth::Healthy
    }
}

/// Spending against a single budget: expenses of the same category whose
/// calendar day lies inside the inclusive `[start_date, end_date]` window.
pub fn status_for(budget: &Budget, expenses: &[Expense]) -> BudgetStatus {
    let in_window = expenses_in_range(
        expenses,
        Some(budget.start_date.date_naive()),
        Some(budget.end_date.date_naive()),
    );
    let spent = total(
        in_window
            .iter()
            .filter(|e| e.category == budget.category)
            .map(|e| e.amount),
    );
    let remaining = budget.amount.saturating_sub(spent);
    let percentage = percent_of(spent, budget.amount).unwrap_or(Decimal::ZERO);
    BudgetStatus {
        budget_id: budget.id.clone(),
        category: budget.category,
        start_date: budget.start_date,
        end_date: budget.end_date,
        budgeted: budget.amount,
        spent,
        remaining,
        percentage,
        health: health(remaining, percentage),
    }
}

/// Status of every budget keyed by budget id. Budgets are evaluated
/// independently, so overlapping budgets of one category each count the
/// same expense.
pub fn budget_status(budgets: &[Budget], expenses: &[Expense]) -> BTreeMap<RecordId, BudgetStatus> {
    budgets
        .iter()
        .map(|b| (b.id.clone(), status_for(b, expenses)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Achieved,
    AtRisk,
    OnTrack,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Achieved => "achieved",
            GoalStatus::AtRisk => "at-risk",
            GoalStatus::OnTrack => "on-track",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: RecordId,
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub remaining_amount: Decimal,
    /// Clamped to 100.
    pub percentage: Decimal,
    /// Whole days until the target date, rounded up; negative when overdue.
    pub days_remaining: i64,
    pub status: GoalStatus,
}

/// `ceil(a / b)` for positive `b`.
fn div_ceil(a: i64, b: i64) -> i64 {
    -((-a).div_euclid(b))
}

pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    div_ceil((target - now).num_milliseconds(), MS_PER_DAY)
}

pub fn progress_for(goal: &Goal, now: DateTime<Utc>) -> GoalProgress {
    // A non-positive target has nothing left to save.
    let percentage = percent_of(goal.saved_amount, goal.target_amount)
        .map(|p| p.min(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED);
    let days_remaining = days_until(goal.target_date, now);
    let status = if percentage >= Decimal::ONE_HUNDRED {
        GoalStatus::Achieved
    } else if days_remaining <= AT_RISK_DAYS && percentage < Decimal::from(AT_RISK_PCT) {
        GoalStatus::AtRisk
    } else {
        GoalStatus::OnTrack
    };
    GoalProgress {
        goal_id: goal.id.clone(),
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        saved_amount: goal.saved_amount,
        remaining_amount: goal.target_amount.saturating_sub(goal.saved_amount),
        percentage,
        days_remaining,
        status,
    }
}

/// Progress of each goal, in input order.
pub fn goal_progress(goals: &[Goal], now: DateTime<Utc>) -> Vec<GoalProgress> {
    goals.iter().map(|g| progress_for(g, now)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// An income or expense tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub id: RecordId,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    /// Source for incomes, category for expenses.
    pub label: String,
}

impl TransactionEntry {
    /// Amount with the sign of its effect on savings.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Incomes then expenses, stably sorted newest first; equal dates keep that
/// relative order.
pub fn timeline(incomes: &[Income], expenses: &[Expense]) -> Vec<TransactionEntry> {
    let mut all: Vec<TransactionEntry> = incomes
        .iter()
        .map(|i| TransactionEntry {
            kind: TransactionKind::Income,
            id: i.id.clone(),
            description: i.description.clone(),
            amount: i.amount,
            date: i.date,
            label: i.source.to_string(),
        })
        .chain(expenses.iter().map(|e| TransactionEntry {
            kind: TransactionKind::Expense,
            id: e.id.clone(),
            description: e.description.clone(),
            amount: e.amount,
            date: e.date,
            label: e.category.to_string(),
        }))
        .collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all
}

pub fn recent_transactions(
    incomes: &[Income],
    expenses: &[Expense],
    limit: usize,
) -> Vec<TransactionEntry> {
    let mut all = timeline(incomes, expenses);
    all.truncate(limit);
    all
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Income and expense per calendar month, oldest month first.
pub fn monthly_cashflow(incomes: &[Income], expenses: &[Expense]) -> Vec<MonthlyFlow> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for i in incomes {
        let slot = map
            .entry(i.date.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        slot.0 = slot.0.saturating_add(i.amount);
    }
    for e in expenses {
        let slot = map
            .entry(e.date.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        slot.1 = slot.1.saturating_add(e.amount);
    }
    map.into_iter()
        .map(|(month, (income, expense))| MonthlyFlow {
            month,
            income,
            expense,
            net: income.saturating_sub(expense),
        })
        .collect()
}

/// Everything the dashboard shows, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub totals: OverviewTotals,
    pub expenses_by_category: Vec<(Category, Decimal)>,
    pub recent: Vec<TransactionEntry>,
    pub budgets: Vec<BudgetStatus>,
    pub goals: Vec<GoalProgress>,
}

pub fn dashboard(
    incomes: &[Income],
    expenses: &[Expense],
    budgets: &[Budget],
    goals: &[Goal],
    now: DateTime<Utc>,
    recent_limit: usize,
) -> Dashboard {
    Dashboard {
        totals: overview_totals(incomes, expenses),
        expenses_by_category: ranked(expenses_by_category(expenses)),
        recent: recent_transactions(incomes, expenses, recent_limit),
        budgets: budgets.iter().map(|b| status_for(b, expenses)).collect(),
        goals: goal_progress(goals, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_ceil_rounds_toward_positive_infinity() {
        assert_eq!(div_ceil(1, MS_PER_DAY), 1);
        assert_eq!(div_ceil(MS_PER_DAY, MS_PER_DAY), 1);
        assert_eq!(div_ceil(0, MS_PER_DAY), 0);
        assert_eq!(div_ceil(-1, MS_PER_DAY), 0);
        assert_eq!(div_ceil(-MS_PER_DAY - 1, MS_PER_DAY), -1);
    }

    #[test]
    fn percent_of_rejects_non_positive_whole() {
        assert_eq!(percent_of(Decimal::ONE, Decimal::ZERO), None);
        assert_eq!(
            percent_of(Decimal::new(25, 0), Decimal::new(50, 0)),
            Some(Decimal::new(50, 0))
        );
        assert_eq!(percent_of(Decimal::MAX, Decimal::new(1, 2)), Some(Decimal::MAX));
    }

    #[test]
    fn health_thresholds() {
        let hundred = Decimal::ONE_HUNDRED;
        assert_eq!(health(hundred, Decimal::new(50, 0)), BudgetHealth::Healthy);
        assert_eq!(health(hundred, Decimal::new(51, 0)), BudgetHealth::Caution);
        assert_eq!(health(hundred, Decimal::new(76, 0)), BudgetHealth::Critical);
        assert_eq!(health(Decimal::NEGATIVE_ONE, Decimal::ZERO), BudgetHealth::Exceeded);
    }
}
