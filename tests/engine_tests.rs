// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::Duration;
use common::{budget, dec, expense, goal, income, ts};
use pennywise::engine::{
    self, BudgetHealth, GoalStatus, OverviewTotals, TransactionKind,
};
use pennywise::models::{Category, IncomeSource};
use rust_decimal::Decimal;

#[test]
fn category_totals_partition_the_expense_total() {
    let expenses = vec![
        expense("e1", "12.50", "2024-01-03", Category::Food),
        expense("e2", "40", "2024-01-04", Category::Transport),
        expense("e3", "7.25", "2024-01-05", Category::Food),
        expense("e4", "100", "2024-01-06", Category::Rent),
    ];
    let totals = engine::expenses_by_category(&expenses);
    let sum: Decimal = totals.values().copied().sum();
    let all: Decimal = expenses.iter().map(|e| e.amount).sum();
    assert_eq!(sum, all);
    assert_eq!(totals[&Category::Food], dec("19.75"));
    assert_eq!(totals.len(), 3);
    assert!(!totals.contains_key(&Category::Health));
}

#[test]
fn sum_by_key_of_nothing_is_empty() {
    let totals = engine::incomes_by_source(&[]);
    assert!(totals.is_empty());
}

#[test]
fn ranked_orders_largest_first() {
    let incomes = vec![
        income("i1", "100", "2024-01-01", IncomeSource::Gift),
        income("i2", "900", "2024-01-01", IncomeSource::Salary),
        income("i3", "100", "2024-01-02", IncomeSource::Freelance),
    ];
    let items = engine::ranked(engine::incomes_by_source(&incomes));
    assert_eq!(
        items,
        vec![
            (IncomeSource::Salary, dec("900")),
            (IncomeSource::Freelance, dec("100")),
            (IncomeSource::Gift, dec("100")),
        ]
    );
}

#[test]
fn overview_of_empty_lists_is_zero() {
    assert_eq!(engine::overview_totals(&[], &[]), OverviewTotals::default());
    let t = engine::overview_totals(&[], &[]);
    assert_eq!(t.total_income, Decimal::ZERO);
    assert_eq!(t.net_savings, Decimal::ZERO);
}

#[test]
fn overview_net_can_go_negative() {
    let incomes = vec![income("i1", "500", "2024-03-01", IncomeSource::Salary)];
    let expenses = vec![
        expense("e1", "450.10", "2024-03-02", Category::Rent),
        expense("e2", "80", "2024-03-03", Category::Food),
    ];
    let t = engine::overview_totals(&incomes, &expenses);
    assert_eq!(t.total_income, dec("500"));
    assert_eq!(t.total_expense, dec("530.10"));
    assert_eq!(t.net_savings, dec("-30.10"));
}

#[test]
fn budget_counts_only_matching_in_range_expenses() {
    let budgets = vec![budget("b1", Category::Food, "1000", "2024-01-01", "2024-01-31")];
    let expenses = vec![
        expense("e1", "300", "2024-01-10", Category::Food),
        expense("e2", "200", "2024-02-05", Category::Food),
        expense("e3", "500", "2024-01-15", Category::Transport),
    ];
    let status = engine::budget_status(&budgets, &expenses);
    let s = &status["b1"];
    assert_eq!(s.spent, dec("300"));
    assert_eq!(s.remaining, dec("700"));
    assert_eq!(s.percentage, dec("30"));
    assert_eq!(s.health, BudgetHealth::Healthy);
}

#[test]
fn budget_window_is_inclusive() {
    let b = budget("b1", Category::Food, "100", "2024-01-01", "2024-01-31");
    let expenses = vec![
        expense("e1", "10", "2024-01-01", Category::Food),
        expense("e2", "20", "2024-01-31", Category::Food),
        expense("e3", "40", "2023-12-31T23:59:59Z", Category::Food),
    ];
    let s = engine::status_for(&b, &expenses);
    assert_eq!(s.spent, dec("30"));
}

#[test]
fn budget_window_covers_the_whole_end_day() {
    let b = budget("b1", Category::Food, "100", "2024-01-01", "2024-01-31");
    let expenses = vec![
        expense("e1", "40", "2024-01-31T10:00:00Z", Category::Food),
        expense("e2", "5", "2024-02-01T00:00:00Z", Category::Food),
    ];
    let s = engine::status_for(&b, &expenses);
    assert_eq!(s.spent, dec("40"));

    let window = engine::expenses_in_range(
        &expenses,
        Some(b.start_date.date_naive()),
        Some(b.end_date.date_naive()),
    );
    assert_eq!(window.len(), 1);
}

#[test]
fn huge_amounts_saturate_instead_of_panicking() {
    let mut big = income("i1", "1", "2024-01-01", IncomeSource::Salary);
    big.amount = Decimal::MAX;
    let incomes = vec![big.clone(), big];
    let mut spend = expense("e1", "1", "2024-01-02", Category::Food);
    spend.amount = Decimal::MAX;
    let expenses = vec![spend.clone(), spend];

    let t = engine::overview_totals(&incomes, &expenses);
    assert_eq!(t.total_income, Decimal::MAX);
    assert_eq!(t.net_savings, Decimal::ZERO);
    assert_eq!(engine::incomes_by_source(&incomes)[&IncomeSource::Salary], Decimal::MAX);

    let b = budget("b1", Category::Food, "100", "2024-01-01", "2024-01-31");
    let s = engine::status_for(&b, &expenses);
    assert_eq!(s.spent, Decimal::MAX);
    assert_eq!(s.health, BudgetHealth::Exceeded);
    assert!(s.percentage > Decimal::ONE_HUNDRED);
    assert_eq!(engine::monthly_cashflow(&incomes, &expenses).len(), 1);
}

#[test]
fn overspent_budget_is_exceeded() {
    let b = budget("b1", Category::Shopping, "200", "2024-05-01", "2024-05-31");
    let expenses = vec![expense("e1", "300", "2024-05-10", Category::Shopping)];
    let s = engine::status_for(&b, &expenses);
    assert_eq!(s.remaining, dec("-100"));
    assert_eq!(s.percentage, dec("150"));
    assert_eq!(s.health, BudgetHealth::Exceeded);
}

#[test]
fn zero_budget_has_zero_percentage() {
    let b = budget("b0", Category::Food, "0", "2024-01-01", "2024-01-31");
    let idle = engine::status_for(&b, &[]);
    assert_eq!(idle.percentage, Decimal::ZERO);
    assert_eq!(idle.health, BudgetHealth::Healthy);

    let spent = engine::status_for(&b, &[expense("e1", "5", "2024-01-02", Category::Food)]);
    assert_eq!(spent.percentage, Decimal::ZERO);
    assert_eq!(spent.remaining, dec("-5"));
    assert_eq!(spent.health, BudgetHealth::Exceeded);
}

#[test]
fn overlapping_budgets_each_count_the_expense() {
    let budgets = vec![
        budget("month", Category::Food, "500", "2024-01-01", "2024-01-31"),
        budget("week", Category::Food, "100", "2024-01-08", "2024-01-14"),
    ];
    let expenses = vec![expense("e1", "60", "2024-01-10", Category::Food)];
    let status = engine::budget_status(&budgets, &expenses);
    assert_eq!(status["month"].spent, dec("60"));
    assert_eq!(status["week"].spent, dec("60"));
    assert_eq!(status["week"].health, BudgetHealth::Caution);
}

#[test]
fn goal_percentage_is_clamped() {
    let now = ts("2024-01-01");
    let p = engine::progress_for(&goal("g1", "1000", "1200", "2024-06-01"), now);
    assert_eq!(p.percentage, Decimal::ONE_HUNDRED);
    assert_eq!(p.status, GoalStatus::Achieved);
    assert_eq!(p.remaining_amount, dec("-200"));
}

#[test]
fn goal_days_remaining_rounds_up_and_may_be_negative() {
    let now = ts("2024-01-01T12:00:00Z");
    assert_eq!(engine::days_until(now + Duration::milliseconds(1), now), 1);
    assert_eq!(engine::days_until(now + Duration::days(10), now), 10);
    assert_eq!(engine::days_until(now, now), 0);
    assert_eq!(engine::days_until(now - Duration::hours(36), now), -1);

    let overdue = engine::progress_for(&goal("g1", "1000", "100", "2023-12-01"), now);
    assert!(overdue.days_remaining < 0);
    assert_eq!(overdue.status, GoalStatus::AtRisk);
}

#[test]
fn goal_status_depends_on_time_and_progress() {
    let now = ts("2024-01-01");
    let goals = vec![
        goal("near", "1000", "500", "2024-01-11"),
        goal("far", "1000", "500", "2024-06-01"),
        goal("nearly", "1000", "850", "2024-01-11"),
    ];
    let progress = engine::goal_progress(&goals, now);
    let ids: Vec<_> = progress.iter().map(|p| p.goal_id.as_str()).collect();
    assert_eq!(ids, ["near", "far", "nearly"]);
    assert_eq!(progress[0].status, GoalStatus::AtRisk);
    assert_eq!(progress[0].days_remaining, 10);
    assert_eq!(progress[1].status, GoalStatus::OnTrack);
    assert_eq!(progress[2].status, GoalStatus::OnTrack);
    assert_eq!(progress[2].percentage, dec("85"));
}

#[test]
fn recent_transactions_newest_first_and_truncated() {
    let incomes = vec![income("i1", "500", "2024-03-01", IncomeSource::Salary)];
    let expenses = vec![
        expense("e1", "100", "2024-03-02", Category::Food),
        expense("e2", "50", "2024-02-01", Category::Food),
    ];
    let recent = engine::recent_transactions(&incomes, &expenses, 2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].kind, TransactionKind::Expense);
    assert_eq!(recent[0].id, "e1");
    assert_eq!(recent[1].kind, TransactionKind::Income);
    assert_eq!(recent[1].id, "i1");
    assert_eq!(recent[1].label, "Salary");
}

#[test]
fn equal_dates_keep_incomes_before_expenses() {
    let incomes = vec![income("i1", "10", "2024-03-01", IncomeSource::Gift)];
    let expenses = vec![
        expense("e1", "1", "2024-03-01", Category::Food),
        expense("e2", "2", "2024-03-01", Category::Food),
    ];
    let all = engine::timeline(&incomes, &expenses);
    let ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["i1", "e1", "e2"]);
    assert_eq!(all[1].signed_amount(), dec("-1"));
}

#[test]
fn expenses_in_range_has_open_ends() {
    let expenses = vec![
        expense("e1", "1", "2024-01-01", Category::Food),
        expense("e2", "2", "2024-02-15", Category::Food),
        expense("e3", "3", "2024-03-31", Category::Food),
    ];
    let from = chrono::NaiveDate::from_ymd_opt(2024, 2, 1);
    let to = chrono::NaiveDate::from_ymd_opt(2024, 3, 31);
    assert_eq!(engine::expenses_in_range(&expenses, from, to).len(), 2);
    assert_eq!(engine::expenses_in_range(&expenses, None, from).len(), 1);
    assert_eq!(engine::expenses_in_range(&expenses, None, None).len(), 3);
}

#[test]
fn monthly_cashflow_groups_by_calendar_month() {
    let incomes = vec![
        income("i1", "1000", "2024-01-05", IncomeSource::Salary),
        income("i2", "1000", "2024-02-05", IncomeSource::Salary),
    ];
    let expenses = vec![
        expense("e1", "300", "2024-01-20", Category::Rent),
        expense("e2", "1200", "2024-02-25", Category::Rent),
        expense("e3", "50", "2024-03-01", Category::Food),
    ];
    let flows = engine::monthly_cashflow(&incomes, &expenses);
    let months: Vec<_> = flows.iter().map(|f| f.month.as_str()).collect();
    assert_eq!(months, ["2024-01", "2024-02", "2024-03"]);
    assert_eq!(flows[0].net, dec("700"));
    assert_eq!(flows[1].net, dec("-200"));
    assert_eq!(flows[2].income, Decimal::ZERO);
}

#[test]
fn aggregation_is_idempotent() {
    let incomes = vec![income("i1", "500", "2024-03-01", IncomeSource::Salary)];
    let expenses = vec![
        expense("e1", "100", "2024-03-02", Category::Food),
        expense("e2", "50", "2024-02-01", Category::Health),
    ];
    let budgets = vec![budget("b1", Category::Food, "400", "2024-03-01", "2024-03-31")];
    let goals = vec![goal("g1", "1000", "250", "2024-12-31")];
    let now = ts("2024-03-10");

    let first = engine::dashboard(&incomes, &expenses, &budgets, &goals, now, 5);
    let second = engine::dashboard(&incomes, &expenses, &budgets, &goals, now, 5);
    assert_eq!(first, second);
    assert_eq!(
        engine::budget_status(&budgets, &expenses),
        engine::budget_status(&budgets, &expenses)
    );
    assert_eq!(first.recent.len(), 3);
    assert_eq!(first.budgets[0].spent, dec("100"));
    assert_eq!(first.goals[0].percentage, dec("25"));
    assert_eq!(first.expenses_by_category[0], (Category::Food, dec("100")));
}
