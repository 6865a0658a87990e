// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};

use super::{Context, arg, date_or, decimal_or, json_flags, remove_record, required_arg};
use crate::engine::{self, BudgetStatus};
use crate::models::{Budget, BudgetDraft, Category, Expense};
use crate::store::RecordSet;
use crate::utils::{fmt_day, fmt_money, fmt_pct, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove_record::<Budget>(ctx, required_arg(sub, "id")?)?,
        Some(("status", sub)) => status(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let draft = BudgetDraft::new(
        required_arg(sub, "category")?.parse::<Category>()?,
        parse_decimal(required_arg(sub, "amount")?)?,
        parse_date(required_arg(sub, "start")?)?,
        parse_date(required_arg(sub, "end")?)?,
    )?;
    let mut set = RecordSet::<Budget>::new();
    let budget = set.add(&ctx.api, &draft)?;
    println!(
        "Budget set for {} / {}..{} = {}",
        budget.category,
        fmt_day(&budget.start_date),
        fmt_day(&budget.end_date),
        fmt_money(&budget.amount, &ctx.config.currency)
    );
    Ok(())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let budgets = ctx.api.list::<Budget>()?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let rows = budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    b.category.to_string(),
                    fmt_day(&b.start_date),
                    fmt_day(&b.end_date),
                    fmt_money(&b.amount, &ctx.config.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Start", "End", "Budget"], rows)
        );
    }
    Ok(())
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    let mut set = RecordSet::<Budget>::new();
    set.refresh(&ctx.api)?;
    let current = set
        .find(id)
        .with_context(|| format!("Budget '{}' not found", id))?
        .clone();
    let category = match arg(sub, "category") {
        Some(c) => c.parse::<Category>()?,
        None => current.category,
    };
    let draft = BudgetDraft::new(
        category,
        decimal_or(sub, "amount", current.amount)?,
        date_or(sub, "start", &current.start_date)?,
        date_or(sub, "end", &current.end_date)?,
    )?;
    let updated = set.update(&ctx.api, id, &draft)?;
    println!(
        "Updated budget {} for {}: {}",
        updated.id,
        updated.category,
        fmt_money(&updated.amount, &ctx.config.currency)
    );
    Ok(())
}

/// Statuses in the order the budgets were listed.
pub fn statuses(budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetStatus> {
    let mut by_id = engine::budget_status(budgets, expenses);
    budgets.iter().filter_map(|b| by_id.remove(&b.id)).collect()
}

pub fn status_rows(statuses: &[BudgetStatus], ccy: &str) -> Vec<Vec<String>> {
    statuses
        .iter()
        .map(|s| {
            vec![
                s.category.to_string(),
                format!("{}..{}", fmt_day(&s.start_date), fmt_day(&s.end_date)),
                fmt_money(&s.budgeted, ccy),
                fmt_money(&s.spent, ccy),
                fmt_money(&s.remaining, ccy),
                fmt_pct(&s.percentage),
                s.health.as_str().to_string(),
            ]
        })
        .collect()
}

pub const STATUS_HEADERS: [&str; 7] =
    ["Category", "Period", "Budget", "Spent", "Remaining", "Used", "Health"];

fn status(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let budgets = ctx.api.list::<Budget>()?;
    let expenses = ctx.api.list::<Expense>()?;
    let data = statuses(&budgets, &expenses);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&STATUS_HEADERS, status_rows(&data, &ctx.config.currency))
        );
    }
    Ok(())
}
