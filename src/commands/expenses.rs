// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};

use super::{Context, arg, date_arg, date_or, decimal_or, json_flags, remove_record, required_arg};
use crate::engine::expenses_in_range;
use crate::models::{Category, Expense, ExpenseDraft};
use crate::store::RecordSet;
use crate::utils::{fmt_day, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove_record::<Expense>(ctx, required_arg(sub, "id")?)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let draft = ExpenseDraft::new(
        required_arg(sub, "description")?,
        parse_decimal(required_arg(sub, "amount")?)?,
        parse_date(required_arg(sub, "date")?)?,
        required_arg(sub, "category")?.parse::<Category>()?,
    )?;
    let mut set = RecordSet::<Expense>::new();
    let expense = set.add(&ctx.api, &draft)?;
    println!(
        "Recorded expense '{}' of {} on {} ({})",
        expense.description,
        fmt_money(&expense.amount, &ctx.config.currency),
        fmt_day(&expense.date),
        expense.category
    );
    Ok(())
}

/// Expenses newest first, filtered by `--category` and `--from`/`--to`, cut
/// to `--limit`.
pub fn select(expenses: Vec<Expense>, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let mut expenses = expenses_in_range(&expenses, date_arg(sub, "from")?, date_arg(sub, "to")?);
    if let Some(cat) = arg(sub, "category") {
        let cat = cat.parse::<Category>()?;
        expenses.retain(|e| e.category == cat);
    }
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        expenses.truncate(*limit);
    }
    Ok(expenses)
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let expenses = select(ctx.api.list::<Expense>()?, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &expenses)? {
        let rows = expenses
            .iter()
            .map(|e| {
                vec![
                    e.id.clone(),
                    fmt_day(&e.date),
                    e.description.clone(),
                    e.category.to_string(),
                    fmt_money(&e.amount, &ctx.config.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    let mut set = RecordSet::<Expense>::new();
    set.refresh(&ctx.api)?;
    let current = set
        .find(id)
        .with_context(|| format!("Expense '{}' not found", id))?
        .clone();
    let category = match arg(sub, "category") {
        Some(c) => c.parse::<Category>()?,
        None => current.category,
    };
    let draft = ExpenseDraft::new(
        arg(sub, "description").unwrap_or(current.description.as_str()),
        decimal_or(sub, "amount", current.amount)?,
        date_or(sub, "date", &current.date)?,
        category,
    )?;
    let updated = set.update(&ctx.api, id, &draft)?;
    println!(
        "Updated expense '{}': {} on {}",
        updated.description,
        fmt_money(&updated.amount, &ctx.config.currency),
        fmt_day(&updated.date)
    );
    Ok(())
}
