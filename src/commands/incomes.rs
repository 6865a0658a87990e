// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};

use super::{Context, arg, date_or, decimal_or, json_flags, remove_record, required_arg};
use crate::models::{Income, IncomeDraft, IncomeSource};
use crate::store::RecordSet;
use crate::utils::{fmt_day, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove_record::<Income>(ctx, required_arg(sub, "id")?)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let draft = IncomeDraft::new(
        required_arg(sub, "description")?,
        parse_decimal(required_arg(sub, "amount")?)?,
        parse_date(required_arg(sub, "date")?)?,
        required_arg(sub, "source")?.parse::<IncomeSource>()?,
    )?;
    let mut set = RecordSet::<Income>::new();
    let income = set.add(&ctx.api, &draft)?;
    println!(
        "Recorded income '{}' of {} on {} ({})",
        income.description,
        fmt_money(&income.amount, &ctx.config.currency),
        fmt_day(&income.date),
        income.source
    );
    Ok(())
}

/// Incomes newest first, optionally filtered by `--source` and cut to `--limit`.
pub fn select(mut incomes: Vec<Income>, sub: &clap::ArgMatches) -> Result<Vec<Income>> {
    if let Some(src) = arg(sub, "source") {
        let src = src.parse::<IncomeSource>()?;
        incomes.retain(|i| i.source == src);
    }
    incomes.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        incomes.truncate(*limit);
    }
    Ok(incomes)
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let incomes = select(ctx.api.list::<Income>()?, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &incomes)? {
        let rows = incomes
            .iter()
            .map(|i| {
                vec![
                    i.id.clone(),
                    fmt_day(&i.date),
                    i.description.clone(),
                    i.source.to_string(),
                    fmt_money(&i.amount, &ctx.config.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Source", "Amount"], rows)
        );
    }
    Ok(())
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    let mut set = RecordSet::<Income>::new();
    set.refresh(&ctx.api)?;
    let current = set
        .find(id)
        .with_context(|| format!("Income '{}' not found", id))?
        .clone();
    let source = match arg(sub, "source") {
        Some(s) => s.parse::<IncomeSource>()?,
        None => current.source,
    };
    let draft = IncomeDraft::new(
        arg(sub, "description").unwrap_or(current.description.as_str()),
        decimal_or(sub, "amount", current.amount)?,
        date_or(sub, "date", &current.date)?,
        source,
    )?;
    let updated = set.update(&ctx.api, id, &draft)?;
    println!(
        "Updated income '{}': {} on {}",
        updated.description,
        fmt_money(&updated.amount, &ctx.config.currency),
        fmt_day(&updated.date)
    );
    Ok(())
}
