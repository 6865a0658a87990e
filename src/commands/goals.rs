// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};
use chrono::Utc;

use super::{Context, arg, date_or, decimal_or, json_flags, remove_record, required_arg};
use crate::engine::{self, GoalProgress, GoalStatus};
use crate::models::{Goal, GoalDraft};
use crate::store::RecordSet;
use crate::utils::{fmt_day, fmt_money, fmt_pct, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove_record::<Goal>(ctx, required_arg(sub, "id")?)?,
        Some(("progress", sub)) => progress(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let saved = arg(sub, "saved").unwrap_or("0");
    let draft = GoalDraft::new(
        required_arg(sub, "name")?,
        parse_decimal(required_arg(sub, "target")?)?,
        parse_decimal(saved)?,
        parse_date(required_arg(sub, "date")?)?,
        arg(sub, "description"),
        Utc::now().date_naive(),
    )?;
    let mut set = RecordSet::<Goal>::new();
    let goal = set.add(&ctx.api, &draft)?;
    println!(
        "Goal '{}' created: {} by {}",
        goal.name,
        fmt_money(&goal.target_amount, &ctx.config.currency),
        fmt_day(&goal.target_date)
    );
    Ok(())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let goals = ctx.api.list::<Goal>()?;
    if !maybe_print_json(json_flag, jsonl_flag, &goals)? {
        let rows = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.clone(),
                    g.name.clone(),
                    fmt_money(&g.target_amount, &ctx.config.currency),
                    fmt_money(&g.saved_amount, &ctx.config.currency),
                    fmt_day(&g.target_date),
                    g.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Target", "Saved", "Target date", "Note"], rows)
        );
    }
    Ok(())
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    let mut set = RecordSet::<Goal>::new();
    set.refresh(&ctx.api)?;
    let current = set
        .find(id)
        .with_context(|| format!("Goal '{}' not found", id))?
        .clone();
    let description = arg(sub, "description").or(current.description.as_deref());
    let draft = GoalDraft::new(
        arg(sub, "name").unwrap_or(current.name.as_str()),
        decimal_or(sub, "target", current.target_amount)?,
        decimal_or(sub, "saved", current.saved_amount)?,
        date_or(sub, "date", &current.target_date)?,
        description,
        Utc::now().date_naive(),
    )?;
    let updated = set.update(&ctx.api, id, &draft)?;
    println!(
        "Updated goal '{}': {} of {} saved",
        updated.name,
        fmt_money(&updated.saved_amount, &ctx.config.currency),
        fmt_money(&updated.target_amount, &ctx.config.currency)
    );
    Ok(())
}

fn days_left(p: &GoalProgress) -> String {
    match p.status {
        GoalStatus::Achieved => "-".into(),
        _ if p.days_remaining > 0 => p.days_remaining.to_string(),
        _ => format!("overdue by {}", -p.days_remaining),
    }
}

pub fn progress_rows(progress: &[GoalProgress], ccy: &str) -> Vec<Vec<String>> {
    progress
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                fmt_money(&p.target_amount, ccy),
                fmt_money(&p.saved_amount, ccy),
                fmt_money(&p.remaining_amount, ccy),
                fmt_pct(&p.percentage),
                days_left(p),
                p.status.as_str().to_string(),
            ]
        })
        .collect()
}

pub const PROGRESS_HEADERS: [&str; 7] =
    ["Goal", "Target", "Saved", "Remaining", "Progress", "Days left", "Status"];

fn progress(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let goals = ctx.api.list::<Goal>()?;
    let data = engine::goal_progress(&goals, Utc::now());
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&PROGRESS_HEADERS, progress_rows(&data, &ctx.config.currency))
        );
    }
    Ok(())
}
