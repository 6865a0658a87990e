// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use serde_json::json;

use super::{Context, required_arg};
use crate::commands::budgets;
use crate::engine::{self, BudgetStatus, GoalProgress, TransactionEntry};
use crate::models::{Budget, Expense, Goal, Income};
use crate::utils::fmt_day;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    let Some((what, sub)) = m.subcommand() else {
        return Ok(());
    };
    let fmt = required_arg(sub, "format")?.to_lowercase();
    let out = required_arg(sub, "out")?;
    let count = match what {
        "transactions" => {
            let incomes = ctx.api.list::<Income>()?;
            let expenses = ctx.api.list::<Expense>()?;
            let entries = engine::timeline(&incomes, &expenses);
            export_transactions(&entries, &fmt, Path::new(out))?
        }
        "budgets" => {
            let data = budgets::statuses(&ctx.api.list::<Budget>()?, &ctx.api.list::<Expense>()?);
            export_budgets(&data, &fmt, Path::new(out))?
        }
        "goals" => {
            let data = engine::goal_progress(&ctx.api.list::<Goal>()?, Utc::now());
            export_goals(&data, &fmt, Path::new(out))?
        }
        _ => return Ok(()),
    };
    println!("Exported {} {} to {}", count, what, out);
    Ok(())
}

/// Writes `rows` under `headers` as CSV, or the matching JSON objects.
/// Nothing is written for an unknown format.
fn write_out(
    fmt: &str,
    out: &Path,
    headers: &[&str],
    rows: Vec<Vec<String>>,
    items: Vec<serde_json::Value>,
) -> Result<usize> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(headers)?;
            for row in &rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::debug!(path = %out.display(), rows = rows.len(), "export written");
    Ok(rows.len())
}

pub fn export_transactions(entries: &[TransactionEntry], fmt: &str, out: &Path) -> Result<usize> {
    let rows = entries
        .iter()
        .map(|t| {
            vec![
                fmt_day(&t.date),
                t.kind.as_str().to_string(),
                t.description.clone(),
                t.label.clone(),
                t.amount.to_string(),
            ]
        })
        .collect();
    let items = entries
        .iter()
        .map(|t| {
            json!({
                "date": fmt_day(&t.date), "type": t.kind.as_str(), "description": t.description,
                "label": t.label, "amount": t.amount.to_string()
            })
        })
        .collect();
    write_out(fmt, out, &["date", "type", "description", "label", "amount"], rows, items)
}

pub fn export_budgets(statuses: &[BudgetStatus], fmt: &str, out: &Path) -> Result<usize> {
    let rows = statuses
        .iter()
        .map(|s| {
            vec![
                s.category.to_string(),
                fmt_day(&s.start_date),
                fmt_day(&s.end_date),
                s.budgeted.to_string(),
                s.spent.to_string(),
                s.remaining.to_string(),
                format!("{:.1}", s.percentage.round_dp(1)),
                s.health.as_str().to_string(),
            ]
        })
        .collect();
    let items = statuses
        .iter()
        .map(|s| {
            json!({
                "category": s.category.to_string(), "start": fmt_day(&s.start_date),
                "end": fmt_day(&s.end_date), "budgeted": s.budgeted.to_string(),
                "spent": s.spent.to_string(), "remaining": s.remaining.to_string(),
                "percentage": format!("{:.1}", s.percentage.round_dp(1)), "health": s.health.as_str()
            })
        })
        .collect();
    write_out(
        fmt,
        out,
        &["category", "start", "end", "budgeted", "spent", "remaining", "percentage", "health"],
        rows,
        items,
    )
}

pub fn export_goals(progress: &[GoalProgress], fmt: &str, out: &Path) -> Result<usize> {
    let rows = progress
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.target_amount.to_string(),
                p.saved_amount.to_string(),
                p.remaining_amount.to_string(),
                format!("{:.1}", p.percentage.round_dp(1)),
                p.days_remaining.to_string(),
                p.status.as_str().to_string(),
            ]
        })
        .collect();
    let items = progress
        .iter()
        .map(|p| {
            json!({
                "name": p.name, "target": p.target_amount.to_string(),
                "saved": p.saved_amount.to_string(), "remaining": p.remaining_amount.to_string(),
                "percentage": format!("{:.1}", p.percentage.round_dp(1)),
                "daysRemaining": p.days_remaining, "status": p.status.as_str()
            })
        })
        .collect();
    write_out(
        fmt,
        out,
        &["name", "target", "saved", "remaining", "percentage", "days_remaining", "status"],
        rows,
        items,
    )
}
