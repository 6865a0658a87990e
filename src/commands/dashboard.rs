// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use super::{Context, json_flags};
use crate::commands::budgets::{STATUS_HEADERS, status_rows};
use crate::commands::goals::{PROGRESS_HEADERS, progress_rows};
use crate::commands::reports::recent_rows;
use crate::store::Snapshot;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(ctx.config.recent_limit);
    let snapshot = Snapshot::fetch(&ctx.api)?;
    let dash = snapshot.dashboard(Utc::now(), limit);
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    let ccy = ctx.config.currency.as_str();
    if let Some(s) = ctx.api.session() {
        println!("Welcome back, {}", s.user.name);
    }
    println!(
        "{}",
        pretty_table(
            &["Total income", "Total expenses", "Net savings"],
            vec![vec![
                fmt_money(&dash.totals.total_income, ccy),
                fmt_money(&dash.totals.total_expense, ccy),
                fmt_money(&dash.totals.net_savings, ccy),
            ]],
        )
    );

    println!("Expenses by category");
    if dash.expenses_by_category.is_empty() {
        println!("  No expense data to display.");
    } else {
        let rows = dash
            .expenses_by_category
            .iter()
            .map(|(cat, amt)| vec![cat.to_string(), fmt_money(amt, ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    println!("Recent transactions");
    if dash.recent.is_empty() {
        println!("  No recent transactions.");
    } else {
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Description", "Label", "Amount"], recent_rows(&dash.recent, ccy))
        );
    }

    println!("Budget status");
    if dash.budgets.is_empty() {
        println!("  No budgets set.");
    } else {
        println!("{}", pretty_table(&STATUS_HEADERS, status_rows(&dash.budgets, ccy)));
    }

    println!("Savings goals");
    if dash.goals.is_empty() {
        println!("  No savings goals yet.");
    } else {
        println!("{}", pretty_table(&PROGRESS_HEADERS, progress_rows(&dash.goals, ccy)));
    }
    Ok(())
}
