// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{Context, date_arg, json_flags};
use crate::engine::{self, TransactionEntry};
use crate::models::{Expense, Income};
use crate::utils::{fmt_day, fmt_money, maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(ctx, sub)?,
        Some(("by-category", sub)) => by_category(ctx, sub)?,
        Some(("by-source", sub)) => by_source(ctx, sub)?,
        Some(("cashflow", sub)) => cashflow(ctx, sub)?,
        Some(("recent", sub)) => recent(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn overview(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let incomes = ctx.api.list::<Income>()?;
    let expenses = ctx.api.list::<Expense>()?;
    let totals = engine::overview_totals(&incomes, &expenses);
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let ccy = ctx.config.currency.as_str();
        let data = vec![
            vec!["Total income".to_string(), fmt_money(&totals.total_income, ccy)],
            vec!["Total expenditure".to_string(), fmt_money(&totals.total_expense, ccy)],
            vec!["Net savings".to_string(), fmt_money(&totals.net_savings, ccy)],
        ];
        println!("{}", pretty_table(&["Metric", "Amount"], data));
    }
    Ok(())
}

fn by_category(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let expenses = ctx.api.list::<Expense>()?;
    let in_range = engine::expenses_in_range(&expenses, date_arg(sub, "from")?, date_arg(sub, "to")?);
    let items = engine::ranked(engine::expenses_by_category(&in_range));
    let data: Vec<Vec<String>> = items
        .iter()
        .map(|(cat, amt)| vec![cat.to_string(), format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let hdr = format!("Spent ({})", ctx.config.currency);
        println!("{}", pretty_table(&["Category", hdr.as_str()], data));
    }
    Ok(())
}

fn by_source(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let incomes = ctx.api.list::<Income>()?;
    let items = engine::ranked(engine::incomes_by_source(&incomes));
    let data: Vec<Vec<String>> = items
        .iter()
        .map(|(src, amt)| vec![src.to_string(), format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let hdr = format!("Received ({})", ctx.config.currency);
        println!("{}", pretty_table(&["Source", hdr.as_str()], data));
    }
    Ok(())
}

fn cashflow(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let incomes = ctx.api.list::<Income>()?;
    let expenses = ctx.api.list::<Expense>()?;
    let flows = engine::monthly_cashflow(&incomes, &expenses);
    let skip = flows.len().saturating_sub(months);
    let data: Vec<Vec<String>> = flows
        .iter()
        .skip(skip)
        .rev()
        .map(|f| {
            vec![
                f.month.clone(),
                format!("{:.2}", f.income),
                format!("{:.2}", f.expense),
                format!("{:.2}", f.net),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense", "Net"], data));
    }
    Ok(())
}

pub fn recent_rows(entries: &[TransactionEntry], ccy: &str) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|t| {
            let sign = if t.signed_amount().is_sign_negative() { "-" } else { "+" };
            vec![
                fmt_day(&t.date),
                t.kind.as_str().to_string(),
                t.description.clone(),
                t.label.clone(),
                format!("{}{}", sign, fmt_money(&t.amount, ccy)),
            ]
        })
        .collect()
}

fn recent(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(ctx.config.recent_limit);
    let incomes = ctx.api.list::<Income>()?;
    let expenses = ctx.api.list::<Expense>()?;
    let data = engine::recent_transactions(&incomes, &expenses, limit);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Description", "Label", "Amount"],
                recent_rows(&data, &ctx.config.currency),
            )
        );
    }
    Ok(())
}
