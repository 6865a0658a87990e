// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::Resource;
use crate::session::SessionStore;
use crate::store::RecordSet;
use crate::utils::{parse_date, parse_decimal};

pub mod auth;
pub mod budgets;
pub mod dashboard;
pub mod expenses;
pub mod exporter;
pub mod goals;
pub mod incomes;
pub mod reports;
pub mod settings;

/// Everything a command handler needs, built once in `main`.
pub struct Context {
    pub config: Config,
    pub api: ApiClient,
    pub sessions: SessionStore,
}

/// Deletes record `id` of kind `R` after checking the user can see it.
pub(crate) fn remove_record<R: Resource>(ctx: &Context, id: &str) -> Result<()> {
    let mut set = RecordSet::<R>::new();
    set.refresh(&ctx.api)?;
    if set.find(id).is_none() {
        anyhow::bail!("{} '{}' not found", R::KIND, id);
    }
    set.remove(&ctx.api, id)?;
    println!("Removed {} {}", R::KIND, id);
    Ok(())
}

pub(crate) fn arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name).map(String::as_str)
}

pub(crate) fn required_arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    arg(m, name).with_context(|| format!("--{} is required", name))
}

pub(crate) fn date_arg(m: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    arg(m, name).map(parse_date).transpose()
}

/// Parsed `--name` value, or the current value when the flag was not given.
pub(crate) fn decimal_or(
    m: &clap::ArgMatches,
    name: &str,
    current: rust_decimal::Decimal,
) -> Result<rust_decimal::Decimal> {
    Ok(arg(m, name).map(parse_decimal).transpose()?.unwrap_or(current))
}

pub(crate) fn date_or(m: &clap::ArgMatches, name: &str, current: &DateTime<Utc>) -> Result<NaiveDate> {
    Ok(date_arg(m, name)?.unwrap_or_else(|| current.date_naive()))
}

pub(crate) fn json_flags(m: &clap::ArgMatches) -> (bool, bool) {
    (m.get_flag("json"), m.get_flag("jsonl"))
}
