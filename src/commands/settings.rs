// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};

use super::{Context, required_arg};
use crate::config::{Config, config_path};
use crate::utils::pretty_table;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    let path = config_path()?;
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["api_url".to_string(), ctx.config.api_url.clone()],
                vec!["currency".to_string(), ctx.config.currency.clone()],
                vec!["recent_limit".to_string(), ctx.config.recent_limit.to_string()],
                vec!["timeout_secs".to_string(), ctx.config.timeout_secs.to_string()],
                vec!["config file".to_string(), path.display().to_string()],
                vec!["session file".to_string(), ctx.sessions.path().display().to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some((name, sub)) => {
            let cfg = apply(Config::load_from(&path)?, name, sub)?;
            save(&cfg, &path)?;
        }
        None => {}
    }
    Ok(())
}

/// Returns `cfg` with the change named by the `config` subcommand applied.
pub fn apply(mut cfg: Config, name: &str, sub: &clap::ArgMatches) -> Result<Config> {
    match name {
        "set-url" => {
            let url = required_arg(sub, "url")?.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("API url must start with http:// or https://");
            }
            cfg.api_url = url.to_string();
        }
        "set-currency" => {
            let ccy = required_arg(sub, "currency")?.trim().to_uppercase();
            if ccy.is_empty() {
                bail!("Currency code cannot be empty");
            }
            cfg.currency = ccy;
        }
        "set-limit" => {
            let limit = sub.get_one::<usize>("limit").copied().unwrap_or(cfg.recent_limit);
            if limit == 0 {
                bail!("Limit must be at least 1");
            }
            cfg.recent_limit = limit;
        }
        other => bail!("Unknown setting: {}", other),
    }
    Ok(cfg)
}

fn save(cfg: &Config, path: &Path) -> Result<()> {
    cfg.save_to(path)?;
    println!("Saved settings to {}", path.display());
    Ok(())
}
