// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pennywise::api::ApiClient;
use pennywise::commands::{self, Context};
use pennywise::config::Config;
use pennywise::error::ApiError;
use pennywise::session::SessionStore;
use pennywise::{cli, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    utils::init_tracing(matches.get_flag("verbose"));

    let config = Config::resolve()?;
    let sessions = SessionStore::default_location()?;
    let api = ApiClient::new(&config, sessions.load_or_logged_out())?;
    let mut ctx = Context {
        config,
        api,
        sessions,
    };

    let res = match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&mut ctx, sub),
        Some(("income", sub)) => commands::incomes::handle(&ctx, sub),
        Some(("expense", sub)) => commands::expenses::handle(&ctx, sub),
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub),
        Some(("goal", sub)) => commands::goals::handle(&ctx, sub),
        Some(("dashboard", sub)) => commands::dashboard::handle(&ctx, sub),
        Some(("report", sub)) => commands::reports::handle(&ctx, sub),
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub),
        Some(("config", sub)) => commands::settings::handle(&ctx, sub),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    // A rejected token is stale; drop it so the next run starts logged out.
    if let Err(e) = &res {
        if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)) {
            ctx.sessions.clear()?;
            eprintln!("Session expired. Please log in again with `pennywise auth login`.");
        }
    }
    res
}
