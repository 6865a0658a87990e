// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};

use super::{Context, arg, required_arg};
use crate::models::{Credentials, ProfileUpdate, Registration};

pub fn handle(ctx: &mut Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(ctx, sub)?,
        Some(("login", sub)) => login(ctx, sub)?,
        Some(("logout", _)) => logout(ctx)?,
        Some(("whoami", _)) => whoami(ctx),
        Some(("profile", sub)) => profile(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn register(ctx: &mut Context, sub: &clap::ArgMatches) -> Result<()> {
    let registration = Registration::new(
        required_arg(sub, "name")?,
        required_arg(sub, "email")?,
        required_arg(sub, "password")?,
    )?;
    let session = ctx.api.register(&registration).context("Registration failed")?;
    ctx.sessions.save(&session)?;
    println!(
        "Registered and logged in as {} <{}>",
        session.user.name, session.user.email
    );
    Ok(())
}

fn login(ctx: &mut Context, sub: &clap::ArgMatches) -> Result<()> {
    let credentials = Credentials::new(required_arg(sub, "email")?, required_arg(sub, "password")?)?;
    let session = ctx
        .api
        .login(&credentials)
        .context("Login failed. Please check your email and password")?;
    ctx.sessions.save(&session)?;
    println!("Logged in as {} <{}>", session.user.name, session.user.email);
    Ok(())
}

fn logout(ctx: &mut Context) -> Result<()> {
    ctx.api.logout();
    ctx.sessions.clear()?;
    println!("Logged out");
    Ok(())
}

fn whoami(ctx: &Context) {
    match ctx.api.session() {
        Some(s) => println!("{} <{}> (id {})", s.user.name, s.user.email, s.user.id),
        None => println!("Not logged in"),
    }
}

fn profile(ctx: &mut Context, sub: &clap::ArgMatches) -> Result<()> {
    let update = ProfileUpdate::new(arg(sub, "name"), arg(sub, "email"), arg(sub, "password"))?;
    let session = ctx
        .api
        .update_profile(&update)
        .context("Failed to update profile")?;
    ctx.sessions.save(&session)?;
    println!("Profile updated: {} <{}>", session.user.name, session.user.email);
    Ok(())
}
