// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id as shown by `list`")
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn range_args() -> [Arg; 2] {
    [
        opt("from", "First day to include (YYYY-MM-DD)"),
        opt("to", "Last day to include (YYYY-MM-DD)"),
    ]
}

fn export_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .value_parser(["csv", "json"]),
        )
        .arg(req("out", "Output file path"))
}

fn auth_cmd() -> Command {
    Command::new("auth")
        .about("Register, log in and manage the current session")
        .subcommand_required(true)
        .subcommand(
            Command::new("register")
                .about("Create an account and log in")
                .arg(req("name", "Full name"))
                .arg(req("email", "Email address"))
                .arg(req("password", "At least 6 characters")),
        )
        .subcommand(
            Command::new("login")
                .about("Log in with email and password")
                .arg(req("email", "Email address"))
                .arg(req("password", "Password")),
        )
        .subcommand(Command::new("logout").about("Forget the saved session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("profile")
                .about("Update name, email or password")
                .arg(opt("name", "New name"))
                .arg(opt("email", "New email address"))
                .arg(opt("password", "New password")),
        )
}

fn income_cmd() -> Command {
    let sources = "Salary, Freelance, Investments, Gift, Rental or Other";
    Command::new("income")
        .about("Record and list incomes")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("description", "What the income was"))
                .arg(req("amount", "Positive amount"))
                .arg(req("date", "YYYY-MM-DD"))
                .arg(req("source", sources)),
        )
        .subcommand(
            Command::new("list")
                .arg(opt("source", "Only this source"))
                .arg(opt("limit", "Show at most N rows").value_parser(value_parser!(usize)))
                .args(json_args()),
        )
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("description", "New description"))
                .arg(opt("amount", "New amount"))
                .arg(opt("date", "New date"))
                .arg(opt("source", sources)),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn expense_cmd() -> Command {
    let cats = "Food, Transport, Housing, Rent, Utilities, Shopping, Entertainment, Health, Education, Personal Care, Debt or Other";
    Command::new("expense")
        .about("Record and list expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("description", "What the money was spent on"))
                .arg(req("amount", "Positive amount"))
                .arg(req("date", "YYYY-MM-DD"))
                .arg(req("category", cats)),
        )
        .subcommand(
            Command::new("list")
                .arg(opt("category", "Only this category"))
                .args(range_args())
                .arg(opt("limit", "Show at most N rows").value_parser(value_parser!(usize)))
                .args(json_args()),
        )
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("description", "New description"))
                .arg(opt("amount", "New amount"))
                .arg(opt("date", "New date"))
                .arg(opt("category", cats)),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Spending caps per category and period")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("category", "Expense category to cap"))
                .arg(req("amount", "Cap for the period"))
                .arg(req("start", "First day (YYYY-MM-DD)"))
                .arg(req("end", "Last day (YYYY-MM-DD)")),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("category", "New category"))
                .arg(opt("amount", "New cap"))
                .arg(opt("start", "New first day"))
                .arg(opt("end", "New last day")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("status")
                .about("Spent, remaining and utilisation per budget")
                .args(json_args()),
        )
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Savings goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("name", "Goal name"))
                .arg(req("target", "Target amount"))
                .arg(opt("saved", "Amount saved so far").default_value("0"))
                .arg(req("date", "Target date (YYYY-MM-DD), in the future"))
                .arg(opt("description", "Optional note")),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("name", "New name"))
                .arg(opt("target", "New target amount"))
                .arg(opt("saved", "New saved amount"))
                .arg(opt("date", "New target date"))
                .arg(opt("description", "New note")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("progress")
                .about("Percentage saved and days left per goal")
                .args(json_args()),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views over incomes and expenses")
        .subcommand_required(true)
        .subcommand(Command::new("overview").args(json_args()))
        .subcommand(Command::new("by-category").args(range_args()).args(json_args()))
        .subcommand(Command::new("by-source").args(json_args()))
        .subcommand(
            Command::new("cashflow")
                .arg(
                    opt("months", "Most recent N months")
                        .default_value("12")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("recent")
                .arg(opt("limit", "Number of transactions").value_parser(value_parser!(usize)))
                .args(json_args()),
        )
}

pub fn build_cli() -> Command {
    Command::new("pennywise")
        .about("Personal finance: incomes, expenses, budgets, savings goals and dashboards")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log requests to stderr"),
        )
        .subcommand(auth_cmd())
        .subcommand(income_cmd())
        .subcommand(expense_cmd())
        .subcommand(budget_cmd())
        .subcommand(goal_cmd())
        .subcommand(
            Command::new("dashboard")
                .about("Totals, spending by category, recent activity, budgets and goals")
                .arg(opt("limit", "Recent transactions to show").value_parser(value_parser!(usize)))
                .args(json_args()),
        )
        .subcommand(report_cmd())
        .subcommand(
            Command::new("export")
                .about("Write records to CSV or JSON")
                .subcommand_required(true)
                .subcommand(export_cmd("transactions", "Incomes and expenses, newest first"))
                .subcommand(export_cmd("budgets", "Budget utilisation"))
                .subcommand(export_cmd("goals", "Goal progress")),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-url").arg(Arg::new("url").required(true)))
                .subcommand(Command::new("set-currency").arg(Arg::new("currency").required(true)))
                .subcommand(
                    Command::new("set-limit")
                        .arg(Arg::new("limit").required(true).value_parser(value_parser!(usize))),
                ),
        )
}
