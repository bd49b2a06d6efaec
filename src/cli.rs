// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

/// Longest trailing window `report monthly --months` accepts.
pub const MAX_WINDOW_MONTHS: i64 = 1200;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Calendar month YYYY-MM (default: current month)")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance tracking: transactions, budgets, goals and bills")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand(Command::new("list").arg(type_arg()))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(type_arg().required(true))
                        .arg(Arg::new("color").long("color").default_value("#607D8B")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(type_arg().required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("month").long("month"))
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, monthly trend and category breakdown")
                .subcommand(json_args(
                    Command::new("stats").arg(
                        Arg::new("month")
                            .long("month")
                            .help("Limit to one month YYYY-MM (default: all time)"),
                    ),
                ))
                .subcommand(json_args(
                    Command::new("monthly")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32).range(1..=MAX_WINDOW_MONTHS))
                                .help("Trailing window, zero-filled (at most 1200 months)"),
                        )
                        .arg(
                            Arg::new("end")
                                .long("end")
                                .help("Last month of the window YYYY-MM (default: current month)"),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("categories")
                        .arg(type_arg().default_value("expense"))
                        .arg(Arg::new("month").long("month")),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget categories and budget-vs-actual")
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(json_args(Command::new("status").arg(month_arg())))
                .subcommand(
                    Command::new("total")
                        .about("Set the monthly budget")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("distribute")
                        .about("Split the monthly budget evenly over all categories")
                        .arg(
                            Arg::new("total")
                                .long("total")
                                .help("Amount to split (default: monthly budget)"),
                        )
                        .arg(
                            Arg::new("dry-run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Financial goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("current").long("current").default_value("0"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("contribute")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("bill")
                .about("Bill reminders")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("due").long("due").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("recurrence")
                                .long("recurrence")
                                .default_value("none")
                                .value_parser(["none", "weekly", "monthly", "yearly"]),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("pay").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("alerts")
                .about("Budget, spending and goal deadline alerts")
                .subcommand(json_args(
                    Command::new("check")
                        .about("Detect alerts for a month and keep the new ones")
                        .arg(month_arg()),
                ))
                .subcommand(json_args(
                    Command::new("list").about("Unread alerts, newest first").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include alerts already read"),
                    ),
                ))
                .subcommand(
                    Command::new("ack").about("Mark an alert as read").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Display currency and locale")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("locale").long("locale")),
                ),
        )
        .subcommand(Command::new("doctor").about("Report malformed and unbudgeted records"))
}
