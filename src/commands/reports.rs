// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::load_transactions;
use crate::engine::{
    MonthKey, MonthWindow, compute_category_summary, compute_monthly_buckets, compute_stats,
};
use crate::format::format_money;
use crate::models::{Transaction, TransactionKind};
use crate::utils::{arg, format_options, maybe_print_json, opt_arg, parse_month, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("stats", sub)) => stats(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn in_month(transactions: Vec<Transaction>, month: Option<MonthKey>) -> Vec<Transaction> {
    match month {
        Some(m) => transactions
            .into_iter()
            .filter(|t| MonthKey::of(t.date) == m)
            .collect(),
        None => transactions,
    }
}

fn stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = opt_arg(sub, "month").map(parse_month).transpose()?;
    let txs = in_month(load_transactions(conn)?.transactions, month);
    let s = compute_stats(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let opts = format_options(conn)?;
        let data = vec![
            vec!["Total income".to_string(), format_money(s.total_income, &opts)],
            vec!["Total expense".to_string(), format_money(s.total_expense, &opts)],
            vec!["Balance".to_string(), format_money(s.balance, &opts)],
        ];
        println!("{}", pretty_table(&["", "Amount"], data));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let window = match sub.get_one::<u32>("months") {
        Some(&n) => {
            let end = match opt_arg(sub, "end") {
                Some(e) => parse_month(e)?,
                None => MonthKey::of(today()),
            };
            Some(MonthWindow::trailing(end, n))
        }
        None => None,
    };
    let txs = load_transactions(conn)?.transactions;
    let buckets = compute_monthly_buckets(&txs, window);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        let opts = format_options(conn)?;
        let data = buckets
            .iter()
            .map(|b| {
                vec![
                    b.month.to_string(),
                    format_money(b.income, &opts),
                    format_money(b.expense, &opts),
                    format_money(b.income - b.expense, &opts),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionKind = arg(sub, "type")?.parse()?;
    let month = opt_arg(sub, "month").map(parse_month).transpose()?;
    let txs = in_month(load_transactions(conn)?.transactions, month);
    let summary = compute_category_summary(&txs, kind);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        if summary.is_empty() {
            println!("No {} data", kind);
            return Ok(());
        }
        let opts = format_options(conn)?;
        let data = summary
            .into_iter()
            .map(|s| {
                vec![
                    s.category_name,
                    format_money(s.amount, &opts),
                    format!("{}%", s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Amount", "Share"], data));
    }
    Ok(())
}
