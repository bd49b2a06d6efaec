// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{load_transactions, month_or_current};
use crate::engine::alerts::{
    AlertInput, AlertThresholds, ExpenseAlert, StoredAlert, alert_feed, generate_alerts,
    new_alerts,
};
use crate::engine::budgets::month_period;
use crate::engine::{MonthKey, compute_budget_status};
use crate::store;
use crate::utils::{maybe_print_json, pretty_table, today};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, thresholds: AlertThresholds) -> Result<()> {
    match m.subcommand() {
        Some(("check", sub)) => check(conn, sub, thresholds)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("ack", sub)) => {
            let id = *sub
                .get_one::<i64>("id")
                .ok_or_else(|| anyhow::anyhow!("Missing argument --id"))?;
            if !store::mark_alert_read(conn, id)? {
                anyhow::bail!("Alert {} not found", id);
            }
            println!("Marked alert {} as read", id);
        }
        _ => {}
    }
    Ok(())
}

fn check(conn: &Connection, sub: &clap::ArgMatches, thresholds: AlertThresholds) -> Result<()> {
    let month = month_or_current(sub)?;
    let added = record(conn, month, thresholds)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &added)? {
        return Ok(());
    }
    if added.is_empty() {
        println!("No new alerts for {}", month);
        return Ok(());
    }
    println!("{}", alert_table(added, false));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let all = sub.get_flag("all");
    let feed = alert_feed(store::list_alerts(conn)?);
    let shown: Vec<StoredAlert> = if all {
        feed.unread.into_iter().chain(feed.read).collect()
    } else {
        feed.unread
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shown)? {
        return Ok(());
    }
    if shown.is_empty() {
        println!("No unread alerts");
        return Ok(());
    }
    println!("{}", alert_table(shown, all));
    Ok(())
}

fn alert_table(alerts: Vec<StoredAlert>, with_status: bool) -> comfy_table::Table {
    let mut header = vec!["Id", "Priority", "Alert", "Raised"];
    if with_status {
        header.push("Status");
    }
    let data = alerts
        .into_iter()
        .map(|a| {
            let mut row = vec![
                a.id.to_string(),
                a.alert.priority.as_str().to_string(),
                a.alert.message,
                a.created_at,
            ];
            if with_status {
                row.push(if a.is_read { "read" } else { "unread" }.to_string());
            }
            row
        })
        .collect();
    pretty_table(&header, data)
}

/// Detects the month's alerts and stores those whose message is not kept yet.
/// Returns the newly stored alerts.
pub fn record(
    conn: &Connection,
    month: MonthKey,
    thresholds: AlertThresholds,
) -> Result<Vec<StoredAlert>> {
    let fresh = collect(conn, month, thresholds)?;
    let stored = store::list_alerts(conn)?;
    let tx = conn.unchecked_transaction()?;
    let mut ids = Vec::new();
    for a in new_alerts(&stored, &fresh) {
        ids.push(store::add_alert(&tx, a)?);
    }
    tx.commit()?;
    if !ids.is_empty() {
        tracing::info!(count = ids.len(), %month, "alerts stored");
    }
    Ok(store::list_alerts(conn)?
        .into_iter()
        .filter(|a| ids.contains(&a.id))
        .collect())
}

pub fn collect(
    conn: &Connection,
    month: MonthKey,
    thresholds: AlertThresholds,
) -> Result<Vec<ExpenseAlert>> {
    let transactions = load_transactions(conn)?.transactions;
    let (start, end) =
        month_period(month).with_context(|| format!("Invalid budget period {}", month))?;
    let budgets =
        compute_budget_status(&store::list_budget_categories(conn)?, &transactions, start, end);
    let goals = store::list_goals(conn)?;
    Ok(generate_alerts(&AlertInput {
        month,
        today: today(),
        transactions: &transactions,
        budgets: &budgets,
        goals: &goals,
        thresholds,
    }))
}
