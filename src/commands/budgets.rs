// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{load_transactions, month_or_current};
use crate::engine::budgets::{
    apply_distribution, budget_progress, budget_totals, month_period, over_budget,
};
use crate::engine::{MonthKey, compute_budget_status};
use crate::format::format_money;
use crate::models::BudgetCategory;
use crate::store;
use crate::utils::{
    arg, format_options, maybe_print_json, monthly_budget, opt_arg, parse_non_negative,
    pretty_table, set_setting,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("total", sub)) => total(conn, sub)?,
        Some(("distribute", sub)) => distribute(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cats = store::list_budget_categories(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
        let opts = format_options(conn)?;
        let data = cats
            .into_iter()
            .map(|c| vec![c.id, c.name, format_money(c.budget_limit, &opts), c.color])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Limit", "Color"], data)
        );
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?.to_lowercase();
    let limit = parse_non_negative(arg(sub, "limit")?)?;
    let existing = store::list_budget_categories(conn)?
        .into_iter()
        .find(|c| c.id == id);
    let name = opt_arg(sub, "name")
        .map(str::to_string)
        .or_else(|| existing.as_ref().map(|c| c.name.clone()))
        .unwrap_or_else(|| id.clone());
    let color = opt_arg(sub, "color")
        .map(str::to_string)
        .or_else(|| existing.as_ref().map(|c| c.color.clone()))
        .unwrap_or_else(|| "#607D8B".to_string());
    store::upsert_budget_category(
        conn,
        &BudgetCategory {
            id: id.clone(),
            name: name.clone(),
            budget_limit: limit,
            current_spent: Decimal::ZERO,
            color,
        },
    )?;
    println!("Budget for {} ({}) = {}", name, id, limit);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?.to_lowercase();
    if !store::delete_budget_category(conn, &id)? {
        anyhow::bail!("Budget category '{}' not found", id);
    }
    println!("Removed budget category '{}'", id);
    Ok(())
}

fn total(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_non_negative(arg(sub, "amount")?)?;
    set_setting(conn, "monthly_budget", &amount.to_string())?;
    println!("Monthly budget set to {}", amount);
    Ok(())
}

/// Budget categories with spend for `month` filled in.
pub fn status_rows(conn: &Connection, month: MonthKey) -> Result<Vec<BudgetCategory>> {
    let (start, end) =
        month_period(month).with_context(|| format!("Invalid budget period {}", month))?;
    let budget = store::list_budget_categories(conn)?;
    let txs = load_transactions(conn)?.transactions;
    Ok(compute_budget_status(&budget, &txs, start, end))
}

#[derive(Serialize)]
struct StatusReport {
    month: MonthKey,
    categories: Vec<BudgetCategory>,
    totals: crate::engine::budgets::BudgetTotals,
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let categories = status_rows(conn, month)?;
    let totals = budget_totals(&categories, monthly_budget(conn)?);

    let report = StatusReport {
        month,
        categories,
        totals,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let opts = format_options(conn)?;
    let data = report
        .categories
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                format_money(c.budget_limit, &opts),
                format_money(c.current_spent, &opts),
                format!("{:.0}%", budget_progress(c.current_spent, c.budget_limit)),
            ]
        })
        .collect();
    println!("Budget for {}", month);
    println!(
        "{}",
        pretty_table(&["Category", "Budget", "Spent", "Progress"], data)
    );
    println!(
        "Monthly budget {} | spent {} | remaining {}",
        format_money(totals.monthly_budget, &opts),
        format_money(totals.spent, &opts),
        format_money(totals.remaining, &opts)
    );
    if !totals.unallocated.is_zero() {
        println!(
            "Allocated {} of {} (difference {})",
            format_money(totals.allocated, &opts),
            format_money(totals.monthly_budget, &opts),
            format_money(totals.unallocated, &opts)
        );
    }
    for c in over_budget(&report.categories) {
        println!(
            "Over budget: {} by {}",
            c.name,
            format_money(c.current_spent - c.budget_limit, &opts)
        );
    }
    Ok(())
}

fn distribute(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let total = match opt_arg(sub, "total") {
        Some(t) => parse_non_negative(t)?,
        None => monthly_budget(conn)?,
    };
    let mut cats = store::list_budget_categories(conn)?;
    if cats.is_empty() {
        anyhow::bail!("No budget categories to distribute over");
    }
    apply_distribution(&mut cats, total)?;

    if !sub.get_flag("dry-run") {
        for c in &cats {
            store::upsert_budget_category(conn, c)?;
        }
        set_setting(conn, "monthly_budget", &total.to_string())?;
        tracing::info!(%total, categories = cats.len(), "budget distributed");
    }
    let opts = format_options(conn)?;
    let data = cats
        .into_iter()
        .map(|c| vec![c.name, format_money(c.budget_limit, &opts)])
        .collect();
    println!("{}", pretty_table(&["Category", "Budget"], data));
    Ok(())
}
