// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::load_transactions;
use crate::engine::MonthKey;
use crate::format::format_money;
use crate::models::TransactionKind;
use crate::store::{self, NewTransaction, TransactionUpdate};
use crate::utils::{
    arg, format_options, maybe_print_json, opt_arg, parse_date, parse_month, parse_non_negative,
    pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(arg(sub, "date")?)?;
    let amount = parse_non_negative(arg(sub, "amount")?)?;
    let kind: TransactionKind = arg(sub, "type")?.parse()?;
    let category = store::find_category(conn, arg(sub, "category")?, Some(kind))
        .map_err(|e| anyhow::anyhow!("{} (no {} category by that name)", e, kind))?;
    let description = opt_arg(sub, "description")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", category.name, kind));

    let id = store::create_transaction(
        conn,
        &NewTransaction {
            date,
            amount,
            kind,
            category_id: category.id.clone(),
            description,
        },
    )?;
    tracing::info!(id, %kind, category = %category.id, "transaction recorded");
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        kind, amount, date, category.name, id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Missing argument --id"))?;
    let current = store::get_transaction(conn, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;
    let new_kind = opt_arg(sub, "type")
        .map(|t| t.parse::<TransactionKind>())
        .transpose()?;
    let kind = match new_kind {
        Some(k) => k,
        None => current.kind.parse()?,
    };
    // the category must match the type the row ends up with
    let category_id = match opt_arg(sub, "category") {
        Some(c) => Some(
            store::find_category(conn, c, Some(kind))
                .map_err(|e| anyhow::anyhow!("{} (no {} category by that name)", e, kind))?
                .id,
        ),
        None => {
            if new_kind.is_some() {
                store::find_category(conn, &current.category_id, Some(kind)).map_err(|_| {
                    anyhow::anyhow!(
                        "Category '{}' is not a {} category; pass --category as well",
                        current.category_name,
                        kind
                    )
                })?;
            }
            None
        }
    };
    let upd = TransactionUpdate {
        date: opt_arg(sub, "date").map(parse_date).transpose()?,
        amount: opt_arg(sub, "amount").map(parse_non_negative).transpose()?,
        kind: new_kind,
        category_id,
        description: opt_arg(sub, "description").map(str::to_string),
    };
    if !store::update_transaction(conn, id, &upd)? {
        anyhow::bail!("Transaction {} not found", id);
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Missing argument --id"))?;
    if !store::delete_transaction(conn, id)? {
        anyhow::bail!("Transaction {} not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let opts = format_options(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    format_money(r.amount, &opts),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: rust_decimal::Decimal,
    pub description: String,
}

/// Valid transactions matching the list filters, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = opt_arg(sub, "month").map(parse_month).transpose()?;
    let kind = opt_arg(sub, "type")
        .map(|t| t.parse::<TransactionKind>())
        .transpose()?;
    let category = opt_arg(sub, "category").map(str::to_lowercase);
    let limit = sub.get_one::<usize>("limit").copied();

    let loaded = load_transactions(conn)?;
    let rows = loaded
        .transactions
        .into_iter()
        .filter(|t| month.is_none_or(|m| MonthKey::of(t.date) == m))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| {
            category.as_deref().is_none_or(|c| {
                t.category.id.to_lowercase() == c || t.category.name.to_lowercase() == c
            })
        })
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category.name,
            amount: t.amount,
            description: t.description,
        })
        .collect();
    Ok(rows)
}
