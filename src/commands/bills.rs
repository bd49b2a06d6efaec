// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::bills::{days_until_due, next_due_date, partition_bills};
use crate::format::format_money;
use crate::models::{BillReminder, Recurrence, TransactionKind};
use crate::store;
use crate::utils::{
    arg, format_options, maybe_print_json, opt_arg, parse_date, parse_non_negative, pretty_table,
    today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category =
        store::find_category(conn, arg(sub, "category")?, Some(TransactionKind::Expense))?;
    let bill = BillReminder {
        id: 0,
        title: arg(sub, "title")?.to_string(),
        amount: parse_non_negative(arg(sub, "amount")?)?,
        due_date: parse_date(arg(sub, "due")?)?,
        category_id: category.id,
        recurrence: arg(sub, "recurrence")?.parse::<Recurrence>()?,
        is_paid: false,
        description: opt_arg(sub, "description").map(str::to_string),
    };
    let id = store::add_bill(conn, &bill)?;
    println!("Added bill '{}' due {} (id {})", bill.title, bill.due_date, id);
    Ok(())
}

/// Mark a bill paid. A recurring bill gets its next occurrence scheduled.
pub fn pay_bill(conn: &Connection, id: i64) -> Result<Option<BillReminder>> {
    let bill = store::list_bills(conn)?
        .into_iter()
        .find(|b| b.id == id)
        .ok_or_else(|| anyhow::anyhow!("Bill {} not found", id))?;
    if bill.is_paid {
        anyhow::bail!("Bill {} is already paid", id);
    }
    // paid flag and next occurrence land together or not at all
    let tx = conn.unchecked_transaction()?;
    store::mark_bill_paid(&tx, id)?;

    let Some(due) = next_due_date(&bill) else {
        tx.commit()?;
        return Ok(None);
    };
    let mut next = BillReminder {
        due_date: due,
        is_paid: false,
        ..bill
    };
    next.id = store::add_bill(&tx, &next)?;
    tx.commit()?;
    tracing::info!(bill = id, next = next.id, due = %due, "scheduled next occurrence");
    Ok(Some(next))
}

fn pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Missing argument --id"))?;
    match pay_bill(conn, id)? {
        Some(next) => println!(
            "Bill {} marked as paid; next '{}' due {} (id {})",
            id, next.title, next.due_date, next.id
        ),
        None => println!("Bill {} marked as paid", id),
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let now = today();
    let schedule = partition_bills(&store::list_bills(conn)?, now);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &schedule)? {
        return Ok(());
    }
    let opts = format_options(conn)?;
    let row = |b: &BillReminder, status: String| {
        vec![
            b.id.to_string(),
            b.title.clone(),
            format_money(b.amount, &opts),
            b.due_date.to_string(),
            b.recurrence.as_str().to_string(),
            status,
        ]
    };
    let mut data = Vec::new();
    for b in &schedule.overdue {
        let days = -days_until_due(b.due_date, now);
        data.push(row(b, format!("{} days overdue", days)));
    }
    for b in &schedule.upcoming {
        let days = days_until_due(b.due_date, now);
        let status = match days {
            0 => "due today".to_string(),
            1 => "due in 1 day".to_string(),
            n => format!("due in {} days", n),
        };
        data.push(row(b, status));
    }
    if data.is_empty() {
        println!("No unpaid bills");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Id", "Bill", "Amount", "Due", "Repeats", "Status"], data)
    );
    Ok(())
}
