// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CRUD over the SQLite store. Rows come back as loaded; aggregation lives
//! in [`crate::engine`].

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::models::{
    BillReminder, BudgetCategory, Category, FinancialGoal, RawTransaction, Recurrence,
    TransactionKind,
};
use crate::engine::alerts::{ExpenseAlert, StoredAlert};
use crate::engine::check_amount;
use crate::engine::records::parse_amount;
use crate::utils::parse_date;

pub fn list_categories(conn: &Connection, kind: Option<TransactionKind>) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, color FROM categories
         WHERE ?1 IS NULL OR type=?1 ORDER BY type, name",
    )?;
    let rows = stmt.query_map(params![kind.map(|k| k.as_str())], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, kind, color) = row?;
        let kind = kind
            .parse()
            .with_context(|| format!("Category '{}' has invalid type", id))?;
        out.push(Category {
            id,
            name,
            kind,
            color,
        });
    }
    Ok(out)
}

pub fn add_category(conn: &Connection, cat: &Category) -> Result<()> {
    conn.execute(
        "INSERT INTO categories(id, name, type, color) VALUES (?1,?2,?3,?4)",
        params![cat.id, cat.name, cat.kind.as_str(), cat.color],
    )
    .with_context(|| format!("Category '{}' already exists", cat.id))?;
    Ok(())
}

/// Resolve a category by id or display name (case-insensitive), optionally
/// restricted to one kind.
pub fn find_category(
    conn: &Connection,
    key: &str,
    kind: Option<TransactionKind>,
) -> Result<Category> {
    let key = key.trim();
    let found: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT id, name, type, color FROM categories
             WHERE (id=?1 OR lower(name)=lower(?1)) AND (?2 IS NULL OR type=?2)
             ORDER BY id=?1 DESC LIMIT 1",
            params![key, kind.map(|k| k.as_str())],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let (id, name, kind, color) = found.with_context(|| format!("Category '{}' not found", key))?;
    Ok(Category {
        kind: kind.parse()?,
        id,
        name,
        color,
    })
}

const TRANSACTION_SELECT: &str = "SELECT t.id, t.amount, t.type, IFNULL(t.category_id,''),
        IFNULL(c.name,''), IFNULL(c.color,''), t.date, t.description
     FROM transactions t LEFT JOIN categories c ON t.category_id=c.id";

fn raw_transaction(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawTransaction> {
    Ok(RawTransaction {
        id: r.get::<_, i64>(0)?.to_string(),
        amount: r.get(1)?,
        kind: r.get(2)?,
        category_id: r.get(3)?,
        category_name: r.get(4)?,
        category_color: r.get(5)?,
        date: r.get(6)?,
        description: r.get(7)?,
    })
}

pub fn list_transactions(conn: &Connection) -> Result<Vec<RawTransaction>> {
    let mut stmt = conn.prepare(&format!(
        "{} ORDER BY t.date DESC, t.id DESC",
        TRANSACTION_SELECT
    ))?;
    let rows = stmt.query_map([], raw_transaction)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Option<RawTransaction>> {
    let row = conn
        .query_row(
            &format!("{} WHERE t.id=?1", TRANSACTION_SELECT),
            params![id],
            raw_transaction,
        )
        .optional()?;
    Ok(row)
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category_id: String,
    pub description: String,
}

pub fn create_transaction(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    check_amount(tx.amount)?;
    conn.execute(
        "INSERT INTO transactions(date, amount, type, category_id, description)
         VALUES (?1,?2,?3,?4,?5)",
        params![
            tx.date.to_string(),
            tx.amount.to_string(),
            tx.kind.as_str(),
            tx.category_id,
            tx.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
    pub description: Option<String>,
}

/// Returns `false` when no transaction has that id.
pub fn update_transaction(conn: &Connection, id: i64, upd: &TransactionUpdate) -> Result<bool> {
    upd.amount.map(check_amount).transpose()?;
    let n = conn.execute(
        "UPDATE transactions SET
            date=COALESCE(?2, date),
            amount=COALESCE(?3, amount),
            type=COALESCE(?4, type),
            category_id=COALESCE(?5, category_id),
            description=COALESCE(?6, description)
         WHERE id=?1",
        params![
            id,
            upd.date.map(|d| d.to_string()),
            upd.amount.map(|a| a.to_string()),
            upd.kind.map(|k| k.as_str()),
            upd.category_id,
            upd.description
        ],
    )?;
    Ok(n > 0)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn list_budget_categories(conn: &Connection) -> Result<Vec<BudgetCategory>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, budget_limit, color FROM budget_categories ORDER BY position, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, limit, color) = row?;
        let budget_limit = parse_amount(&limit)
            .with_context(|| format!("Invalid budget limit '{}' for {}", limit, id))?;
        out.push(BudgetCategory {
            id,
            name,
            budget_limit,
            current_spent: Decimal::ZERO,
            color,
        });
    }
    Ok(out)
}

/// Insert or update by id. New categories go to the end of the list.
pub fn upsert_budget_category(conn: &Connection, b: &BudgetCategory) -> Result<()> {
    conn.execute(
        "INSERT INTO budget_categories(id, name, budget_limit, color, position)
         VALUES (?1,?2,?3,?4,(SELECT IFNULL(MAX(position),-1)+1 FROM budget_categories))
         ON CONFLICT(id) DO UPDATE SET
            name=excluded.name, budget_limit=excluded.budget_limit, color=excluded.color",
        params![b.id, b.name, b.budget_limit.to_string(), b.color],
    )?;
    Ok(())
}

pub fn delete_budget_category(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM budget_categories WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn list_goals(conn: &Connection) -> Result<Vec<FinancialGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, current_amount, target_date, category, description,
                is_completed
         FROM goals ORDER BY target_date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(goal_from_row(r)?);
    }
    Ok(out)
}

pub fn get_goal(conn: &Connection, id: i64) -> Result<FinancialGoal> {
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, current_amount, target_date, category, description,
                is_completed
         FROM goals WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => goal_from_row(r),
        None => Err(anyhow::anyhow!("Goal {} not found", id)),
    }
}

fn goal_from_row(r: &Row<'_>) -> Result<FinancialGoal> {
    let target: String = r.get(2)?;
    let current: String = r.get(3)?;
    let date: String = r.get(4)?;
    Ok(FinancialGoal {
        id: r.get(0)?,
        title: r.get(1)?,
        target_amount: parse_amount(&target)?,
        current_amount: parse_amount(&current)?,
        target_date: parse_date(&date)?,
        category: r.get(5)?,
        description: r.get(6)?,
        is_completed: r.get(7)?,
    })
}

pub fn add_goal(conn: &Connection, g: &FinancialGoal) -> Result<i64> {
    conn.execute(
        "INSERT INTO goals(title, target_amount, current_amount, target_date, category,
                           description, is_completed)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            g.title,
            g.target_amount.to_string(),
            g.current_amount.to_string(),
            g.target_date.to_string(),
            g.category,
            g.description,
            g.is_completed
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn save_goal_progress(conn: &Connection, g: &FinancialGoal) -> Result<()> {
    conn.execute(
        "UPDATE goals SET current_amount=?2, is_completed=?3 WHERE id=?1",
        params![g.id, g.current_amount.to_string(), g.is_completed],
    )?;
    Ok(())
}

pub fn list_bills(conn: &Connection) -> Result<Vec<BillReminder>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, amount, due_date, category_id, recurrence, is_paid, description
         FROM bills ORDER BY due_date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(2)?;
        let due: String = r.get(3)?;
        let recurrence: String = r.get(5)?;
        out.push(BillReminder {
            id: r.get(0)?,
            title: r.get(1)?,
            amount: parse_amount(&amount)?,
            due_date: parse_date(&due)?,
            category_id: r.get(4)?,
            recurrence: recurrence.parse::<Recurrence>()?,
            is_paid: r.get(6)?,
            description: r.get(7)?,
        });
    }
    Ok(out)
}

pub fn add_bill(conn: &Connection, b: &BillReminder) -> Result<i64> {
    conn.execute(
        "INSERT INTO bills(title, amount, due_date, category_id, recurrence, is_paid, description)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            b.title,
            b.amount.to_string(),
            b.due_date.to_string(),
            b.category_id,
            b.recurrence.as_str(),
            b.is_paid,
            b.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn mark_bill_paid(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("UPDATE bills SET is_paid=1 WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn list_alerts(conn: &Connection) -> Result<Vec<StoredAlert>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, priority, message, is_read, created_at FROM alerts ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(1)?;
        let priority: String = r.get(2)?;
        out.push(StoredAlert {
            id: r.get(0)?,
            alert: ExpenseAlert {
                kind: kind.parse()?,
                priority: priority.parse()?,
                message: r.get(3)?,
            },
            is_read: r.get(4)?,
            created_at: r.get(5)?,
        });
    }
    Ok(out)
}

pub fn add_alert(conn: &Connection, a: &ExpenseAlert) -> Result<i64> {
    conn.execute(
        "INSERT INTO alerts(kind, priority, message) VALUES (?1,?2,?3)",
        params![a.kind.as_str(), a.priority.as_str(), a.message],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn mark_alert_read(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("UPDATE alerts SET is_read=1 WHERE id=?1", params![id])?;
    Ok(n > 0)
}
