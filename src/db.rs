// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.fintrack", "Fintrack", "fintrack"));

/// `(id, name, type, color)` offered by the transaction form.
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("food", "Food & Dining", "expense", "#FF5722"),
    ("transport", "Transportation", "expense", "#2196F3"),
    ("utilities", "Utilities", "expense", "#4CAF50"),
    ("entertainment", "Entertainment", "expense", "#9C27B0"),
    ("health", "Healthcare", "expense", "#F44336"),
    ("shopping", "Shopping", "expense", "#FF9800"),
    ("housing", "Housing", "expense", "#795548"),
    ("other", "Other", "expense", "#607D8B"),
    ("salary", "Salary", "income", "#4CAF50"),
    ("freelance", "Freelance", "income", "#2196F3"),
    ("investments", "Investments", "income", "#FF9800"),
    ("gifts", "Gifts", "income", "#E91E63"),
    ("other-income", "Other", "income", "#607D8B"),
];

/// `(id, name, limit, color)` for a fresh budget.
const DEFAULT_BUDGET: &[(&str, &str, &str, &str)] = &[
    ("food", "Food & Dining", "400", "#FF5722"),
    ("transport", "Transportation", "200", "#2196F3"),
    ("utilities", "Utilities", "300", "#4CAF50"),
    ("entertainment", "Entertainment", "150", "#9C27B0"),
    ("health", "Healthcare", "150", "#F44336"),
    ("shopping", "Shopping", "200", "#FF9800"),
    ("housing", "Housing", "800", "#795548"),
    ("other", "Other", "100", "#607D8B"),
];

pub const DEFAULT_MONTHLY_BUDGET: &str = "2300";

pub fn db_path(config: &Config) -> Result<PathBuf> {
    if let Some(p) = &config.database_path {
        if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return Ok(p.clone());
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init(config: &Config) -> Result<Connection> {
    let path = db_path(config)?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Create tables and seed defaults. Safe to run on every start.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        color TEXT NOT NULL DEFAULT '#607D8B'
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL,
        category_id TEXT,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS budget_categories(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        budget_limit TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT '#607D8B',
        position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        target_date TEXT NOT NULL,
        category TEXT,
        description TEXT,
        is_completed INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS alerts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL,
        priority TEXT NOT NULL,
        message TEXT NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
    );

    CREATE TABLE IF NOT EXISTS bills(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        amount TEXT NOT NULL,
        due_date TEXT NOT NULL,
        category_id TEXT NOT NULL,
        recurrence TEXT NOT NULL DEFAULT 'none',
        is_paid INTEGER NOT NULL DEFAULT 0,
        description TEXT
    );
    "#,
    )?;
    seed_defaults(conn)?;
    Ok(())
}

fn seed_defaults(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO categories(id, name, type, color) VALUES (?1,?2,?3,?4)",
        )?;
        for (id, name, kind, color) in DEFAULT_CATEGORIES {
            stmt.execute(params![id, name, kind, color])?;
        }

        // Only a brand-new store gets the default budget; deleted rows stay deleted.
        let has_budget: i64 =
            tx.query_row("SELECT COUNT(*) FROM settings WHERE key='monthly_budget'", [], |r| {
                r.get(0)
            })?;
        if has_budget == 0 {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO budget_categories(id, name, budget_limit, color, position)
                 VALUES (?1,?2,?3,?4,?5)",
            )?;
            for (pos, (id, name, limit, color)) in DEFAULT_BUDGET.iter().enumerate() {
                stmt.execute(params![id, name, limit, color, pos as i64])?;
            }
        }

        let mut stmt = tx.prepare("INSERT OR IGNORE INTO settings(key, value) VALUES (?1,?2)")?;
        for (k, v) in [
            ("monthly_budget", DEFAULT_MONTHLY_BUDGET),
            ("currency", "USD"),
            ("locale", "en-US"),
        ] {
            stmt.execute(params![k, v])?;
        }
    }
    tx.commit()?;
    Ok(())
}
