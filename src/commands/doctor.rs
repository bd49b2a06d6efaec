// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use crate::engine::budgets::unattributed;
use crate::engine::{intake, reconcile};
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// `(issue, detail)` pairs; empty when everything checks out.
pub fn issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Rows the engine refuses to aggregate
    let loaded = intake(store::list_transactions(conn)?);
    for r in &loaded.rejected {
        rows.push(vec![
            "malformed_transaction".into(),
            format!("id {}: {}", r.id, r.error),
        ]);
    }

    // 2) Expense categories that no budget category will pick up
    let budget = store::list_budget_categories(conn)?;
    let unbudgeted: BTreeSet<String> = unattributed(&budget, &loaded.transactions)
        .into_iter()
        .map(|t| t.category.name.clone())
        .collect();
    for name in unbudgeted {
        rows.push(vec!["unbudgeted_category".into(), name]);
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found (reconciliation table v{})", reconcile::TABLE_VERSION);
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
