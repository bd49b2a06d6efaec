// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod alerts;
pub mod bills;
pub mod budgets;
pub mod categories;
pub mod doctor;
pub mod goals;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::Result;
use rusqlite::Connection;

use crate::engine::{Intake, MonthKey, intake};
use crate::store;
use crate::utils::{opt_arg, parse_month, today};

/// Load and validate every stored transaction.
pub fn load_transactions(conn: &Connection) -> Result<Intake> {
    let loaded = intake(store::list_transactions(conn)?);
    if loaded.rejected_count() > 0 {
        eprintln!(
            "warning: skipped {} malformed transaction(s); run `fintrack doctor` for details",
            loaded.rejected_count()
        );
    }
    Ok(loaded)
}

/// `--month` when given, otherwise the current month.
pub fn month_or_current(sub: &clap::ArgMatches) -> Result<MonthKey> {
    match opt_arg(sub, "month") {
        Some(m) => parse_month(m),
        None => Ok(MonthKey::of(today())),
    }
}
