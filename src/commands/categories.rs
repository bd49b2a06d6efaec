// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, TransactionKind};
use crate::store;
use crate::utils::{arg, opt_arg, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let cat = Category {
                id: arg(sub, "id")?.to_lowercase(),
                name: arg(sub, "name")?.to_string(),
                kind: arg(sub, "type")?.parse()?,
                color: arg(sub, "color")?.to_string(),
            };
            store::add_category(conn, &cat)?;
            println!("Added {} category '{}' ({})", cat.kind, cat.name, cat.id);
        }
        Some(("list", sub)) => {
            let kind = opt_arg(sub, "type")
                .map(|t| t.parse::<TransactionKind>())
                .transpose()?;
            let data = store::list_categories(conn, kind)?
                .into_iter()
                .map(|c| vec![c.id, c.name, c.kind.to_string(), c.color])
                .collect();
            println!("{}", pretty_table(&["Id", "Name", "Type", "Color"], data));
        }
        _ => {}
    }
    Ok(())
}
