// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::format::currency_symbol;
use crate::utils::{format_options, monthly_budget, opt_arg, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let opts = format_options(conn)?;
            let data = vec![
                vec!["currency".to_string(), opts.currency],
                vec!["locale".to_string(), opts.locale],
                vec!["monthly_budget".to_string(), monthly_budget(conn)?.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
        Some(("set", sub)) => {
            if let Some(ccy) = opt_arg(sub, "currency") {
                let ccy = ccy.to_uppercase();
                if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                    anyhow::bail!("Invalid currency '{}', expected a 3-letter code", ccy);
                }
                if currency_symbol(&ccy).is_none() {
                    eprintln!("note: no symbol known for {}, amounts will show the code", ccy);
                }
                set_setting(conn, "currency", &ccy)?;
                println!("Currency set to {}", ccy);
            }
            if let Some(locale) = opt_arg(sub, "locale") {
                set_setting(conn, "locale", locale)?;
                println!("Locale set to {}", locale);
            }
        }
        _ => {}
    }
    Ok(())
}
