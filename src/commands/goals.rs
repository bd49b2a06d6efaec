// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::goals::{GoalProgress, contribute, goal_progress};
use crate::format::format_money;
use crate::models::FinancialGoal;
use crate::store;
use crate::utils::{
    arg, format_options, maybe_print_json, opt_arg, parse_date, parse_non_negative, pretty_table,
    today,
};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("contribute", sub)) => add_funds(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let target_amount = parse_non_negative(arg(sub, "target")?)?;
    if target_amount.is_zero() {
        anyhow::bail!("Goal target must be greater than zero");
    }
    let current_amount = parse_non_negative(arg(sub, "current")?)?;
    let goal = FinancialGoal {
        id: 0,
        title: arg(sub, "title")?.to_string(),
        target_amount,
        current_amount,
        target_date: parse_date(arg(sub, "date")?)?,
        category: opt_arg(sub, "category").map(str::to_string),
        description: opt_arg(sub, "description").map(str::to_string),
        is_completed: current_amount >= target_amount,
    };
    let id = store::add_goal(conn, &goal)?;
    println!("Added goal '{}' (id {})", goal.title, id);
    Ok(())
}

fn add_funds(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Missing argument --id"))?;
    let amount: Decimal = parse_non_negative(arg(sub, "amount")?)?;
    let mut goal = store::get_goal(conn, id)?;
    let was_completed = goal.is_completed;
    contribute(&mut goal, amount)?;
    store::save_goal_progress(conn, &goal)?;
    let p = goal_progress(&goal, today());
    println!(
        "Goal '{}': {} of {} ({}%)",
        goal.title, goal.current_amount, goal.target_amount, p.percent
    );
    if goal.is_completed && !was_completed {
        println!("Goal '{}' reached!", goal.title);
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    #[serde(flatten)]
    goal: FinancialGoal,
    progress: GoalProgress,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let now = today();
    let rows: Vec<GoalRow> = store::list_goals(conn)?
        .into_iter()
        .map(|goal| GoalRow {
            progress: goal_progress(&goal, now),
            goal,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let opts = format_options(conn)?;
        let data = rows
            .into_iter()
            .map(|r| {
                let due = if r.goal.is_completed {
                    "done".to_string()
                } else if r.progress.days_left < 0 {
                    format!("{} days overdue", -r.progress.days_left)
                } else {
                    format!("{} days left", r.progress.days_left)
                };
                vec![
                    r.goal.id.to_string(),
                    r.goal.title,
                    format_money(r.goal.current_amount, &opts),
                    format_money(r.goal.target_amount, &opts),
                    format!("{}%", r.progress.percent),
                    r.goal.target_date.to_string(),
                    due,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Goal", "Saved", "Target", "Progress", "Target date", "Status"],
                data
            )
        );
    }
    Ok(())
}
