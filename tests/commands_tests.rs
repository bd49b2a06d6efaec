// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::commands::{alerts, bills, budgets, doctor, goals, settings};
use fintrack::engine::MonthKey;
use fintrack::engine::alerts::{AlertKind, AlertThresholds, alert_feed};
use fintrack::models::{BillReminder, Category, Recurrence, TransactionKind};
use fintrack::store::{self, NewTransaction};
use fintrack::utils::{format_options, get_setting, monthly_budget};
use fintrack::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn spend(conn: &Connection, date: &str, amount: i64, category: &str) {
    store::create_transaction(
        conn,
        &NewTransaction {
            date: day(date),
            amount: Decimal::from(amount),
            kind: TransactionKind::Expense,
            category_id: category.into(),
            description: String::new(),
        },
    )
    .unwrap();
}

/// Matches of the first-level subcommand, e.g. `budget` in `budget set ...`.
fn top(args: &[&str]) -> clap::ArgMatches {
    let m = cli::build_cli().get_matches_from(args.iter().copied());
    m.subcommand().map(|(_, sub)| sub.clone()).unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

#[test]
fn fresh_store_is_seeded_once() {
    let mut conn = setup();
    db::init_schema(&mut conn).unwrap();
    assert_eq!(store::list_categories(&conn, None).unwrap().len(), 13);
    assert_eq!(
        store::list_categories(&conn, Some(TransactionKind::Income))
            .unwrap()
            .len(),
        5
    );
    let budget = store::list_budget_categories(&conn).unwrap();
    assert_eq!(budget.len(), 8);
    assert_eq!(budget[0].id, "food");
    assert_eq!(budget[7].id, "other");
    assert_eq!(monthly_budget(&conn).unwrap(), Decimal::from(2300));
    assert_eq!(format_options(&conn).unwrap().currency, "USD");
}

#[test]
fn removed_budget_categories_stay_removed() {
    let mut conn = setup();
    budgets::handle(&conn, &top(&["fintrack", "budget", "rm", "--id", "housing"])).unwrap();
    db::init_schema(&mut conn).unwrap();
    let ids: Vec<String> = store::list_budget_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids.len(), 7);
    assert!(!ids.contains(&"housing".to_string()));
}

#[test]
fn budget_status_attributes_spend_for_the_month() {
    let conn = setup();
    store::add_category(
        &conn,
        &Category {
            id: "commute".into(),
            name: "Transportation".into(),
            kind: TransactionKind::Expense,
            color: "#2196F3".into(),
        },
    )
    .unwrap();
    spend(&conn, "2025-03-04", 50, "commute");
    spend(&conn, "2025-03-09", 120, "food");
    spend(&conn, "2025-04-01", 999, "food");

    let rows = budgets::status_rows(&conn, month("2025-03")).unwrap();
    let spent = |id: &str| rows.iter().find(|r| r.id == id).unwrap().current_spent;
    assert_eq!(spent("transport"), Decimal::from(50));
    assert_eq!(spent("food"), Decimal::from(120));
    assert_eq!(spent("housing"), Decimal::ZERO);
}

#[test]
fn budget_set_adds_new_categories_at_the_end() {
    let conn = setup();
    budgets::handle(
        &conn,
        &top(&["fintrack", "budget", "set", "--id", "Pets", "--limit", "60", "--name", "Pets"]),
    )
    .unwrap();
    budgets::handle(&conn, &top(&["fintrack", "budget", "set", "--id", "food", "--limit", "450"]))
        .unwrap();
    let cats = store::list_budget_categories(&conn).unwrap();
    assert_eq!(cats.len(), 9);
    assert_eq!(cats[8].id, "pets");
    assert_eq!(cats[0].budget_limit, Decimal::from(450));
    assert_eq!(cats[0].name, "Food & Dining");
}

#[test]
fn distribute_persists_unless_dry_run() {
    let conn = setup();
    budgets::handle(
        &conn,
        &top(&["fintrack", "budget", "distribute", "--total", "1000", "--dry-run"]),
    )
    .unwrap();
    assert_eq!(monthly_budget(&conn).unwrap(), Decimal::from(2300));
    assert_eq!(
        store::list_budget_categories(&conn).unwrap()[0].budget_limit,
        Decimal::from(400)
    );

    budgets::handle(&conn, &top(&["fintrack", "budget", "distribute", "--total", "1000"])).unwrap();
    let limits: Vec<Decimal> = store::list_budget_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|b| b.budget_limit)
        .collect();
    assert_eq!(limits[0], Decimal::from(125));
    assert!(limits.iter().all(|l| *l == Decimal::from(125)));
    assert_eq!(get_setting(&conn, "monthly_budget").unwrap().as_deref(), Some("1000"));
}

#[test]
fn paying_a_monthly_bill_schedules_the_next_one() {
    let conn = setup();
    let id = store::add_bill(
        &conn,
        &BillReminder {
            id: 0,
            title: "Rent".into(),
            amount: Decimal::from(1200),
            due_date: day("2025-01-31"),
            category_id: "housing".into(),
            recurrence: Recurrence::Monthly,
            is_paid: false,
            description: None,
        },
    )
    .unwrap();

    let next = bills::pay_bill(&conn, id).unwrap().unwrap();
    assert_eq!(next.due_date, day("2025-02-28"));
    assert_eq!(next.title, "Rent");
    assert!(!next.is_paid);
    assert!(bills::pay_bill(&conn, id).is_err());
    assert!(bills::pay_bill(&conn, 404).is_err());

    let all = store::list_bills(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].is_paid);
    assert!(!all[1].is_paid);
}

#[test]
fn failed_rescheduling_leaves_the_bill_unpaid() {
    let conn = setup();
    let id = store::add_bill(
        &conn,
        &BillReminder {
            id: 0,
            title: "Gym".into(),
            amount: Decimal::from(40),
            due_date: day("2025-03-10"),
            category_id: "health".into(),
            recurrence: Recurrence::Weekly,
            is_paid: false,
            description: None,
        },
    )
    .unwrap();
    conn.execute_batch(
        "CREATE TRIGGER no_new_bills BEFORE INSERT ON bills
         BEGIN SELECT RAISE(ABORT, 'bills are frozen'); END;",
    )
    .unwrap();

    assert!(bills::pay_bill(&conn, id).is_err());
    let all = store::list_bills(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].is_paid);

    conn.execute_batch("DROP TRIGGER no_new_bills").unwrap();
    let next = bills::pay_bill(&conn, id).unwrap().unwrap();
    assert_eq!(next.due_date, day("2025-03-17"));
}

#[test]
fn bills_require_an_expense_category() {
    let conn = setup();
    let add = |cat: &str| {
        bills::handle(
            &conn,
            &top(&[
                "fintrack", "bill", "add", "--title", "Phone", "--amount", "30", "--due",
                "2025-05-01", "--category", cat, "--recurrence", "weekly",
            ]),
        )
    };
    assert!(add("salary").is_err());
    add("Utilities").unwrap();
    let all = store::list_bills(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category_id, "utilities");
    assert_eq!(all[0].recurrence, Recurrence::Weekly);
}

#[test]
fn goals_complete_through_contributions() {
    let conn = setup();
    goals::handle(
        &conn,
        &top(&[
            "fintrack", "goal", "add", "--title", "Bike", "--target", "500", "--date",
            "2030-06-01", "--current", "100",
        ]),
    )
    .unwrap();
    assert!(
        goals::handle(
            &conn,
            &top(&["fintrack", "goal", "add", "--title", "Nothing", "--target", "0", "--date", "2030-01-01"]),
        )
        .is_err()
    );
    let id = store::list_goals(&conn).unwrap()[0].id;
    let contribute = |amount: &str| {
        let id = id.to_string();
        goals::handle(
            &conn,
            &top(&["fintrack", "goal", "contribute", "--id", id.as_str(), "--amount", amount]),
        )
    };
    contribute("150").unwrap();
    assert!(!store::get_goal(&conn, id).unwrap().is_completed);
    contribute("250").unwrap();
    let g = store::get_goal(&conn, id).unwrap();
    assert!(g.is_completed);
    assert_eq!(g.current_amount, Decimal::from(500));
}

#[test]
fn alerts_flag_overspent_budgets_and_high_spending() {
    let conn = setup();
    spend(&conn, "2025-03-02", 500, "entertainment");
    spend(&conn, "2025-03-03", 100, "food");
    let thresholds = AlertThresholds {
        unusual_spending: Decimal::from(550),
        ..AlertThresholds::default()
    };
    let found = alerts::collect(&conn, month("2025-03"), thresholds).unwrap();
    let kinds: Vec<AlertKind> = found.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, [AlertKind::UnusualSpending, AlertKind::BudgetLimit]);
    assert!(found[1].message.starts_with("Entertainment is over budget by 350.00"));

    assert!(
        alerts::collect(&conn, month("2025-04"), AlertThresholds::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn checked_alerts_are_kept_once_and_acknowledged() {
    let conn = setup();
    spend(&conn, "2025-03-02", 500, "entertainment");
    let march = month("2025-03");

    let first = alerts::record(&conn, march, AlertThresholds::default()).unwrap();
    assert_eq!(first.len(), 1);
    assert!(!first[0].is_read);
    assert!(
        alerts::record(&conn, march, AlertThresholds::default())
            .unwrap()
            .is_empty()
    );
    assert_eq!(store::list_alerts(&conn).unwrap().len(), 1);

    let id = first[0].id.to_string();
    alerts::handle(
        &conn,
        &top(&["fintrack", "alerts", "ack", "--id", id.as_str()]),
        AlertThresholds::default(),
    )
    .unwrap();

    let feed = alert_feed(store::list_alerts(&conn).unwrap());
    assert!(feed.unread.is_empty());
    assert_eq!(feed.read.len(), 1);
    assert!(feed.read[0].is_read);

    // acknowledged messages are not raised again
    assert!(
        alerts::record(&conn, march, AlertThresholds::default())
            .unwrap()
            .is_empty()
    );
    assert!(!store::mark_alert_read(&conn, 999).unwrap());
}

#[test]
fn alerts_subcommands_parse() {
    let m = cli::build_cli().get_matches_from(["fintrack", "alerts", "list", "--all", "--json"]);
    let (_, alerts_m) = m.subcommand().unwrap();
    let (name, list) = alerts_m.subcommand().unwrap();
    assert_eq!(name, "list");
    assert!(list.get_flag("all"));
    assert!(
        cli::build_cli()
            .try_get_matches_from(["fintrack", "alerts", "ack"])
            .is_err()
    );
}

#[test]
fn doctor_reports_malformed_and_unbudgeted_rows() {
    let conn = setup();
    assert!(doctor::issues(&conn).unwrap().is_empty());

    store::add_category(
        &conn,
        &Category {
            id: "pets".into(),
            name: "Pets".into(),
            kind: TransactionKind::Expense,
            color: "#795548".into(),
        },
    )
    .unwrap();
    spend(&conn, "2025-03-02", 40, "pets");
    conn.execute(
        "INSERT INTO transactions(date, amount, type, category_id, description)
         VALUES ('2025-03-05', '12', 'refund', 'food', '')",
        [],
    )
    .unwrap();

    let issues = doctor::issues(&conn).unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0][0], "malformed_transaction");
    assert!(issues[0][1].contains("refund"));
    assert_eq!(issues[1], vec!["unbudgeted_category".to_string(), "Pets".to_string()]);
}

#[test]
fn settings_validate_currency() {
    let conn = setup();
    let set = |args: &[&str]| {
        let mut full = vec!["fintrack", "settings", "set"];
        full.extend_from_slice(args);
        settings::handle(&conn, &top(&full))
    };
    set(&["--currency", "eur", "--locale", "de-DE"]).unwrap();
    let opts = format_options(&conn).unwrap();
    assert_eq!(opts.currency, "EUR");
    assert_eq!(opts.locale, "de-DE");
    assert!(set(&["--currency", "euro"]).is_err());
    assert_eq!(format_options(&conn).unwrap().currency, "EUR");
}

#[test]
fn database_path_override_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("fintrack.sqlite");
    let config = fintrack::config::Config {
        database_path: Some(path.clone()),
        ..Default::default()
    };
    let conn = db::open_or_init(&config).unwrap();
    spend(&conn, "2025-03-02", 10, "food");
    drop(conn);
    assert!(path.exists());

    let reopened = db::open_or_init(&config).unwrap();
    assert_eq!(store::list_transactions(&reopened).unwrap().len(), 1);
}
