// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::engine::alerts::{
    AlertInput, AlertKind, AlertThresholds, ExpenseAlert, Priority, StoredAlert, alert_feed,
    generate_alerts, new_alerts,
};
use fintrack::models::{BudgetCategory, Category, FinancialGoal, Transaction, TransactionKind};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn expense(amount: i64, date: &str) -> Transaction {
    Transaction {
        id: date.into(),
        amount: Decimal::from(amount),
        kind: TransactionKind::Expense,
        category: Category {
            id: "shopping".into(),
            name: "Shopping".into(),
            kind: TransactionKind::Expense,
            color: String::new(),
        },
        date: day(date),
        description: String::new(),
    }
}

fn goal(title: &str, date: &str, done: bool) -> FinancialGoal {
    FinancialGoal {
        id: 1,
        title: title.into(),
        target_amount: Decimal::from(1000),
        current_amount: Decimal::ZERO,
        target_date: day(date),
        category: None,
        description: None,
        is_completed: done,
    }
}

fn budget(name: &str, limit: i64, spent: i64) -> BudgetCategory {
    BudgetCategory {
        id: name.to_lowercase(),
        name: name.into(),
        budget_limit: Decimal::from(limit),
        current_spent: Decimal::from(spent),
        color: String::new(),
    }
}

fn thresholds() -> AlertThresholds {
    AlertThresholds {
        unusual_spending: Decimal::from(1000),
        goal_window_days: 7,
    }
}

#[test]
fn all_alert_kinds_ordered_by_priority() {
    let txs = vec![
        expense(800, "2025-03-05"),
        expense(300, "2025-03-20"),
        expense(5000, "2025-02-10"),
    ];
    let budgets = vec![budget("Shopping", 200, 1100), budget("Housing", 800, 0)];
    let goals = vec![
        goal("Vacation", "2025-03-30", false),
        goal("Car", "2025-04-20", false),
        goal("Laptop", "2025-03-26", true),
        goal("Missed", "2025-03-24", false),
    ];
    let input = AlertInput {
        month: "2025-03".parse().unwrap(),
        today: day("2025-03-25"),
        transactions: &txs,
        budgets: &budgets,
        goals: &goals,
        thresholds: thresholds(),
    };
    let alerts = generate_alerts(&input);
    let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        [
            AlertKind::UnusualSpending,
            AlertKind::BudgetLimit,
            AlertKind::GoalDeadline
        ]
    );
    assert_eq!(alerts[0].priority, Priority::High);
    assert_eq!(alerts[0].message, "High spending detected in 2025-03: 1100.00");
    assert_eq!(
        alerts[1].message,
        "Shopping is over budget by 900.00 (1100.00 of 200.00)"
    );
    assert_eq!(alerts[2].message, "Goal 'Vacation' is due in 5 day(s)");
}

#[test]
fn quiet_month_has_no_alerts() {
    let txs = vec![expense(100, "2025-03-05")];
    let budgets = vec![budget("Shopping", 200, 100)];
    let input = AlertInput {
        month: "2025-03".parse().unwrap(),
        today: day("2025-03-01"),
        transactions: &txs,
        budgets: &budgets,
        goals: &[],
        thresholds: AlertThresholds::default(),
    };
    assert!(generate_alerts(&input).is_empty());
}

#[test]
fn spending_exactly_at_threshold_does_not_alert() {
    let txs = vec![expense(1000, "2025-03-05")];
    let input = AlertInput {
        month: "2025-03".parse().unwrap(),
        today: day("2025-03-05"),
        transactions: &txs,
        budgets: &[],
        goals: &[],
        thresholds: thresholds(),
    };
    assert!(generate_alerts(&input).is_empty());
}

#[test]
fn alerts_serialize_with_lowercase_tags() {
    let txs = vec![expense(2000, "2025-03-05")];
    let input = AlertInput {
        month: "2025-03".parse().unwrap(),
        today: day("2025-03-05"),
        transactions: &txs,
        budgets: &[],
        goals: &[],
        thresholds: thresholds(),
    };
    let json = serde_json::to_value(generate_alerts(&input)).unwrap();
    assert_eq!(json[0]["kind"], "unusual_spending");
    assert_eq!(json[0]["priority"], "high");
}

fn alert(message: &str) -> ExpenseAlert {
    ExpenseAlert {
        kind: AlertKind::BudgetLimit,
        priority: Priority::High,
        message: message.into(),
    }
}

fn stored(id: i64, message: &str, is_read: bool, created_at: &str) -> StoredAlert {
    StoredAlert {
        id,
        alert: alert(message),
        is_read,
        created_at: created_at.into(),
    }
}

#[test]
fn only_unseen_messages_are_new() {
    let kept = vec![stored(1, "Food is over budget", true, "2025-03-01T10:00:00Z")];
    let fresh = vec![
        alert("Food is over budget"),
        alert("Rent is over budget"),
        alert("Rent is over budget"),
    ];
    let added: Vec<&str> = new_alerts(&kept, &fresh)
        .into_iter()
        .map(|a| a.message.as_str())
        .collect();
    assert_eq!(added, ["Rent is over budget"]);
}

#[test]
fn feed_splits_read_from_unread_newest_first() {
    let feed = alert_feed(vec![
        stored(1, "a", false, "2025-03-01T10:00:00Z"),
        stored(2, "b", true, "2025-03-02T10:00:00Z"),
        stored(3, "c", false, "2025-03-03T10:00:00Z"),
        stored(4, "a", true, "2025-03-01T09:00:00Z"),
    ]);
    let ids = |v: &[StoredAlert]| v.iter().map(|a| a.id).collect::<Vec<_>>();
    assert_eq!(ids(&feed.unread), [3, 1]);
    assert_eq!(ids(&feed.read), [2]);
}

#[test]
fn stored_alert_flattens_into_its_record() {
    let json = serde_json::to_value(stored(7, "x", false, "2025-03-01T10:00:00Z")).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["kind"], "budget_limit");
    assert_eq!(json["is_read"], false);
    assert_eq!(json["created_at"], "2025-03-01T10:00:00Z");
}
