// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::engine::categories::percent_of;
use fintrack::engine::compute_category_summary;
use fintrack::models::{Category, Transaction, TransactionKind};
use rust_decimal::Decimal;

fn tx(id: &str, amount: i64, kind: TransactionKind, cat: (&str, &str, &str)) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from(amount),
        kind,
        category: Category {
            id: cat.0.into(),
            name: cat.1.into(),
            kind,
            color: cat.2.into(),
        },
        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        description: String::new(),
    }
}

const FOOD: (&str, &str, &str) = ("food", "Food & Dining", "#FF5722");
const TRANSPORT: (&str, &str, &str) = ("transport", "Transportation", "#2196F3");

#[test]
fn grouped_and_split_evenly_on_a_tie() {
    let txs = vec![
        tx("1", 60, TransactionKind::Expense, FOOD),
        tx("2", 40, TransactionKind::Expense, FOOD),
        tx("3", 100, TransactionKind::Expense, TRANSPORT),
        tx("4", 900, TransactionKind::Income, ("salary", "Salary", "#4CAF50")),
    ];
    let summary = compute_category_summary(&txs, TransactionKind::Expense);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].category_id, "transport");
    assert_eq!(summary[1].category_id, "food");
    for s in &summary {
        assert_eq!(s.amount, Decimal::from(100));
        assert_eq!(s.percentage, 50);
    }
    assert_eq!(summary[1].category_name, "Food & Dining");
    assert_eq!(summary[1].color, "#FF5722");
}

#[test]
fn sorted_by_amount_descending() {
    let txs = vec![
        tx("1", 10, TransactionKind::Expense, FOOD),
        tx("2", 70, TransactionKind::Expense, TRANSPORT),
        tx("3", 20, TransactionKind::Expense, ("health", "Healthcare", "#F44336")),
    ];
    let summary = compute_category_summary(&txs, TransactionKind::Expense);
    let ids: Vec<&str> = summary.iter().map(|s| s.category_id.as_str()).collect();
    assert_eq!(ids, ["transport", "health", "food"]);
    let pcts: Vec<u32> = summary.iter().map(|s| s.percentage).collect();
    assert_eq!(pcts, [70, 20, 10]);
}

#[test]
fn no_matching_kind_gives_empty_summary() {
    let txs = vec![tx("1", 10, TransactionKind::Income, ("salary", "Salary", ""))];
    assert!(compute_category_summary(&txs, TransactionKind::Expense).is_empty());
    assert!(compute_category_summary(&[], TransactionKind::Income).is_empty());
}

#[test]
fn zero_amounts_do_not_divide_by_zero() {
    let txs = vec![tx("1", 0, TransactionKind::Expense, FOOD)];
    assert!(compute_category_summary(&txs, TransactionKind::Expense).is_empty());
}

#[test]
fn order_of_input_does_not_matter() {
    let txs = vec![
        tx("1", 30, TransactionKind::Expense, FOOD),
        tx("2", 30, TransactionKind::Expense, TRANSPORT),
        tx("3", 15, TransactionKind::Expense, ("shopping", "Shopping", "#FF9800")),
        tx("4", 25, TransactionKind::Expense, FOOD),
        tx("5", 5, TransactionKind::Expense, ("other", "Other", "#607D8B")),
    ];
    let expected = compute_category_summary(&txs, TransactionKind::Expense);

    let mut reversed = txs.clone();
    reversed.reverse();
    assert_eq!(compute_category_summary(&reversed, TransactionKind::Expense), expected);

    for k in 1..txs.len() {
        let mut rotated = txs.clone();
        rotated.rotate_left(k);
        assert_eq!(compute_category_summary(&rotated, TransactionKind::Expense), expected);
    }
}

#[test]
fn rounded_percentages_stay_close_to_100() {
    let cats = [FOOD, TRANSPORT, ("health", "Healthcare", "#F44336")];
    let txs: Vec<Transaction> = cats
        .iter()
        .enumerate()
        .map(|(i, c)| tx(&i.to_string(), 1, TransactionKind::Expense, *c))
        .collect();
    let summary = compute_category_summary(&txs, TransactionKind::Expense);
    let sum: u32 = summary.iter().map(|s| s.percentage).sum();
    assert_eq!(sum, 99);
    assert!(sum.abs_diff(100) <= summary.len() as u32);
}

#[test]
fn percent_rounds_half_up() {
    assert_eq!(percent_of(Decimal::new(25, 1), Decimal::from(100)), 3);
    assert_eq!(percent_of(Decimal::from(1), Decimal::from(8)), 13);
    assert_eq!(percent_of(Decimal::from(5), Decimal::ZERO), 0);
    assert_eq!(percent_of(Decimal::MAX, Decimal::new(1, 28)), u32::MAX);
    assert_eq!(percent_of(Decimal::from(-5), Decimal::from(10)), 0);
}
