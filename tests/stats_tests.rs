// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::engine::compute_stats;
use fintrack::models::{Category, Transaction, TransactionKind};
use rust_decimal::Decimal;
use std::str::FromStr;

fn tx(id: &str, amount: &str, kind: TransactionKind, cat: &str, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from_str(amount).unwrap(),
        kind,
        category: Category {
            id: cat.into(),
            name: cat.into(),
            kind,
            color: "#000000".into(),
        },
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: String::new(),
    }
}

#[test]
fn totals_and_balance() {
    let txs = vec![
        tx("1", "500", TransactionKind::Income, "salary", "2025-03-01"),
        tx("2", "200", TransactionKind::Expense, "food", "2025-03-02"),
        tx("3", "100", TransactionKind::Expense, "transport", "2025-03-03"),
    ];
    let s = compute_stats(&txs);
    assert_eq!(s.total_income, Decimal::from(500));
    assert_eq!(s.total_expense, Decimal::from(300));
    assert_eq!(s.balance, Decimal::from(200));
}

#[test]
fn empty_input_is_all_zero() {
    let s = compute_stats(&[]);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
}

#[test]
fn balance_can_go_negative_and_stays_exact() {
    let txs = vec![
        tx("1", "0.10", TransactionKind::Income, "salary", "2025-03-01"),
        tx("2", "0.20", TransactionKind::Income, "salary", "2025-03-01"),
        tx("3", "1.00", TransactionKind::Expense, "food", "2025-03-02"),
    ];
    let s = compute_stats(&txs);
    assert_eq!(s.total_income, Decimal::from_str("0.30").unwrap());
    assert_eq!(s.balance, Decimal::from_str("-0.70").unwrap());
    assert_eq!(s.balance, s.total_income - s.total_expense);
}
