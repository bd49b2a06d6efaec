// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Validation of persisted rows into [`Transaction`] values.
//!
//! A corrupt row never aborts the batch. It is skipped, logged, and counted
//! in [`Intake::rejected`] so callers can surface it.

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::EngineError;
use crate::models::{Category, RawTransaction, Transaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    pub id: String,
    pub error: EngineError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intake {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<Rejected>,
}

impl Intake {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Validate every row, keeping input order for the accepted ones.
pub fn intake<I>(rows: I) -> Intake
where
    I: IntoIterator<Item = RawTransaction>,
{
    let mut out = Intake::default();
    for row in rows {
        match parse_transaction(&row) {
            Ok(tx) => out.transactions.push(tx),
            Err(error) => {
                tracing::warn!(id = %row.id, %error, "skipping malformed transaction");
                out.rejected.push(Rejected { id: row.id, error });
            }
        }
    }
    out
}

pub fn parse_transaction(row: &RawTransaction) -> Result<Transaction, EngineError> {
    let amount = parse_amount(&row.amount)?;
    let kind: TransactionKind = row.kind.parse()?;
    let date = parse_calendar_date(&row.date)?;
    let category_id = row.category_id.trim();
    if category_id.is_empty() {
        return Err(EngineError::MissingCategory);
    }
    let name = row.category_name.trim();
    Ok(Transaction {
        id: row.id.clone(),
        amount,
        kind,
        category: Category {
            id: category_id.to_string(),
            name: if name.is_empty() {
                category_id.to_string()
            } else {
                name.to_string()
            },
            kind,
            color: row.category_color.clone(),
        },
        date,
        description: row.description.clone(),
    })
}

/// Largest amount a single record may carry (10^15). Keeps every sum the
/// engine builds inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

pub fn parse_amount(s: &str) -> Result<Decimal, EngineError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| EngineError::InvalidAmount(s.to_string()))?;
    check_amount(amount)
}

/// Reject negative amounts and amounts above [`MAX_AMOUNT`].
pub fn check_amount(amount: Decimal) -> Result<Decimal, EngineError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(EngineError::AmountTooLarge(amount));
    }
    Ok(amount)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar date of their own offset; no conversion to
/// UTC or to the machine's zone happens here.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, EngineError> {
    let s = s.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| EngineError::InvalidDate(s.to_string()))?;
    // Month keys are only ordered chronologically with four-digit years.
    if !(0..=9999).contains(&date.year()) {
        return Err(EngineError::YearOutOfRange(date.year()));
    }
    Ok(date)
}
