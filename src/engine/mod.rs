// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over in-memory transactions and budgets.
//!
//! Nothing in here touches the database, the clock or the settings table.
//! Callers load data, pass it in, and get derived values back.

pub mod alerts;
pub mod bills;
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod monthly;
pub mod reconcile;
pub mod records;
pub mod stats;

use rust_decimal::Decimal;
use thiserror::Error;

pub use budgets::{auto_distribute, compute_budget_status};
pub use categories::{CategorySummary, compute_category_summary};
pub use monthly::{MonthKey, MonthWindow, MonthlyBucket, compute_monthly_buckets};
pub use records::{Intake, MAX_AMOUNT, Rejected, check_amount, intake};
pub use stats::{Stats, compute_stats};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("amount {0} is negative")]
    NegativeAmount(Decimal),

    #[error("amount {0} is above the maximum of {max}", max = records::MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    #[error("unknown transaction type '{0}', expected income|expense")]
    UnknownKind(String),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("year {0} outside 0000..=9999")]
    YearOutOfRange(i32),

    #[error("missing category")]
    MissingCategory,

    #[error("budget total {0} is negative")]
    NegativeBudget(Decimal),
}

impl serde::Serialize for EngineError {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}
