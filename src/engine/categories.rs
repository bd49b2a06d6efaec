// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category_id: String,
    pub category_name: String,
    pub amount: Decimal,
    pub color: String,
    pub percentage: u32,
}

/// Share of `part` in `total` as a whole percent, half rounded up.
///
/// Returns 0 when `total` is zero or `part` is negative, and saturates at
/// `u32::MAX` when the ratio does not fit.
pub fn percent_of(part: Decimal, total: Decimal) -> u32 {
    if total.is_zero() || part.is_sign_negative() {
        return 0;
    }
    let Some(pct) = part
        .checked_div(total)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return u32::MAX;
    };
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Per-category totals for one transaction kind, largest first.
///
/// Name and color come from the first transaction seen for a category.
/// Equal amounts are ordered by category id, descending. Percentages are
/// rounded independently and may not add up to exactly 100.
pub fn compute_category_summary(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategorySummary> = Vec::new();
    let mut total = Decimal::ZERO;

    for tx in transactions.iter().filter(|t| t.kind == kind) {
        total += tx.amount;
        let cat = &tx.category;
        match index.get(cat.id.as_str()) {
            Some(&i) => out[i].amount += tx.amount,
            None => {
                index.insert(cat.id.as_str(), out.len());
                out.push(CategorySummary {
                    category_id: cat.id.clone(),
                    category_name: cat.name.clone(),
                    amount: tx.amount,
                    color: cat.color.clone(),
                    percentage: 0,
                });
            }
        }
    }

    if total.is_zero() {
        return Vec::new();
    }

    for s in out.iter_mut() {
        s.percentage = percent_of(s.amount, total);
    }
    out.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| b.category_id.cmp(&a.category_id))
    });
    out
}
