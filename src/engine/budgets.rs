// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::monthly::MonthKey;
use super::records::MAX_AMOUNT;
use super::{EngineError, reconcile};
use crate::models::{BudgetCategory, Transaction, TransactionKind};

/// Fill `current_spent` from expenses dated in `[period_start, period_end)`.
///
/// A transaction is attributed through its category id, then its category
/// name. Each label goes through the reconciliation table first and then
/// falls back to a case-insensitive match on the budget category id, which
/// covers user-created categories. Unmatched spend is left out.
pub fn compute_budget_status(
    budget_categories: &[BudgetCategory],
    transactions: &[Transaction],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Vec<BudgetCategory> {
    let mut out: Vec<BudgetCategory> = budget_categories
        .iter()
        .map(|b| BudgetCategory {
            current_spent: Decimal::ZERO,
            ..b.clone()
        })
        .collect();

    let by_id = index_by_id(&out);
    let in_period = transactions.iter().filter(|t| {
        t.kind == TransactionKind::Expense && t.date >= period_start && t.date < period_end
    });
    for tx in in_period {
        match attribute(tx, &by_id) {
            Some(i) => out[i].current_spent += tx.amount,
            None => tracing::debug!(
                id = %tx.id,
                category = %tx.category.id,
                "expense not attributed to any budget category"
            ),
        }
    }
    out
}

fn index_by_id(categories: &[BudgetCategory]) -> HashMap<String, usize> {
    let mut by_id = HashMap::new();
    for (i, b) in categories.iter().enumerate() {
        by_id.entry(b.id.trim().to_lowercase()).or_insert(i);
    }
    by_id
}

/// Expenses, of any date, that no budget category would pick up.
pub fn unattributed<'a>(
    budget_categories: &[BudgetCategory],
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    let by_id = index_by_id(budget_categories);
    transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && attribute(t, &by_id).is_none())
        .collect()
}

fn attribute(tx: &Transaction, by_id: &HashMap<String, usize>) -> Option<usize> {
    for label in [tx.category.id.as_str(), tx.category.name.as_str()] {
        if let Some(i) = reconcile::resolve(label).and_then(|id| by_id.get(id)) {
            return Some(*i);
        }
        if let Some(i) = by_id.get(&label.trim().to_lowercase()) {
            return Some(*i);
        }
    }
    None
}

/// Split `total` evenly over `count` categories in whole units.
///
/// Whatever does not divide evenly, fractional part included, goes to the
/// first entry, so the shares always add up to `total`.
pub fn auto_distribute(total: Decimal, count: usize) -> Result<Vec<Decimal>, EngineError> {
    if total.is_sign_negative() && !total.is_zero() {
        return Err(EngineError::NegativeBudget(total));
    }
    if total > MAX_AMOUNT {
        return Err(EngineError::AmountTooLarge(total));
    }
    if count == 0 {
        return Ok(Vec::new());
    }
    let n = Decimal::from(count as u64);
    let share = (total / n).floor();
    let remainder = total - share * n;
    let mut shares = vec![share; count];
    shares[0] += remainder;
    Ok(shares)
}

/// Overwrite each category's limit with its share of `total`.
pub fn apply_distribution(
    categories: &mut [BudgetCategory],
    total: Decimal,
) -> Result<(), EngineError> {
    let shares = auto_distribute(total, categories.len())?;
    for (cat, share) in categories.iter_mut().zip(shares) {
        cat.budget_limit = share;
    }
    Ok(())
}

/// Spent as a percentage of limit, capped at 100. Zero for a non-positive limit.
pub fn budget_progress(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent
        .checked_div(limit)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ONE_HUNDRED, |p| p.min(Decimal::ONE_HUNDRED))
}

pub fn over_budget(categories: &[BudgetCategory]) -> Vec<&BudgetCategory> {
    categories
        .iter()
        .filter(|c| c.current_spent > c.budget_limit)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetTotals {
    pub monthly_budget: Decimal,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub unallocated: Decimal,
}

pub fn budget_totals(categories: &[BudgetCategory], monthly_budget: Decimal) -> BudgetTotals {
    let allocated: Decimal = categories.iter().map(|c| c.budget_limit).sum();
    let spent: Decimal = categories.iter().map(|c| c.current_spent).sum();
    BudgetTotals {
        monthly_budget,
        allocated,
        spent,
        remaining: monthly_budget - spent,
        unallocated: monthly_budget - allocated,
    }
}

/// Half-open `[first day, first day of next month)` for a calendar month.
pub fn month_period(month: MonthKey) -> Option<(NaiveDate, NaiveDate)> {
    Some((month.first_day()?, month.next().first_day()?))
}
