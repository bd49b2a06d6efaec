// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::categories::percent_of;
use super::records::check_amount;
use super::EngineError;
use crate::models::FinancialGoal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    /// Rounded, not capped: over-funded goals report more than 100.
    pub percent: u32,
    /// Negative once the target date has passed.
    pub days_left: i64,
    pub remaining: Decimal,
}

pub fn goal_progress(goal: &FinancialGoal, today: NaiveDate) -> GoalProgress {
    let remaining = (goal.target_amount - goal.current_amount).max(Decimal::ZERO);
    GoalProgress {
        percent: percent_of(goal.current_amount.max(Decimal::ZERO), goal.target_amount),
        days_left: (goal.target_date - today).num_days(),
        remaining,
    }
}

/// Add `amount` to a goal, marking it complete once the target is reached.
/// The goal is left untouched when the new balance would be out of range.
pub fn contribute(goal: &mut FinancialGoal, amount: Decimal) -> Result<(), EngineError> {
    let amount = check_amount(amount)?;
    let total = goal
        .current_amount
        .checked_add(amount)
        .ok_or(EngineError::AmountTooLarge(amount))?;
    goal.current_amount = check_amount(total)?;
    if goal.current_amount >= goal.target_amount {
        goal.is_completed = true;
    }
    Ok(())
}
