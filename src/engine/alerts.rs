// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::bills::days_until_due;
use super::monthly::MonthKey;
use crate::models::{BudgetCategory, FinancialGoal, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    BudgetLimit,
    UnusualSpending,
    GoalDeadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::BudgetLimit => "budget_limit",
            AlertKind::UnusualSpending => "unusual_spending",
            AlertKind::GoalDeadline => "goal_deadline",
        }
    }
}

impl FromStr for AlertKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "budget_limit" => Ok(AlertKind::BudgetLimit),
            "unusual_spending" => Ok(AlertKind::UnusualSpending),
            "goal_deadline" => Ok(AlertKind::GoalDeadline),
            other => Err(anyhow::anyhow!("Unknown alert kind '{}'", other)),
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(anyhow::anyhow!("Unknown alert priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseAlert {
    pub kind: AlertKind,
    pub priority: Priority,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertThresholds {
    pub unusual_spending: Decimal,
    pub goal_window_days: i64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            unusual_spending: Decimal::from(50_000),
            goal_window_days: 7,
        }
    }
}

pub struct AlertInput<'a> {
    pub month: MonthKey,
    pub today: NaiveDate,
    pub transactions: &'a [Transaction],
    /// Budget categories with `current_spent` already filled in.
    pub budgets: &'a [BudgetCategory],
    pub goals: &'a [FinancialGoal],
    pub thresholds: AlertThresholds,
}

/// Alerts for the given month, highest priority first.
pub fn generate_alerts(input: &AlertInput<'_>) -> Vec<ExpenseAlert> {
    let mut alerts = Vec::new();

    let month_expense: Decimal = input
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && MonthKey::of(t.date) == input.month)
        .map(|t| t.amount)
        .sum();
    if month_expense > input.thresholds.unusual_spending {
        alerts.push(ExpenseAlert {
            kind: AlertKind::UnusualSpending,
            priority: Priority::High,
            message: format!(
                "High spending detected in {}: {:.2}",
                input.month, month_expense
            ),
        });
    }

    for b in input.budgets.iter().filter(|b| b.current_spent > b.budget_limit) {
        alerts.push(ExpenseAlert {
            kind: AlertKind::BudgetLimit,
            priority: Priority::Medium,
            message: format!(
                "{} is over budget by {:.2} ({:.2} of {:.2})",
                b.name,
                b.current_spent - b.budget_limit,
                b.current_spent,
                b.budget_limit
            ),
        });
    }

    for g in input.goals.iter().filter(|g| !g.is_completed) {
        let days = days_until_due(g.target_date, input.today);
        if (0..=input.thresholds.goal_window_days).contains(&days) {
            alerts.push(ExpenseAlert {
                kind: AlertKind::GoalDeadline,
                priority: Priority::Low,
                message: format!("Goal '{}' is due in {} day(s)", g.title, days),
            });
        }
    }

    // Stable: ties keep insertion order.
    alerts.sort_by(|a, b| b.priority.cmp(&a.priority));
    alerts
}

/// An alert once it has been kept in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAlert {
    pub id: i64,
    #[serde(flatten)]
    pub alert: ExpenseAlert,
    pub is_read: bool,
    /// RFC 3339, UTC.
    pub created_at: String,
}

/// Fresh alerts whose message is not stored yet, first of each message only.
pub fn new_alerts<'a>(
    stored: &'a [StoredAlert],
    fresh: &'a [ExpenseAlert],
) -> Vec<&'a ExpenseAlert> {
    let mut seen: HashSet<&str> = stored.iter().map(|s| s.alert.message.as_str()).collect();
    fresh
        .iter()
        .filter(|a| seen.insert(a.message.as_str()))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertFeed {
    pub unread: Vec<StoredAlert>,
    pub read: Vec<StoredAlert>,
}

/// Newest first, one entry per message, split by read state.
pub fn alert_feed(mut alerts: Vec<StoredAlert>) -> AlertFeed {
    alerts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    let mut seen = HashSet::new();
    let mut feed = AlertFeed::default();
    for a in alerts {
        if !seen.insert(a.alert.message.clone()) {
            continue;
        }
        if a.is_read {
            feed.read.push(a);
        } else {
            feed.unread.push(a);
        }
    }
    feed
}
