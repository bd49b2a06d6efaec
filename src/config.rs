// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;
use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::engine::alerts::AlertThresholds;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Overrides the platform data dir when set.
    pub database_path: Option<PathBuf>,
    pub alerts: AlertThresholds,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = AlertThresholds::default();
        Self {
            database_path: env::var("FINTRACK_DB")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            alerts: AlertThresholds {
                unusual_spending: env::var("FINTRACK_ALERT_THRESHOLD")
                    .ok()
                    .and_then(|v| v.trim().parse::<Decimal>().ok())
                    .unwrap_or(defaults.unusual_spending),
                goal_window_days: env::var("FINTRACK_GOAL_WINDOW_DAYS")
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.goal_window_days),
            },
        }
    }
}
