// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::models::{Transaction, TransactionKind};

/// Calendar month, ordered chronologically. Renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of months from 0000-01 through this one, inclusive.
    fn count_from_epoch(&self) -> u32 {
        let n = i64::from(self.year) * 12 + i64::from(self.month);
        u32::try_from(n.max(0)).unwrap_or(u32::MAX)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || anyhow::anyhow!("Invalid month '{}', expected YYYY-MM", s);
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Trailing window of `months` calendar months ending at `end`, inclusive.
///
/// The window never reaches back before 0000-01; a longer window is cut
/// short there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub end: MonthKey,
    pub months: u32,
}

impl MonthWindow {
    pub fn trailing(end: MonthKey, months: u32) -> Self {
        Self {
            end,
            months: months.min(end.count_from_epoch()),
        }
    }

    /// Months in the window, oldest first.
    pub fn keys(&self) -> Vec<MonthKey> {
        let n = self.months.min(self.end.count_from_epoch());
        let mut keys = Vec::with_capacity(n as usize);
        let mut cur = self.end;
        for _ in 0..n {
            keys.push(cur);
            cur = cur.prev();
        }
        keys.reverse();
        keys
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense per calendar month, ascending by month.
///
/// With a window, every month of the window is present (zero when idle)
/// and transactions outside it are dropped.
pub fn compute_monthly_buckets(
    transactions: &[Transaction],
    window: Option<MonthWindow>,
) -> Vec<MonthlyBucket> {
    let mut map: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();
    if let Some(w) = window {
        for key in w.keys() {
            map.insert(key, (Decimal::ZERO, Decimal::ZERO));
        }
    }

    for tx in transactions {
        let key = MonthKey::of(tx.date);
        let entry = if window.is_some() {
            match map.get_mut(&key) {
                Some(e) => e,
                None => continue,
            }
        } else {
            map.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO))
        };
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.amount,
            TransactionKind::Expense => entry.1 += tx.amount,
        }
    }

    map.into_iter()
        .map(|(month, (income, expense))| MonthlyBucket {
            month,
            income,
            expense,
        })
        .collect()
}
