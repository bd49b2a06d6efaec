// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;

use crate::models::{BillReminder, Recurrence};

pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BillSchedule {
    pub upcoming: Vec<BillReminder>,
    pub overdue: Vec<BillReminder>,
}

/// Split unpaid bills into upcoming (due today or later) and overdue.
/// Both lists are sorted by due date, then id.
pub fn partition_bills(bills: &[BillReminder], today: NaiveDate) -> BillSchedule {
    let mut schedule = BillSchedule::default();
    for bill in bills.iter().filter(|b| !b.is_paid) {
        if days_until_due(bill.due_date, today) >= 0 {
            schedule.upcoming.push(bill.clone());
        } else {
            schedule.overdue.push(bill.clone());
        }
    }
    let by_due = |a: &BillReminder, b: &BillReminder| {
        a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id))
    };
    schedule.upcoming.sort_by(by_due);
    schedule.overdue.sort_by(by_due);
    schedule
}

/// Due date of the next occurrence of a recurring bill.
///
/// Month and year steps clamp to the last day of a shorter month
/// (Jan 31 -> Feb 28). Returns `None` for one-off bills.
pub fn next_due_date(bill: &BillReminder) -> Option<NaiveDate> {
    let due = bill.due_date;
    match bill.recurrence {
        Recurrence::None => None,
        Recurrence::Weekly => due.checked_add_signed(Duration::days(7)),
        Recurrence::Monthly => due.checked_add_months(Months::new(1)),
        Recurrence::Yearly => due.checked_add_months(Months::new(12)),
    }
}
