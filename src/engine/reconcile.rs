// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category label reconciliation.
//!
//! Transactions, bill reminders and budget categories were historically
//! labelled with different spellings ("Transportation" vs "transport",
//! "Healthcare" vs "health"). This table is the single place that maps a
//! known label to its canonical budget category id. Matching is
//! case-insensitive and ignores surrounding whitespace; nothing is inferred
//! from string similarity. Bump [`TABLE_VERSION`] whenever an entry changes.

pub const TABLE_VERSION: u32 = 1;

/// Canonical budget category ids, in default budget order.
pub const CANONICAL_IDS: &[&str] = &[
    "food",
    "transport",
    "utilities",
    "entertainment",
    "health",
    "shopping",
    "housing",
    "other",
];

/// `(label, canonical id)`, labels stored lowercase.
const TABLE: &[(&str, &str)] = &[
    ("food", "food"),
    ("food & dining", "food"),
    ("food and dining", "food"),
    ("transport", "transport"),
    ("transportation", "transport"),
    ("utilities", "utilities"),
    ("utility", "utilities"),
    ("entertainment", "entertainment"),
    ("health", "health"),
    ("healthcare", "health"),
    ("health care", "health"),
    ("shopping", "shopping"),
    ("housing", "housing"),
    ("other", "other"),
];

/// Canonical id for a known label, or `None` when the label is unknown.
pub fn resolve(label: &str) -> Option<&'static str> {
    let norm = label.trim().to_lowercase();
    TABLE
        .iter()
        .find(|(known, _)| *known == norm)
        .map(|(_, id)| *id)
}

/// Every label the table knows, for diagnostics.
pub fn known_labels() -> impl Iterator<Item = (&'static str, &'static str)> {
    TABLE.iter().copied()
}
