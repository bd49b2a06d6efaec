// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::engine::reconcile::{CANONICAL_IDS, known_labels, resolve};

/// Every label the app itself produces: form ids, display names and the
/// names used in sample data.
const PRODUCED_LABELS: &[(&str, &str)] = &[
    ("food", "food"),
    ("Food & Dining", "food"),
    ("Food", "food"),
    ("transport", "transport"),
    ("Transportation", "transport"),
    ("Transport", "transport"),
    ("utilities", "utilities"),
    ("Utilities", "utilities"),
    ("entertainment", "entertainment"),
    ("Entertainment", "entertainment"),
    ("health", "health"),
    ("Healthcare", "health"),
    ("Health", "health"),
    ("shopping", "shopping"),
    ("Shopping", "shopping"),
    ("housing", "housing"),
    ("Housing", "housing"),
    ("other", "other"),
    ("Other", "other"),
];

#[test]
fn every_produced_label_resolves() {
    for (label, id) in PRODUCED_LABELS {
        assert_eq!(resolve(label), Some(*id), "label {label:?}");
    }
}

#[test]
fn lookup_ignores_case_and_padding() {
    assert_eq!(resolve("  TRANSPORTATION "), Some("transport"));
    assert_eq!(resolve("food and dining"), Some("food"));
}

#[test]
fn unknown_labels_do_not_resolve() {
    assert_eq!(resolve("Pets"), None);
    assert_eq!(resolve(""), None);
    assert_eq!(resolve("salary"), None);
}

#[test]
fn table_targets_are_canonical_and_complete() {
    for (label, id) in known_labels() {
        assert!(CANONICAL_IDS.contains(&id), "{label} maps to {id}");
        assert_eq!(label, label.to_lowercase());
    }
    for id in CANONICAL_IDS {
        assert_eq!(resolve(id), Some(*id));
    }
}
