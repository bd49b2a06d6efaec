// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Money formatting for display. Nothing in `engine` depends on this.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// ISO 4217 code, e.g. `USD`.
    pub currency: String,
    /// BCP 47 tag, e.g. `en-US`.
    pub locale: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            locale: "en-US".to_string(),
        }
    }
}

pub fn currency_symbol(code: &str) -> Option<&'static str> {
    Some(match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" | "NZD" | "SGD" | "MXN" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "INR" => "₹",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "BRL" => "R$",
        "CHF" => "CHF ",
        _ => return None,
    })
}

/// `(group separator, decimal separator)` for a locale tag.
fn separators(locale: &str) -> (char, char) {
    let lang = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match lang.as_str() {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => ('.', ','),
        "fr" | "sv" | "nb" | "fi" | "pl" | "cs" | "ru" => ('\u{a0}', ','),
        _ => (',', '.'),
    }
}

/// Two decimal places, grouped by thousands, symbol in front when known.
///
/// ```
/// use fintrack::format::{format_money, FormatOptions};
/// use rust_decimal::Decimal;
///
/// let opts = FormatOptions::default();
/// assert_eq!(format_money(Decimal::new(123456789, 2), &opts), "$1,234,567.89");
/// ```
pub fn format_money(amount: Decimal, opts: &FormatOptions) -> String {
    let (group, dec) = separators(&opts.locale);
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(ch);
    }

    let number = format!("{}{}{}", grouped, dec, frac_part);
    let sign = if negative { "-" } else { "" };
    match currency_symbol(&opts.currency) {
        Some(sym) => format!("{}{}{}", sign, sym, number),
        None => format!("{}{} {}", sign, opts.currency.to_ascii_uppercase(), number),
    }
}
