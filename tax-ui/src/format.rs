//! Display formatting for rupee amounts and slab rates.
//!
//! Amounts are rounded to whole rupees (half away from zero) and grouped the
//! Indian way: the last three digits, then pairs (`₹12,34,567`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::Slab;
use tax_core::calculations::common::round_half_up;

const LAKH: Decimal = dec!(100000);

/// Formats an amount as whole rupees, e.g. `₹9,25,000` or `-₹45,500`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}₹{}", group_indian(&digits))
}

/// Whole-lakh amounts read as `₹7 lakh`; anything else falls back to
/// [`format_inr`].
pub fn format_lakh(amount: Decimal) -> String {
    if amount > Decimal::ZERO && (amount % LAKH).is_zero() {
        format!("₹{} lakh", (amount / LAKH).normalize())
    } else {
        format_inr(amount)
    }
}

/// A rate as a percentage; zero reads as `Nil`.
pub fn format_rate(rate: Decimal) -> String {
    if rate.is_zero() {
        "Nil".to_string()
    } else {
        format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
    }
}

/// The income band of a slab, e.g. `₹3 lakh to ₹7 lakh`.
pub fn format_slab_range(slab: &Slab) -> String {
    match (slab.lower.is_zero(), slab.upper) {
        (true, Some(upper)) => format!("Up to {}", format_lakh(upper)),
        (false, Some(upper)) => format!("{} to {}", format_lakh(slab.lower), format_lakh(upper)),
        (_, None) => format!("Above {}", format_lakh(slab.lower)),
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
