//! Normalization of caller-supplied income values.
//!
//! The presentation layer hands the engine whatever the user typed. Empty or
//! non-numeric text and non-finite floats yield [`TaxResult::zero`] instead of
//! an error, so every entry point here is total.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::calculations::SlabTaxCalculator;
use crate::{TaxInput, TaxRegime, TaxResult};

/// Largest gross income the engine evaluates. Larger values are clamped so
/// that bracket and cess arithmetic stays well inside [`Decimal::MAX`].
pub const MAX_GROSS_INCOME: Decimal = dec!(1000000000000000000000000);

/// Strips whitespace, thousands separators and a leading rupee sign.
fn normalize_income_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('₹').unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect()
}

/// Parses free-text income into a [`Decimal`].
///
/// Handles `,` and `_` as digit separators (`"12,00,000"`), an optional
/// leading `₹`, and scientific notation (`"1.2e6"`). Returns `None` for empty
/// or non-numeric input. Numbers too large for [`Decimal`] saturate to
/// [`MAX_GROSS_INCOME`] (or 0 when negative).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::parse_gross_income;
///
/// assert_eq!(parse_gross_income("12,00,000"), Some(dec!(1200000)));
/// assert_eq!(parse_gross_income("₹ 7,00,001"), Some(dec!(700001)));
/// assert_eq!(parse_gross_income(""), None);
/// assert_eq!(parse_gross_income("abc"), None);
/// ```
pub fn parse_gross_income(s: &str) -> Option<Decimal> {
    let normalized = normalize_income_input(s);
    if normalized.is_empty() {
        return None;
    }
    match normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
    {
        Ok(amount) => Some(amount),
        // Well-formed but outside Decimal's range.
        Err(_) if is_numeric_literal(&normalized) => normalized
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan())
            .map(saturating_from_f64),
        Err(e) => {
            warn!(input = %s, "income is not a number: {}", e);
            None
        }
    }
}

/// Digits with an optional sign, point and exponent. Rejects words such as
/// `inf` or `nan` that `f64` would otherwise accept.
fn is_numeric_literal(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

/// Converts a float, saturating values `Decimal` cannot hold: large positive
/// values become [`MAX_GROSS_INCOME`], negative or vanishingly small ones 0.
fn saturating_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        if value.is_sign_negative() || value.abs() < 1.0 {
            Decimal::ZERO
        } else {
            MAX_GROSS_INCOME
        }
    })
}

/// Clamps a gross income into `[0, MAX_GROSS_INCOME]`.
pub fn clamp_gross_income(gross_income: Decimal) -> Decimal {
    if gross_income > MAX_GROSS_INCOME {
        warn!(%gross_income, max = %MAX_GROSS_INCOME, "gross income clamped to maximum");
        return MAX_GROSS_INCOME;
    }
    gross_income.max(Decimal::ZERO)
}

/// Computes tax for free-text income. Unparseable text gives a zero result.
pub fn compute_tax_from_str(
    gross_income: &str,
    is_salaried: bool,
    regime: &TaxRegime,
) -> TaxResult {
    match parse_gross_income(gross_income) {
        Some(amount) => {
            SlabTaxCalculator::new(regime).calculate(&TaxInput::new(amount, is_salaried))
        }
        None => TaxResult::zero(),
    }
}

/// Computes tax for a floating-point income. NaN and infinities give a zero
/// result.
pub fn compute_tax_from_f64(
    gross_income: f64,
    is_salaried: bool,
    regime: &TaxRegime,
) -> TaxResult {
    if !gross_income.is_finite() {
        return TaxResult::zero();
    }
    let amount = saturating_from_f64(gross_income);
    SlabTaxCalculator::new(regime).calculate(&TaxInput::new(amount, is_salaried))
}
