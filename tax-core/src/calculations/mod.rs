//! Slab tax calculation for the new-regime income tax tables.
//!
//! Everything here is a pure function of its arguments: no state is read or
//! written, and identical inputs always produce identical results.

pub mod common;
pub mod comparison;
pub mod input;
pub mod slab;

pub use comparison::RegimeComparison;
pub use input::{
    MAX_GROSS_INCOME, clamp_gross_income, compute_tax_from_f64, compute_tax_from_str,
    parse_gross_income,
};
pub use slab::SlabTaxCalculator;

use rust_decimal::Decimal;

use crate::{TaxInput, TaxRegime, TaxResult};

/// Gross income less the standard deduction when salaried, minimum 0.
pub fn compute_taxable_income(
    gross_income: Decimal,
    is_salaried: bool,
    regime: &TaxRegime,
) -> Decimal {
    SlabTaxCalculator::new(regime).taxable_income(gross_income, is_salaried)
}

/// Full slab computation for one regime.
pub fn compute_tax(
    gross_income: Decimal,
    is_salaried: bool,
    regime: &TaxRegime,
) -> TaxResult {
    SlabTaxCalculator::new(regime).calculate(&TaxInput::new(gross_income, is_salaried))
}
