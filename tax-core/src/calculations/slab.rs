//! Progressive slab tax calculation.
//!
//! A single calculator walks any [`TaxRegime`]'s brackets, so every fiscal
//! year shares the same semantics:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable income: gross income, less the standard deduction when salaried, minimum 0 |
//! | 2    | Rebate: taxable income at or below the threshold owes nothing (cliff edge, no marginal relief) |
//! | 3    | Base tax: Σ rate × portion of taxable income inside each slab |
//! | 4    | Cess: base tax × cess rate |
//! | 5    | Total tax: base tax + cess; after-tax income: gross income − total tax |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::SlabTaxCalculator;
//! use tax_core::{FiscalYear, TaxInput};
//!
//! let calculator = SlabTaxCalculator::new(FiscalYear::Fy2024_25.regime());
//! let result = calculator.calculate(&TaxInput::new(dec!(1000000), true));
//!
//! assert_eq!(result.taxable_income, dec!(925000));
//! assert_eq!(result.base_tax, dec!(42500));
//! assert_eq!(result.cess, dec!(1700));
//! assert_eq!(result.total_tax, dec!(44200));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::max;
use crate::calculations::input::clamp_gross_income;
use crate::{TaxInput, TaxRegime, TaxResult};

/// Calculator for one regime's slab tax.
#[derive(Debug, Clone, Copy)]
pub struct SlabTaxCalculator<'a> {
    regime: &'a TaxRegime,
}

impl<'a> SlabTaxCalculator<'a> {
    pub fn new(regime: &'a TaxRegime) -> Self {
        Self { regime }
    }

    pub fn regime(&self) -> &'a TaxRegime {
        self.regime
    }

    /// Runs every step for one input. Never fails: negative gross income is
    /// treated as zero and oversized values are clamped first.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let gross_income = clamp_gross_income(input.gross_income);
        let taxable_income = self.taxable_income(gross_income, input.is_salaried);

        if self.is_rebate_applicable(taxable_income) {
            debug!(
                regime = self.regime.label(),
                %taxable_income,
                threshold = %self.regime.rebate_threshold(),
                "rebate applies, no tax due"
            );
            return TaxResult::rebated(taxable_income, gross_income);
        }

        let base_tax = self.base_tax(taxable_income);
        let cess = self.cess(base_tax);
        let total_tax = base_tax + cess;

        debug!(
            regime = self.regime.label(),
            %taxable_income,
            %base_tax,
            %cess,
            %total_tax,
            "slab tax calculated"
        );

        TaxResult {
            taxable_income,
            is_rebate_applicable: false,
            base_tax,
            cess,
            total_tax,
            after_tax_income: gross_income - total_tax,
        }
    }

    /// Gross income less the standard deduction for salaried taxpayers,
    /// never below zero.
    pub fn taxable_income(
        &self,
        gross_income: Decimal,
        is_salaried: bool,
    ) -> Decimal {
        let gross_income = clamp_gross_income(gross_income);
        if !is_salaried {
            return gross_income;
        }
        max(
            gross_income - self.regime.standard_deduction(),
            Decimal::ZERO,
        )
    }

    fn is_rebate_applicable(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        taxable_income <= self.regime.rebate_threshold()
    }

    fn base_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.regime
            .slabs()
            .take_while(|slab| slab.lower < taxable_income)
            .map(|slab| {
                let portion = slab.portion_of(taxable_income);
                let tax = portion * slab.rate;
                trace!(lower = %slab.lower, rate = %slab.rate, %portion, %tax, "slab");
                tax
            })
            .sum()
    }

    fn cess(
        &self,
        base_tax: Decimal,
    ) -> Decimal {
        base_tax * self.regime.cess_rate()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::FiscalYear;

    fn fy_a() -> SlabTaxCalculator<'static> {
        SlabTaxCalculator::new(FiscalYear::Fy2024_25.regime())
    }

    fn fy_b() -> SlabTaxCalculator<'static> {
        SlabTaxCalculator::new(FiscalYear::Fy2025_26.regime())
    }

    // =========================================================================
    // taxable_income tests
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_deduction_when_salaried() {
        let result = fy_a().taxable_income(dec!(1000000), true);

        assert_eq!(result, dec!(925000));
    }

    #[test]
    fn taxable_income_ignores_deduction_when_not_salaried() {
        let result = fy_a().taxable_income(dec!(1000000), false);

        assert_eq!(result, dec!(1000000));
    }

    #[test]
    fn taxable_income_returns_zero_when_deduction_exceeds_gross() {
        let result = fy_b().taxable_income(dec!(50000), true);

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn taxable_income_clamps_negative_gross() {
        assert_eq!(fy_a().taxable_income(dec!(-10000), false), dec!(0));
        assert_eq!(fy_a().taxable_income(dec!(-10000), true), dec!(0));
    }

    // =========================================================================
    // base_tax tests
    // =========================================================================

    #[test]
    fn base_tax_zero_inside_nil_slab() {
        assert_eq!(fy_a().base_tax(dec!(300000)), dec!(0));
        assert_eq!(fy_b().base_tax(dec!(400000)), dec!(0));
    }

    #[test]
    fn base_tax_partial_second_slab() {
        let result = fy_a().base_tax(dec!(500000));

        // 5% of 200,000
        assert_eq!(result, dec!(10000));
    }

    #[test]
    fn base_tax_fy_a_reaches_top_slab() {
        let result = fy_a().base_tax(dec!(2000000));

        // 20,000 + 30,000 + 30,000 + 60,000 + 150,000
        assert_eq!(result, dec!(290000));
    }

    #[test]
    fn base_tax_fy_b_reaches_top_slab() {
        let result = fy_b().base_tax(dec!(3000000));

        // 20,000 + 40,000 + 60,000 + 80,000 + 100,000 + 180,000
        assert_eq!(result, dec!(480000));
    }

    #[test]
    fn base_tax_on_exact_bracket_edge() {
        let result = fy_b().base_tax(dec!(2400000));

        assert_eq!(result, dec!(300000));
    }

    // =========================================================================
    // cess tests
    // =========================================================================

    #[test]
    fn cess_is_four_percent_of_base_tax() {
        assert_eq!(fy_a().cess(dec!(42500)), dec!(1700));
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_salaried_fy_a() {
        let result = fy_a().calculate(&TaxInput::new(dec!(1000000), true));

        assert_eq!(
            result,
            TaxResult {
                taxable_income: dec!(925000),
                is_rebate_applicable: false,
                base_tax: dec!(42500),
                cess: dec!(1700),
                total_tax: dec!(44200),
                after_tax_income: dec!(955800),
            }
        );
    }

    #[test]
    fn calculate_salaried_fy_b_gets_rebate() {
        let result = fy_b().calculate(&TaxInput::new(dec!(1000000), true));

        assert_eq!(result, TaxResult::rebated(dec!(925000), dec!(1000000)));
    }

    #[test]
    fn calculate_not_salaried_fy_b() {
        let result = fy_b().calculate(&TaxInput::new(dec!(2000000), false));

        assert_eq!(result.taxable_income, dec!(2000000));
        assert_eq!(result.base_tax, dec!(200000));
        assert_eq!(result.cess, dec!(8000));
        assert_eq!(result.total_tax, dec!(208000));
        assert_eq!(result.after_tax_income, dec!(1792000));
    }

    #[test]
    fn calculate_fy_a_rebate_cliff() {
        let at = fy_a().calculate(&TaxInput::new(dec!(700000), false));
        let over = fy_a().calculate(&TaxInput::new(dec!(700001), false));

        assert!(at.is_rebate_applicable);
        assert_eq!(at.total_tax, dec!(0));
        assert!(!over.is_rebate_applicable);
        // 20,000.10 base + 800.004 cess
        assert_eq!(over.total_tax, dec!(20800.104));
    }

    #[test]
    fn calculate_fy_b_rebate_cliff() {
        let at = fy_b().calculate(&TaxInput::new(dec!(1275000), true));
        let over = fy_b().calculate(&TaxInput::new(dec!(1275001), true));

        assert_eq!(at.taxable_income, dec!(1200000));
        assert_eq!(at.total_tax, dec!(0));
        assert_eq!(over.taxable_income, dec!(1200001));
        // 60,000.15 base + 2,400.006 cess
        assert_eq!(over.total_tax, dec!(62400.156));
    }

    #[test]
    fn calculate_negative_gross_is_treated_as_zero() {
        let result = fy_a().calculate(&TaxInput::new(dec!(-250000), true));

        assert_eq!(result, TaxResult::rebated(dec!(0), dec!(0)));
    }

    #[test]
    fn calculate_keeps_unrounded_values() {
        let result = fy_a().calculate(&TaxInput::new(dec!(700001.5), false));

        // 5% of 400,000 + 10% of 1.5 = 20,000.15; cess 800.006
        assert_eq!(result.base_tax, dec!(20000.15));
        assert_eq!(result.total_tax, dec!(20800.156));
    }
}
