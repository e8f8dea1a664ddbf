//! Side-by-side evaluation of one income under two regimes.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::SlabTaxCalculator;
use crate::{TaxInput, TaxRegime, TaxResult};

/// Results for the same input under an earlier and a later regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeComparison {
    pub earlier: TaxResult,
    pub later: TaxResult,
}

impl RegimeComparison {
    pub fn new(
        earlier: TaxResult,
        later: TaxResult,
    ) -> Self {
        Self { earlier, later }
    }

    /// Evaluates `input` under both regimes.
    pub fn compare(
        input: &TaxInput,
        earlier: &TaxRegime,
        later: &TaxRegime,
    ) -> Self {
        Self {
            earlier: SlabTaxCalculator::new(earlier).calculate(input),
            later: SlabTaxCalculator::new(later).calculate(input),
        }
    }

    /// Earlier total tax minus later total tax. Negative when the later
    /// regime costs more.
    pub fn savings(&self) -> Decimal {
        self.earlier.total_tax - self.later.total_tax
    }

    pub fn later_is_cheaper(&self) -> bool {
        self.savings() > Decimal::ZERO
    }
}
