use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one regime evaluation. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub taxable_income: Decimal,
    pub is_rebate_applicable: bool,
    pub base_tax: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub after_tax_income: Decimal,
}

impl TaxResult {
    /// Neutral result returned for input that is not a number.
    pub fn zero() -> Self {
        Self {
            taxable_income: Decimal::ZERO,
            is_rebate_applicable: false,
            base_tax: Decimal::ZERO,
            cess: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            after_tax_income: Decimal::ZERO,
        }
    }

    /// Full rebate: nothing is owed and the whole gross income is kept.
    pub fn rebated(
        taxable_income: Decimal,
        gross_income: Decimal,
    ) -> Self {
        Self {
            taxable_income,
            is_rebate_applicable: true,
            base_tax: Decimal::ZERO,
            cess: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            after_tax_income: gross_income,
        }
    }

    /// After-tax income spread over twelve months.
    pub fn monthly_after_tax(&self) -> Decimal {
        self.after_tax_income / Decimal::from(12)
    }
}
