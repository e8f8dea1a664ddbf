use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two values a caller supplies per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub gross_income: Decimal,
    pub is_salaried: bool,
}

impl TaxInput {
    pub fn new(
        gross_income: Decimal,
        is_salaried: bool,
    ) -> Self {
        Self {
            gross_income,
            is_salaried,
        }
    }
}

impl Default for TaxInput {
    fn default() -> Self {
        Self {
            gross_income: Decimal::ZERO,
            is_salaried: true,
        }
    }
}
