use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal bracket of a regime.
///
/// The lower edge is implied by the previous bracket's `upper_bound` (zero for
/// the first bracket). `upper_bound` is `None` only for the open top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// A bracket with both edges resolved, as walked by the calculator and
/// listed by the slab tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slab {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl Slab {
    /// Portion of `taxable_income` falling in `(lower, upper]`.
    pub fn portion_of(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let top = match self.upper {
            Some(upper) => upper.min(taxable_income),
            None => taxable_income,
        };
        (top - self.lower).max(Decimal::ZERO)
    }
}
