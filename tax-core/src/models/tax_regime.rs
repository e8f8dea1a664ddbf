use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::{Slab, TaxBracket};

/// Errors that can occur when building a [`TaxRegime`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeError {
    #[error("regime must have at least one bracket")]
    NoBrackets,

    #[error("bracket {index} has no upper bound but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    #[error("top bracket must be unbounded, got upper bound {0}")]
    BoundedTopBracket(Decimal),

    #[error("bracket upper bounds must be strictly increasing, got {next} after {previous}")]
    BoundsNotIncreasing { previous: Decimal, next: Decimal },

    #[error("bracket rate must be in [0, 1), got {0}")]
    InvalidBracketRate(Decimal),

    #[error("cess rate must be in [0, 1), got {0}")]
    InvalidCessRate(Decimal),

    #[error("standard deduction must be non-negative, got {0}")]
    NegativeStandardDeduction(Decimal),

    #[error("rebate threshold must be non-negative, got {0}")]
    NegativeRebateThreshold(Decimal),
}

/// Complete parameter set for one fiscal year's slab computation.
///
/// A `TaxRegime` can only be obtained through [`TaxRegime::new`] (or the
/// built-in [`FiscalYear`](super::FiscalYear) tables), so every instance has
/// ordered brackets ending in an open top bracket and rates in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxRegime {
    label: String,
    standard_deduction: Decimal,
    rebate_threshold: Decimal,
    brackets: Vec<TaxBracket>,
    cess_rate: Decimal,
}

impl TaxRegime {
    /// Builds a regime after checking its brackets and rates.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeError`] if:
    /// - `brackets` is empty
    /// - a bracket other than the last has no upper bound, or the last has one
    /// - upper bounds are not strictly increasing from zero
    /// - a bracket rate or `cess_rate` is outside `[0, 1)`
    /// - `standard_deduction` or `rebate_threshold` is negative
    pub fn new(
        label: impl Into<String>,
        standard_deduction: Decimal,
        rebate_threshold: Decimal,
        brackets: Vec<TaxBracket>,
        cess_rate: Decimal,
    ) -> Result<Self, RegimeError> {
        let regime = Self::from_parts(
            label,
            standard_deduction,
            rebate_threshold,
            brackets,
            cess_rate,
        );
        regime.validate()?;
        Ok(regime)
    }

    /// Assembles a regime without validation. Only used for the built-in
    /// tables, which are checked by tests.
    pub(crate) fn from_parts(
        label: impl Into<String>,
        standard_deduction: Decimal,
        rebate_threshold: Decimal,
        brackets: Vec<TaxBracket>,
        cess_rate: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            standard_deduction,
            rebate_threshold,
            brackets,
            cess_rate,
        }
    }

    /// Checks the structural rules listed on [`TaxRegime::new`].
    pub fn validate(&self) -> Result<(), RegimeError> {
        if self.standard_deduction < Decimal::ZERO {
            return Err(RegimeError::NegativeStandardDeduction(
                self.standard_deduction,
            ));
        }
        if self.rebate_threshold < Decimal::ZERO {
            return Err(RegimeError::NegativeRebateThreshold(self.rebate_threshold));
        }
        if !is_fraction(self.cess_rate) {
            return Err(RegimeError::InvalidCessRate(self.cess_rate));
        }

        let Some((top, lower)) = self.brackets.split_last() else {
            return Err(RegimeError::NoBrackets);
        };

        let mut previous = Decimal::ZERO;
        for (index, bracket) in lower.iter().enumerate() {
            let Some(upper) = bracket.upper_bound else {
                return Err(RegimeError::UnboundedBeforeLast { index });
            };
            if upper <= previous {
                return Err(RegimeError::BoundsNotIncreasing {
                    previous,
                    next: upper,
                });
            }
            if !is_fraction(bracket.rate) {
                return Err(RegimeError::InvalidBracketRate(bracket.rate));
            }
            previous = upper;
        }

        if let Some(upper) = top.upper_bound {
            return Err(RegimeError::BoundedTopBracket(upper));
        }
        if !is_fraction(top.rate) {
            return Err(RegimeError::InvalidBracketRate(top.rate));
        }

        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn standard_deduction(&self) -> Decimal {
        self.standard_deduction
    }

    pub fn rebate_threshold(&self) -> Decimal {
        self.rebate_threshold
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn cess_rate(&self) -> Decimal {
        self.cess_rate
    }

    /// Brackets with their lower edges filled in, lowest first.
    pub fn slabs(&self) -> impl Iterator<Item = Slab> + '_ {
        self.brackets.iter().scan(Decimal::ZERO, |lower, bracket| {
            let slab = Slab {
                lower: *lower,
                upper: bracket.upper_bound,
                rate: bracket.rate,
            };
            if let Some(upper) = bracket.upper_bound {
                *lower = upper;
            }
            Some(slab)
        })
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate < Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::bounded(dec!(300000), dec!(0)),
            TaxBracket::bounded(dec!(700000), dec!(0.05)),
            TaxBracket::unbounded(dec!(0.10)),
        ]
    }

    fn regime_with(brackets: Vec<TaxBracket>) -> Result<TaxRegime, RegimeError> {
        TaxRegime::new("test", dec!(75000), dec!(700000), brackets, dec!(0.04))
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn new_accepts_well_formed_regime() {
        let regime = regime_with(brackets()).unwrap();

        assert_eq!(regime.label(), "test");
        assert_eq!(regime.brackets().len(), 3);
    }

    #[test]
    fn new_rejects_empty_brackets() {
        assert_eq!(regime_with(vec![]), Err(RegimeError::NoBrackets));
    }

    #[test]
    fn new_rejects_unbounded_middle_bracket() {
        let mut b = brackets();
        b[1].upper_bound = None;

        assert_eq!(
            regime_with(b),
            Err(RegimeError::UnboundedBeforeLast { index: 1 })
        );
    }

    #[test]
    fn new_rejects_bounded_top_bracket() {
        let mut b = brackets();
        b[2].upper_bound = Some(dec!(900000));

        assert_eq!(
            regime_with(b),
            Err(RegimeError::BoundedTopBracket(dec!(900000)))
        );
    }

    #[test]
    fn new_rejects_non_increasing_bounds() {
        let b = vec![
            TaxBracket::bounded(dec!(700000), dec!(0)),
            TaxBracket::bounded(dec!(700000), dec!(0.05)),
            TaxBracket::unbounded(dec!(0.10)),
        ];

        assert_eq!(
            regime_with(b),
            Err(RegimeError::BoundsNotIncreasing {
                previous: dec!(700000),
                next: dec!(700000),
            })
        );
    }

    #[test]
    fn new_rejects_zero_first_bound() {
        let b = vec![
            TaxBracket::bounded(dec!(0), dec!(0)),
            TaxBracket::unbounded(dec!(0.10)),
        ];

        assert!(matches!(
            regime_with(b),
            Err(RegimeError::BoundsNotIncreasing { .. })
        ));
    }

    #[test]
    fn new_rejects_rate_of_one() {
        let mut b = brackets();
        b[2].rate = dec!(1);

        assert_eq!(regime_with(b), Err(RegimeError::InvalidBracketRate(dec!(1))));
    }

    #[test]
    fn new_rejects_negative_rate() {
        let mut b = brackets();
        b[0].rate = dec!(-0.01);

        assert_eq!(
            regime_with(b),
            Err(RegimeError::InvalidBracketRate(dec!(-0.01)))
        );
    }

    #[test]
    fn new_rejects_invalid_cess_rate() {
        let result = TaxRegime::new("test", dec!(75000), dec!(700000), brackets(), dec!(1.5));

        assert_eq!(result, Err(RegimeError::InvalidCessRate(dec!(1.5))));
    }

    #[test]
    fn new_rejects_negative_deduction() {
        let result = TaxRegime::new("test", dec!(-1), dec!(700000), brackets(), dec!(0.04));

        assert_eq!(result, Err(RegimeError::NegativeStandardDeduction(dec!(-1))));
    }

    #[test]
    fn new_rejects_negative_rebate_threshold() {
        let result = TaxRegime::new("test", dec!(75000), dec!(-5), brackets(), dec!(0.04));

        assert_eq!(result, Err(RegimeError::NegativeRebateThreshold(dec!(-5))));
    }

    // =========================================================================
    // slabs tests
    // =========================================================================

    #[test]
    fn slabs_fill_in_lower_edges() {
        let regime = regime_with(brackets()).unwrap();

        let slabs: Vec<Slab> = regime.slabs().collect();

        assert_eq!(
            slabs,
            vec![
                Slab {
                    lower: dec!(0),
                    upper: Some(dec!(300000)),
                    rate: dec!(0),
                },
                Slab {
                    lower: dec!(300000),
                    upper: Some(dec!(700000)),
                    rate: dec!(0.05),
                },
                Slab {
                    lower: dec!(700000),
                    upper: None,
                    rate: dec!(0.10),
                },
            ]
        );
    }
}
