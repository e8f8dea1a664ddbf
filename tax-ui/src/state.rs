//! Application state for the comparison front-end.
//!
//! The engine keeps no state; this struct owns the two user inputs and
//! re-derives the results from scratch whenever they are read.

use rust_decimal::Decimal;
use tax_core::calculations::{RegimeComparison, compute_tax_from_str, parse_gross_income};
use tax_core::TaxRegime;

/// Current inputs plus the pair of regimes being compared.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Income exactly as the user typed it.
    pub income: String,
    pub is_salaried: bool,
    earlier: TaxRegime,
    later: TaxRegime,
}

impl AppState {
    pub fn new(
        earlier: TaxRegime,
        later: TaxRegime,
        is_salaried: bool,
    ) -> Self {
        Self {
            income: String::new(),
            is_salaried,
            earlier,
            later,
        }
    }

    pub fn earlier(&self) -> &TaxRegime {
        &self.earlier
    }

    pub fn later(&self) -> &TaxRegime {
        &self.later
    }

    pub fn set_income(
        &mut self,
        income: impl Into<String>,
    ) {
        self.income = income.into();
    }

    pub fn toggle_salaried(&mut self) {
        self.is_salaried = !self.is_salaried;
    }

    /// The typed income as a number, if it is one.
    pub fn gross_income(&self) -> Option<Decimal> {
        parse_gross_income(&self.income)
    }

    /// Results are only shown once a positive number has been entered.
    pub fn has_result(&self) -> bool {
        self.gross_income().is_some_and(|gross| gross > Decimal::ZERO)
    }

    /// Evaluates the current inputs under both regimes.
    pub fn comparison(&self) -> RegimeComparison {
        RegimeComparison::new(
            compute_tax_from_str(&self.income, self.is_salaried, &self.earlier),
            compute_tax_from_str(&self.income, self.is_salaried, &self.later),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{FiscalYear, TaxResult};

    use super::*;

    fn state() -> AppState {
        AppState::new(
            FiscalYear::Fy2024_25.regime().clone(),
            FiscalYear::Fy2025_26.regime().clone(),
            true,
        )
    }

    #[test]
    fn new_state_has_no_result() {
        let state = state();

        assert!(!state.has_result());
        assert_eq!(state.comparison().earlier, TaxResult::zero());
        assert_eq!(state.comparison().later, TaxResult::zero());
    }

    #[test]
    fn non_numeric_income_has_no_result() {
        let mut state = state();
        state.set_income("lots");

        assert!(!state.has_result());
        assert_eq!(state.comparison().savings(), dec!(0));
    }

    #[test]
    fn zero_or_negative_income_has_no_result() {
        let mut state = state();

        state.set_income("0");
        assert!(!state.has_result());

        state.set_income("-100");
        assert!(!state.has_result());
    }

    #[test]
    fn comparison_follows_latest_input() {
        let mut state = state();

        state.set_income("10,00,000");
        assert_eq!(state.comparison().savings(), dec!(44200));

        state.toggle_salaried();
        assert!(!state.is_salaried);
        // Taxable 1,000,000 in both years: 20,000 + 30,000 (+4%) vs rebate
        assert_eq!(state.comparison().earlier.total_tax, dec!(52000));
        assert_eq!(state.comparison().later.total_tax, dec!(0));

        state.set_income("2000000");
        assert_eq!(state.comparison().later.total_tax, dec!(208000));
    }
}
