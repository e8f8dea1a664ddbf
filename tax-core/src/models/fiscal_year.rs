use std::fmt;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{TaxBracket, TaxRegime};

const STANDARD_DEDUCTION: Decimal = dec!(75000);
const CESS_RATE: Decimal = dec!(0.04);

static FY_2024_25: LazyLock<TaxRegime> = LazyLock::new(|| {
    TaxRegime::from_parts(
        FiscalYear::Fy2024_25.label(),
        STANDARD_DEDUCTION,
        dec!(700000),
        vec![
            TaxBracket::bounded(dec!(300000), dec!(0)),
            TaxBracket::bounded(dec!(700000), dec!(0.05)),
            TaxBracket::bounded(dec!(1000000), dec!(0.10)),
            TaxBracket::bounded(dec!(1200000), dec!(0.15)),
            TaxBracket::bounded(dec!(1500000), dec!(0.20)),
            TaxBracket::unbounded(dec!(0.30)),
        ],
        CESS_RATE,
    )
});

static FY_2025_26: LazyLock<TaxRegime> = LazyLock::new(|| {
    TaxRegime::from_parts(
        FiscalYear::Fy2025_26.label(),
        STANDARD_DEDUCTION,
        dec!(1200000),
        vec![
            TaxBracket::bounded(dec!(400000), dec!(0)),
            TaxBracket::bounded(dec!(800000), dec!(0.05)),
            TaxBracket::bounded(dec!(1200000), dec!(0.10)),
            TaxBracket::bounded(dec!(1600000), dec!(0.15)),
            TaxBracket::bounded(dec!(2000000), dec!(0.20)),
            TaxBracket::bounded(dec!(2400000), dec!(0.25)),
            TaxBracket::unbounded(dec!(0.30)),
        ],
        CESS_RATE,
    )
});

/// Fiscal years with a built-in new-regime slab table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiscalYear {
    Fy2024_25,
    Fy2025_26,
}

impl FiscalYear {
    pub fn all() -> &'static [FiscalYear] {
        &[FiscalYear::Fy2024_25, FiscalYear::Fy2025_26]
    }

    /// Short code, e.g. `"2425"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fy2024_25 => "2425",
            Self::Fy2025_26 => "2526",
        }
    }

    /// Accepts the short code (`"2526"`) or the long form (`"2025-26"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2425" | "2024-25" => Some(Self::Fy2024_25),
            "2526" | "2025-26" => Some(Self::Fy2025_26),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fy2024_25 => "FY 2024-25",
            Self::Fy2025_26 => "FY 2025-26",
        }
    }

    pub fn regime(&self) -> &'static TaxRegime {
        match self {
            Self::Fy2024_25 => &FY_2024_25,
            Self::Fy2025_26 => &FY_2025_26,
        }
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn built_in_regimes_pass_validation() {
        for year in FiscalYear::all() {
            assert_eq!(year.regime().validate(), Ok(()), "{year}");
        }
    }

    #[test]
    fn fy_2024_25_table() {
        let regime = FiscalYear::Fy2024_25.regime();

        assert_eq!(regime.label(), "FY 2024-25");
        assert_eq!(regime.brackets().len(), 6);
        assert_eq!(regime.standard_deduction(), dec!(75000));
        assert_eq!(regime.rebate_threshold(), dec!(700000));
        assert_eq!(regime.cess_rate(), dec!(0.04));
    }

    #[test]
    fn fy_2025_26_table() {
        let regime = FiscalYear::Fy2025_26.regime();

        assert_eq!(regime.label(), "FY 2025-26");
        assert_eq!(regime.brackets().len(), 7);
        assert_eq!(regime.standard_deduction(), dec!(75000));
        assert_eq!(regime.rebate_threshold(), dec!(1200000));
        assert_eq!(regime.brackets()[5], TaxBracket::bounded(dec!(2400000), dec!(0.25)));
    }

    #[test]
    fn parse_round_trips_codes() {
        for year in FiscalYear::all() {
            assert_eq!(FiscalYear::parse(year.as_str()), Some(*year));
        }
        assert_eq!(FiscalYear::parse("2025-26"), Some(FiscalYear::Fy2025_26));
        assert_eq!(FiscalYear::parse("2099"), None);
    }
}
