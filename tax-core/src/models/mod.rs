mod fiscal_year;
mod tax_bracket;
mod tax_input;
mod tax_regime;
mod tax_result;

pub use fiscal_year::FiscalYear;
pub use tax_bracket::{Slab, TaxBracket};
pub use tax_input::TaxInput;
pub use tax_regime::{RegimeError, TaxRegime};
pub use tax_result::TaxResult;
