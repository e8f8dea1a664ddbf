pub mod calculations;
pub mod models;

pub use calculations::{compute_tax, compute_taxable_income};
pub use models::*;
