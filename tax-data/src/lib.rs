mod loader;

pub use loader::{RegimeLoader, RegimeLoaderError, RegimeRecord, RegimeTable};
