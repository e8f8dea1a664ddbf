use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{FiscalYear, RegimeError, TaxBracket, TaxRegime};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading regime tables.
#[derive(Debug, Error)]
pub enum RegimeLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Regime file contains no brackets")]
    Empty,

    #[error("Regime '{code}' has rows with different {field} values")]
    InconsistentParameters { code: String, field: &'static str },

    #[error("Regime '{code}' is invalid: {source}")]
    InvalidRegime {
        code: String,
        #[source]
        source: RegimeError,
    },
}

impl From<csv::Error> for RegimeLoaderError {
    fn from(err: csv::Error) -> Self {
        RegimeLoaderError::CsvParse(err.to_string())
    }
}

/// A single bracket row from a regime CSV file.
///
/// Each row repeats its regime's parameters so one flat file can hold several
/// regimes:
/// - `regime`: short code used to select the regime (e.g. `2526`)
/// - `label`: display name (e.g. `FY 2025-26`)
/// - `standard_deduction`, `rebate_threshold`, `cess_rate`: regime parameters
/// - `upper_bound`: the bracket's upper edge (empty for the open top bracket)
/// - `rate`: the marginal rate as a fraction (e.g. `0.05` for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegimeRecord {
    pub regime: String,
    pub label: String,
    pub standard_deduction: Decimal,
    pub rebate_threshold: Decimal,
    pub cess_rate: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Validated regimes keyed by code, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegimeTable {
    regimes: Vec<(String, TaxRegime)>,
}

impl RegimeTable {
    /// The two built-in fiscal years, keyed by their short codes.
    pub fn built_in() -> Self {
        Self {
            regimes: FiscalYear::all()
                .iter()
                .map(|year| (year.as_str().to_string(), year.regime().clone()))
                .collect(),
        }
    }

    pub fn get(
        &self,
        code: &str,
    ) -> Option<&TaxRegime> {
        self.regimes
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, regime)| regime)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.regimes.iter().map(|(code, _)| code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaxRegime)> {
        self.regimes.iter().map(|(code, regime)| (code.as_str(), regime))
    }

    pub fn len(&self) -> usize {
        self.regimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regimes.is_empty()
    }

    /// Adds `other`'s regimes, replacing any with the same code.
    pub fn merge(
        &mut self,
        other: RegimeTable,
    ) {
        for (code, regime) in other.regimes {
            match self.regimes.iter_mut().find(|(c, _)| *c == code) {
                Some(slot) => slot.1 = regime,
                None => self.regimes.push((code, regime)),
            }
        }
    }
}

/// Loader for regime tables from CSV files.
///
/// Rows are grouped by their `regime` code; each group becomes one
/// [`TaxRegime`] after [`TaxRegime::new`] validates it.
pub struct RegimeLoader;

impl RegimeLoader {
    /// Parse regime records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RegimeRecord>, RegimeLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RegimeRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by regime code and validate each group.
    ///
    /// Groups keep the order in which their codes first appear, and brackets
    /// keep their row order within a group. Every row of a group must carry
    /// the same label, deduction, threshold and cess rate.
    pub fn build(records: &[RegimeRecord]) -> Result<RegimeTable, RegimeLoaderError> {
        if records.is_empty() {
            return Err(RegimeLoaderError::Empty);
        }

        let mut groups: Vec<(&str, Vec<&RegimeRecord>)> = Vec::new();
        for record in records {
            match groups.iter_mut().find(|(code, _)| *code == record.regime) {
                Some((_, group)) => group.push(record),
                None => groups.push((record.regime.as_str(), vec![record])),
            }
        }

        let mut table = RegimeTable::default();
        for (code, group) in groups {
            let regime = Self::build_regime(code, &group)?;
            debug!(code, label = regime.label(), brackets = group.len(), "loaded regime");
            table.regimes.push((code.to_string(), regime));
        }

        Ok(table)
    }

    /// Parse and build a regime table from a file on disk.
    pub fn load_file(path: &Path) -> Result<RegimeTable, RegimeLoaderError> {
        let file = File::open(path).map_err(|source| RegimeLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::parse(file)?;
        Self::build(&records)
    }

    fn build_regime(
        code: &str,
        group: &[&RegimeRecord],
    ) -> Result<TaxRegime, RegimeLoaderError> {
        // Groups are never empty: each starts with the record that created it.
        let first = group[0];

        let inconsistent = |field| RegimeLoaderError::InconsistentParameters {
            code: code.to_string(),
            field,
        };
        for record in &group[1..] {
            if record.label != first.label {
                return Err(inconsistent("label"));
            }
            if record.standard_deduction != first.standard_deduction {
                return Err(inconsistent("standard_deduction"));
            }
            if record.rebate_threshold != first.rebate_threshold {
                return Err(inconsistent("rebate_threshold"));
            }
            if record.cess_rate != first.cess_rate {
                return Err(inconsistent("cess_rate"));
            }
        }

        let brackets = group
            .iter()
            .map(|record| TaxBracket {
                upper_bound: record.upper_bound,
                rate: record.rate,
            })
            .collect();

        TaxRegime::new(
            first.label.clone(),
            first.standard_deduction,
            first.rebate_threshold,
            brackets,
            first.cess_rate,
        )
        .map_err(|source| RegimeLoaderError::InvalidRegime {
            code: code.to_string(),
            source,
        })
    }
}
