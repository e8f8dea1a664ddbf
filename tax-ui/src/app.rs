//! Start-up wiring: merges config file and command-line settings, loads the
//! regime table and builds the initial [`AppState`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tax_data::{RegimeLoader, RegimeTable};
use tracing::{debug, info};

use crate::config::Config;
use crate::state::AppState;

/// Values given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub regimes_file: Option<PathBuf>,
    pub salaried: Option<bool>,
    pub earlier: Option<String>,
    pub later: Option<String>,
}

/// Effective settings after applying overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub regimes_file: Option<PathBuf>,
    pub salaried: bool,
    pub earlier: String,
    pub later: String,
}

impl Settings {
    pub fn resolve(
        config: Config,
        overrides: Overrides,
    ) -> Self {
        Self {
            log_level: overrides.log_level.or(config.log_level),
            log_file: overrides.log_file.or(config.log_file),
            regimes_file: overrides.regimes_file.or(config.regimes_file),
            salaried: overrides.salaried.unwrap_or(config.salaried),
            earlier: overrides.earlier.unwrap_or(config.earlier),
            later: overrides.later.unwrap_or(config.later),
        }
    }
}

/// Built-in fiscal years, with any regimes from `regimes_file` merged in.
pub fn load_regimes(regimes_file: Option<&Path>) -> Result<RegimeTable> {
    let mut table = RegimeTable::built_in();

    if let Some(path) = regimes_file {
        let extra = RegimeLoader::load_file(path)
            .with_context(|| format!("failed to load regimes from '{}'", path.display()))?;
        info!("Loaded {} regime(s) from {}", extra.len(), path.display());
        table.merge(extra);
    }

    debug!(codes = ?table.codes().collect::<Vec<_>>(), "regime table ready");
    Ok(table)
}

/// Looks up the two regimes named in `settings` and builds the state.
pub fn build_state(
    table: &RegimeTable,
    settings: &Settings,
) -> Result<AppState> {
    let earlier = lookup(table, &settings.earlier)?;
    let later = lookup(table, &settings.later)?;

    Ok(AppState::new(earlier.clone(), later.clone(), settings.salaried))
}

fn lookup<'a>(
    table: &'a RegimeTable,
    code: &str,
) -> Result<&'a tax_core::TaxRegime> {
    table.get(code).with_context(|| {
        format!(
            "unknown regime '{code}' (available: {})",
            table.codes().collect::<Vec<_>>().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn overrides_win_over_config() {
        let config = Config {
            salaried: true,
            log_level: Some("info".into()),
            regimes_file: Some(PathBuf::from("a.csv")),
            ..Config::default()
        };
        let overrides = Overrides {
            log_level: Some("trace".into()),
            salaried: Some(false),
            later: Some("2627".into()),
            ..Overrides::default()
        };

        let settings = Settings::resolve(config, overrides);

        assert_eq!(settings.log_level.as_deref(), Some("trace"));
        assert_eq!(settings.regimes_file, Some(PathBuf::from("a.csv")));
        assert!(!settings.salaried);
        assert_eq!(settings.earlier, "2425");
        assert_eq!(settings.later, "2627");
    }

    #[test]
    fn built_in_table_without_file() {
        let table = load_regimes(None).unwrap();

        assert_eq!(table, RegimeTable::built_in());
    }

    #[test]
    fn missing_regimes_file_is_an_error() {
        assert!(load_regimes(Some(Path::new("/nonexistent/regimes.csv"))).is_err());
    }

    #[test]
    fn default_settings_build_state() {
        let settings = Settings::resolve(Config::default(), Overrides::default());
        let state = build_state(&RegimeTable::built_in(), &settings).unwrap();

        assert_eq!(state.earlier().label(), "FY 2024-25");
        assert_eq!(state.later().label(), "FY 2025-26");
        assert!(state.is_salaried);
    }

    #[test]
    fn unknown_code_is_reported() {
        let settings = Settings::resolve(
            Config::default(),
            Overrides {
                earlier: Some("1999".into()),
                ..Overrides::default()
            },
        );

        let err = build_state(&RegimeTable::built_in(), &settings).unwrap_err();

        assert!(err.to_string().contains("unknown regime '1999'"), "{err}");
        assert!(err.to_string().contains("2425, 2526"), "{err}");
    }
}
