use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use tax_ui::app::{self, Overrides, Settings};
use tax_ui::config::Config;
use tax_ui::{interactive, logging, report};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compare income tax under two new-regime slab tables.
///
/// By default FY 2024-25 is compared with FY 2025-26. Extra regimes can be
/// loaded from a CSV file with `--regimes`.
#[derive(Debug, Parser)]
#[command(name = "tax-compare", version, about)]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true, env = "TAX_COMPARE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// CSV file of extra regimes, merged over the built-in ones.
    #[arg(long, global = true)]
    regimes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare the tax on one annual income.
    Compare {
        /// Gross annual income, e.g. `1200000`, `12,00,000` or `₹12,00,000`.
        #[arg(allow_hyphen_values = true)]
        income: String,

        /// Apply the standard deduction.
        #[arg(long, conflicts_with = "not_salaried")]
        salaried: bool,

        /// Do not apply the standard deduction.
        #[arg(long)]
        not_salaried: bool,

        /// Regime code to compare from.
        #[arg(long)]
        from: Option<String>,

        /// Regime code to compare to.
        #[arg(long)]
        to: Option<String>,

        /// Print unrounded results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the slab table of a regime.
    Slabs {
        /// Regime code; both compared regimes when omitted.
        #[arg(long)]
        year: Option<String>,
    },

    /// Read incomes and commands from stdin, re-rendering after each line.
    Interactive,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let (salaried, earlier, later) = match &self.command {
            Command::Compare {
                salaried,
                not_salaried,
                from,
                to,
                ..
            } => {
                let salaried = match (salaried, not_salaried) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                (salaried, from.clone(), to.clone())
            }
            Command::Slabs { .. } | Command::Interactive => (None, None, None),
        };

        Overrides {
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            regimes_file: self.regimes.clone(),
            salaried,
            earlier,
            later,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())?;
    let settings = Settings::resolve(config, cli.overrides());

    logging::init_logging(settings.log_level.as_deref());
    if let Some(path) = &settings.log_file {
        if let Err(e) = logging::enable_file_logging(path) {
            warn!("{e}");
        }
    }
    debug!(?settings, "settings resolved");

    let table = app::load_regimes(settings.regimes_file.as_deref())?;
    let mut state = app::build_state(&table, &settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Compare { income, json, .. } => {
            state.set_income(income);
            if json {
                report::render_json(&mut out, &state)?;
            } else {
                report::render_comparison(&mut out, &state)?;
            }
        }
        Command::Slabs { year: Some(code) } => {
            let regime = table
                .get(&code)
                .ok_or_else(|| anyhow::anyhow!("unknown regime '{code}'"))?;
            report::render_slabs(&mut out, regime)?;
        }
        Command::Slabs { year: None } => {
            report::render_slabs(&mut out, state.earlier())?;
            writeln!(out)?;
            report::render_slabs(&mut out, state.later())?;
        }
        Command::Interactive => {
            interactive::run(&mut state, io::stdin().lock(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
