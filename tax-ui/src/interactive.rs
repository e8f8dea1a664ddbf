//! Line-oriented interactive session.
//!
//! Each line is either a command or a new income. The comparison is
//! re-rendered after every change, so the output always reflects the latest
//! input.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::logging;
use crate::report::{render_comparison, render_slabs};
use crate::state::AppState;

const HELP: &str = "\
Type an annual income (e.g. 1200000 or 12,00,000) to compare.
Commands:
  s           toggle salaried (standard deduction)
  slabs       show the slab tables of both regimes
  log LEVEL   change the log filter (e.g. debug)
  help        show this message
  q           quit";

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    ToggleSalaried,
    Slabs,
    LogLevel(&'a str),
    Help,
    Income(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "q" | "quit" | "exit" => Self::Quit,
            "s" | "salaried" => Self::ToggleSalaried,
            "slabs" => Self::Slabs,
            "help" | "?" => Self::Help,
            _ => match line.strip_prefix("log ") {
                Some(level) => Self::LogLevel(level.trim()),
                None => Self::Income(line),
            },
        }
    }
}

/// Runs the session until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(
        out,
        "Comparing {} with {}. Type 'help' for commands.",
        state.earlier().label(),
        state.later().label()
    )?;
    render_status(out, state)?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Slabs => {
                render_slabs(out, state.earlier())?;
                writeln!(out)?;
                render_slabs(out, state.later())?;
            }
            Command::LogLevel(level) => match logging::set_log_level(level) {
                Ok(()) => writeln!(out, "Log level set to {level}")?,
                Err(e) => {
                    warn!("{e}");
                    writeln!(out, "Could not change log level: {e}")?;
                }
            },
            Command::ToggleSalaried => {
                state.toggle_salaried();
                debug!(is_salaried = state.is_salaried, "salaried toggled");
                render_status(out, state)?;
            }
            Command::Income(income) => {
                state.set_income(income);
                debug!(income, "income updated");
                render_status(out, state)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn render_status<W: Write>(
    out: &mut W,
    state: &AppState,
) -> io::Result<()> {
    writeln!(
        out,
        "Income: {}  Salaried: {}",
        if state.income.is_empty() { "-" } else { state.income.as_str() },
        if state.is_salaried { "yes" } else { "no" }
    )?;
    render_comparison(out, state)?;
    writeln!(out)
}
