//! Text and JSON rendering of comparison results and slab tables.

use std::io::{self, Write};

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};
use tax_core::calculations::RegimeComparison;
use tax_core::{TaxRegime, TaxResult};

use crate::format::{format_inr, format_lakh, format_rate, format_slab_range};
use crate::state::AppState;

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 16;
const RULE: &str = "--------------------------------------------";

/// Inputs shared by both result cards.
struct CardContext {
    gross_income: Decimal,
    is_salaried: bool,
}

/// Writes both result cards and the savings line, or a prompt when there is
/// nothing to show yet.
pub fn render_comparison<W: Write>(
    out: &mut W,
    state: &AppState,
) -> io::Result<()> {
    let Some(gross_income) = state.gross_income().filter(|_| state.has_result()) else {
        writeln!(out, "Enter a positive annual income to see results.")?;
        return Ok(());
    };

    let comparison = state.comparison();
    let context = CardContext {
        gross_income,
        is_salaried: state.is_salaried,
    };

    render_card(out, &context, state.earlier(), &comparison.earlier, false)?;
    writeln!(out)?;
    render_card(out, &context, state.later(), &comparison.later, true)?;
    writeln!(out)?;
    render_savings(out, state, &comparison)
}

fn render_card<W: Write>(
    out: &mut W,
    context: &CardContext,
    regime: &TaxRegime,
    result: &TaxResult,
    is_active: bool,
) -> io::Result<()> {
    if is_active {
        writeln!(out, "{} Tax  [New Regime]", regime.label())?;
    } else {
        writeln!(out, "{} Tax", regime.label())?;
    }

    line(out, "Gross Income:", context.gross_income)?;
    if context.is_salaried {
        line(out, "Standard Deduction:", regime.standard_deduction())?;
    }
    line(out, "Taxable Income:", result.taxable_income)?;
    writeln!(out, "  {RULE}")?;

    if result.is_rebate_applicable {
        writeln!(
            out,
            "  No tax - Eligible for rebate (≤ {})",
            format_lakh(regime.rebate_threshold())
        )?;
    } else {
        line(out, "Base Tax:", result.base_tax)?;
        line(out, "Health & Education Cess:", result.cess)?;
    }
    writeln!(out, "  {RULE}")?;

    line(out, "Total Tax:", result.total_tax)?;
    line(out, "After-Tax Income (Annual):", result.after_tax_income)?;
    line(out, "Monthly Take-Home:", result.monthly_after_tax())
}

fn render_savings<W: Write>(
    out: &mut W,
    state: &AppState,
    comparison: &RegimeComparison,
) -> io::Result<()> {
    let savings = comparison.savings();
    if comparison.later_is_cheaper() {
        writeln!(
            out,
            "You will save {} in taxes under {} compared to {}.",
            format_inr(savings),
            state.later().label(),
            state.earlier().label()
        )
    } else if savings < Decimal::ZERO {
        writeln!(
            out,
            "{} costs {} more in taxes than {}.",
            state.later().label(),
            format_inr(-savings),
            state.earlier().label()
        )
    } else {
        writeln!(
            out,
            "Your tax is the same under {} and {}.",
            state.earlier().label(),
            state.later().label()
        )
    }
}

fn line<W: Write>(
    out: &mut W,
    label: &str,
    amount: Decimal,
) -> io::Result<()> {
    writeln!(
        out,
        "  {label:<LABEL_WIDTH$}{:>VALUE_WIDTH$}",
        format_inr(amount)
    )
}

/// Row for the slab table output
#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "Taxable income")]
    range: String,

    #[tabled(rename = "Rate")]
    rate: String,
}

/// Writes a regime's slabs as a table, followed by the cess footnote.
pub fn render_slabs<W: Write>(
    out: &mut W,
    regime: &TaxRegime,
) -> io::Result<()> {
    let rows: Vec<SlabRow> = regime
        .slabs()
        .map(|slab| SlabRow {
            range: format_slab_range(&slab),
            rate: format_rate(slab.rate),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    writeln!(out, "Tax Slabs for {}", regime.label())?;
    writeln!(out, "{table}")?;
    writeln!(
        out,
        "* Plus {} Health and Education Cess on tax",
        format_rate(regime.cess_rate())
    )?;
    writeln!(
        out,
        "* Standard deduction {} for salaried employees; no tax up to {} taxable income",
        format_inr(regime.standard_deduction()),
        format_lakh(regime.rebate_threshold())
    )
}

/// JSON form of one regime's result.
#[derive(Debug, Serialize)]
struct RegimeReport<'a> {
    label: &'a str,
    #[serde(flatten)]
    result: &'a TaxResult,
    monthly_after_tax: Decimal,
}

/// JSON document for `--json` output. Amounts are unrounded.
#[derive(Debug, Serialize)]
struct ComparisonReport<'a> {
    income: &'a str,
    gross_income: Option<Decimal>,
    is_salaried: bool,
    earlier: RegimeReport<'a>,
    later: RegimeReport<'a>,
    savings: Decimal,
}

/// Writes the comparison as pretty-printed JSON. Always emits both results,
/// zero-valued when the income is not a number.
pub fn render_json<W: Write>(
    out: &mut W,
    state: &AppState,
) -> anyhow::Result<()> {
    let comparison = state.comparison();
    let report = ComparisonReport {
        income: &state.income,
        gross_income: state.gross_income(),
        is_salaried: state.is_salaried,
        earlier: RegimeReport {
            label: state.earlier().label(),
            result: &comparison.earlier,
            monthly_after_tax: comparison.earlier.monthly_after_tax(),
        },
        later: RegimeReport {
            label: state.later().label(),
            result: &comparison.later,
            monthly_after_tax: comparison.later.monthly_after_tax(),
        },
        savings: comparison.savings(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
