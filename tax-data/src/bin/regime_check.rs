use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::calculations::parse_gross_income;
use tax_core::compute_tax;
use tax_data::RegimeLoader;

/// Validate a regime CSV file and print what it defines.
///
/// The CSV file should have the following columns:
/// - regime: short code for the regime (e.g. 2526)
/// - label: display name (e.g. FY 2025-26)
/// - standard_deduction, rebate_threshold, cess_rate: regime parameters
/// - upper_bound: the bracket's upper edge (empty for the top bracket)
/// - rate: the marginal rate as a decimal (e.g. 0.05)
#[derive(Parser, Debug)]
#[command(name = "regime-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing regime brackets
    #[arg(short, long)]
    file: PathBuf,

    /// Also compute the tax on this gross income under every regime
    #[arg(short, long)]
    income: Option<String>,

    /// Treat the income as salaried (applies the standard deduction)
    #[arg(short, long, default_value_t = false)]
    salaried: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = RegimeLoader::load_file(&args.file)
        .with_context(|| format!("Failed to load regimes from: {}", args.file.display()))?;

    println!("Loaded {} regime(s) from {}", table.len(), args.file.display());

    let income = match &args.income {
        Some(raw) => Some(
            parse_gross_income(raw).with_context(|| format!("Income is not a number: {raw}"))?,
        ),
        None => None,
    };

    for (code, regime) in table.iter() {
        println!(
            "[{code}] {}: deduction {}, rebate up to {}, cess {}",
            regime.label(),
            regime.standard_deduction(),
            regime.rebate_threshold(),
            regime.cess_rate()
        );
        for slab in regime.slabs() {
            match slab.upper {
                Some(upper) => println!("    {} - {}: {}", slab.lower, upper, slab.rate),
                None => println!("    above {}: {}", slab.lower, slab.rate),
            }
        }
        if let Some(gross) = income {
            let result = compute_tax(gross, args.salaried, regime);
            println!(
                "    tax on {gross}: {} (taxable {}, rebate {})",
                result.total_tax, result.taxable_income, result.is_rebate_applicable
            );
        }
    }

    Ok(())
}
