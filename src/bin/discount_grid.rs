//! Compute the discount for every predefined selection combination
//!
//! Usage: cargo run --bin discount_grid -- --output discount_grid.csv

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use rewards_calculator::tiers::load_insurance_tiers;
use rewards_calculator::{
    AmountTier, DiscountEngine, EngineConfig, HealthLevel, InsuranceTier, InsuranceTierTable, Selections,
    ShoppingTier,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "discount_grid", about = "Sweep all predefined selections")]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "discount_grid.csv")]
    output: PathBuf,

    /// Insurance tier table CSV (defaults to the built-in rates)
    #[arg(long)]
    tiers: Option<PathBuf>,

    /// Engine config JSON (defaults to the built-in rules)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One output row
#[derive(Debug, Serialize)]
struct GridRow {
    shopping: u32,
    member: bool,
    insurance: Option<u32>,
    health_level: Option<HealthLevel>,
    pharmacy_script: bool,
    bank_partner: bool,
    percentage: f64,
    amount: u32,
    is_capped: bool,
}

fn combinations() -> Vec<Selections> {
    let insurance_options: Vec<Option<u32>> = std::iter::once(None)
        .chain(InsuranceTier::ALL.iter().map(|tier| Some(tier.amount())))
        .collect();
    let health_options: Vec<Option<HealthLevel>> = std::iter::once(None)
        .chain(HealthLevel::ALL.iter().copied().map(Some))
        .collect();

    let mut all = Vec::new();
    for shopping in ShoppingTier::ALL {
        for member in [false, true] {
            for &insurance in &insurance_options {
                for &health_level in &health_options {
                    for script in [false, true] {
                        for bank in [false, true] {
                            all.push(Selections {
                                shopping_amount: Some(shopping.amount()),
                                is_member: Some(member),
                                insurance_amount: insurance,
                                health_level,
                                has_pharmacy_script: Some(script),
                                has_bank_partner: Some(bank),
                                has_health_check: None,
                            });
                        }
                    }
                }
            }
        }
    }
    all
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tiers = match &args.tiers {
        Some(path) => load_insurance_tiers(path).with_context(|| format!("loading {}", path.display()))?,
        None => InsuranceTierTable::default_pricing(),
    };
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = DiscountEngine::new(tiers, config);

    let start = Instant::now();
    let selections = combinations();

    // Compute in parallel; the engine is shared read-only
    let rows: Vec<GridRow> = selections
        .par_iter()
        .map(|s| {
            let result = engine.compute_discount(s);
            GridRow {
                shopping: s.shopping_amount.unwrap_or(0),
                member: s.member(),
                insurance: s.insurance_amount,
                health_level: s.health_level,
                pharmacy_script: s.pharmacy_script(),
                bank_partner: s.bank_partner(),
                percentage: result.percentage,
                amount: result.amount,
                is_capped: result.is_capped,
            }
        })
        .collect();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let capped = rows.iter().filter(|r| r.is_capped).count();
    println!(
        "Written {} combinations ({} at the global cap) to {} in {:?}",
        rows.len(),
        capped,
        args.output.display(),
        start.elapsed()
    );

    Ok(())
}
