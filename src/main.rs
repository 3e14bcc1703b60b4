//! Rewards Calculator CLI
//!
//! Computes the monthly discount for one set of selections

use anyhow::{Context, Result};
use clap::Parser;
use rewards_calculator::discount::format_rand;
use rewards_calculator::selection::parse_custom_amount;
use rewards_calculator::tiers::load_insurance_tiers;
use rewards_calculator::{
    AmountTier, DiscountEngine, EngineConfig, HealthLevel, InsuranceTier, InsuranceTierTable, Quote,
    RewardsSession, Selections, ShoppingTier,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rewards_calculator", version, about = "Estimate the monthly rewards discount")]
struct Cli {
    /// Monthly shopping spend in rand (500, 1500, 2000, 3000 or your own amount)
    #[arg(long, value_name = "AMOUNT")]
    shopping: Option<String>,

    /// Rewards programme member
    #[arg(long)]
    member: bool,

    /// Monthly insurance premium in rand (500 to 4500, or your own amount)
    #[arg(long, value_name = "AMOUNT")]
    insurance: Option<String>,

    /// Health level: athlete, active, healthier, unhealthy or ohboy
    #[arg(long, value_name = "LEVEL")]
    health: Option<HealthLevel>,

    /// Fills a pharmacy script
    #[arg(long)]
    script: bool,

    /// Banks with the partner bank
    #[arg(long)]
    bank: bool,

    /// Add the free HealthCheck
    #[arg(long)]
    health_check: bool,

    /// Insurance tier table CSV (defaults to the built-in rates)
    #[arg(long, value_name = "CSV")]
    tiers: Option<PathBuf>,

    /// Engine config JSON (defaults to the built-in rules)
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Print the quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    selections: Selections,
    #[serde(flatten)]
    quote: Quote,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tiers = match &cli.tiers {
        Some(path) => load_insurance_tiers(path)
            .with_context(|| format!("loading tier table {}", path.display()))?,
        None => InsuranceTierTable::default_pricing(),
    };
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut session = RewardsSession::new(DiscountEngine::new(tiers, config));

    // Amounts matching an option select it; anything else is an own amount
    if let Some(raw) = cli.shopping.as_deref() {
        match parse_custom_amount(raw).ok().and_then(ShoppingTier::from_amount) {
            Some(tier) => session.select_shopping(tier),
            None => {
                session
                    .submit_custom_shopping(raw)
                    .with_context(|| format!("invalid --shopping {raw:?}"))?;
            }
        }
    }
    if let Some(raw) = cli.insurance.as_deref() {
        match parse_custom_amount(raw).ok().and_then(InsuranceTier::from_amount) {
            Some(tier) => session.select_insurance(tier),
            None => {
                session
                    .submit_custom_insurance(raw)
                    .with_context(|| format!("invalid --insurance {raw:?}"))?;
            }
        }
    }
    if let Some(level) = cli.health {
        session.select_health_level(level);
    }
    if cli.member {
        session.toggle_member();
    }
    if cli.script {
        session.toggle_pharmacy_script();
    }
    if cli.bank {
        session.toggle_bank_partner();
    }
    if cli.health_check {
        session.toggle_health_check();
    }

    let report = Report {
        selections: session.selections(),
        quote: session.quote(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("You could be saving {} every month", report.quote.result);
    println!(
        "That's {} back in your pocket every year",
        format_rand(report.quote.annual_amount)
    );
    if let Some(amount) = report.selections.insurance_amount {
        let health = report.selections.health_level;
        let rate = session.engine().tiers().percentage_for_amount(amount, health);
        let chosen = health.map_or("no health level", |level| level.label());
        println!("Insurance rewards on {}: {}% ({})", format_rand(u64::from(amount)), rate, chosen);
    }
    for badge in &report.quote.badges {
        println!("  [{}]", badge.label());
    }

    Ok(())
}
