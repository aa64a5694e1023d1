//! ChainLens CLI — run one pipeline and print its envelope as JSON.
//!
//! Commands:
//! - `tvl-share` — TVL market share by network (warehouse, paginated)
//! - `stablecoins` — stablecoin supply, anchor vs. its layers
//! - `fees` — volume-weighted transaction cost across networks
//! - `validators` — validator/node count summary
//! - `treasuries` — corporate treasury holdings table
//!
//! This binary is a stand-in for the presentation layer: it injects the
//! configuration, invokes one pipeline, and renders whatever envelope (or
//! error) comes back.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chainlens_core::config::CoreConfig;
use chainlens_core::domain::Envelope;
use chainlens_core::pipeline::{
    compute_fee_summary, compute_stablecoin_supply, compute_treasury_holdings, compute_tvl_share,
    compute_validator_summary, PipelineError,
};

#[derive(Parser)]
#[command(
    name = "chainlens",
    about = "ChainLens CLI — chain-metrics aggregation pipelines"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Warehouse API key. Overrides the config file value.
    #[arg(long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// TVL market share by network.
    TvlShare,
    /// Stablecoin supply on the anchor network vs. its layers.
    Stablecoins,
    /// Volume-weighted transaction cost across networks.
    Fees,
    /// Validator / node count summary.
    Validators,
    /// Corporate treasury holdings table.
    Treasuries,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => CoreConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CoreConfig::default(),
    };
    if cli.api_key.is_some() {
        cfg.warehouse_api_key = cli.api_key;
    }

    let json = match cli.command {
        Commands::TvlShare => render(compute_tvl_share(&cfg))?,
        Commands::Stablecoins => render(compute_stablecoin_supply(&cfg))?,
        Commands::Fees => render(compute_fee_summary(&cfg))?,
        Commands::Validators => render(compute_validator_summary(&cfg))?,
        Commands::Treasuries => render(compute_treasury_holdings(&cfg))?,
    };
    println!("{json}");
    Ok(())
}

fn render<T: serde::Serialize>(result: Result<Envelope<T>, PipelineError>) -> Result<String> {
    let envelope = result?;
    serde_json::to_string_pretty(&envelope).context("serialize envelope")
}
