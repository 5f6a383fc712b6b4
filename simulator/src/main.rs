//! Cashflow Simulator
//!
//! Replays named scenarios or random IOU workloads against an in-memory
//! ledger and reports how far the minimizer reduces the transfer count.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod metrics;
mod scenario;

use controller::SimulationController;
use scenario::Scenario;

/// Cashflow Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Debt-netting scenario runner and load simulator")]
struct Args {
    /// Number of parties in random mode
    #[arg(short, long, default_value = "8")]
    parties: usize,

    /// Number of random IOUs to record
    #[arg(short, long, default_value = "50")]
    transactions: usize,

    /// Built-in scenario name (chain, hub, triangle, equal-split) or a JSON file
    #[arg(short, long)]
    scenario: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Largest random IOU amount, in whole units
    #[arg(long, default_value = "500")]
    max_amount: u32,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting Cashflow Simulator");

    let mut controller = SimulationController::new(args.parties, args.seed);

    let report = match &args.scenario {
        Some(name) => {
            let scenario = Scenario::load(name)?;
            controller.run_scenario(&scenario)?
        }
        None => controller.run_random(args.transactions, args.max_amount)?,
    };

    report.log();

    Ok(())
}
