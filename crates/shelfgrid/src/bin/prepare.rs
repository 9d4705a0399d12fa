//! Inventory preparation CLI tool.
//!
//! Reads sparse inventory observations, expands them to one row per day and
//! (store, SKU), imputes missing measures, derives event flags and writes the
//! dense series.
//!
//! Usage: `cargo run --features cli --bin prepare -- --inventory IN.csv --output OUT.csv`
//! Logging follows `RUST_LOG` (default `shelfgrid=info`).

use std::path::{Path, PathBuf};

use clap::Parser;
use shelfgrid::{
    io,
    prep::{CategoryPolicy, InventoryPrep, PrepConfig, PrepSummary},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Fill gaps in sparse inventory observations.
#[derive(Debug, Parser)]
#[command(name = "prepare", version, about)]
struct Args {
    /// Inventory observations CSV (`date` as yyyyMMdd).
    #[arg(long)]
    inventory: PathBuf,

    /// Destination of the dense CSV; replaced if it exists.
    #[arg(long)]
    output: PathBuf,

    /// Vendor lead-time CSV, read and reported alongside the inventory.
    #[arg(long)]
    vendor: Option<PathBuf>,

    /// TOML file holding a preparation config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Category resolution: last_by_date, last_in_input or most_frequent.
    #[arg(long)]
    category_policy: Option<CategoryPolicy>,

    /// Value for state measures with no earlier observation.
    #[arg(long)]
    state_fallback: Option<i32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "shelfgrid=info".into()))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    tracing::debug!(?config, "resolved preparation config");

    let observations = io::read_inventory_file(&args.inventory)?;

    if let Some(path) = &args.vendor {
        let leads = io::read_vendor_lead_times_file(path)?;
        let complete = leads.iter().filter(|l| l.total_lead_time().is_some()).count();
        println!("Vendor lead times: {} rows ({complete} with every stage known)", leads.len());
    }

    let prep = InventoryPrep::with_config(config)?;
    let prepared = prep.prepare(shelfgrid::prep::observations_to_frame(&observations)?)?;
    let records = shelfgrid::prep::records_from_frame(&prepared.frame)?;
    io::write_inventory_file(&args.output, &records)?;

    print_summary(&prepared.summary, &args.output);
    Ok(())
}

/// Start from the config file, if any, then apply command-line overrides.
fn load_config(args: &Args) -> Result<PrepConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => PrepConfig::default(),
    };

    if let Some(policy) = args.category_policy {
        config.category_policy = policy;
    }
    if let Some(fallback) = args.state_fallback {
        config.imputer.state_fallback = Some(fallback);
    }
    Ok(config)
}

fn print_summary(summary: &PrepSummary, output: &Path) {
    println!("\nPrepared inventory written to {}", output.display());
    println!("{}", "-".repeat(40));
    println!("  Observations:      {:>10}", summary.observations);
    println!("  Keys:              {:>10}", summary.keys);
    println!("  Days:              {:>10}", summary.days);
    println!("  Rows:              {:>10}", summary.rows);
    println!("  Gap rows:          {:>10}", summary.gap_rows);
    println!("  Unresolved state:  {:>10}", summary.unresolved_state);
}
