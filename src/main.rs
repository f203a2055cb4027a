//! Launchboard - Interactive Launch Records Dashboard
//!
//! A CLI tool that loads a launch-records CSV and serves a browser
//! dashboard with a success pie chart and a payload/outcome scatter
//! plot, filterable by launch site and payload range.
//!
//! Exit codes:
//!   0 - Success (server stopped cleanly, dry run, or export complete)
//!   1 - Runtime error (bad arguments, unreadable dataset, bind failure)

mod charts;
mod cli;
mod config;
mod dataset;
mod export;
mod models;
mod server;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use models::{LaunchDataset, Outcome, PayloadRange, SelectionState, SiteFilter};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Launchboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the dashboard workflow
    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Dashboard failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .launchboard.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!(
        "✅ Created {} with default settings.",
        config::DEFAULT_CONFIG_FILE
    );
    println!("   Edit it to customize the dataset path, bind address, and title.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete dashboard workflow. Returns exit code.
async fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let data_path = PathBuf::from(&config.dataset.path);

    // Step 1: Load the dataset
    println!("🚀 Loading launch records: {}", data_path.display());
    let dataset = dataset::load(&data_path)?;

    let summary = dataset.summary();
    println!("\n📊 Dataset summary:");
    println!("   Records: {}", summary.records);
    println!("   Launch sites: {}", summary.sites);
    println!(
        "   - 🟢 Success: {} | 🔴 Failure: {}",
        summary.successes, summary.failures
    );
    println!(
        "   Payload range: {} kg to {} kg",
        summary.payload_min_kg, summary.payload_max_kg
    );

    // Handle --dry-run: stop after validating the dataset
    if args.dry_run {
        return handle_dry_run(&dataset);
    }

    // Handle --export: render one snapshot and exit
    if let Some(ref output) = args.export {
        return handle_export(&dataset, &args, output);
    }

    // Step 2: Serve the dashboard
    println!("\n🌐 Serving dashboard at http://{}", config.server.addr);
    println!("   Press Ctrl+C to stop.\n");

    server::serve(dataset, &config.server).await?;
    Ok(0)
}

/// Handle --dry-run: validate the dataset, print per-site figures, exit.
fn handle_dry_run(dataset: &LaunchDataset) -> Result<i32> {
    println!("\n🔍 Dry run: dataset loaded, not starting the server.\n");

    for site in dataset.sites() {
        let launches = dataset
            .records()
            .iter()
            .filter(|r| r.site == *site)
            .count();
        let successes = dataset
            .records()
            .iter()
            .filter(|r| r.site == *site && r.outcome == Outcome::Success)
            .count();
        println!("   - {}: {} launches, {} successes", site, launches, successes);
    }

    println!("\n✅ Dry run complete. No server was started.");
    Ok(0)
}

/// Handle --export: compute both charts for one selection and write JSON.
fn handle_export(dataset: &LaunchDataset, args: &Args, output: &Path) -> Result<i32> {
    println!("\n📝 Exporting chart snapshot...");

    let selection = selection_from_args(dataset, args)?;
    info!(
        "Snapshot selection: site {}, payload {} to {} kg",
        selection.site,
        selection.payload.low(),
        selection.payload.high()
    );

    let snapshot = export::build_snapshot(dataset, &selection);
    export::write_snapshot(&snapshot, output)?;

    println!("✅ Snapshot saved to: {}", output.display());
    Ok(0)
}

/// Build the snapshot selection from CLI flags, defaulting to all sites
/// over the observed payload span.
fn selection_from_args(dataset: &LaunchDataset, args: &Args) -> Result<SelectionState> {
    let site = match args.site {
        Some(ref site) => SiteFilter::parse(site),
        None => SiteFilter::All,
    };

    let (observed_low, observed_high) = dataset.payload_bounds();
    let low = args.payload_min.unwrap_or(observed_low);
    let high = args.payload_max.unwrap_or(observed_high);
    let payload = PayloadRange::new(low, high).context("Invalid payload range")?;

    Ok(SelectionState { site, payload })
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
