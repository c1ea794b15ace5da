// In app/src/main.rs

use std::sync::Arc;

use anyhow::Result;
use api_client::PriceHistoryProvider;
use app_config::{Settings, parse_custom_symbols};
use clap::{Args, Parser, Subcommand};
use core_types::{CrossingWindow, ScanGroup, Timeframe};
use engine::Scanner;
use tracing_subscriber::prelude::*;

mod console;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "MACD zero-line cross and relative strength scanner."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scans the selected groups and prints one line per symbol.
    Scan(ScanArgs),

    /// Lists the configured scan groups.
    Groups,

    /// Starts the web dashboard.
    Serve,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// A configured group to scan (e.g. "SET100"). May be repeated.
    /// Defaults to the groups marked `enabled` in the configuration.
    #[arg(short, long)]
    group: Vec<String>,

    /// Scans every configured group.
    #[arg(long, conflicts_with = "group")]
    all: bool,

    /// Extra symbols scanned as a "Custom" group (e.g. "SISB.BK,NETBAY.BK").
    #[arg(short, long)]
    custom: Option<String>,

    /// Bar interval: daily (6 months of history) or weekly (2 years).
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// confirmed ignores the latest bar; extended also reports it.
    #[arg(short, long)]
    window: Option<CrossingWindow>,

    /// Prints a single results table instead of colored lines.
    #[arg(long)]
    table: bool,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, "Application settings loaded.");

    match cli.command {
        Commands::Scan(args) => handle_scan(settings, args).await?,
        Commands::Groups => handle_groups(&settings)?,
        Commands::Serve => handle_serve(settings).await?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("hyper", tracing::Level::WARN)
                .with_target("reqwest", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn provider(settings: &Settings) -> Result<Arc<dyn PriceHistoryProvider>> {
    Ok(Arc::new(api_client::new(&settings.provider)?))
}

// --- "Scan" Subcommand Logic ---

async fn handle_scan(settings: Settings, args: ScanArgs) -> Result<()> {
    let custom = args
        .custom
        .as_deref()
        .map(parse_custom_symbols)
        .unwrap_or_default();

    let mut groups = if args.all {
        settings.scan_groups()?
    } else if !args.group.is_empty() {
        settings.select_groups(&args.group)?
    } else if !custom.is_empty() {
        // Only the custom list was asked for.
        Vec::new()
    } else {
        settings.default_groups()?
    };
    if !custom.is_empty() {
        groups.push(ScanGroup::custom(custom));
    }
    if groups.is_empty() {
        anyhow::bail!("Nothing to scan. Pass --group, --all or --custom.");
    }

    let timeframe = args.timeframe.unwrap_or(settings.scanner.timeframe);
    let window = args.window.unwrap_or(settings.scanner.window);
    let scanner = Scanner::from_settings(
        &settings,
        settings.macd_settings().with_window(window),
        provider(&settings)?,
    )?;

    let reports = scanner.scan_all(&groups, timeframe).await;

    if args.table {
        println!("{}", console::render_table(&reports));
    } else {
        println!("=== MACD Zero-Line Cross Scanner ===");
        for report in &reports {
            console::print_report(report);
        }
    }

    let crossings: usize = reports
        .iter()
        .map(|r| r.records.iter().filter(|rec| !rec.classification.is_none()).count())
        .sum();
    tracing::info!(groups = reports.len(), crossings, %timeframe, "Scan complete.");
    Ok(())
}

// --- "Groups" Subcommand Logic ---

fn handle_groups(settings: &Settings) -> Result<()> {
    let groups = settings.scan_groups()?;
    let enabled = settings.groups.iter().map(|g| g.enabled());
    println!("{}", console::render_groups(groups.iter().zip(enabled)));
    Ok(())
}

// --- "Serve" Subcommand Logic ---

async fn handle_serve(settings: Settings) -> Result<()> {
    let provider = provider(&settings)?;
    web_server::run(settings, provider).await?;
    Ok(())
}
