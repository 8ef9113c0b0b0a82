use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use prospect_client::{CsvSink, SyntheticFetcher, rotate_headers};
use prospect_core::config::{DEFAULT_LOG_PATH, DEFAULT_OUTPUT_PATH};
use prospect_core::models::TableRow;
use prospect_core::{DefaultFillCleaner, PipelineService, ScraperConfig, Table, TracingReporter};

/// Rows shown in the report preview.
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "prospect", version, about = "Concurrent business listing scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every query, clean the results, and write them as CSV
    Run(RunArgs),

    /// Print a freshly rotated set of request headers
    Headers,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Search query (repeat for several)
    #[arg(
        short,
        long = "query",
        default_values = ["Technology Companies", "Marketing Agencies", "Startup Incubators"]
    )]
    queries: Vec<String>,

    /// Source platform identifiers (recorded, not used by the synthetic fetcher)
    #[arg(long = "platform", default_values = ["mock"])]
    platforms: Vec<String>,

    /// Maximum concurrent queries
    #[arg(short = 'w', long, env = "PROSPECT_MAX_WORKERS", default_value_t = 5)]
    max_workers: usize,

    /// Retries per query after the first failed attempt
    #[arg(short = 'r', long, env = "PROSPECT_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Requests per second (accepted, not enforced)
    #[arg(long, env = "PROSPECT_RATE_LIMIT", default_value_t = 1.0)]
    rate_limit: f64,

    /// Simulated latency per fetch, in milliseconds
    #[arg(long, env = "PROSPECT_LATENCY_MS", default_value_t = 2000)]
    latency_ms: u64,

    /// CSV output path (overwritten on each run)
    #[arg(short, long, env = "PROSPECT_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Log file path (appended to)
    #[arg(long, env = "PROSPECT_LOG_FILE", default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,
}

impl RunArgs {
    fn to_config(&self) -> ScraperConfig {
        ScraperConfig::default()
            .with_platforms(self.platforms.clone())
            .with_max_workers(self.max_workers)
            .with_max_retries(self.max_retries)
            .with_rate_limit(self.rate_limit)
            .with_fetch_latency(Duration::from_millis(self.latency_ms))
            .with_output_path(&self.output)
            .with_log_path(&self.log_file)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = args.to_config();
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            init_tracing(&config.log_path)?;
            cmd_run(&args.queries, &config).await;
        }
        Commands::Headers => {
            for (name, value) in rotate_headers() {
                println!("{name}: {value}");
            }
        }
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is unset: debug for this workspace's crates,
/// info for everything else.
const DEFAULT_FILTER: &str = "info,prospect=debug,prospect_core=debug,prospect_client=debug";

/// Log to stdout and append to `log_path`, both with timestamp and level.
fn init_tracing(log_path: &Path) -> Result<()> {
    let log_file = open_log_file(log_path)?;
    build_subscriber(default_filter(), log_file)
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

fn open_log_file(log_path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn build_subscriber(
    filter: EnvFilter,
    log_file: File,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stdout),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
}

async fn cmd_run(queries: &[String], config: &ScraperConfig) {
    tracing::info!(
        platforms = ?config.platforms,
        rate_limit = %config.rate_limit,
        "Initialising scraper"
    );

    let pipeline = PipelineService::new(
        SyntheticFetcher::with_latency(config.fetch_latency),
        DefaultFillCleaner::new(),
        CsvSink::new(&config.output_path),
        Arc::new(TracingReporter),
        config,
    );

    let started = Utc::now();
    let table = pipeline.run(queries).await;
    let finished = Utc::now();

    print!("{}", render_report(&table, started, finished));
}

fn render_report(table: &Table, started: DateTime<Utc>, finished: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("Scraping Results:\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    out.push_str(&format!("Total Businesses Found: {}\n", table.len()));
    out.push_str(&format!(
        "Run: {} -> {} ({} ms)\n",
        started.format("%Y-%m-%d %H:%M:%S UTC"),
        finished.format("%Y-%m-%d %H:%M:%S UTC"),
        (finished - started).num_milliseconds()
    ));

    if table.is_empty() {
        out.push_str("No data collected.\n");
        return out;
    }

    out.push_str("\nTable Preview:\n");
    out.push_str(&render_preview(table.preview(PREVIEW_ROWS)));

    out.push_str("\nTable Info:\n");
    out.push_str(&format!(
        "{} entries, {} columns\n",
        table.len(),
        table.columns().len()
    ));
    out.push_str(&format!(" #  {:<12} {:<15} {}\n", "Column", "Non-Null Count", "Kind"));
    for (i, column) in table.summary().iter().enumerate() {
        out.push_str(&format!(
            " {:<2} {:<12} {:<15} {}\n",
            i,
            column.name,
            format!("{} non-null", column.non_null),
            column.kind
        ));
    }
    out
}

/// Left-aligned columns with a leading row index.
fn render_preview(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.location.clone(),
                r.phone.clone(),
                r.industry.clone(),
                r.email.clone(),
                r.name_length.to_string(),
            ]
        })
        .collect();

    let header = prospect_core::models::COLUMNS;
    let mut widths: [usize; 6] = header.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let index_width = rows.len().saturating_sub(1).to_string().len();

    let mut out = format!("{:index_width$}", "");
    for (h, w) in header.iter().zip(widths) {
        out.push_str(&format!("  {h:<w$}"));
    }
    out.push('\n');
    for (i, row) in cells.iter().enumerate() {
        out.push_str(&format!("{i:<index_width$}"));
        for (cell, w) in row.iter().zip(widths) {
            out.push_str(&format!("  {cell:<w$}"));
        }
        out.push('\n');
    }
    out
}
