use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tcm_monitor::{ComplianceMonitor, MonitorConfig, scan_trade_file};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Load configuration from a JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API (default)
    Serve {
        /// Server host
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Server port
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Detect violations of every reporter in a JSON trade file and print them
    Scan {
        /// JSON array of reported trades
        #[arg(short, long)]
        trades: PathBuf,

        /// Override the configured holding period
        #[arg(long)]
        max_days: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcm_monitor=info,tcm_matching=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            MonitorConfig::from_file(path)?
        }
        None => {
            tracing::info!("Using default configuration");
            MonitorConfig::default()
        }
    };

    match cli.command {
        Some(Command::Scan { trades, max_days }) => scan(&config, &trades, max_days),
        Some(Command::Serve { host, port }) => serve(config, host, port).await,
        None => serve(config, None, None).await,
    }
}

async fn serve(mut config: MonitorConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Tokens: {}", config.tokens.len());
    tracing::info!("Available endpoints:");
    tracing::info!("  GET    /healthz");
    tracing::info!("  GET    /api/trades");
    tracing::info!("  POST   /api/trades");
    tracing::info!("  GET    /api/trades/{{id}}");
    tracing::info!("  PATCH  /api/trades/{{id}}");
    tracing::info!("  DELETE /api/trades/{{id}}");
    tracing::info!("  GET    /api/violations");
    tracing::info!("  GET    /api/all-trades");
    tracing::info!("  GET    /api/all-violations");

    ComplianceMonitor::new(config).run().await
}

fn scan(config: &MonitorConfig, path: &Path, max_days: Option<i64>) -> Result<()> {
    let rule = config.holding_period.rule_or(max_days)?;
    let found = scan_trade_file(path, rule)?;

    if found.is_empty() {
        tracing::info!("No violations found in {}", path.display());
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}
