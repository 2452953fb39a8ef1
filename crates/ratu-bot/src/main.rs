//! Ratu market-making bot - entry point.
//!
//! Runs one double-quote cycle against the venue's FIX gateway: price
//! discovery on the market-data session, paired GTC limit orders on the
//! order-entry session, fill tracking, guaranteed unwind.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Ratu double-quote market-making bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RATU_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any connections)
    ratu_session::init_crypto();

    let args = Args::parse();

    ratu_bot::init_logging()?;

    info!("Starting ratu-bot v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > RATU_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("RATU_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = ratu_bot::AppConfig::from_file(&config_path)?;
    info!(
        symbol = %config.trading.symbol,
        quantity = %config.trading.quantity,
        "Configuration loaded"
    );

    let app = ratu_bot::Application::new(config);
    app.run().await?;

    Ok(())
}
