//! Endpoint probe: logs on to each configured FIX endpoint and renders
//! the venue's rate-limit report where the limit query is supported.
//!
//! Drop copy accepts the logon but not the limit query, so it is probed
//! for connectivity only.

use anyhow::Result;
use clap::Parser;
use ratu_session::{query_limits, ApiCredentials, EndpointRole, FixSession};
use std::time::Duration;
use tracing::{error, info};

/// Ratu FIX endpoint and limit probe
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RATU_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
    /// Wait for the limit response (ms)
    #[arg(long, default_value_t = 5000)]
    query_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    ratu_session::init_crypto();

    let args = Args::parse();

    ratu_bot::init_logging()?;

    let config_path = args
        .config
        .or_else(|| std::env::var("RATU_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = ratu_bot::AppConfig::from_file(&config_path)?;

    let credentials = ApiCredentials::from_pem_file(
        config.credentials.api_key.clone(),
        &config.credentials.private_key_path,
    )?;

    let mut targets = vec![
        (EndpointRole::OrderEntry, config.endpoints.order_entry.clone()),
        (EndpointRole::MarketData, config.endpoints.market_data.clone()),
    ];
    if let Some(drop_copy) = config.endpoints.drop_copy.clone() {
        targets.push((EndpointRole::DropCopy, drop_copy));
    }

    let query_timeout = Duration::from_millis(args.query_timeout_ms);
    for (role, url) in targets {
        if let Err(e) = probe(role, &url, &config, &credentials, query_timeout).await {
            error!(%role, %url, error = %e, "endpoint probe failed");
        }
    }

    Ok(())
}

/// Connect, log on, optionally query limits, and tear down one endpoint.
async fn probe(
    role: EndpointRole,
    url: &str,
    config: &ratu_bot::AppConfig,
    credentials: &ApiCredentials,
    query_timeout: Duration,
) -> Result<()> {
    info!(%role, %url, "probing endpoint");
    let session =
        FixSession::connect(role, url, config.session.clone(), credentials.clone()).await?;

    let outcome = async {
        session.logon().await?;
        info!(%role, "logon ok");

        if role.supports_limit_query() {
            let entries = query_limits(&session, query_timeout).await?;
            for entry in &entries {
                info!(%role, "{entry}");
            }
        } else {
            info!(%role, "limit query not supported on this endpoint, skipping");
        }

        session.logout().await?;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    session.disconnect().await;
    outcome
}
