//! Application wiring: sessions, engine, one market-making run.

use crate::config::AppConfig;
use crate::error::AppResult;
use ratu_mm::MmEngine;
use ratu_session::{ApiCredentials, EndpointRole, FixSession};
use tracing::{info, warn};

pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Connect both sessions and run one market-making cycle.
    ///
    /// The engine owns the session lifecycle from logon through unwind;
    /// this only establishes the transports and reports the outcome.
    pub async fn run(&self) -> AppResult<()> {
        let credentials = ApiCredentials::from_pem_file(
            self.config.credentials.api_key.clone(),
            &self.config.credentials.private_key_path,
        )?;

        let oe = FixSession::connect(
            EndpointRole::OrderEntry,
            &self.config.endpoints.order_entry,
            self.config.session.clone(),
            credentials.clone(),
        )
        .await?;
        let md = FixSession::connect(
            EndpointRole::MarketData,
            &self.config.endpoints.market_data,
            self.config.session.clone(),
            credentials,
        )
        .await?;

        let engine = MmEngine::new(self.config.trading.clone());
        let report = engine.run(&oe, &md).await?;

        if report.all_filled() {
            info!(orders = report.orders.len(), "cycle complete, both quotes filled");
        } else {
            for order in report.unfilled() {
                warn!(
                    cl_ord_id = %order.cl_ord_id,
                    side = %order.side,
                    status = ?order.status,
                    "quote left unfilled"
                );
            }
        }
        Ok(())
    }
}
