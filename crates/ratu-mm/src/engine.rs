//! Double-quote market-making engine.
//!
//! One cycle: discover the top of book on the market-data session,
//! place a buy at the bid and a sell at the offer on the order-entry
//! session, track fills against the order table until both quotes are
//! filled or the deadline expires, then unwind. The unwind (unsubscribe,
//! logout, disconnect on both sessions) runs exactly once no matter how
//! the cycle ended, a logon failure included.

use crate::config::MmConfig;
use crate::error::MmResult;
use crate::order_table::{ApplyOutcome, OrderTable, QuotedOrder};
use ratu_core::{ClientOrderId, OrdType, OrderSide, Price, TimeInForce};
use ratu_feed::{BookTickerSubscriber, MdEntryKind};
use ratu_fix::{tag, MsgKind};
use ratu_session::FixIo;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one market-making cycle.
#[derive(Debug)]
pub struct CycleReport {
    /// Both quotes in placement order with their final recorded state.
    pub orders: Vec<QuotedOrder>,
}

impl CycleReport {
    pub fn all_filled(&self) -> bool {
        !self.orders.is_empty() && self.orders.iter().all(QuotedOrder::is_filled)
    }

    pub fn unfilled(&self) -> impl Iterator<Item = &QuotedOrder> {
        self.orders.iter().filter(|o| !o.is_filled())
    }
}

/// Market-making engine coordinating an order-entry and a market-data
/// session. Owns the order table; nothing else mutates it.
pub struct MmEngine {
    config: MmConfig,
}

impl MmEngine {
    pub fn new(config: MmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MmConfig {
        &self.config
    }

    /// Run one cycle, then unwind both sessions.
    pub async fn run(&self, oe: &dyn FixIo, md: &dyn FixIo) -> MmResult<CycleReport> {
        let mut subscriber = BookTickerSubscriber::new(&self.config.symbol);
        let result = self.run_cycle(oe, md, &mut subscriber).await;
        self.unwind(oe, md, &mut subscriber).await;
        result
    }

    async fn run_cycle(
        &self,
        oe: &dyn FixIo,
        md: &dyn FixIo,
        subscriber: &mut BookTickerSubscriber,
    ) -> MmResult<CycleReport> {
        // Logon failures abort here: no subscription, no orders.
        md.logon().await?;
        oe.logon().await?;

        let stale = oe.drain_all().await;
        if !stale.is_empty() {
            debug!(count = stale.len(), "discarded stale order-entry messages");
        }

        subscriber
            .subscribe(md, &[MdEntryKind::Bid, MdEntryKind::Offer])
            .await?;
        let (bid, ask) = self.await_book(md, subscriber).await;
        info!(%bid, %ask, symbol = %self.config.symbol, "top of book");

        // Sequential sends, no rollback: if the sell send fails after
        // the buy went out, the error surfaces through the unwind path
        // and the resting buy stays on the book.
        let mut table = OrderTable::new();
        let buy = self.place_limit_order(oe, OrderSide::Buy, bid).await?;
        table.insert(buy);
        let sell = self.place_limit_order(oe, OrderSide::Sell, ask).await?;
        table.insert(sell);

        let deadline = Instant::now() + self.config.fill_timeout();
        self.track_fills(oe, &mut table, deadline).await;

        for order in table.unfilled() {
            warn!(
                cl_ord_id = %order.cl_ord_id,
                side = %order.side,
                price = %order.price,
                "order unfilled at deadline"
            );
        }
        Ok(CycleReport {
            orders: table.into_orders(),
        })
    }

    /// Poll the book until both sides are present. The retry count is
    /// unbounded; the enclosing run's deadline discipline is the
    /// caller's responsibility.
    async fn await_book(&self, md: &dyn FixIo, subscriber: &BookTickerSubscriber) -> (Price, Price) {
        loop {
            let top = subscriber.poll_top(md, self.config.book_poll_timeout()).await;
            if let Some((bid, ask)) = top.best() {
                return (bid, ask);
            }
            debug!(bid = ?top.bid, ask = ?top.ask, "book incomplete, polling again");
            tokio::time::sleep(self.config.poll_backoff()).await;
        }
    }

    /// Place one GTC limit order and return its table entry.
    async fn place_limit_order(
        &self,
        oe: &dyn FixIo,
        side: OrderSide,
        price: Price,
    ) -> MmResult<QuotedOrder> {
        let prefix = match side {
            OrderSide::Buy => "B",
            OrderSide::Sell => "S",
        };
        let cl_ord_id = ClientOrderId::with_prefix(prefix);
        let body = vec![
            (tag::ORDER_QTY, self.config.quantity.to_wire()),
            (tag::ORD_TYPE, OrdType::Limit.wire_code().to_string()),
            (tag::CL_ORD_ID, cl_ord_id.to_string()),
            (tag::PRICE, price.to_wire()),
            (tag::SIDE, side.wire_code().to_string()),
            (tag::SYMBOL, self.config.symbol.clone()),
            (
                tag::TIME_IN_FORCE,
                TimeInForce::GoodTilCancel.wire_code().to_string(),
            ),
        ];
        oe.send(MsgKind::NewOrderSingle, body).await?;
        info!(
            %cl_ord_id,
            %side,
            %price,
            quantity = %self.config.quantity,
            symbol = %self.config.symbol,
            "limit order placed"
        );
        Ok(QuotedOrder::new(
            cl_ord_id,
            side,
            price,
            self.config.quantity,
            self.config.symbol.clone(),
        ))
    }

    /// Fill-tracking loop: poll execution reports and apply them to the
    /// table until every order is terminal-filled or `deadline` passes.
    /// Deadline expiry is a normal exit, not an error; unfilled orders
    /// stay resting (no cancel is issued).
    pub async fn track_fills(&self, oe: &dyn FixIo, table: &mut OrderTable, deadline: Instant) {
        while !table.all_filled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!("fill-tracking deadline reached");
                return;
            }
            let wait = remaining.min(self.config.report_poll_timeout());
            let reports = oe.retrieve_until(MsgKind::ExecutionReport, wait).await;
            for report in &reports {
                match table.apply_report(report) {
                    ApplyOutcome::Filled(cl_ord_id) => {
                        info!(%cl_ord_id, "order filled");
                    }
                    ApplyOutcome::Updated(cl_ord_id, status) => {
                        info!(%cl_ord_id, %status, "order status updated");
                    }
                    ApplyOutcome::Unmatched => {}
                }
            }
        }
    }

    /// Guaranteed unwind: unsubscribe before logout, logout before
    /// disconnect, both sessions, errors logged rather than propagated.
    async fn unwind(&self, oe: &dyn FixIo, md: &dyn FixIo, subscriber: &mut BookTickerSubscriber) {
        if let Err(e) = subscriber.unsubscribe(md).await {
            warn!(error = %e, "unsubscribe failed during unwind");
        }
        if let Err(e) = md.logout().await {
            warn!(error = %e, "market-data logout failed during unwind");
        }
        if let Err(e) = oe.logout().await {
            warn!(error = %e, "order-entry logout failed during unwind");
        }
        md.disconnect().await;
        oe.disconnect().await;
        info!("cycle unwind complete");
    }
}
