//! In-memory order table for one market-making cycle.
//!
//! Maps client order IDs to quoted orders and applies execution reports
//! against them. Reports with an unrecognized ClOrdID are ignored, not
//! errors: they may belong to a prior cycle or manual activity on the
//! same account.

use ratu_core::{ClientOrderId, OrdStatus, OrderSide, Price, Size};
use ratu_fix::{tag, FixMessage};
use tracing::{debug, warn};

/// One resting quote placed by the engine.
#[derive(Debug, Clone)]
pub struct QuotedOrder {
    pub cl_ord_id: ClientOrderId,
    pub side: OrderSide,
    pub price: Price,
    pub quantity: Size,
    pub symbol: String,
    /// Last status reported by the venue; `None` until the first report.
    pub status: Option<OrdStatus>,
    /// Cumulative filled quantity from the last report.
    pub cum_qty: Size,
}

impl QuotedOrder {
    pub fn new(
        cl_ord_id: ClientOrderId,
        side: OrderSide,
        price: Price,
        quantity: Size,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            cl_ord_id,
            side,
            price,
            quantity,
            symbol: symbol.into(),
            status: None,
            cum_qty: Size::ZERO,
        }
    }

    /// Terminal-filled means an explicit Filled status was reported.
    /// A PartiallyFilled report does not count even when the cumulative
    /// quantity has reached the order quantity.
    pub fn is_filled(&self) -> bool {
        self.status == Some(OrdStatus::Filled)
    }
}

/// Result of applying one execution report to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The order reached Filled with this report.
    Filled(ClientOrderId),
    /// Status recorded; the order is still live.
    Updated(ClientOrderId, OrdStatus),
    /// Unknown ClOrdID or an unusable report; nothing changed.
    Unmatched,
}

/// Client-order-ID keyed table, scoped to one cycle.
///
/// Two orders per cycle; a linear scan keeps iteration in insertion
/// order.
#[derive(Debug, Default)]
pub struct OrderTable {
    orders: Vec<QuotedOrder>,
}

impl OrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, order: QuotedOrder) {
        self.orders.push(order);
    }

    pub fn get(&self, cl_ord_id: &ClientOrderId) -> Option<&QuotedOrder> {
        self.orders.iter().find(|o| &o.cl_ord_id == cl_ord_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// True once every registered order is terminal-filled.
    pub fn all_filled(&self) -> bool {
        !self.orders.is_empty() && self.orders.iter().all(QuotedOrder::is_filled)
    }

    pub fn unfilled(&self) -> impl Iterator<Item = &QuotedOrder> {
        self.orders.iter().filter(|o| !o.is_filled())
    }

    pub fn into_orders(self) -> Vec<QuotedOrder> {
        self.orders
    }

    /// Apply an execution report, resolving it by ClOrdID (tag 11).
    pub fn apply_report(&mut self, report: &FixMessage) -> ApplyOutcome {
        let Some(cl_ord_id) = report.get(tag::CL_ORD_ID) else {
            debug!("execution report without ClOrdID ignored");
            return ApplyOutcome::Unmatched;
        };
        let Some(order) = self
            .orders
            .iter_mut()
            .find(|o| o.cl_ord_id.as_str() == cl_ord_id)
        else {
            debug!(cl_ord_id, "execution report for unknown order ignored");
            return ApplyOutcome::Unmatched;
        };

        let status = match report.get(tag::ORD_STATUS).map(OrdStatus::from_wire) {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                warn!(cl_ord_id, error = %e, "unrecognized order status");
                return ApplyOutcome::Unmatched;
            }
            None => {
                warn!(cl_ord_id, "execution report without OrdStatus");
                return ApplyOutcome::Unmatched;
            }
        };

        order.status = Some(status);
        if let Some(cum_qty) = report.get(tag::CUM_QTY).and_then(|v| v.parse().ok()) {
            order.cum_qty = cum_qty;
        }

        if status == OrdStatus::Filled {
            ApplyOutcome::Filled(order.cl_ord_id.clone())
        } else {
            ApplyOutcome::Updated(order.cl_ord_id.clone(), status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratu_fix::MsgKind;
    use rust_decimal_macros::dec;

    fn table_with(ids: &[&str]) -> OrderTable {
        let mut table = OrderTable::new();
        for (i, id) in ids.iter().enumerate() {
            let side = if i % 2 == 0 {
                OrderSide::Buy
            } else {
                OrderSide::Sell
            };
            table.insert(QuotedOrder::new(
                ClientOrderId::from_string(id.to_string()),
                side,
                Price::new(dec!(2500)),
                Size::new(dec!(0.01)),
                "ETHFDUSD",
            ));
        }
        table
    }

    fn report(cl_ord_id: &str, status: &str, cum_qty: &str) -> FixMessage {
        FixMessage::new(
            MsgKind::ExecutionReport,
            vec![
                (tag::CL_ORD_ID, cl_ord_id.to_string()),
                (tag::ORD_STATUS, status.to_string()),
                (tag::CUM_QTY, cum_qty.to_string()),
            ],
        )
    }

    #[test]
    fn test_status_progression_to_filled() {
        let mut table = table_with(&["B1"]);
        let id = ClientOrderId::from_string("B1".to_string());

        assert!(matches!(
            table.apply_report(&report("B1", "0", "0")),
            ApplyOutcome::Updated(_, OrdStatus::New)
        ));
        assert!(matches!(
            table.apply_report(&report("B1", "1", "0.005")),
            ApplyOutcome::Updated(_, OrdStatus::PartiallyFilled)
        ));
        assert!(!table.get(&id).unwrap().is_filled());

        assert_eq!(
            table.apply_report(&report("B1", "2", "0.01")),
            ApplyOutcome::Filled(id.clone())
        );
        assert!(table.get(&id).unwrap().is_filled());
        assert!(table.all_filled());
    }

    #[test]
    fn test_partial_fill_at_full_quantity_stays_non_terminal() {
        let mut table = table_with(&["B1"]);
        let id = ClientOrderId::from_string("B1".to_string());

        // Cumulative quantity equals the order quantity, but the status
        // says PartiallyFilled: only an explicit Filled is terminal.
        let outcome = table.apply_report(&report("B1", "1", "0.01"));
        assert!(matches!(
            outcome,
            ApplyOutcome::Updated(_, OrdStatus::PartiallyFilled)
        ));
        let order = table.get(&id).unwrap();
        assert_eq!(order.cum_qty, order.quantity);
        assert!(!order.is_filled());
        assert!(!table.all_filled());
    }

    #[test]
    fn test_unknown_cl_ord_id_ignored() {
        let mut table = table_with(&["B1"]);
        assert_eq!(
            table.apply_report(&report("STALE9", "2", "1")),
            ApplyOutcome::Unmatched
        );
        assert!(!table.all_filled());
    }

    #[test]
    fn test_unusable_reports_change_nothing() {
        let mut table = table_with(&["B1"]);
        let no_status = FixMessage::new(
            MsgKind::ExecutionReport,
            vec![(tag::CL_ORD_ID, "B1".to_string())],
        );
        assert_eq!(table.apply_report(&no_status), ApplyOutcome::Unmatched);
        assert_eq!(
            table.apply_report(&report("B1", "Z", "0")),
            ApplyOutcome::Unmatched
        );
        let id = ClientOrderId::from_string("B1".to_string());
        assert_eq!(table.get(&id).unwrap().status, None);
    }

    #[test]
    fn test_unfilled_lists_non_terminal_orders() {
        let mut table = table_with(&["B1", "S1"]);
        table.apply_report(&report("B1", "2", "0.01"));
        let unfilled: Vec<_> = table.unfilled().map(|o| o.cl_ord_id.as_str()).collect();
        assert_eq!(unfilled, vec!["S1"]);
    }

    #[test]
    fn test_empty_table_is_not_all_filled() {
        assert!(!OrderTable::new().all_filled());
    }
}
