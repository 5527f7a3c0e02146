//! Guest checkout summary
//!
//! Splits one guest's orders into what is still owed and what has been paid.
//! Rejected orders are neither.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{GuestId, Order, OrderStatus};

use crate::stats::OrderStatistics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestCheckout {
    pub guest_id: GuestId,
    /// Orders neither paid nor rejected
    pub unpaid: Vec<Order>,
    pub paid: Vec<Order>,
    pub unpaid_total: Decimal,
    pub paid_total: Decimal,
}

impl GuestCheckout {
    pub fn new(guest_id: GuestId, orders: &[Order]) -> Self {
        let unpaid: Vec<Order> = orders
            .iter()
            .filter(|order| order.status.is_serving())
            .cloned()
            .collect();
        let paid: Vec<Order> = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Paid)
            .cloned()
            .collect();

        Self {
            guest_id,
            unpaid_total: subtotal(&unpaid),
            paid_total: subtotal(&paid),
            unpaid,
            paid,
        }
    }

    /// Checkout for `guest_id` from a snapshot (empty if the guest is unknown)
    pub fn from_statistics(stats: &OrderStatistics, guest_id: GuestId) -> Self {
        Self::new(guest_id, stats.guest_orders(guest_id))
    }

    /// Number of orders a pay-all would settle
    pub fn payable_count(&self) -> usize {
        self.unpaid.len()
    }

    pub fn can_pay(&self) -> bool {
        !self.unpaid.is_empty()
    }
}

fn subtotal(orders: &[Order]) -> Decimal {
    orders.iter().map(Order::line_total).sum()
}
