//! In-memory order source

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use shared::{DiningTable, GetOrdersQuery, GuestId, Order, OrderStatus};

use super::OrderSource;
use crate::error::BoardResult;

/// Order source backed by process memory
///
/// Used by tests and demos. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderSource {
    orders: Arc<RwLock<Vec<Order>>>,
    tables: Arc<RwLock<Vec<DiningTable>>>,
}

impl InMemoryOrderSource {
    pub fn new(orders: Vec<Order>, tables: Vec<DiningTable>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub fn push_order(&self, order: Order) {
        self.orders.write().push(order);
    }

    /// Replace the status of an order, as staff would from the order screen
    pub fn set_status(&self, order_id: i64, status: OrderStatus) -> bool {
        let mut orders = self.orders.write();
        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                order.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.read().clone()
    }
}

#[async_trait]
impl OrderSource for InMemoryOrderSource {
    async fn fetch_orders(&self, query: &GetOrdersQuery) -> BoardResult<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .iter()
            .filter(|order| query.contains(order.created_at))
            .cloned()
            .collect())
    }

    async fn list_tables(&self) -> BoardResult<Vec<DiningTable>> {
        Ok(self.tables.read().clone())
    }

    async fn pay_guest_orders(&self, guest_id: GuestId) -> BoardResult<Vec<Order>> {
        let now = Utc::now();
        let mut orders = self.orders.write();
        let mut paid = Vec::new();

        for order in orders
            .iter_mut()
            .filter(|o| o.guest_id == Some(guest_id) && o.status.is_serving())
        {
            order.status = OrderStatus::Paid;
            order.updated_at = now;
            paid.push(order.clone());
        }

        Ok(paid)
    }
}
