//! Order sources
//!
//! Where the board gets its data from. The aggregation only ever sees the
//! plain order slice a source returns; sources never see the statistics.

mod http;
mod memory;

pub use http::HttpOrderSource;
pub use memory::InMemoryOrderSource;

use async_trait::async_trait;
use shared::{DiningTable, GetOrdersQuery, GuestId, Order};

use crate::error::BoardResult;

/// Data access used by [`crate::OrderBoard`]
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Orders created inside the query window
    async fn fetch_orders(&self, query: &GetOrdersQuery) -> BoardResult<Vec<Order>>;

    /// Every dining table, in display order
    async fn list_tables(&self) -> BoardResult<Vec<DiningTable>>;

    /// Mark all open orders of a guest as paid, returning the orders changed
    async fn pay_guest_orders(&self, guest_id: GuestId) -> BoardResult<Vec<Order>>;
}
