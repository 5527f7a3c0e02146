//! Shared types for the order board
//!
//! Wire models of the restaurant REST API (orders, guests, dining tables),
//! request bodies and the response envelope. Used by the aggregation engine
//! and by every order source implementation.

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use models::{
    DiningTable, DishSnapshot, Guest, GuestId, Order, OrderId, OrderStatus, TableNumber,
    TableStatus,
};
pub use request::{GetOrdersQuery, PayGuestOrdersBody};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
