//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type OrderId = i64;
pub type GuestId = i64;
pub type TableNumber = u32;

/// Order status
///
/// Lifecycle (enforced server-side):
/// `Pending -> Processing -> Delivered -> Paid`, with `Pending | Processing -> Rejected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Paid,
    Rejected,
}

impl OrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Delivered,
        OrderStatus::Paid,
        OrderStatus::Rejected,
    ];

    /// The guest is still being served while an order is in this status
    pub fn is_serving(self) -> bool {
        match self {
            OrderStatus::Pending | OrderStatus::Processing | OrderStatus::Delivered => true,
            OrderStatus::Paid | OrderStatus::Rejected => false,
        }
    }

    /// Paid and Rejected orders are closed
    pub fn is_terminal(self) -> bool {
        !self.is_serving()
    }

    /// Whether the server would accept moving an order from `self` to `next`
    ///
    /// Informational only: aggregation reads whatever status it is given.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Delivered)
                | (Delivered, Paid)
                | (Pending, Rejected)
                | (Processing, Rejected)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Paid => "Paid",
            OrderStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// Dish availability at the time the snapshot was taken
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DishStatus {
    #[default]
    Available,
    Unavailable,
    Hidden,
}

/// Copy of a dish captured when the order was placed
///
/// Independent from the live catalog so that menu edits never change
/// historical orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DishSnapshot {
    pub id: i64,
    /// Live dish this snapshot was taken from (gone if the dish was deleted)
    #[serde(default)]
    pub dish_id: Option<i64>,
    pub name: String,
    /// Unit price in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: DishStatus,
}

/// Guest session (table-scoped, not a user account)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    #[serde(default)]
    pub table_number: Option<TableNumber>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order entity
///
/// One dish line placed by a guest. `table_number` and `guest_id` may be
/// missing (e.g. the table or guest was deleted after ordering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub guest_id: Option<GuestId>,
    #[serde(default)]
    pub guest: Option<Guest>,
    #[serde(default)]
    pub table_number: Option<TableNumber>,
    pub dish_snapshot_id: i64,
    pub dish_snapshot: DishSnapshot,
    pub quantity: i32,
    /// Staff account that last handled the order
    #[serde(default)]
    pub order_handler_id: Option<i64>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// `quantity * unit price` of the dish snapshot
    pub fn line_total(&self) -> Decimal {
        self.dish_snapshot.price * Decimal::from(self.quantity)
    }
}
