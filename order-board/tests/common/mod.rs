//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use order_board::TimeWindow;
use rust_decimal::Decimal;
use shared::models::DishStatus;
use shared::{DiningTable, DishSnapshot, GuestId, Order, OrderId, OrderStatus, TableNumber, TableStatus};

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
}

/// Whole service day of the fixture orders
pub fn service_day() -> TimeWindow {
    TimeWindow::Range {
        from: at(0, 0),
        to: at(23, 59),
    }
}

pub fn order(
    id: OrderId,
    status: OrderStatus,
    table_number: Option<TableNumber>,
    guest_id: Option<GuestId>,
) -> Order {
    Order {
        id,
        guest_id,
        guest: None,
        table_number,
        dish_snapshot_id: 100 + id,
        dish_snapshot: DishSnapshot {
            id: 100 + id,
            dish_id: Some(1),
            name: "Com tam".to_string(),
            price: Decimal::from(35_000),
            image: String::new(),
            description: String::new(),
            status: DishStatus::Available,
        },
        quantity: 2,
        order_handler_id: None,
        status,
        created_at: at(12, 0),
        updated_at: at(12, 0),
    }
}

pub fn table(number: TableNumber) -> DiningTable {
    DiningTable {
        number,
        capacity: 4,
        status: TableStatus::Available,
        token: format!("token-{number}"),
        created_at: at(8, 0),
        updated_at: at(8, 0),
    }
}
