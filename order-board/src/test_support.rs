//! Order and table builders for unit tests

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::models::DishStatus;
use shared::{DiningTable, DishSnapshot, GuestId, Order, OrderId, OrderStatus, TableNumber, TableStatus};

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
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
        dish_snapshot_id: id,
        dish_snapshot: DishSnapshot {
            id,
            dish_id: Some(1),
            name: "Pho bo".to_string(),
            price: Decimal::from(50_000),
            image: String::new(),
            description: String::new(),
            status: DishStatus::Available,
        },
        quantity: 1,
        order_handler_id: None,
        status,
        created_at: at(12, 0),
        updated_at: at(12, 0),
    }
}

pub fn priced(mut order: Order, price: i64, quantity: i32) -> Order {
    order.dish_snapshot.price = Decimal::from(price);
    order.quantity = quantity;
    order
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
