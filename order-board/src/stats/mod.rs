//! Order statistics
//!
//! Groups a flat order list into the views the dashboard renders:
//! - a global count per status
//! - a table → guest → status count matrix
//! - the guests still being served, grouped by table
//!
//! Everything is rebuilt from the order slice on each call. Nothing is
//! cached between calls and the input is never modified.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use shared::{GuestId, Order, OrderStatus, TableNumber};

/// Count per status, with every status always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusTally {
    pub pending: u32,
    pub processing: u32,
    pub delivered: u32,
    pub paid: u32,
    pub rejected: u32,
}

impl StatusTally {
    pub fn get(&self, status: OrderStatus) -> u32 {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Paid => self.paid,
            OrderStatus::Rejected => self.rejected,
        }
    }

    fn slot_mut(&mut self, status: OrderStatus) -> &mut u32 {
        match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Delivered => &mut self.delivered,
            OrderStatus::Paid => &mut self.paid,
            OrderStatus::Rejected => &mut self.rejected,
        }
    }

    pub fn increment(&mut self, status: OrderStatus) {
        self.add(status, 1);
    }

    pub fn add(&mut self, status: OrderStatus, count: u32) {
        *self.slot_mut(status) += count;
    }

    /// Number of orders counted
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, count)| count).sum()
    }

    /// Orders not yet paid or rejected
    pub fn serving(&self) -> u32 {
        self.pending + self.processing + self.delivered
    }

    /// `(status, count)` pairs in lifecycle order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (OrderStatus, u32)> + '_ {
        OrderStatus::ALL.into_iter().map(|status| (status, self.get(status)))
    }
}

/// Counts for the statuses a guest actually has (absent = zero)
pub type StatusCounts = BTreeMap<OrderStatus, u32>;

/// table number → guest id → status counts
pub type TableGuestMatrix = BTreeMap<TableNumber, BTreeMap<GuestId, StatusCounts>>;

/// guest id → every order of that guest
pub type OrdersByGuest = BTreeMap<GuestId, Vec<Order>>;

/// table number → serving guest id → that guest's orders
pub type ServingGuestIndex = BTreeMap<TableNumber, OrdersByGuest>;

/// Aggregates derived from one order snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderStatistics {
    pub status: StatusTally,
    pub table: TableGuestMatrix,
    pub orders_by_guest: OrdersByGuest,
    pub serving_guests: ServingGuestIndex,
}

impl OrderStatistics {
    /// Serving guests seated at `table_number`, `None` when nobody is served there
    pub fn serving_at(&self, table_number: TableNumber) -> Option<&OrdersByGuest> {
        self.serving_guests.get(&table_number)
    }

    /// Every order of `guest_id` in this snapshot
    pub fn guest_orders(&self, guest_id: GuestId) -> &[Order] {
        self.orders_by_guest
            .get(&guest_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_serving_guest(&self, table_number: TableNumber, guest_id: GuestId) -> bool {
        self.serving_at(table_number)
            .is_some_and(|guests| guests.contains_key(&guest_id))
    }
}

/// Build all aggregates from an order snapshot
///
/// Orders missing a table number or guest id only count toward the global
/// tally (a guest-only order still joins its guest's order list). Orders
/// sharing an id are counted once per occurrence.
pub fn aggregate(orders: &[Order]) -> OrderStatistics {
    let mut status = StatusTally::default();
    let mut table = TableGuestMatrix::new();
    let mut orders_by_guest = OrdersByGuest::new();
    let mut guests_by_table: BTreeMap<TableNumber, BTreeSet<GuestId>> = BTreeMap::new();

    for order in orders {
        status.increment(order.status);

        if let Some(guest_id) = order.guest_id {
            orders_by_guest
                .entry(guest_id)
                .or_default()
                .push(order.clone());
        }

        if let (Some(table_number), Some(guest_id)) = (order.table_number, order.guest_id) {
            *table
                .entry(table_number)
                .or_default()
                .entry(guest_id)
                .or_default()
                .entry(order.status)
                .or_insert(0) += 1;

            guests_by_table
                .entry(table_number)
                .or_default()
                .insert(guest_id);
        }
    }

    let serving_guests = guests_by_table
        .into_iter()
        .filter_map(|(table_number, guests)| {
            let serving: OrdersByGuest = guests
                .into_iter()
                .filter_map(|guest_id| {
                    let guest_orders = orders_by_guest.get(&guest_id)?;
                    guest_orders
                        .iter()
                        .any(|order| order.status.is_serving())
                        .then(|| (guest_id, guest_orders.clone()))
                })
                .collect();

            // A table whose guests have all paid or been rejected is dropped
            (!serving.is_empty()).then_some((table_number, serving))
        })
        .collect();

    OrderStatistics {
        status,
        table,
        orders_by_guest,
        serving_guests,
    }
}
