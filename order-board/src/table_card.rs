//! Per-table dashboard cards
//!
//! One card per known dining table, built from [`OrderStatistics`].

use serde::Serialize;
use shared::{DiningTable, OrderStatus, TableNumber};

use crate::stats::{OrderStatistics, StatusCounts, StatusTally};

/// Summary rendered for a single table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCard {
    pub table_number: TableNumber,
    pub capacity: u32,
    /// Status counts summed across every guest seen at the table
    pub counts: StatusTally,
    /// No guest at the table has a pending, processing or delivered order
    pub is_empty: bool,
    pub serving_guest_count: usize,
}

/// Build one card per table, in the order the tables were given
///
/// Tables never referenced by an order get an empty card.
pub fn table_cards(tables: &[DiningTable], stats: &OrderStatistics) -> Vec<TableCard> {
    tables
        .iter()
        .map(|table| table_card(table, stats))
        .collect()
}

pub fn table_card(table: &DiningTable, stats: &OrderStatistics) -> TableCard {
    let mut card = TableCard {
        table_number: table.number,
        capacity: table.capacity,
        counts: StatusTally::default(),
        is_empty: true,
        serving_guest_count: stats.serving_at(table.number).map_or(0, |guests| guests.len()),
    };

    if let Some(guests) = stats.table.get(&table.number) {
        for guest_counts in guests.values() {
            if has_open_orders(guest_counts) {
                card.is_empty = false;
            }
            for (status, count) in guest_counts {
                card.counts.add(*status, *count);
            }
        }
    }

    card
}

fn has_open_orders(counts: &StatusCounts) -> bool {
    counts
        .iter()
        .any(|(status, count)| status.is_serving() && *count > 0)
}

impl TableCard {
    pub fn count(&self, status: OrderStatus) -> u32 {
        self.counts.get(status)
    }
}
