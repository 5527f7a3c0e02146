//! Order Board - live order statistics for restaurant staff
//!
//! Turns the flat order list of the restaurant API into:
//! - status counts for the whole window ([`stats`])
//! - per-table cards for the dashboard ([`table_card`])
//! - per-guest checkout summaries ([`checkout`])
//!
//! Data comes from an [`OrderSource`]; [`OrderBoard`] keeps the latest
//! snapshot and refreshes it on a timer.

pub mod board;
pub mod checkout;
pub mod config;
pub mod error;
pub mod logger;
pub mod source;
pub mod stats;
pub mod table_card;

#[cfg(test)]
pub(crate) mod test_support;

pub use board::{BoardSnapshot, MAX_WINDOW_HOURS, OrderBoard, TimeWindow};
pub use checkout::GuestCheckout;
pub use config::{BoardConfig, ConfigError};
pub use error::{BoardError, BoardResult};
pub use source::{HttpOrderSource, InMemoryOrderSource, OrderSource};
pub use stats::{OrderStatistics, StatusTally, aggregate};
pub use table_card::{TableCard, table_cards};
