//! Dining Table Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::TableNumber;

/// Table visibility / booking state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TableStatus {
    #[default]
    Available,
    Hidden,
    Reserved,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub number: TableNumber,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    /// QR token guests use to open a session at this table
    #[serde(default)]
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
