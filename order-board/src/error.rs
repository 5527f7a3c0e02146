//! Board error types

use shared::GuestId;
use thiserror::Error;

/// Errors surfaced by order sources and the board service
///
/// The aggregation itself never fails; everything here comes from fetching
/// or paying through a source.
#[derive(Debug, Error)]
pub enum BoardError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pay-all requested for a guest with no unpaid order
    #[error("Guest {guest_id} has no unpaid order")]
    NothingToPay { guest_id: GuestId },
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
