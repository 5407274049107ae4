//! Request-level validation errors.
//!
//! These are the failures a caller can cause and fix: a bad date filter on a
//! read, or a bad location or missing field on a write. Their `Display` text
//! is the exact message returned to HTTP clients.

use thiserror::Error;

/// A recoverable validation failure. Never affects the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// Location absent or not in [`VALID_LOCATIONS`](crate::locations::VALID_LOCATIONS).
    #[error("Invalid location.")]
    InvalidLocation,

    /// Location or body empty.
    #[error("Location and ReviewBody are required.")]
    MissingField,

    /// A date filter that does not parse as `YYYY-MM-DD`.
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD.")]
    InvalidDate { field: &'static str, value: String },
}
