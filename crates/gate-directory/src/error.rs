//! # Directory Error Types
//!
//! Failures building or seeding a directory. Lookup itself never fails —
//! the core's contract maps unknown identifiers to a not-found record.

use thiserror::Error;

/// Errors raised while constructing a directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The seed document was not valid JSON of the expected shape.
    #[error("invalid customer seed: {0}")]
    Seed(#[from] serde_json::Error),

    /// Two records claim the same business key.
    #[error("duplicate customer {customer_id}")]
    DuplicateCustomer { customer_id: String },

    /// A record violates a store invariant.
    #[error("invalid record for {customer_id}: {reason}")]
    InvalidRecord { customer_id: String, reason: String },
}

/// Convenience type alias for Results with DirectoryError.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

// =============================================================================
// Unit Tests
// =============================================================================
