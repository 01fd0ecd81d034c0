//! # gate-directory: Customer/Credit Store for Order Gate
//!
//! This crate provides the customer directory the validation core reads.
//! It is the production implementation of the core's `CustomerDirectory`
//! trait: an in-memory store with demo fixtures and JSON seeding.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Gate Data Flow                              │
//! │                                                                         │
//! │  Host (seed file / fixtures)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  gate-directory (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐        ┌──────────────────────────────┐   │   │
//! │  │   │ StoredCustomer │        │      InMemoryDirectory       │   │   │
//! │  │   │  UUID + CUST.. │◄───────│  HashMap by business key     │   │   │
//! │  │   │  name, email   │        │  fixtures / from_json        │   │   │
//! │  │   │  credit cents  │        │  invariant checks on insert  │   │   │
//! │  │   └────────────────┘        └──────────────┬───────────────┘   │   │
//! │  │                                            │ lookup()          │   │
//! │  └────────────────────────────────────────────┼───────────────────┘   │
//! │                                               ▼                        │
//! │                                   gate-core::CustomerRecord            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Stored records, seeding, and the in-memory directory
//! - [`error`] - Directory construction errors
//!
//! ## Usage
//!
//! ```rust
//! use gate_core::OrderValidator;
//! use gate_directory::InMemoryDirectory;
//! use serde_json::json;
//!
//! let validator = OrderValidator::new(InMemoryDirectory::with_fixtures());
//! let result = validator.validate(&json!({
//!     "customer_id": "CUST004",
//!     "declared_total": 99.0,
//!     "items": [{ "product_name": "Webcam HD", "quantity": 1, "unit_price": 99.0 }],
//! }));
//! assert!(result.is_approved());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DirectoryError, DirectoryResult};
pub use store::{CustomerSeed, CustomerStatus, InMemoryDirectory, StoredCustomer};
