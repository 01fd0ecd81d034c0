//! # gate-core: Pure Order-Validation Logic for Order Gate
//!
//! This crate is the **heart** of Order Gate. It decides whether an order
//! is approved or rejected, as a pure function of the payload and a
//! read-only customer directory.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Gate Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Host (CLI / service)                       │   │
//! │  │     reads payloads ──► prints responses ──► owns exit codes     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ gate-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   parse   │  │validation │  │  machine  │  │  report   │  │   │
//! │  │   │  payload  │  │  3 stage  │  │  fail-fast│  │  wire     │  │   │
//! │  │   │  → Order  │  │  checks   │  │  FSM      │  │  shape    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CustomerDirectory (one-method trait)   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              gate-directory (customer/credit store)             │   │
//! │  │            in-memory records, fixtures, JSON seeding            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, CustomerRecord, ValidationResult, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Parse errors and the rejection taxonomy
//! - [`parse`] - Structural payload decoding
//! - [`directory`] - The consumed lookup capability
//! - [`validation`] - The three stage checks
//! - [`machine`] - The fail-fast state machine and entry point
//! - [`report`] - The wire-shaped response object
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same payload + same directory = same result
//! 2. **No I/O**: the single outside read is the injected directory lookup
//! 3. **Integer Money**: all amounts are cents (i64); floats only at the
//!    payload/response boundaries
//! 4. **Errors Are Data**: business failures are Rejected results, never
//!    panics, never `Err`
//!
//! ## Example Usage
//!
//! ```rust
//! use gate_core::{CustomerDirectory, Money, OrderValidator, ValidationResponse};
//! use gate_core::types::CustomerRecord;
//! use serde_json::json;
//!
//! struct Directory;
//!
//! impl CustomerDirectory for Directory {
//!     fn lookup(&self, customer_id: &str) -> CustomerRecord {
//!         match customer_id {
//!             "CUST001" => CustomerRecord {
//!                 customer_id: customer_id.to_string(),
//!                 exists: true,
//!                 active: true,
//!                 credit_limit: Money::from_cents(500_000),
//!                 used_credit: Money::from_cents(100_000),
//!             },
//!             _ => CustomerRecord::not_found(customer_id),
//!         }
//!     }
//! }
//!
//! let validator = OrderValidator::new(Directory);
//! let result = validator.validate(&json!({
//!     "customer_id": "CUST001",
//!     "declared_total": 1500.0,
//!     "items": [{ "product_name": "Laptop", "quantity": 1, "unit_price": 1500.0 }],
//! }));
//!
//! assert!(result.is_approved());
//! let response = ValidationResponse::from_result(&result);
//! assert_eq!(response.error, None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod directory;
pub mod error;
pub mod machine;
pub mod money;
pub mod parse;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gate_core::OrderValidator` instead of
// `use gate_core::machine::OrderValidator`

pub use directory::CustomerDirectory;
pub use error::{ParseError, Rejection};
pub use machine::{MachineState, OrderValidator};
pub use money::Money;
pub use parse::parse_order;
pub use report::ValidationResponse;
pub use types::{
    CustomerRecord, LineItem, Order, StageFlags, ValidationResult, ValidationStatus,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum absolute discrepancy tolerated between the declared total and
/// the computed item-sum: one cent (±$0.01).
///
/// ## Business Reason
/// Order payloads originate in systems that did their arithmetic in
/// decimals; a single cent of representation drift is noise, anything
/// beyond it is a data-consistency failure worth rejecting.
pub const TOTAL_TOLERANCE: Money = Money::from_cents(1);
