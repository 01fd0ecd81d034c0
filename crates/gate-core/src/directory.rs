//! # Customer Directory
//!
//! The one capability the core consumes from its host: a synchronous,
//! read-only customer/credit lookup.
//!
//! ## Contract
//! - `lookup` NEVER fails: an unknown identifier yields
//!   [`CustomerRecord::not_found`] (`exists = false`, everything else
//!   zero/false) rather than an error.
//! - The core only reads. If a host wires a mutable store, the host owns
//!   its own concurrency discipline; the core requires nothing beyond this
//!   synchronous read.
//!
//! The production implementation lives in the `gate-directory` crate;
//! tests substitute small in-memory maps with deterministic fixtures.

use crate::types::CustomerRecord;

/// Read-only customer/credit lookup.
pub trait CustomerDirectory {
    /// Resolves a business customer identifier to its record.
    ///
    /// Must return [`CustomerRecord::not_found`] for unknown identifiers.
    fn lookup(&self, customer_id: &str) -> CustomerRecord;
}

// =============================================================================
// Unit Tests
// =============================================================================
