//! # Stage Checks
//!
//! The three business checks of the validation pipeline.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stage Contract                                    │
//! │                                                                         │
//! │  Every check returns StageOutcome:                                     │
//! │                                                                         │
//! │    Continue(context) ── the machine advances, never skipping a stage   │
//! │    Fail(rejection)   ── the machine stops, later stages never run      │
//! │                                                                         │
//! │  and records its pass in StageFlags so a rejected result shows how     │
//! │  far the pipeline got. Checks are pure: the only outside read is the   │
//! │  customer stage's directory lookup.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gate_core::types::{CustomerRecord, StageFlags};
//! use gate_core::money::Money;
//! use gate_core::validation::{check_credit, StageOutcome};
//!
//! let record = CustomerRecord {
//!     customer_id: "CUST001".to_string(),
//!     exists: true,
//!     active: true,
//!     credit_limit: Money::from_cents(500_000),
//!     used_credit: Money::from_cents(100_000),
//! };
//!
//! let mut flags = StageFlags::default();
//! let outcome = check_credit(&record, Money::from_cents(150_000), &mut flags);
//! assert!(matches!(outcome, StageOutcome::Continue(_)));
//! assert!(flags.has_credit);
//! ```

use crate::directory::CustomerDirectory;
use crate::error::Rejection;
use crate::money::Money;
use crate::types::{CustomerRecord, Order, StageFlags};
use crate::TOTAL_TOLERANCE;

// =============================================================================
// Stage Outcome
// =============================================================================

/// What a stage hands back to the state machine.
///
/// The tagged union that makes fail-fast routing explicit: a stage either
/// continues with its forward context or fails with the rejection that
/// terminates the run.
#[derive(Debug)]
pub enum StageOutcome<T> {
    /// Stage passed; carry `T` forward to the next stage.
    Continue(T),
    /// Stage failed; the machine transitions straight to Rejected.
    Fail(Rejection),
}

// =============================================================================
// Stage 1: Customer Check
// =============================================================================

/// Verifies the customer exists and is active.
///
/// Flag discipline (spec'd per failure kind):
/// - unknown customer: `customer_exists` stays false
/// - inactive customer: `customer_exists` true, `customer_active` false
///
/// On success both flags are set and the record is carried forward for
/// the credit stage — one lookup serves the whole run.
pub fn check_customer<D>(
    directory: &D,
    customer_id: &str,
    flags: &mut StageFlags,
) -> StageOutcome<CustomerRecord>
where
    D: CustomerDirectory,
{
    let record = directory.lookup(customer_id);

    if !record.exists {
        return StageOutcome::Fail(Rejection::CustomerNotFound {
            customer_id: customer_id.to_string(),
        });
    }
    flags.customer_exists = true;

    if !record.active {
        return StageOutcome::Fail(Rejection::CustomerInactive {
            customer_id: customer_id.to_string(),
        });
    }
    flags.customer_active = true;

    StageOutcome::Continue(record)
}

// =============================================================================
// Stage 2: Item Check
// =============================================================================

/// Verifies every line item and reconciles the declared total.
///
/// Item rules, checked in payload order with the first offender reported:
/// - `product_name` must be non-empty after trimming
/// - `quantity` must be greater than zero
/// - `unit_price` must be greater than zero
///
/// Then the item-sum must agree with `declared_total` within
/// [`TOTAL_TOLERANCE`] (one cent). On success the order amount is fixed
/// to the DECLARED total — the caller's figure, now proven consistent —
/// and carried forward to the credit stage.
pub fn check_items(order: &Order, flags: &mut StageFlags) -> StageOutcome<Money> {
    for (index, item) in order.items.iter().enumerate() {
        if item.product_name.trim().is_empty() {
            return StageOutcome::Fail(invalid_item(index, "product_name", "must not be empty"));
        }
        if item.quantity <= 0 {
            return StageOutcome::Fail(invalid_item(index, "quantity", "must be greater than zero"));
        }
        if !item.unit_price.is_positive() {
            return StageOutcome::Fail(invalid_item(
                index,
                "unit_price",
                "must be greater than zero",
            ));
        }
    }

    let computed = order.computed_total();
    if !order.declared_total.reconciles_with(computed, TOTAL_TOLERANCE) {
        return StageOutcome::Fail(Rejection::TotalMismatch {
            declared: order.declared_total,
            computed,
        });
    }

    flags.items_valid = true;
    StageOutcome::Continue(order.declared_total)
}

fn invalid_item(index: usize, field: &str, reason: &str) -> Rejection {
    Rejection::InvalidItem {
        index,
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Stage 3: Credit Check
// =============================================================================

/// Verifies available credit covers the order amount.
///
/// `available = credit_limit − used_credit`, exact in cents. An order
/// amount exactly equal to the available credit passes. On failure the
/// rejection carries the full arithmetic (required, available, shortage)
/// so the result can report it without recomputation.
pub fn check_credit(
    record: &CustomerRecord,
    order_amount: Money,
    flags: &mut StageFlags,
) -> StageOutcome<Money> {
    let available = record.available_credit();

    if order_amount > available {
        return StageOutcome::Fail(Rejection::InsufficientCredit {
            required: order_amount,
            available,
            shortage: order_amount - available,
        });
    }

    flags.has_credit = true;
    StageOutcome::Continue(available)
}

// =============================================================================
// Unit Tests
// =============================================================================
