//! # Domain Types
//!
//! Core domain types used throughout Order Gate.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    LineItem     │   │ CustomerRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  customer_id    │   │  product_name   │   │  customer_id    │       │
//! │  │  declared_total │   │  quantity       │   │  exists/active  │       │
//! │  │  items          │   │  unit_price     │   │  credit figures │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ValidationStatus │   │   StageFlags    │   │ValidationResult │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Approved       │   │  customer_*     │   │  status + error │       │
//! │  │  Rejected       │   │  items_valid    │   │  credit figures │       │
//! │  └─────────────────┘   │  has_credit     │   │  stage_flags    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Every type here is constructed fresh per validation call and discarded
//! after the `ValidationResult` is returned. The only state that crosses
//! calls is the read-only directory behind [`crate::CustomerDirectory`].

use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::money::Money;

// =============================================================================
// Order
// =============================================================================

/// A decoded order awaiting validation.
///
/// Produced only by [`crate::parse::parse_order`]; construction implies the
/// payload was structurally sound, nothing more. Business rules (item
/// values, totals reconciliation, credit) are checked by the stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Optional caller-supplied order identifier, carried into messages
    /// and log spans. Never required: validation keys off the customer.
    pub order_id: Option<String>,

    /// Business identifier of the ordering customer.
    pub customer_id: String,

    /// The total the caller claims the items add up to.
    pub declared_total: Money,

    /// Ordered line items; structurally guaranteed non-empty after parse.
    pub items: Vec<LineItem>,
}

impl Order {
    /// Sums the line-item subtotals.
    ///
    /// Exact integer arithmetic; compared against `declared_total` within
    /// the reconciliation tolerance by the item stage.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A single order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name of the ordered product.
    pub product_name: String,

    /// Units ordered. May be non-positive after parsing; the item stage
    /// rejects it.
    pub quantity: i64,

    /// Price per unit. Same deal: decoded as-is, validated by the stage.
    pub unit_price: Money,
}

impl LineItem {
    /// Line subtotal: `quantity × unit_price`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer Record
// =============================================================================

/// What the directory knows about a customer, as seen by the core.
///
/// Owned and mutated only by the external directory; the core treats it as
/// immutable input for the duration of one validation. A lookup miss is a
/// value, not an error — see [`CustomerRecord::not_found`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Business identifier this record answers for.
    pub customer_id: String,

    /// Whether the directory has this customer at all.
    pub exists: bool,

    /// Whether the customer may place orders.
    pub active: bool,

    /// Maximum credit extended to the customer.
    pub credit_limit: Money,

    /// Credit already consumed. Directory invariant: ≤ `credit_limit`.
    pub used_credit: Money,
}

impl CustomerRecord {
    /// The zeroed record a directory returns for an unknown identifier.
    ///
    /// ```rust
    /// use gate_core::types::CustomerRecord;
    ///
    /// let record = CustomerRecord::not_found("CUST999");
    /// assert!(!record.exists);
    /// assert!(!record.active);
    /// assert!(record.credit_limit.is_zero());
    /// ```
    pub fn not_found(customer_id: impl Into<String>) -> Self {
        CustomerRecord {
            customer_id: customer_id.into(),
            exists: false,
            active: false,
            credit_limit: Money::zero(),
            used_credit: Money::zero(),
        }
    }

    /// Credit still open to the customer: `credit_limit − used_credit`.
    #[inline]
    pub fn available_credit(&self) -> Money {
        self.credit_limit - self.used_credit
    }
}

// =============================================================================
// Validation Status
// =============================================================================

/// Terminal verdict of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// All stages passed.
    Approved,
    /// Some stage failed; `ValidationResult::error` says which.
    Rejected,
}

// =============================================================================
// Stage Flags
// =============================================================================

/// Per-stage pass markers.
///
/// Each flag is false until its stage executes AND passes, so a rejected
/// result shows exactly how far the pipeline got:
///
/// ```text
/// CustomerNotFound   → { false, false, false, false }
/// CustomerInactive   → { true,  false, false, false }
/// TotalMismatch      → { true,  true,  false, false }
/// InsufficientCredit → { true,  true,  true,  false }
/// Approved           → { true,  true,  true,  true  }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFlags {
    /// The directory has the customer.
    pub customer_exists: bool,
    /// The customer may place orders.
    pub customer_active: bool,
    /// Items are structurally sound and the total reconciles.
    pub items_valid: bool,
    /// Available credit covers the order amount.
    pub has_credit: bool,
}

impl StageFlags {
    /// True when every stage passed.
    #[inline]
    pub fn all_passed(&self) -> bool {
        self.customer_exists && self.customer_active && self.items_valid && self.has_credit
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// The record a validation run produces.
///
/// Internal shape; hosts receive the wire form via
/// [`crate::report::ValidationResponse`]. Deliberately carries no clock or
/// random identifier: the same payload against the same directory must
/// compare equal on repeat runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Terminal verdict.
    pub status: ValidationStatus,

    /// Customer the order named (best-effort even on malformed payloads).
    pub customer_id: String,

    /// Order identifier echoed from the payload, when supplied.
    pub order_id: Option<String>,

    /// Amount of the order; fixed to the declared total once the item
    /// stage passes, zero when rejected before then.
    pub order_amount: Money,

    /// The triggering rejection. Present iff `status` is `Rejected`.
    pub error: Option<Rejection>,

    /// Human-readable one-line summary of the outcome.
    pub message: String,

    /// Available credit as computed by the credit stage; zero when that
    /// stage never ran.
    pub credit_available: Money,

    /// Amount by which the order exceeded available credit; zero unless
    /// the credit stage ran and failed.
    pub credit_shortage: Money,

    /// How far the pipeline got.
    pub stage_flags: StageFlags,
}

impl ValidationResult {
    /// Convenience predicate for hosts and tests.
    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status == ValidationStatus::Approved
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
