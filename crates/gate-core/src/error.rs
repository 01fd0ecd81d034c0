//! # Error Types
//!
//! Domain-specific error types for gate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gate-core errors (this file)                                          │
//! │  ├── ParseError  - structural payload decoding failures                │
//! │  └── Rejection   - the business-rule taxonomy, one kind per way an     │
//! │                    order can be turned away                            │
//! │                                                                         │
//! │  Flow: ParseError ──wrapped──► Rejection::MalformedOrder               │
//! │        Rejection ──────────────► ValidationResult.error (data!)        │
//! │                                                                         │
//! │  Rejections are OUTCOMES, not failures: validate() never returns Err   │
//! │  for them and never panics. The only errors that escape as Err live    │
//! │  in the hosts (file I/O, bad JSON text).                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in every variant (field, index, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a stable machine-readable code

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Parse Error
// =============================================================================

/// Structural payload decoding failures.
///
/// These cover only the shape of the input — missing fields, wrong JSON
/// types, empty collections. Anything that requires business judgement
/// (item values, totals, credit) belongs to the stages and surfaces as a
/// different [`Rejection`] kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The payload is not a JSON object at all.
    #[error("order payload must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("{field} is required")]
    MissingField { field: String },

    /// A required field is present but empty.
    #[error("{field} must not be empty")]
    EmptyField { field: String },

    /// A field is present but has the wrong type or domain.
    #[error("{field} {reason}")]
    InvalidField { field: String, reason: String },

    /// A line-item field is absent or has the wrong type.
    #[error("items[{index}].{field} {reason}")]
    InvalidItemField {
        index: usize,
        field: String,
        reason: String,
    },
}

// =============================================================================
// Rejection
// =============================================================================

/// Why an order was turned away.
///
/// Exactly one of these rides in a rejected [`crate::types::ValidationResult`].
/// There is no recoverable/fatal split at this layer — every kind is
/// terminal for the single validation call and is reported, not retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// The payload never decoded into an [`crate::types::Order`].
    #[error("malformed order: {0}")]
    MalformedOrder(#[from] ParseError),

    /// The directory has no such customer.
    #[error("customer {customer_id} does not exist")]
    CustomerNotFound { customer_id: String },

    /// The customer is on file but may not place orders.
    #[error("customer {customer_id} exists but is inactive")]
    CustomerInactive { customer_id: String },

    /// A line item violates a business rule.
    ///
    /// `index` is the zero-based position in the payload's `items` array,
    /// `field` the offending field.
    #[error("item[{index}]: {field} {reason}")]
    InvalidItem {
        index: usize,
        field: String,
        reason: String,
    },

    /// The declared total and the item-sum disagree beyond tolerance.
    #[error("declared total {declared} does not match computed total {computed}")]
    TotalMismatch { declared: Money, computed: Money },

    /// Available credit does not cover the order amount.
    #[error("insufficient credit: available {available}, required {required}, short {shortage}")]
    InsufficientCredit {
        required: Money,
        available: Money,
        shortage: Money,
    },
}

impl Rejection {
    /// Stable machine-readable code for the response `error` field.
    ///
    /// ```rust
    /// use gate_core::error::Rejection;
    ///
    /// let rejection = Rejection::CustomerNotFound {
    ///     customer_id: "CUST999".to_string(),
    /// };
    /// assert_eq!(rejection.code(), "customer_not_found");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MalformedOrder(_) => "malformed_order",
            Rejection::CustomerNotFound { .. } => "customer_not_found",
            Rejection::CustomerInactive { .. } => "customer_inactive",
            Rejection::InvalidItem { .. } => "invalid_item",
            Rejection::TotalMismatch { .. } => "total_mismatch",
            Rejection::InsufficientCredit { .. } => "insufficient_credit",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::MissingField {
            field: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "customer_id is required");

        let err = ParseError::InvalidItemField {
            index: 2,
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        };
        assert_eq!(err.to_string(), "items[2].quantity must be a whole number");
    }

    #[test]
    fn test_rejection_messages() {
        let err = Rejection::InsufficientCredit {
            required: Money::from_cents(150_000),
            available: Money::from_cents(100_000),
            shortage: Money::from_cents(50_000),
        };
        assert_eq!(
            err.to_string(),
            "insufficient credit: available $1000.00, required $1500.00, short $500.00"
        );

        let err = Rejection::TotalMismatch {
            declared: Money::from_cents(150_002),
            computed: Money::from_cents(149_998),
        };
        assert_eq!(
            err.to_string(),
            "declared total $1500.02 does not match computed total $1499.98"
        );
    }

    #[test]
    fn test_parse_error_converts_to_rejection() {
        let parse_err = ParseError::EmptyField {
            field: "customer_id".to_string(),
        };
        let rejection: Rejection = parse_err.into();
        assert!(matches!(rejection, Rejection::MalformedOrder(_)));
        assert_eq!(
            rejection.to_string(),
            "malformed order: customer_id must not be empty"
        );
    }

    #[test]
    fn test_rejection_codes_are_stable() {
        let cases: Vec<(Rejection, &str)> = vec![
            (
                Rejection::MalformedOrder(ParseError::NotAnObject),
                "malformed_order",
            ),
            (
                Rejection::CustomerNotFound {
                    customer_id: "X".to_string(),
                },
                "customer_not_found",
            ),
            (
                Rejection::CustomerInactive {
                    customer_id: "X".to_string(),
                },
                "customer_inactive",
            ),
            (
                Rejection::InvalidItem {
                    index: 0,
                    field: "quantity".to_string(),
                    reason: "must be greater than zero".to_string(),
                },
                "invalid_item",
            ),
            (
                Rejection::TotalMismatch {
                    declared: Money::zero(),
                    computed: Money::zero(),
                },
                "total_mismatch",
            ),
            (
                Rejection::InsufficientCredit {
                    required: Money::zero(),
                    available: Money::zero(),
                    shortage: Money::zero(),
                },
                "insufficient_credit",
            ),
        ];

        for (rejection, code) in cases {
            assert_eq!(rejection.code(), code);
        }
    }
}
