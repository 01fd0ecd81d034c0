//! # Result Reporter
//!
//! Reshapes the internal [`ValidationResult`] into the externally-shaped,
//! JSON-compatible response object.
//!
//! Pure transformation, no business logic: status, flags, and numeric
//! fields pass through unaltered — the only conversions are cents to
//! decimal numbers and the rejection to its stable code string. Hosts
//! serialize this struct directly.
//!
//! ```text
//! ValidationResult (cents, typed error)
//!        │ from_result
//!        ▼
//! ValidationResponse (numbers, code string)  ──serde──►  wire JSON
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{StageFlags, ValidationResult, ValidationStatus};

// =============================================================================
// Validation Response
// =============================================================================

/// The wire form of a validation outcome.
///
/// ## Example
/// ```rust
/// use gate_core::machine::OrderValidator;
/// use gate_core::report::ValidationResponse;
/// use gate_core::types::CustomerRecord;
/// use gate_core::CustomerDirectory;
/// use serde_json::json;
///
/// struct Empty;
///
/// impl CustomerDirectory for Empty {
///     fn lookup(&self, customer_id: &str) -> CustomerRecord {
///         CustomerRecord::not_found(customer_id)
///     }
/// }
///
/// let result = OrderValidator::new(Empty).validate(&json!({
///     "customer_id": "CUST999",
///     "declared_total": 500.0,
///     "items": [{ "product_name": "Monitor", "quantity": 1, "unit_price": 500.0 }],
/// }));
///
/// let response = ValidationResponse::from_result(&result);
/// assert_eq!(response.error.as_deref(), Some("customer_not_found"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// "approved" or "rejected".
    pub status: ValidationStatus,

    /// Customer the order named.
    pub customer_id: String,

    /// Order amount as a decimal number.
    pub order_amount: f64,

    /// Stable rejection code, or null when approved.
    pub error: Option<String>,

    /// Human-readable outcome summary.
    pub message: String,

    /// Available credit as a decimal number (0 if the credit stage never ran).
    pub credit_available: f64,

    /// Credit shortage as a decimal number (0 unless the credit stage failed).
    pub credit_shortage: f64,

    /// Per-stage pass markers.
    pub validations: StageFlags,
}

impl ValidationResponse {
    /// Reshapes a result for the wire.
    pub fn from_result(result: &ValidationResult) -> Self {
        ValidationResponse {
            status: result.status,
            customer_id: result.customer_id.clone(),
            order_amount: result.order_amount.to_decimal(),
            error: result.error.as_ref().map(|r| r.code().to_string()),
            message: result.message.clone(),
            credit_available: result.credit_available.to_decimal(),
            credit_shortage: result.credit_shortage.to_decimal(),
            validations: result.stage_flags,
        }
    }
}

impl From<&ValidationResult> for ValidationResponse {
    fn from(result: &ValidationResult) -> Self {
        ValidationResponse::from_result(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;
    use crate::money::Money;

    fn approved_result() -> ValidationResult {
        ValidationResult {
            status: ValidationStatus::Approved,
            customer_id: "CUST001".to_string(),
            order_id: Some("ORD001".to_string()),
            order_amount: Money::from_cents(150_000),
            error: None,
            message: "order ORD001 approved: total $1500.00, credit available $4000.00"
                .to_string(),
            credit_available: Money::from_cents(400_000),
            credit_shortage: Money::zero(),
            stage_flags: StageFlags {
                customer_exists: true,
                customer_active: true,
                items_valid: true,
                has_credit: true,
            },
        }
    }

    fn rejected_result() -> ValidationResult {
        ValidationResult {
            status: ValidationStatus::Rejected,
            customer_id: "CUST002".to_string(),
            order_id: None,
            order_amount: Money::from_cents(100),
            error: Some(Rejection::InsufficientCredit {
                required: Money::from_cents(100),
                available: Money::zero(),
                shortage: Money::from_cents(100),
            }),
            message: "order rejected: insufficient credit: available $0.00, required $1.00, short $1.00".to_string(),
            credit_available: Money::zero(),
            credit_shortage: Money::from_cents(100),
            stage_flags: StageFlags {
                customer_exists: true,
                customer_active: true,
                items_valid: true,
                has_credit: false,
            },
        }
    }

    #[test]
    fn test_approved_mapping() {
        let response = ValidationResponse::from_result(&approved_result());

        assert_eq!(response.status, ValidationStatus::Approved);
        assert_eq!(response.customer_id, "CUST001");
        assert!((response.order_amount - 1500.0).abs() < f64::EPSILON);
        assert_eq!(response.error, None);
        assert!((response.credit_available - 4000.0).abs() < f64::EPSILON);
        assert!(response.credit_shortage == 0.0);
        assert!(response.validations.all_passed());
    }

    #[test]
    fn test_rejected_mapping_uses_stable_code() {
        let response = ValidationResponse::from_result(&rejected_result());

        assert_eq!(response.status, ValidationStatus::Rejected);
        assert_eq!(response.error.as_deref(), Some("insufficient_credit"));
        assert!((response.credit_shortage - 1.0).abs() < f64::EPSILON);
        assert!(!response.validations.has_credit);
    }

    #[test]
    fn test_wire_shape_field_names() {
        let value = serde_json::to_value(ValidationResponse::from_result(&approved_result()))
            .unwrap();
        let object = value.as_object().unwrap();

        for field in [
            "status",
            "customer_id",
            "order_amount",
            "error",
            "message",
            "credit_available",
            "credit_shortage",
            "validations",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }

        assert_eq!(value["status"], "approved");
        assert_eq!(value["error"], serde_json::Value::Null);
        let validations = value["validations"].as_object().unwrap();
        for flag in [
            "customer_exists",
            "customer_active",
            "items_valid",
            "has_credit",
        ] {
            assert_eq!(validations[flag], true, "flag {flag}");
        }
    }

    #[test]
    fn test_wire_roundtrip() {
        let response = ValidationResponse::from_result(&rejected_result());
        let text = serde_json::to_string(&response).unwrap();
        let back: ValidationResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, response);
    }
}
