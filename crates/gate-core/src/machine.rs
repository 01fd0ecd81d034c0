//! # Validation State Machine
//!
//! Drives the fixed stage sequence and assembles the result record.
//!
//! ## State Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Order Validation State Machine                        │
//! │                                                                         │
//! │   Start ──parse──► CustomerCheck ──► ItemCheck ──► CreditCheck         │
//! │     │                   │                │              │               │
//! │     │ malformed         │ not found      │ bad item     │ no credit    │
//! │     │                   │ inactive       │ mismatch     │               │
//! │     ▼                   ▼                ▼              ▼               │
//! │   ┌──────────────────────────────────────────────────┐  │ pass         │
//! │   │                REJECTED (absorbing)              │  ▼              │
//! │   └──────────────────────────────────────────────────┘ APPROVED        │
//! │                                                                         │
//! │   Strictly linear: no state revisited, no stage skipped on success,     │
//! │   no stage attempted after a failure. Exactly one terminal state per    │
//! │   invocation.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - `validate` is total: it never panics and never returns `Err`.
//!   Business failures — including malformed payloads — come back as a
//!   Rejected [`ValidationResult`] carrying the typed [`Rejection`].
//! - Deterministic: identical payload + unchanged directory ⇒ identical
//!   result, field for field.
//!
//! ## Example
//! ```rust
//! use gate_core::machine::OrderValidator;
//! use gate_core::types::{CustomerRecord, ValidationStatus};
//! use gate_core::{CustomerDirectory, Money};
//! use serde_json::json;
//!
//! struct OneCustomer;
//!
//! impl CustomerDirectory for OneCustomer {
//!     fn lookup(&self, customer_id: &str) -> CustomerRecord {
//!         if customer_id == "CUST001" {
//!             CustomerRecord {
//!                 customer_id: customer_id.to_string(),
//!                 exists: true,
//!                 active: true,
//!                 credit_limit: Money::from_cents(500_000),
//!                 used_credit: Money::from_cents(100_000),
//!             }
//!         } else {
//!             CustomerRecord::not_found(customer_id)
//!         }
//!     }
//! }
//!
//! let validator = OrderValidator::new(OneCustomer);
//! let result = validator.validate(&json!({
//!     "customer_id": "CUST001",
//!     "declared_total": 1500.0,
//!     "items": [{ "product_name": "Laptop", "quantity": 1, "unit_price": 1500.0 }],
//! }));
//!
//! assert_eq!(result.status, ValidationStatus::Approved);
//! assert_eq!(result.credit_available.cents(), 400_000);
//! ```

use serde_json::Value;
use tracing::{debug, debug_span, info, warn};

use crate::directory::CustomerDirectory;
use crate::error::Rejection;
use crate::money::Money;
use crate::parse::parse_order;
use crate::types::{StageFlags, ValidationResult, ValidationStatus};
use crate::validation::{check_credit, check_customer, check_items, StageOutcome};

// =============================================================================
// Machine States
// =============================================================================

/// The states of the validation machine, for observability.
///
/// The machine itself is the fixed call sequence in
/// [`OrderValidator::validate`]; this enum names its positions so
/// transitions show up in traces and hosts can speak the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    /// Payload received, nothing decoded yet.
    Start,
    /// Stage 1: directory lookup, existence and activity.
    CustomerCheck,
    /// Stage 2: line items and totals reconciliation.
    ItemCheck,
    /// Stage 3: credit sufficiency.
    CreditCheck,
    /// Terminal: every stage passed.
    Approved,
    /// Terminal, absorbing: some stage failed.
    Rejected,
}

impl MachineState {
    /// Snake_case name used in trace events.
    pub fn name(&self) -> &'static str {
        match self {
            MachineState::Start => "start",
            MachineState::CustomerCheck => "customer_check",
            MachineState::ItemCheck => "item_check",
            MachineState::CreditCheck => "credit_check",
            MachineState::Approved => "approved",
            MachineState::Rejected => "rejected",
        }
    }
}

// =============================================================================
// Order Validator
// =============================================================================

/// The validation entry point: a directory plus the stage pipeline.
///
/// Holds only the injected directory; every call builds its state fresh,
/// so one validator can serve any number of sequential or (directory
/// permitting) concurrent validations.
pub struct OrderValidator<D> {
    directory: D,
}

impl<D: CustomerDirectory> OrderValidator<D> {
    /// Creates a validator over the given directory.
    pub fn new(directory: D) -> Self {
        OrderValidator { directory }
    }

    /// Validates one order payload.
    ///
    /// Runs parse → customer → items → credit, short-circuiting to the
    /// absorbing Rejected state on the first failure, and returns the
    /// assembled [`ValidationResult`]. See the module docs for the full
    /// state diagram and guarantees.
    pub fn validate(&self, payload: &Value) -> ValidationResult {
        let mut flags = StageFlags::default();

        debug!(state = MachineState::Start.name(), "decoding order payload");
        let order = match parse_order(payload) {
            Ok(order) => order,
            Err(parse_err) => {
                // Best-effort identifiers so even a malformed payload gets
                // a correlatable result.
                return reject(
                    payload_string(payload, "customer_id").unwrap_or_default(),
                    payload_string(payload, "order_id"),
                    Money::zero(),
                    Money::zero(),
                    Money::zero(),
                    Rejection::from(parse_err),
                    flags,
                );
            }
        };

        let span = debug_span!(
            "order_validation",
            order_id = order.order_id.as_deref().unwrap_or("-"),
            customer_id = %order.customer_id,
        );
        let _guard = span.enter();

        // Stage 1: customer existence and activity
        debug!(state = MachineState::CustomerCheck.name(), "checking customer");
        let record = match check_customer(&self.directory, &order.customer_id, &mut flags) {
            StageOutcome::Continue(record) => record,
            StageOutcome::Fail(rejection) => {
                return reject(
                    order.customer_id,
                    order.order_id,
                    Money::zero(),
                    Money::zero(),
                    Money::zero(),
                    rejection,
                    flags,
                );
            }
        };

        // Stage 2: items and totals reconciliation
        debug!(state = MachineState::ItemCheck.name(), "checking items");
        let order_amount = match check_items(&order, &mut flags) {
            StageOutcome::Continue(amount) => amount,
            StageOutcome::Fail(rejection) => {
                return reject(
                    order.customer_id,
                    order.order_id,
                    Money::zero(),
                    Money::zero(),
                    Money::zero(),
                    rejection,
                    flags,
                );
            }
        };

        // Stage 3: credit sufficiency
        debug!(state = MachineState::CreditCheck.name(), "checking credit");
        let available = match check_credit(&record, order_amount, &mut flags) {
            StageOutcome::Continue(available) => available,
            StageOutcome::Fail(rejection) => {
                // The rejection already carries the credit arithmetic;
                // surface it on the result without recomputing.
                let (credit_available, credit_shortage) = match &rejection {
                    Rejection::InsufficientCredit {
                        available, shortage, ..
                    } => (*available, *shortage),
                    _ => (Money::zero(), Money::zero()),
                };
                return reject(
                    order.customer_id,
                    order.order_id,
                    order_amount,
                    credit_available,
                    credit_shortage,
                    rejection,
                    flags,
                );
            }
        };

        info!(
            state = MachineState::Approved.name(),
            amount = %order_amount,
            available = %available,
            "order approved"
        );

        let message = match &order.order_id {
            Some(id) => format!(
                "order {id} approved: total {order_amount}, credit available {available}"
            ),
            None => format!("order approved: total {order_amount}, credit available {available}"),
        };

        ValidationResult {
            status: ValidationStatus::Approved,
            customer_id: order.customer_id,
            order_id: order.order_id,
            order_amount,
            error: None,
            message,
            credit_available: available,
            credit_shortage: Money::zero(),
            stage_flags: flags,
        }
    }
}

/// Assembles the terminal Rejected result.
fn reject(
    customer_id: String,
    order_id: Option<String>,
    order_amount: Money,
    credit_available: Money,
    credit_shortage: Money,
    rejection: Rejection,
    stage_flags: StageFlags,
) -> ValidationResult {
    warn!(
        state = MachineState::Rejected.name(),
        code = rejection.code(),
        %rejection,
        "order rejected"
    );

    let message = match &order_id {
        Some(id) => format!("order {id} rejected: {rejection}"),
        None => format!("order rejected: {rejection}"),
    };

    ValidationResult {
        status: ValidationStatus::Rejected,
        customer_id,
        order_id,
        order_amount,
        error: Some(rejection),
        message,
        credit_available,
        credit_shortage,
        stage_flags,
    }
}

/// Best-effort string field extraction from an undecoded payload.
fn payload_string(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerRecord;
    use serde_json::json;
    use std::collections::HashMap;

    struct MapDirectory {
        records: HashMap<String, CustomerRecord>,
    }

    impl CustomerDirectory for MapDirectory {
        fn lookup(&self, customer_id: &str) -> CustomerRecord {
            self.records
                .get(customer_id)
                .cloned()
                .unwrap_or_else(|| CustomerRecord::not_found(customer_id))
        }
    }

    fn record(id: &str, active: bool, limit_cents: i64, used_cents: i64) -> CustomerRecord {
        CustomerRecord {
            customer_id: id.to_string(),
            exists: true,
            active,
            credit_limit: Money::from_cents(limit_cents),
            used_credit: Money::from_cents(used_cents),
        }
    }

    /// CUST001: active, limit $5000, used $1000 (available $4000)
    /// CUST002: active, limit $1000, used $1000 (available $0)
    /// CUST003: inactive
    fn validator() -> OrderValidator<MapDirectory> {
        let mut records = HashMap::new();
        records.insert("CUST001".to_string(), record("CUST001", true, 500_000, 100_000));
        records.insert("CUST002".to_string(), record("CUST002", true, 100_000, 100_000));
        records.insert("CUST003".to_string(), record("CUST003", false, 1_500_000, 0));
        OrderValidator::new(MapDirectory { records })
    }

    fn laptop_order(customer_id: &str, declared: f64, unit_price: f64) -> Value {
        json!({
            "order_id": "ORD001",
            "customer_id": customer_id,
            "declared_total": declared,
            "items": [
                { "product_name": "Laptop", "quantity": 1, "unit_price": unit_price },
            ],
        })
    }

    #[test]
    fn test_approves_order_within_credit() {
        // Scenario: active customer, clean items, $1500 against $4000 available
        let result = validator().validate(&laptop_order("CUST001", 1500.0, 1500.0));

        assert_eq!(result.status, ValidationStatus::Approved);
        assert!(result.is_approved());
        assert_eq!(result.customer_id, "CUST001");
        assert_eq!(result.order_id.as_deref(), Some("ORD001"));
        assert_eq!(result.order_amount.cents(), 150_000);
        assert_eq!(result.credit_available.cents(), 400_000);
        assert!(result.credit_shortage.is_zero());
        assert_eq!(result.error, None);
        assert!(result.stage_flags.all_passed());
        assert!(result.message.contains("approved"));
    }

    #[test]
    fn test_rejects_unknown_customer_with_all_flags_false() {
        let result = validator().validate(&laptop_order("CUST999", 500.0, 500.0));

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert!(matches!(
            result.error,
            Some(Rejection::CustomerNotFound { ref customer_id }) if customer_id == "CUST999"
        ));
        assert_eq!(result.stage_flags, StageFlags::default());
        assert!(result.order_amount.is_zero());
        assert!(result.credit_available.is_zero());
    }

    #[test]
    fn test_rejects_inactive_customer_with_exists_flag_set() {
        let result = validator().validate(&laptop_order("CUST003", 1500.0, 1500.0));

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert!(matches!(
            result.error,
            Some(Rejection::CustomerInactive { .. })
        ));
        assert!(result.stage_flags.customer_exists);
        assert!(!result.stage_flags.customer_active);
        assert!(!result.stage_flags.items_valid);
        assert!(!result.stage_flags.has_credit);
    }

    #[test]
    fn test_total_within_one_cent_passes() {
        // Declared one cent over the computed sum: reconciles.
        let result = validator().validate(&json!({
            "customer_id": "CUST001",
            "declared_total": 1500.00,
            "items": [
                { "product_name": "Laptop", "quantity": 1, "unit_price": 1499.99 },
            ],
        }));

        assert_eq!(result.status, ValidationStatus::Approved);
        // Order amount is the declared figure, not the item-sum.
        assert_eq!(result.order_amount.cents(), 150_000);
    }

    #[test]
    fn test_total_beyond_one_cent_is_mismatch() {
        let result = validator().validate(&json!({
            "customer_id": "CUST001",
            "declared_total": 1500.02,
            "items": [
                { "product_name": "Laptop", "quantity": 1, "unit_price": 1499.98 },
            ],
        }));

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert!(matches!(
            result.error,
            Some(Rejection::TotalMismatch { declared, computed })
                if declared.cents() == 150_002 && computed.cents() == 149_998
        ));
        assert!(result.stage_flags.customer_exists);
        assert!(result.stage_flags.customer_active);
        assert!(!result.stage_flags.items_valid);
    }

    #[test]
    fn test_rejects_exhausted_credit_with_shortage() {
        // Scenario: available $0, ordering $1.00
        let result = validator().validate(&laptop_order("CUST002", 1.0, 1.0));

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert!(matches!(
            result.error,
            Some(Rejection::InsufficientCredit { .. })
        ));
        assert_eq!(result.order_amount.cents(), 100);
        assert!(result.credit_available.is_zero());
        assert_eq!(result.credit_shortage.cents(), 100);
        assert!(result.stage_flags.customer_exists);
        assert!(result.stage_flags.customer_active);
        assert!(result.stage_flags.items_valid);
        assert!(!result.stage_flags.has_credit);
    }

    #[test]
    fn test_approves_exact_credit_fit() {
        // $4000 order against exactly $4000 available
        let result = validator().validate(&laptop_order("CUST001", 4000.0, 4000.0));

        assert_eq!(result.status, ValidationStatus::Approved);
        assert!(result.credit_shortage.is_zero());
    }

    #[test]
    fn test_malformed_payload_is_rejected_not_err() {
        let result = validator().validate(&json!("not an order"));

        assert_eq!(result.status, ValidationStatus::Rejected);
        let rejection = result.error.as_ref().unwrap();
        assert_eq!(rejection.code(), "malformed_order");
        assert_eq!(result.customer_id, "");
        assert_eq!(result.stage_flags, StageFlags::default());
    }

    #[test]
    fn test_malformed_payload_keeps_best_effort_identifiers() {
        let result = validator().validate(&json!({
            "order_id": "ORD777",
            "customer_id": "CUST001",
            "declared_total": 100.0,
        }));

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert_eq!(result.error.as_ref().unwrap().code(), "malformed_order");
        assert_eq!(result.customer_id, "CUST001");
        assert_eq!(result.order_id.as_deref(), Some("ORD777"));
        assert!(result.message.contains("ORD777"));
    }

    #[test]
    fn test_fail_fast_reports_first_failing_stage_only() {
        // Inactive customer AND broken items: only the customer stage speaks.
        let result = validator().validate(&json!({
            "customer_id": "CUST003",
            "declared_total": 10.0,
            "items": [
                { "product_name": "", "quantity": -1, "unit_price": 0.0 },
            ],
        }));

        assert!(matches!(
            result.error,
            Some(Rejection::CustomerInactive { .. })
        ));
        assert!(!result.stage_flags.items_valid);
    }

    #[test]
    fn test_invalid_item_rejection_carries_position_and_field() {
        let result = validator().validate(&json!({
            "customer_id": "CUST001",
            "declared_total": 50.0,
            "items": [
                { "product_name": "Mouse", "quantity": 2, "unit_price": 25.0 },
                { "product_name": "Hub", "quantity": 0, "unit_price": 45.0 },
            ],
        }));

        assert!(matches!(
            result.error,
            Some(Rejection::InvalidItem { index: 1, ref field, .. }) if field == "quantity"
        ));
        assert!(result.message.contains("item[1]"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = validator();
        let payload = laptop_order("CUST001", 1500.0, 1500.0);

        let first = validator.validate(&payload);
        let second = validator.validate(&payload);
        assert_eq!(first, second);

        // Same for a rejection.
        let payload = laptop_order("CUST002", 1.0, 1.0);
        assert_eq!(validator.validate(&payload), validator.validate(&payload));
    }

    #[test]
    fn test_machine_state_names() {
        assert_eq!(MachineState::Start.name(), "start");
        assert_eq!(MachineState::CustomerCheck.name(), "customer_check");
        assert_eq!(MachineState::ItemCheck.name(), "item_check");
        assert_eq!(MachineState::CreditCheck.name(), "credit_check");
        assert_eq!(MachineState::Approved.name(), "approved");
        assert_eq!(MachineState::Rejected.name(), "rejected");
    }
}
