//! # Order Parsing
//!
//! Decodes a loosely-typed order payload into an [`Order`].
//!
//! ## Scope
//! Parsing is STRUCTURAL only: field presence, JSON types, non-empty
//! collections. It deliberately accepts values a later stage will reject —
//! an empty product name, a zero quantity, a negative price — because
//! those are business verdicts (`invalid_item`), not payload defects.
//!
//! ```text
//! payload (serde_json::Value)
//!      │
//!      ▼
//! parse_order() ── ParseError ──► Rejection::MalformedOrder
//!      │
//!      ▼
//!   Order ──► stage pipeline
//! ```
//!
//! Pure function; no directory access, no business validation.

use serde_json::Value;

use crate::error::ParseError;
use crate::money::Money;
use crate::types::{LineItem, Order};

/// Decodes an order payload.
///
/// ## Accepted Shape
/// ```json
/// {
///   "order_id": "ORD001",            // optional string
///   "customer_id": "CUST001",        // required, non-empty string
///   "declared_total": 1500.0,        // required, non-negative number
///   "items": [                       // required, non-empty array
///     { "product_name": "Laptop", "quantity": 1, "unit_price": 1500.0 }
///   ]
/// }
/// ```
///
/// ## Example
/// ```rust
/// use gate_core::parse::parse_order;
/// use serde_json::json;
///
/// let order = parse_order(&json!({
///     "customer_id": "CUST001",
///     "declared_total": 25.0,
///     "items": [{ "product_name": "Mouse", "quantity": 1, "unit_price": 25.0 }],
/// }))
/// .unwrap();
///
/// assert_eq!(order.customer_id, "CUST001");
/// assert_eq!(order.items.len(), 1);
/// ```
pub fn parse_order(payload: &Value) -> Result<Order, ParseError> {
    let object = payload.as_object().ok_or(ParseError::NotAnObject)?;

    // Optional correlation identifier. Present-but-blank collapses to None.
    let order_id = match object.get("order_id") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(_) => {
            return Err(invalid_field("order_id", "must be a string"));
        }
    };

    let customer_id = match object.get("customer_id") {
        None => return Err(missing_field("customer_id")),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ParseError::EmptyField {
                    field: "customer_id".to_string(),
                });
            }
            trimmed.to_string()
        }
        Some(_) => {
            return Err(invalid_field("customer_id", "must be a string"));
        }
    };

    let declared_total = match object.get("declared_total") {
        None => return Err(missing_field("declared_total")),
        Some(value) => match value.as_f64() {
            Some(v) if v >= 0.0 => Money::from_decimal(v),
            Some(_) => {
                return Err(invalid_field("declared_total", "must be a non-negative number"));
            }
            None => return Err(invalid_field("declared_total", "must be a number")),
        },
    };

    let raw_items = match object.get("items") {
        None => return Err(missing_field("items")),
        Some(value) => value
            .as_array()
            .ok_or_else(|| invalid_field("items", "must be an array"))?,
    };

    if raw_items.is_empty() {
        return Err(ParseError::EmptyField {
            field: "items".to_string(),
        });
    }

    let mut items = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.iter().enumerate() {
        items.push(parse_item(index, raw)?);
    }

    Ok(Order {
        order_id,
        customer_id,
        declared_total,
        items,
    })
}

/// Decodes one line item at `index`.
fn parse_item(index: usize, raw: &Value) -> Result<LineItem, ParseError> {
    let object = raw.as_object().ok_or_else(|| ParseError::InvalidField {
        field: format!("items[{index}]"),
        reason: "must be an object".to_string(),
    })?;

    let product_name = match object.get("product_name") {
        None => return Err(item_field(index, "product_name", "is required")),
        // An empty name parses fine; the item stage rejects it.
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(item_field(index, "product_name", "must be a string")),
    };

    // as_i64 refuses floats and non-numbers alike: quantities are counts.
    let quantity = match object.get("quantity") {
        None => return Err(item_field(index, "quantity", "is required")),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| item_field(index, "quantity", "must be a whole number"))?,
    };

    let unit_price = match object.get("unit_price") {
        None => return Err(item_field(index, "unit_price", "is required")),
        Some(value) => value
            .as_f64()
            .map(Money::from_decimal)
            .ok_or_else(|| item_field(index, "unit_price", "must be a number"))?,
    };

    Ok(LineItem {
        product_name,
        quantity,
        unit_price,
    })
}

fn missing_field(field: &str) -> ParseError {
    ParseError::MissingField {
        field: field.to_string(),
    }
}

fn invalid_field(field: &str, reason: &str) -> ParseError {
    ParseError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn item_field(index: usize, field: &str, reason: &str) -> ParseError {
    ParseError::InvalidItemField {
        index,
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
