//! # Validation Module
//!
//! Input validation for the add-to-cart surface.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request layer (external)                                     │
//! │  ├── Shape checks (missing fields, wrong types)                        │
//! │  └── Immediate 400 responses                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field bounds (lengths, ranges)                                    │
//! │  └── Runs before any Store mutation - a failure leaves state untouched │
//! │                                                                         │
//! │  The Store never trusts that Layer 1 ran: every add_item call passes   │
//! │  through here regardless of transport.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_price, validate_quantity};
//!
//! validate_price(10.99).unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_ID_LEN, MAX_ITEM_NAME_LEN, MAX_ITEM_PRICE, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item identifier.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_item_id;
///
/// assert!(validate_item_id("item1").is_ok());
/// assert!(validate_item_id("").is_err());
/// assert!(validate_item_id(&"A".repeat(200)).is_err());
/// ```
pub fn validate_item_id(item_id: &str) -> ValidationResult<()> {
    if item_id.is_empty() {
        return Err(ValidationError::Required {
            field: "item_id".to_string(),
        });
    }

    if item_id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item_id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number (NaN and infinities are rejected)
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_PRICE`]
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price;
///
/// assert!(validate_price(10.99).is_ok());
/// assert!(validate_price(999_999.99).is_ok());
/// assert!(validate_price(0.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_ITEM_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: MAX_ITEM_PRICE,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`] (1000)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Request carries quantity: 5                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0?   → Error: "quantity must be positive"             │
/// │       │                                                                 │
/// │       ├── qty > 1000? → Error: "quantity must be between 1 and 1000"   │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_ITEM_QUANTITY as f64,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the full add-to-cart field set in one call.
///
/// First failing field wins; the order matches the field order of the
/// add-item request shape (item_id, name, price, quantity).
pub fn validate_cart_item(
    item_id: &str,
    name: &str,
    price: f64,
    quantity: i64,
) -> ValidationResult<()> {
    validate_item_id(item_id)?;
    validate_item_name(name)?;
    validate_price(price)?;
    validate_quantity(quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("item1").is_ok());
        assert!(validate_item_id("x").is_ok());
        assert!(validate_item_id(&"A".repeat(100)).is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Wireless Mouse").is_ok());
        assert!(validate_item_name(&"A".repeat(200)).is_ok());

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(10.99).is_ok());
        assert!(validate_price(999_999.99).is_ok());

        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(1_000_000.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1001).is_err());
    }

    #[test]
    fn test_validate_cart_item_reports_first_failure() {
        // item_id checked before quantity
        let err = validate_cart_item("", "Widget", 10.0, 0).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "item_id"));

        let err = validate_cart_item("item1", "Widget", 10.0, 0).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { ref field } if field == "quantity"));
    }

    #[test]
    fn test_validate_cart_item_accepts_valid_input() {
        assert!(validate_cart_item("item1", "Widget", 10.0, 2).is_ok());
    }
}
