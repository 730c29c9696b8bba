//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-ledger errors (separate crate)                             │
//! │  └── SnapshotError    - Snapshot read/write failures                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → request layer → client            │
//! │        SnapshotError never crosses the Store boundary (logged only)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (user_id, code, cadence)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. A request layer maps
/// every variant here to a 400-equivalent response; anything unexpected is
/// its own 500-equivalent concern.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No cart exists for the user where one is required.
    ///
    /// ## When This Occurs
    /// - Removing an item for a user who never added anything
    #[error("Cart not found for user: {user_id}")]
    CartNotFound { user_id: String },

    /// Checkout attempted against a missing or empty cart.
    ///
    /// ## When This Occurs
    /// - `create_order` before any item was added
    /// - `create_order` after the last item was removed
    /// - `create_order` twice in a row (checkout deletes the cart)
    #[error("Cart is empty")]
    EmptyCart { user_id: String },

    /// The supplied discount code does not name an unused code.
    ///
    /// Covers both "never issued" and "already redeemed" - the caller
    /// cannot distinguish them, which keeps codes unguessable.
    #[error("Invalid or already used discount code: {code}")]
    InvalidDiscountCode { code: String },

    /// A valid code was supplied on an order outside the cadence boundary.
    ///
    /// Redemption is only open while the completed-order count sits on a
    /// multiple of the cadence; everywhere else the code stays unused and
    /// the checkout is rejected whole.
    #[error("Discount code can only be used on every {cadence}th order")]
    DiscountNotEligibleYet { cadence: u64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet field requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid value shape (e.g., a non-finite float).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
