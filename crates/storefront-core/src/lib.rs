//! # storefront-core: Pure Business Logic for Storefront
//!
//! This crate is the **heart** of Storefront. It contains the domain types
//! and business rules for carts, orders, and discount codes, with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Request Layer (external)                        │   │
//! │  │    add item ──► get cart ──► checkout ──► statistics            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-ledger (Store)                       │   │
//! │  │    owns all mutable state + snapshot persistence                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐          │   │
//! │  │   │   types   │      │ validation│      │   error   │          │   │
//! │  │   │   Cart    │      │   rules   │      │ CoreError │          │   │
//! │  │   │   Order   │      │   checks  │      │ Validation│          │   │
//! │  │   └───────────┘      └───────────┘      └───────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILESYSTEM • NO CLOCK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Cart, CartItem, Order, DiscountCode, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Filesystem and network access is FORBIDDEN here
//! 3. **No Clock**: Functions that stamp times take the timestamp as an argument
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Cart` instead of
// `use storefront_core::types::Cart`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item identifier in characters.
pub const MAX_ITEM_ID_LEN: usize = 100;

/// Maximum length of an item display name in characters.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Maximum unit price accepted for a cart item.
///
/// ## Business Reason
/// Prices above this are almost certainly data-entry errors (a missing
/// decimal point turns 9999.99 into 999999+). Rejecting them at the door
/// keeps order totals plausible.
pub const MAX_ITEM_PRICE: f64 = 999_999.99;

/// Maximum quantity of a single item accepted per add-to-cart call.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 1000;

/// Discount percentage carried by every issued code.
pub const DISCOUNT_PERCENT: u32 = 10;

/// [`DISCOUNT_PERCENT`] as a fraction, applied to order subtotals.
pub const DISCOUNT_RATE: f64 = 0.10;
