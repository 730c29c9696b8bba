//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Cart       │   │      Order      │   │  DiscountCode   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │   │  order_id       │   │  code           │       │
//! │  │  items (live)   │──►│  items (frozen) │   │  used/used_at   │       │
//! │  │                 │   │  totals         │   │  (one-way flip) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  CartItem is the live, mutable line; OrderItem is its frozen copy       │
//! │  taken at checkout. Orders and codes are append-only once created.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here derives `Serialize`/`Deserialize` because all of them
//! appear verbatim in the snapshot file, and `PartialEq` so a reloaded
//! snapshot can be compared against the state that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DISCOUNT_PERCENT;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in a shopping cart.
///
/// Identity within a cart is `item_id`: adding the same `item_id` again
/// accumulates quantity on the existing line instead of appending a
/// duplicate. The price is whatever the first add supplied; later adds of
/// the same item do not update it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Item identifier (1-100 characters).
    pub item_id: String,

    /// Display name (1-200 characters).
    pub name: String,

    /// Price per unit.
    pub price: f64,

    /// Quantity in the cart.
    pub quantity: i64,
}

impl CartItem {
    /// The line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A user's shopping cart.
///
/// ## Invariants
/// - Items are unique by `item_id` (adding the same item accumulates quantity)
/// - Items keep their insertion order
/// - The Store owns every cart; carts are created lazily on first access and
///   deleted wholesale on clear or successful checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// The user this cart belongs to.
    pub user_id: String,

    /// Items in the cart.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Cart {
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }

    /// Adds an item to the cart, merging with an existing line if the
    /// `item_id` is already present.
    ///
    /// ## Behavior
    /// - Same `item_id` in cart: quantity accumulates, price is untouched
    /// - New `item_id`: appended at the end, preserving insertion order
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, CartItem};
    ///
    /// let mut cart = Cart::new("user1");
    /// cart.add_item(CartItem {
    ///     item_id: "item1".into(),
    ///     name: "Widget".into(),
    ///     price: 10.0,
    ///     quantity: 2,
    /// });
    /// cart.add_item(CartItem {
    ///     item_id: "item1".into(),
    ///     name: "Widget".into(),
    ///     price: 10.0,
    ///     quantity: 3,
    /// });
    ///
    /// assert_eq!(cart.item_count(), 1);
    /// assert_eq!(cart.total_quantity(), 5);
    /// ```
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.item_id == item.item_id) {
            existing.quantity += item.quantity;
            return;
        }
        self.items.push(item);
    }

    /// Removes an item from the cart by item ID.
    ///
    /// Removing an `item_id` that is not in the cart is a no-op: the cart
    /// is returned to the caller unchanged either way, so there is nothing
    /// to report.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|i| i.item_id != item_id);
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart subtotal.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Checks if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item on an order.
///
/// Uses the snapshot pattern: the cart line is copied field-by-field at
/// checkout, so the order log keeps a stable, fixed-shape record no matter
/// how the live cart schema evolves later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item identifier at time of checkout (frozen).
    pub item_id: String,

    /// Display name at time of checkout (frozen).
    pub name: String,

    /// Unit price at time of checkout (frozen).
    pub price: f64,

    /// Quantity purchased.
    pub quantity: i64,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        OrderItem {
            item_id: item.item_id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed order.
///
/// Immutable once created: orders are appended to the Store's order log and
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Zero-padded sequence number: `ORD-000001`, `ORD-000002`, ...
    pub order_id: String,

    /// The user who checked out.
    pub user_id: String,

    /// Frozen copies of the cart lines at checkout time.
    pub items: Vec<OrderItem>,

    /// Sum of line totals before any discount.
    pub subtotal: f64,

    /// The discount code redeemed on this order, if any.
    pub discount_code: Option<String>,

    /// Amount subtracted from the subtotal (0 when no code was applied).
    pub discount_amount: f64,

    /// `subtotal - discount_amount`.
    pub total: f64,

    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total item units purchased on this order.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A single-use 10% discount code.
///
/// ## State Machine
/// ```text
/// Issued (used=false) ──redeem──► Redeemed (used=true, used_at=Some)
/// ```
/// Redemption is terminal; there is no path back. `used_at` is set if and
/// only if `used` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCode {
    /// Zero-padded sequence code: `SAVE10-0001`, `SAVE10-0002`, ...
    pub code: String,

    /// Discount percentage (fixed at 10).
    pub discount_percent: u32,

    /// When the code was issued.
    pub created_at: DateTime<Utc>,

    /// Whether the code has been redeemed.
    pub used: bool,

    /// When the code was redeemed, if it has been.
    pub used_at: Option<DateTime<Utc>>,
}

impl DiscountCode {
    /// Issues a fresh unused code.
    pub fn issue(code: impl Into<String>, at: DateTime<Utc>) -> Self {
        DiscountCode {
            code: code.into(),
            discount_percent: DISCOUNT_PERCENT,
            created_at: at,
            used: false,
            used_at: None,
        }
    }

    /// Marks the code redeemed. Terminal: callers must check
    /// [`is_unused`](Self::is_unused) first.
    pub fn redeem(&mut self, at: DateTime<Utc>) {
        self.used = true;
        self.used_at = Some(at);
    }

    /// Whether the code is still available for redemption.
    #[inline]
    pub fn is_unused(&self) -> bool {
        !self.used
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Aggregate view over the order and discount-code logs.
///
/// Produced on demand by the Store; purely derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Total item units across all orders.
    pub total_items_purchased: i64,

    /// Sum of order totals (after discounts), rounded to cents.
    pub total_purchase_amount: f64,

    /// Sum of discount amounts granted, rounded to cents.
    pub total_discount_amount: f64,

    /// Every code ever issued, with its usage status.
    pub discount_codes: Vec<DiscountCode>,

    /// Number of completed orders.
    pub total_orders: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_id: &str, price: f64, quantity: i64) -> CartItem {
        CartItem {
            item_id: item_id.to_string(),
            name: format!("Product {}", item_id),
            price,
            quantity,
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new("user1");
        cart.add_item(item("item1", 9.99, 2));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), 19.98);
    }

    #[test]
    fn test_cart_add_same_item_accumulates_quantity() {
        let mut cart = Cart::new("user1");
        cart.add_item(item("item1", 9.99, 2));
        cart.add_item(item("item1", 9.99, 3));

        assert_eq!(cart.item_count(), 1); // Still one unique line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_cart_merge_keeps_original_price() {
        let mut cart = Cart::new("user1");
        cart.add_item(item("item1", 10.0, 1));
        cart.add_item(item("item1", 99.0, 1)); // Price change is ignored

        assert_eq!(cart.items[0].price, 10.0);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let mut cart = Cart::new("user1");
        cart.add_item(item("b", 1.0, 1));
        cart.add_item(item("a", 1.0, 1));
        cart.add_item(item("b", 1.0, 1));

        let ids: Vec<&str> = cart.items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_cart_remove_item() {
        let mut cart = Cart::new("user1");
        cart.add_item(item("item1", 10.0, 2));
        cart.add_item(item("item2", 5.0, 1));

        cart.remove_item("item1");
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].item_id, "item2");
    }

    #[test]
    fn test_cart_remove_missing_item_is_noop() {
        let mut cart = Cart::new("user1");
        cart.add_item(item("item1", 10.0, 2));

        cart.remove_item("nope");
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_order_item_freezes_cart_line() {
        let line = item("item1", 10.0, 2);
        let frozen = OrderItem::from(&line);

        assert_eq!(frozen.item_id, "item1");
        assert_eq!(frozen.price, 10.0);
        assert_eq!(frozen.quantity, 2);
    }

    #[test]
    fn test_discount_code_redeem_is_terminal() {
        let issued_at = Utc::now();
        let mut code = DiscountCode::issue("SAVE10-0001", issued_at);

        assert!(code.is_unused());
        assert_eq!(code.discount_percent, DISCOUNT_PERCENT);
        assert_eq!(code.used_at, None);

        let redeemed_at = Utc::now();
        code.redeem(redeemed_at);

        assert!(!code.is_unused());
        assert_eq!(code.used_at, Some(redeemed_at));
    }

    #[test]
    fn test_order_total_quantity() {
        let order = Order {
            order_id: "ORD-000001".to_string(),
            user_id: "user1".to_string(),
            items: vec![
                OrderItem::from(&item("item1", 10.0, 2)),
                OrderItem::from(&item("item2", 20.0, 1)),
            ],
            subtotal: 40.0,
            discount_code: None,
            discount_amount: 0.0,
            total: 40.0,
            created_at: Utc::now(),
        };

        assert_eq!(order.total_quantity(), 3);
    }
}
