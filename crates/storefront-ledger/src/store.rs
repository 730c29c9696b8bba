//! # The Store Aggregate
//!
//! Sole owner of all mutable business state: carts, the order log, and the
//! discount-code log.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Store Operations                                    │
//! │                                                                         │
//! │  Request Action            Store Operation          State Change        │
//! │  ──────────────            ───────────────          ────────────        │
//! │                                                                         │
//! │  Add item ───────────────► add_item() ────────────► cart line +qty     │
//! │                                                                         │
//! │  View cart ──────────────► get_cart() ────────────► (read only)        │
//! │                                                                         │
//! │  Remove item ────────────► remove_item() ─────────► cart line gone     │
//! │                                                                         │
//! │  Clear cart ─────────────► clear_cart() ──────────► cart entry gone    │
//! │                                                                         │
//! │  Checkout ───────────────► create_order() ────────► order appended,    │
//! │                                                      code maybe minted, │
//! │                                                      cart entry gone    │
//! │                                                                         │
//! │  Admin: new code ────────► generate_discount_code() code appended      │
//! │                                                                         │
//! │  Admin: statistics ──────► statistics() ──────────► (read only)        │
//! │                                                                         │
//! │  Every mutation above ends with one full-state snapshot write.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Cadence Rule
//!
//! Both halves of the discount program run off `order_count % n`, but they
//! sample it at different moments and that asymmetry is load-bearing:
//!
//! - **Redemption** checks the count *before* the order being placed is
//!   counted. The very first order (count 0) can redeem, as can the order
//!   placed right after every nth completion.
//! - **Issuance** checks the count *after* incrementing. The nth, 2nth, ...
//!   completed orders each mint one fresh code.
//!
//! ## Durability Contract
//!
//! Persistence is best-effort by design: the in-memory mutation is the
//! source of truth, and a failed snapshot write is logged and swallowed.
//! The caller still gets a success, and the next successful mutation
//! rewrites the full snapshot anyway. The known risk: if the process dies
//! while writes keep failing, state since the last good snapshot is lost.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use storefront_core::{
    validation, Cart, CartItem, CoreError, CoreResult, DiscountCode, Order, OrderItem, Statistics,
    DISCOUNT_RATE,
};

use crate::snapshot::{FileSnapshotWriter, Snapshot, SnapshotWriter};
use crate::{DEFAULT_CADENCE, DEFAULT_SNAPSHOT_PATH};

// =============================================================================
// Store Config
// =============================================================================

/// Configuration for opening a [`Store`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the JSON snapshot file.
    pub snapshot_path: PathBuf,

    /// Discount cadence: every nth completed order issues a code.
    pub cadence: u64,
}

impl StoreConfig {
    /// Creates a config for the given snapshot path with the default
    /// cadence of 5.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            snapshot_path: snapshot_path.into(),
            cadence: DEFAULT_CADENCE,
        }
    }

    /// Overrides the discount cadence.
    ///
    /// A cadence of 0 is lifted to 1 - the cadence checks are modulo
    /// arithmetic and a zero divisor has no meaning here.
    pub fn with_cadence(mut self, cadence: u64) -> Self {
        self.cadence = cadence.max(1);
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_SNAPSHOT_PATH)
    }
}

// =============================================================================
// Store
// =============================================================================

/// The in-memory ledger of carts, orders, and discount codes.
///
/// ## Ownership
/// One Store instance owns all business state for the process. Construct it
/// once at startup with [`Store::open`] and hand it to the request layer
/// (see [`StoreState`](crate::StoreState) for the threaded case).
///
/// ## Atomicity
/// Every operation is all-or-nothing from the caller's perspective:
/// business-rule failures are detected before any field is touched, so an
/// `Err` return means the Store is exactly as it was.
pub struct Store {
    /// Discount cadence (n). Every nth completed order issues a code.
    n: u64,

    /// Live carts, keyed by user ID.
    carts: HashMap<String, Cart>,

    /// Append-only order log.
    orders: Vec<Order>,

    /// Append-only discount code log.
    discount_codes: Vec<DiscountCode>,

    /// Completed-order counter. Only ever increases.
    order_count: u64,

    /// Persistence seam. The Store never touches storage directly.
    writer: Box<dyn SnapshotWriter>,
}

impl Store {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Opens a file-backed store.
    ///
    /// Never fails: a missing snapshot file means a fresh, empty store, and
    /// an unreadable one is logged and discarded. A snapshot's recorded
    /// cadence takes precedence over `config.cadence`, so a restarted
    /// process keeps the cadence its order history was built with.
    pub fn open(config: StoreConfig) -> Self {
        Store::from_writer(
            Box::new(FileSnapshotWriter::new(config.snapshot_path)),
            config.cadence,
        )
    }

    /// Opens a store over an arbitrary snapshot writer.
    ///
    /// The load policy is identical to [`Store::open`]; only the storage
    /// backend differs.
    pub fn from_writer(writer: Box<dyn SnapshotWriter>, cadence: u64) -> Self {
        let mut store = Store {
            n: cadence.max(1),
            carts: HashMap::new(),
            orders: Vec::new(),
            discount_codes: Vec::new(),
            order_count: 0,
            writer,
        };
        store.restore();
        store
    }

    /// Rebuilds in-memory state from the stored snapshot, if any.
    fn restore(&mut self) {
        match self.writer.read() {
            Ok(Some(snapshot)) => {
                self.n = snapshot.n.max(1);
                self.order_count = snapshot.order_count;
                self.carts = snapshot.carts;
                self.orders = snapshot.orders;
                self.discount_codes = snapshot.discount_codes;
                debug!(
                    orders = self.orders.len(),
                    codes = self.discount_codes.len(),
                    carts = self.carts.len(),
                    "Snapshot restored"
                );
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Could not load snapshot, starting with empty state");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The discount cadence this store runs on.
    pub fn cadence(&self) -> u64 {
        self.n
    }

    /// Number of completed orders.
    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    /// A full-state snapshot of the store as it stands right now.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            n: self.n,
            order_count: self.order_count,
            carts: self.carts.clone(),
            orders: self.orders.clone(),
            discount_codes: self.discount_codes.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Cart Operations
    // -------------------------------------------------------------------------

    /// Returns the user's cart, creating an empty one if none exists.
    ///
    /// Never fails. Persists only when a cart was actually created.
    pub fn get_or_create_cart(&mut self, user_id: &str) -> Cart {
        let created = !self.carts.contains_key(user_id);
        let cart = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(user_id))
            .clone();
        if created {
            self.persist();
        }
        cart
    }

    /// Adds an item to the user's cart, creating the cart if needed.
    ///
    /// ## Behavior
    /// - Same `item_id` already in the cart: quantity accumulates, the
    ///   stored price is untouched
    /// - New `item_id`: appended, preserving insertion order
    ///
    /// ## Errors
    /// `ValidationFailed` (via [`CoreError::Validation`]) when a field is
    /// out of bounds; the cart is untouched in that case.
    pub fn add_item(
        &mut self,
        user_id: &str,
        item_id: &str,
        name: &str,
        price: f64,
        quantity: i64,
    ) -> CoreResult<Cart> {
        validation::validate_cart_item(item_id, name, price, quantity)?;

        let cart = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(user_id));
        cart.add_item(CartItem {
            item_id: item_id.to_string(),
            name: name.to_string(),
            price,
            quantity,
        });
        let updated = cart.clone();

        debug!(user_id, item_id, quantity, "Item added to cart");
        self.persist();

        Ok(updated)
    }

    /// Removes an item from the user's cart.
    ///
    /// ## Errors
    /// [`CoreError::CartNotFound`] when the user has no cart at all.
    /// Removing an `item_id` that is not in an existing cart is a no-op
    /// that still returns the (unchanged) cart.
    pub fn remove_item(&mut self, user_id: &str, item_id: &str) -> CoreResult<Cart> {
        let cart = self
            .carts
            .get_mut(user_id)
            .ok_or_else(|| CoreError::CartNotFound {
                user_id: user_id.to_string(),
            })?;

        cart.remove_item(item_id);
        let updated = cart.clone();

        debug!(user_id, item_id, "Item removed from cart");
        self.persist();

        Ok(updated)
    }

    /// Returns the user's cart, or an empty-cart view if none exists.
    ///
    /// Read-only: does not create a cart and does not persist.
    pub fn get_cart(&self, user_id: &str) -> Cart {
        self.carts
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| Cart::new(user_id))
    }

    /// Deletes the user's cart entirely (not just its items).
    ///
    /// Idempotent: clearing an absent cart is a no-op, and only an actual
    /// deletion persists.
    pub fn clear_cart(&mut self, user_id: &str) {
        if self.carts.remove(user_id).is_some() {
            debug!(user_id, "Cart cleared");
            self.persist();
        }
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Creates an order from the user's cart, optionally redeeming a
    /// discount code.
    ///
    /// ## Sequence
    /// 1. Reject if the cart is missing or empty
    /// 2. Freeze cart lines into order items; compute the subtotal
    /// 3. Resolve the discount code, if any (see below)
    /// 4. Append the order, bump `order_count`
    /// 5. Mint a fresh code if the *new* count lands on the cadence
    /// 6. Delete the cart, persist once, return the order
    ///
    /// ## Discount resolution
    /// The code must name an unused entry in the code log
    /// ([`CoreError::InvalidDiscountCode`] otherwise), and the
    /// pre-increment `order_count` must sit on a multiple of the cadence
    /// ([`CoreError::DiscountNotEligibleYet`] otherwise). On success the
    /// code is marked used and 10% of the subtotal comes off the total.
    ///
    /// All three failure paths fire before any state is touched: a failed
    /// checkout leaves the cart, the code log, and the order log exactly
    /// as they were.
    pub fn create_order(&mut self, user_id: &str, discount_code: Option<&str>) -> CoreResult<Order> {
        let (subtotal, items) = match self.carts.get(user_id) {
            Some(cart) if !cart.is_empty() => (
                cart.subtotal(),
                cart.items.iter().map(OrderItem::from).collect::<Vec<_>>(),
            ),
            _ => {
                return Err(CoreError::EmptyCart {
                    user_id: user_id.to_string(),
                })
            }
        };

        let now = Utc::now();

        let mut discount_amount = 0.0;
        let mut applied_code = None;
        if let Some(code) = discount_code {
            let idx = self
                .discount_codes
                .iter()
                .position(|dc| dc.code == code && dc.is_unused())
                .ok_or_else(|| CoreError::InvalidDiscountCode {
                    code: code.to_string(),
                })?;

            // Redemption gates on the pre-increment count; the issuance
            // check further down runs on the post-increment count.
            if self.order_count % self.n != 0 {
                return Err(CoreError::DiscountNotEligibleYet { cadence: self.n });
            }

            self.discount_codes[idx].redeem(now);
            discount_amount = subtotal * DISCOUNT_RATE;
            applied_code = Some(code.to_string());
        }

        let order = Order {
            order_id: format!("ORD-{:06}", self.orders.len() + 1),
            user_id: user_id.to_string(),
            items,
            subtotal,
            discount_code: applied_code,
            discount_amount,
            total: subtotal - discount_amount,
            created_at: now,
        };

        self.orders.push(order.clone());
        self.order_count += 1;

        // Every nth completed order mints the next code.
        if self.order_count % self.n == 0 {
            self.mint_discount_code(now);
        }

        self.carts.remove(user_id);
        self.persist();

        info!(
            order_id = %order.order_id,
            user_id,
            total = order.total,
            discount = order.discount_amount,
            "Order created"
        );

        Ok(order)
    }

    // -------------------------------------------------------------------------
    // Discount Codes
    // -------------------------------------------------------------------------

    /// Looks up an unused code matching `code`.
    ///
    /// Read-only: redemption happens inside [`create_order`](Self::create_order),
    /// never here.
    pub fn validate_discount_code(&self, code: &str) -> Option<DiscountCode> {
        self.discount_codes
            .iter()
            .find(|dc| dc.code == code && dc.is_unused())
            .cloned()
    }

    /// Issues the next sequential discount code.
    ///
    /// The administrative entry point; auto-issuance at the cadence
    /// boundary goes through the same minting path internally.
    pub fn generate_discount_code(&mut self) -> DiscountCode {
        let code = self.mint_discount_code(Utc::now());
        self.persist();
        code
    }

    /// Appends the next `SAVE10-XXXX` code to the log. No persistence;
    /// callers own the snapshot write.
    fn mint_discount_code(&mut self, at: DateTime<Utc>) -> DiscountCode {
        let code = DiscountCode::issue(
            format!("SAVE10-{:04}", self.discount_codes.len() + 1),
            at,
        );
        self.discount_codes.push(code.clone());
        info!(code = %code.code, "Discount code issued");
        code
    }

    // -------------------------------------------------------------------------
    // Statistics
    // -------------------------------------------------------------------------

    /// Aggregates the order and code logs into the admin statistics view.
    ///
    /// Pure read: nothing is mutated and nothing is persisted.
    pub fn statistics(&self) -> Statistics {
        let total_purchase_amount: f64 = self.orders.iter().map(|o| o.total).sum();
        let total_discount_amount: f64 = self.orders.iter().map(|o| o.discount_amount).sum();

        Statistics {
            total_items_purchased: self.orders.iter().map(Order::total_quantity).sum(),
            total_purchase_amount: round_to_cents(total_purchase_amount),
            total_discount_amount: round_to_cents(total_discount_amount),
            discount_codes: self.discount_codes.clone(),
            total_orders: self.orders.len(),
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Writes the full-state snapshot, swallowing failures.
    ///
    /// In-memory state is already updated when this runs; on failure the
    /// disk is behind memory until the next successful write.
    fn persist(&self) {
        if let Err(err) = self.writer.write(&self.snapshot()) {
            error!(error = %err, "Snapshot write failed; in-memory state is ahead of disk");
        }
    }
}

/// Rounds a monetary aggregate to 2 decimal places.
fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
