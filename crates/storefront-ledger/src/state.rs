//! # Shared Store Handle
//!
//! Wraps the [`Store`] for hosts that dispatch requests on parallel threads.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every request handler needs access to the same Store
//! 2. Only one operation may run against the Store at a time
//! 3. Read-modify-write sequences (checkout above all) must not interleave
//!
//! The lock is held for the whole closure a caller passes in - including
//! the synchronous snapshot write at the end of a mutation. That is the
//! concurrency model: operations are serialized, full stop.
//!
//! ## Why Not RwLock?
//! Almost every operation mutates (even add-to-cart rewrites the snapshot),
//! so shared read access would buy nothing and cost a subtler API.

use std::sync::{Arc, Mutex};

use crate::store::Store;

/// Cloneable handle to the process-wide [`Store`].
///
/// Construct one at process start and clone it into each request handler;
/// all clones share the same underlying Store.
///
/// ## Usage
/// ```rust
/// use storefront_ledger::{MemorySnapshotWriter, Store, StoreState};
///
/// let state = StoreState::new(Store::from_writer(
///     Box::new(MemorySnapshotWriter::new()),
///     5,
/// ));
///
/// let cart = state.with_store_mut(|store| {
///     store.add_item("user1", "item1", "Wireless Mouse", 29.99, 1)
/// }).unwrap();
/// assert_eq!(cart.item_count(), 1);
/// ```
#[derive(Clone)]
pub struct StoreState {
    store: Arc<Mutex<Store>>,
}

impl StoreState {
    /// Wraps a store for shared use.
    pub fn new(store: Store) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stats = state.with_store(|store| store.statistics());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.store.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with exclusive write access to the store.
    ///
    /// The lock covers the entire closure, so a multi-step operation like
    /// checkout runs without interleaving.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let order = state.with_store_mut(|store| store.create_order("user1", None))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}
