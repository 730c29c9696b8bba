//! # storefront-ledger: The Stateful Store for Storefront
//!
//! This crate provides the [`Store`] aggregate - the sole owner of carts,
//! orders, and discount codes - and its snapshot persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Data Flow                               │
//! │                                                                         │
//! │  Request handler (add item / checkout / statistics)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-ledger (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  StoreState   │    │     Store     │    │   Snapshot   │  │   │
//! │  │   │  (state.rs)   │    │  (store.rs)   │    │ (snapshot.rs)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Arc<Mutex<    │───►│ carts         │───►│ SnapshotWriter│  │   │
//! │  │   │   Store>>     │    │ order log     │    │ trait + file │  │   │
//! │  │   │               │    │ code log      │    │ implementation│  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Snapshot file (JSON)                          │   │
//! │  │   data/store.json - rewritten wholesale on every mutation       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The Store aggregate and its operation surface
//! - [`snapshot`] - Snapshot format, writer trait, file/memory backends
//! - [`state`] - Mutex-guarded shared handle for threaded hosts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_ledger::{Store, StoreConfig};
//!
//! // Open (or create) the store; a missing or unreadable snapshot file
//! // simply means an empty store - opening never fails.
//! let mut store = Store::open(StoreConfig::new("data/store.json"));
//!
//! store.add_item("user1", "item1", "Wireless Mouse", 29.99, 1)?;
//! let order = store.create_order("user1", None)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod snapshot;
pub mod state;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use snapshot::{
    FileSnapshotWriter, MemorySnapshotWriter, Snapshot, SnapshotError, SnapshotResult,
    SnapshotWriter,
};
pub use state::StoreState;
pub use store::{Store, StoreConfig};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default discount cadence: every 5th completed order issues a code.
pub const DEFAULT_CADENCE: u64 = 5;

/// Default snapshot file path, relative to the process working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/store.json";
