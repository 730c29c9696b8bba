//! # Snapshot Persistence
//!
//! The snapshot file format and the writers that produce it.
//!
//! ## Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Snapshot Replace                              │
//! │                                                                         │
//! │  serialize Store state                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write data/store.json.tmp   ← partial writes land HERE, never on      │
//! │       │                        the canonical name                       │
//! │       ▼                                                                 │
//! │  rename over data/store.json ← atomic on POSIX within one directory    │
//! │                                                                         │
//! │  A reader of the canonical path sees either the old complete snapshot  │
//! │  or the new complete snapshot, nothing in between.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Writer Seam
//! The Store talks to persistence only through [`SnapshotWriter`]. The file
//! backend is the production implementation; [`MemorySnapshotWriter`] backs
//! logic tests and is the existence proof that buffered or async persistence
//! can be swapped in later without touching a single Store call site.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{Cart, DiscountCode, Order};

// =============================================================================
// Snapshot Error
// =============================================================================

/// Snapshot read/write errors.
///
/// These never cross the Store's public API: the Store logs and swallows
/// write failures, and falls back to an empty state on load failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem operation failed (permissions, disk full, missing dir).
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Snapshot content could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

// =============================================================================
// Snapshot
// =============================================================================

/// A full serialization of Store state.
///
/// This struct *is* the on-disk format: field names and nesting match the
/// snapshot file one-to-one, with timestamps as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Discount cadence the state was built with.
    pub n: u64,

    /// Number of completed orders.
    pub order_count: u64,

    /// Live carts, keyed by user ID.
    pub carts: HashMap<String, Cart>,

    /// The append-only order log.
    pub orders: Vec<Order>,

    /// The append-only discount code log.
    pub discount_codes: Vec<DiscountCode>,
}

// =============================================================================
// Snapshot Writer Trait
// =============================================================================

/// Narrow persistence seam between the Store and its snapshot storage.
///
/// Implementations must make `write` all-or-nothing as observed through
/// `read`: a crashed or failed write may lose the new snapshot but must
/// never corrupt the previous one.
pub trait SnapshotWriter: Send {
    /// Persists a full snapshot, replacing whatever was stored before.
    fn write(&self, snapshot: &Snapshot) -> SnapshotResult<()>;

    /// Loads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has ever been written - a fresh
    /// install, not an error.
    fn read(&self) -> SnapshotResult<Option<Snapshot>>;
}

// =============================================================================
// File Snapshot Writer
// =============================================================================

/// Production snapshot writer: one pretty-printed JSON file, replaced
/// atomically via a temp-file sibling.
#[derive(Debug, Clone)]
pub struct FileSnapshotWriter {
    path: PathBuf,
}

impl FileSnapshotWriter {
    /// Creates a writer targeting the given snapshot path.
    ///
    /// The file and its parent directory do not need to exist yet; the
    /// directory is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotWriter { path: path.into() }
    }

    /// The canonical snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp path: `data/store.json` → `data/store.json.tmp`.
    ///
    /// Same directory as the target, so the final rename never crosses a
    /// filesystem boundary.
    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SnapshotWriter for FileSnapshotWriter {
    fn write(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Pretty-printed so the snapshot stays inspectable with a pager.
        let json = serde_json::to_vec_pretty(snapshot)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    fn read(&self) -> SnapshotResult<Option<Snapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

// =============================================================================
// Memory Snapshot Writer
// =============================================================================

/// In-memory snapshot writer.
///
/// Holds the latest snapshot in a mutex-guarded slot. Used by logic tests
/// that don't care about the filesystem, and by any host that wants a
/// throwaway store.
#[derive(Debug, Default)]
pub struct MemorySnapshotWriter {
    slot: Mutex<Option<Snapshot>>,
}

impl MemorySnapshotWriter {
    /// Creates an empty in-memory writer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotWriter for MemorySnapshotWriter {
    fn write(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let mut slot = self.slot.lock().expect("Snapshot slot mutex poisoned");
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn read(&self) -> SnapshotResult<Option<Snapshot>> {
        let slot = self.slot.lock().expect("Snapshot slot mutex poisoned");
        Ok(slot.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storefront_core::{CartItem, OrderItem};

    fn sample_snapshot() -> Snapshot {
        let mut carts = HashMap::new();
        let mut cart = Cart::new("user1");
        cart.add_item(CartItem {
            item_id: "item1".to_string(),
            name: "Wireless Mouse".to_string(),
            price: 29.99,
            quantity: 2,
        });
        carts.insert("user1".to_string(), cart);

        Snapshot {
            n: 5,
            order_count: 1,
            carts,
            orders: vec![Order {
                order_id: "ORD-000001".to_string(),
                user_id: "user2".to_string(),
                items: vec![OrderItem {
                    item_id: "item9".to_string(),
                    name: "Keyboard".to_string(),
                    price: 49.5,
                    quantity: 1,
                }],
                subtotal: 49.5,
                discount_code: None,
                discount_amount: 0.0,
                total: 49.5,
                created_at: Utc::now(),
            }],
            discount_codes: vec![DiscountCode::issue("SAVE10-0001", Utc::now())],
        }
    }

    #[test]
    fn test_file_writer_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileSnapshotWriter::new(dir.path().join("store.json"));

        let snapshot = sample_snapshot();
        writer.write(&snapshot).unwrap();

        let loaded = writer.read().unwrap();
        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileSnapshotWriter::new(dir.path().join("nope.json"));

        assert!(writer.read().unwrap().is_none());
    }

    #[test]
    fn test_read_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, b"{ not json").unwrap();

        let writer = FileSnapshotWriter::new(&path);
        assert!(matches!(writer.read(), Err(SnapshotError::Serde(_))));
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("store.json");

        let writer = FileSnapshotWriter::new(&path);
        writer.write(&sample_snapshot()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_leaves_no_tmp_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let writer = FileSnapshotWriter::new(&path);
        writer.write(&sample_snapshot()).unwrap();
        writer.write(&sample_snapshot()).unwrap();

        assert!(path.exists());
        assert!(!writer.tmp_path().exists());
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileSnapshotWriter::new(dir.path().join("store.json"));

        let mut snapshot = sample_snapshot();
        writer.write(&snapshot).unwrap();

        snapshot.order_count = 42;
        writer.write(&snapshot).unwrap();

        assert_eq!(writer.read().unwrap().unwrap().order_count, 42);
    }

    #[test]
    fn test_memory_writer_roundtrip() {
        let writer = MemorySnapshotWriter::new();
        assert!(writer.read().unwrap().is_none());

        let snapshot = sample_snapshot();
        writer.write(&snapshot).unwrap();
        assert_eq!(writer.read().unwrap(), Some(snapshot));
    }
}
