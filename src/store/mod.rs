//! Item storage subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Scoped<StoreSession> (opens a session, see dependencies::scoped)
//!     → ItemStore trait
//!     → memory.rs (RwLock<Vec<StoredItem>>)
//! ```
//!
//! # Design Decisions
//! - Items are addressed by position; `0 < item_id < len` is the only
//!   addressable range, so index 0 is never reachable through get/update/delete
//! - `update` answers with the stored item and leaves it untouched
//! - Each operation takes the lock once; index shifts after a delete are
//!   visible to later requests

pub mod memory;

pub use memory::MemoryItemStore;

use crate::models::Item;

/// Storage contract used by the item handlers.
pub trait ItemStore: Send + Sync {
    /// Append an item and return it.
    fn create(&self, item: Item) -> Item;

    /// Items up to `limit` in insertion order. A negative `limit` counts back
    /// from the end, so `-1` drops the last item.
    fn list(&self, limit: i64) -> Vec<Item>;

    /// Item at `item_id`, if addressable.
    fn get(&self, item_id: i64) -> Option<Item>;

    /// Looks up the item at `item_id` and returns it as stored.
    ///
    /// The payload is accepted for interface parity but is not applied.
    fn update(&self, item_id: i64, item: Item) -> Option<Item>;

    /// Remove and return the item at `item_id`.
    fn delete(&self, item_id: i64) -> Option<Item>;

    /// Number of stored items.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps an external id onto a vector index, honouring `0 < item_id < len`.
pub fn addressable_index(item_id: i64, len: usize) -> Option<usize> {
    if item_id <= 0 {
        return None;
    }
    usize::try_from(item_id).ok().filter(|&index| index < len)
}
