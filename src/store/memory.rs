//! In-memory item store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::Item;
use crate::observability::metrics;
use crate::store::{addressable_index, ItemStore};

/// An item plus the sequence number it was stored under.
///
/// `seq` is monotonic and only used for logging; clients address items by
/// position.
#[derive(Debug, Clone)]
struct StoredItem {
    seq: u64,
    item: Item,
}

/// Process-wide item list guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<Vec<StoredItem>>,
    next_seq: AtomicU64,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `items`, in order.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        for item in items {
            store.create(item);
        }
        store
    }

    // Every write is a single push or remove, so a poisoned lock still
    // guards a consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<StoredItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<StoredItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Number of items `list(limit)` yields from a store of `len` items.
fn list_len(limit: i64, len: usize) -> usize {
    match usize::try_from(limit) {
        Ok(limit) => limit.min(len),
        Err(_) => len.saturating_sub(usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX)),
    }
}

impl ItemStore for MemoryItemStore {
    fn create(&self, item: Item) -> Item {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut items = self.write();
        items.push(StoredItem { seq, item: item.clone() });
        metrics::record_items_stored(items.len());
        tracing::debug!(seq, index = items.len() - 1, "Item created");
        item
    }

    fn list(&self, limit: i64) -> Vec<Item> {
        let items = self.read();
        let take = list_len(limit, items.len());
        items.iter().take(take).map(|stored| stored.item.clone()).collect()
    }

    fn get(&self, item_id: i64) -> Option<Item> {
        let items = self.read();
        let index = addressable_index(item_id, items.len())?;
        Some(items[index].item.clone())
    }

    fn update(&self, item_id: i64, _item: Item) -> Option<Item> {
        let items = self.read();
        let index = addressable_index(item_id, items.len())?;
        let stored = &items[index];
        tracing::debug!(seq = stored.seq, index, "Item update requested; stored item kept");
        Some(stored.item.clone())
    }

    fn delete(&self, item_id: i64) -> Option<Item> {
        let mut items = self.write();
        let index = addressable_index(item_id, items.len())?;
        let removed = items.remove(index);
        metrics::record_items_stored(items.len());
        tracing::debug!(seq = removed.seq, index, "Item deleted");
        Some(removed.item)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store_of(texts: &[&str]) -> MemoryItemStore {
        MemoryItemStore::with_items(texts.iter().map(|t| Item::new(*t)))
    }

    #[test]
    fn test_create_appends_and_echoes() {
        let store = MemoryItemStore::new();
        let echoed = store.create(Item::new("milk"));
        assert_eq!(echoed, Item::new("milk"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list(1), vec![Item::new("milk")]);
    }

    #[test]
    fn test_list_respects_limit_and_order() {
        let store = store_of(&["a", "b", "c"]);
        assert_eq!(store.list(2), vec![Item::new("a"), Item::new("b")]);
        assert_eq!(store.list(10).len(), 3);
        assert!(store.list(0).is_empty());
    }

    #[test]
    fn test_negative_limit_counts_from_end() {
        let store = store_of(&["a", "b", "c"]);
        assert_eq!(store.list(-1), vec![Item::new("a"), Item::new("b")]);
        assert_eq!(store.list(-2), vec![Item::new("a")]);
        assert!(store.list(-3).is_empty());
        assert!(store.list(-5).is_empty());
        assert!(store.list(i64::MIN).is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let store = Arc::new(store_of(&["a", "b"]));
        let s = store.clone();
        let result = std::thread::spawn(move || {
            let _guard = s.items.write().unwrap();
            panic!("writer failed");
        })
        .join();
        assert!(result.is_err());
        assert!(store.items.is_poisoned());

        assert_eq!(store.len(), 2);
        store.create(Item::new("c"));
        assert_eq!(store.get(2), Some(Item::new("c")));
    }

    #[test]
    fn test_get_excludes_index_zero() {
        let store = store_of(&["a", "b", "c"]);
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(1), Some(Item::new("b")));
        assert_eq!(store.get(2), Some(Item::new("c")));
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn test_update_returns_stored_item_unchanged() {
        let store = store_of(&["a", "b"]);
        let replacement = Item { text: Some("z".into()), is_done: true };
        assert_eq!(store.update(1, replacement), Some(Item::new("b")));
        assert_eq!(store.get(1), Some(Item::new("b")));
        assert_eq!(store.update(0, Item::default()), None);
    }

    #[test]
    fn test_delete_shifts_following_items() {
        let store = store_of(&["a", "b", "c", "d"]);
        assert_eq!(store.delete(1), Some(Item::new("b")));
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1), Some(Item::new("c")));
        assert_eq!(store.get(2), Some(Item::new("d")));
        assert_eq!(store.delete(0), None);
        assert_eq!(store.delete(3), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_concurrent_creates_are_not_lost() {
        let store = Arc::new(MemoryItemStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.create(Item::new(format!("{t}-{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
