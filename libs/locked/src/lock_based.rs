use std::sync::{Mutex, MutexGuard, PoisonError};

use pq::{Item, MinHeap, Priority, PriorityQueue};

/// Strict priority queue: one [`MinHeap`] behind one [`Mutex`].
///
/// Every operation serializes on the same lock, which makes it exact and the point of comparison
/// for relaxed implementations.
#[derive(Debug)]
pub struct LockedQueue<T> {
    storage: Mutex<MinHeap<T>>,
}

impl<T> LockedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: Mutex::new(MinHeap::with_capacity(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.storage().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    /// A panic while holding the lock cannot leave the heap half-updated, so poisoning is ignored.
    fn storage(&self) -> MutexGuard<'_, MinHeap<T>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + 'static> PriorityQueue<T> for LockedQueue<T> {
    fn insert(&self, value: T, priority: Priority) {
        self.storage().push(Item::new(value, priority));
    }

    /// Always the exact minimum; `None` only when the queue is empty.
    fn delete_min(&self) -> Option<Item<T>> {
        self.storage().pop()
    }
}
