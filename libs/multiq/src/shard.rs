use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicI32, Ordering::Relaxed};

use pq::{EMPTY_PRIORITY, Item, MinHeap, Priority};

use crate::lock::TryLock;

/// One independent min-heap of the queue, together with its lock and cached minimum.
pub(crate) struct Shard<T> {
    lock: TryLock,
    /// Root priority of `heap`, or [`EMPTY_PRIORITY`]. Written only under `lock`.
    cached_min: AtomicI32,
    heap: UnsafeCell<MinHeap<T>>,
    /// Set while a guard is alive; tracked apart from `lock` so tests can catch overlapping
    /// critical sections.
    #[cfg(test)]
    mutating: std::sync::atomic::AtomicBool,
}

// The heap is only reachable through a `ShardGuard`, which exists only while `lock` is held.
unsafe impl<T: Send> Sync for Shard<T> {}

impl<T> Shard<T> {
    pub(crate) fn new() -> Self {
        Self {
            lock: TryLock::new(),
            cached_min: AtomicI32::new(EMPTY_PRIORITY),
            heap: UnsafeCell::new(MinHeap::new()),
            #[cfg(test)]
            mutating: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Lock-free snapshot of the root priority. Only a hint, may be stale by the time it is used.
    pub(crate) fn cached_min(&self) -> Priority {
        self.cached_min.load(Relaxed)
    }

    pub(crate) fn try_lock(&self) -> Option<ShardGuard<'_, T>> {
        if !self.lock.try_acquire() {
            return None;
        }
        #[cfg(test)]
        assert!(
            !self.mutating.swap(true, std::sync::atomic::Ordering::SeqCst),
            "two threads inside the same shard"
        );
        Some(ShardGuard { shard: self })
    }

    /// Exclusive access through ownership, no locking needed.
    pub(crate) fn into_heap(self) -> MinHeap<T> {
        self.heap.into_inner()
    }
}

/// Proof of holding a shard's lock. Every heap mutation republishes the cached minimum, and
/// dropping the guard releases the lock.
pub(crate) struct ShardGuard<'a, T> {
    shard: &'a Shard<T>,
}

impl<T> ShardGuard<'_, T> {
    pub(crate) fn push(&mut self, item: Item<T>) {
        let heap = self.heap_mut();
        heap.push(item);
        let min = heap.min_priority().unwrap_or(EMPTY_PRIORITY);
        self.publish_min(min);
    }

    /// Pops the root. `None` when another thread emptied the shard after it was sampled.
    pub(crate) fn pop(&mut self) -> Option<Item<T>> {
        let heap = self.heap_mut();
        let item = heap.pop()?;
        let min = heap.min_priority().unwrap_or(EMPTY_PRIORITY);
        self.publish_min(min);
        Some(item)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        unsafe { &*self.shard.heap.get() }.len()
    }

    fn heap_mut(&mut self) -> &mut MinHeap<T> {
        // Safety: the lock is held for the lifetime of the guard and `&mut self` keeps this the
        // only live reference.
        unsafe { &mut *self.shard.heap.get() }
    }

    fn publish_min(&self, min: Priority) {
        self.shard.cached_min.store(min, Relaxed);
    }
}

impl<T> Drop for ShardGuard<'_, T> {
    fn drop(&mut self) {
        #[cfg(test)]
        self.shard
            .mutating
            .store(false, std::sync::atomic::Ordering::SeqCst);
        self.shard.lock.release();
    }
}
