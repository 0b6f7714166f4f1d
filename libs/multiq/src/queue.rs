use std::fmt;
use std::thread;

use crossbeam::utils::CachePadded;
use pq::{EMPTY_PRIORITY, Item, Priority, PriorityQueue};

use crate::{Config, Error, rng::Selector, seed::SeedSource, shard::Shard};

/// Relaxed concurrent min-priority queue over a fixed set of independently locked shards.
///
/// Cross-shard order is not maintained: `delete_min` returns a small, not necessarily the
/// smallest, priority. Priority [`EMPTY_PRIORITY`] doubles as the empty-shard marker, so items
/// inserted with it are only reachable once their shard holds nothing smaller, or through
/// [`MultiQueue::into_sorted_vec`].
pub struct MultiQueue<T> {
    shards: Box<[CachePadded<Shard<T>>]>,
    config: Config,
}

impl<T> MultiQueue<T> {
    /// Queue with `shards` shards and default tuning.
    ///
    /// # Error
    /// Returns [`Error::InvalidShardCount`] when `shards` is zero or exceeds `u32::MAX`.
    pub fn new(shards: usize) -> Result<Self, Error> {
        Self::with_config(Config::new(shards))
    }

    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let shards = (0..config.shards)
            .map(|_| CachePadded::new(Shard::new()))
            .collect();
        tracing::debug!(
            shards = config.shards,
            delete_attempts = config.delete_attempts,
            insert_backoff_after = config.insert_backoff_after,
            delete_backoff_after = config.delete_backoff_after,
            seeder = config.seeder.name(),
            "multiqueue constructed"
        );
        Ok(Self { shards, config })
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pushes `value` into a randomly chosen unlocked shard.
    ///
    /// Retries until a shard lock is won; after `insert_backoff_after` failures every further
    /// failure yields the thread first.
    pub fn insert(&self, value: T, priority: Priority) {
        let mut selector = self.selector();
        let mut failed = 0;
        loop {
            let shard = &self.shards[selector.next_index()];
            if let Some(mut guard) = shard.try_lock() {
                guard.push(Item::new(value, priority));
                return;
            }
            failed += 1;
            if failed >= self.config.insert_backoff_after {
                tracing::trace!(failed, "insert backing off");
                thread::yield_now();
            }
        }
    }

    /// Pops the smaller root of two randomly sampled shards.
    ///
    /// `None` means no item was found within `delete_attempts` trials. This happens on an empty
    /// queue but may also happen under contention or bad luck while items remain.
    pub fn delete_min(&self) -> Option<Item<T>> {
        let mut selector = self.selector();
        for trial in 0..self.config.delete_attempts {
            let mut i = selector.next_index();
            let mut j = selector.next_index();
            let (mut min_i, min_j) = (self.shards[i].cached_min(), self.shards[j].cached_min());
            // On a tie the first draw is kept.
            if min_i > min_j {
                std::mem::swap(&mut i, &mut j);
                min_i = min_j;
            }
            if min_i == EMPTY_PRIORITY {
                continue;
            }

            // The cached minimum was only a hint, the shard may have been drained since.
            if let Some(mut guard) = self.shards[i].try_lock() {
                if let Some(item) = guard.pop() {
                    return Some(item);
                }
            }

            if self.backs_off_after(trial) {
                tracing::trace!(trial, "delete_min backing off");
                thread::yield_now();
            }
        }
        None
    }

    /// Takes every remaining item, in ascending priority. Ownership makes this exact.
    pub fn into_sorted_vec(self) -> Vec<Item<T>> {
        let mut items: Vec<Item<T>> = self
            .shards
            .into_vec()
            .into_iter()
            .flat_map(|shard| shard.into_inner().into_heap().into_sorted_vec())
            .collect();
        items.sort_by_key(|item| item.priority);
        items
    }

    /// Trials are counted from 0, so with threshold `n` the first yield follows trial `n + 1`.
    fn backs_off_after(&self, trial: usize) -> bool {
        trial > self.config.delete_backoff_after
    }

    fn selector(&self) -> Selector {
        Selector::new(self.config.seeder.next_seed(), self.shards.len())
    }
}

impl<T: Send + 'static> PriorityQueue<T> for MultiQueue<T> {
    fn insert(&self, value: T, priority: Priority) {
        MultiQueue::insert(self, value, priority)
    }

    fn delete_min(&self) -> Option<Item<T>> {
        MultiQueue::delete_min(self)
    }
}

impl<T> fmt::Debug for MultiQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached_mins: Vec<Priority> = self.shards.iter().map(|shard| shard.cached_min()).collect();
        f.debug_struct("MultiQueue")
            .field("cached_mins", &cached_mins)
            .field("config", &self.config)
            .finish()
    }
}
