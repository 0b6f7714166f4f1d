//! A relaxed concurrent priority queue (MultiQueue).
//!
//! Items are spread over a fixed number of shards, each one a binary min-heap behind its own
//! try-lock. `insert` pushes into a randomly chosen unlocked shard. `delete_min` samples two
//! shards, compares their cached minima without locking, and pops from the smaller one. The
//! returned item is close to, but not necessarily, the global minimum.
//!
//! ```
//! let queue = multiq::MultiQueue::new(4).unwrap();
//! queue.insert("job", 3);
//! // A single item always lands in some shard, so retrying eventually finds it.
//! let item = loop {
//!     if let Some(item) = queue.delete_min() {
//!         break item;
//!     }
//! };
//! assert_eq!(item.into_parts(), ("job", 3));
//! ```
mod config;
mod error;
mod lock;
mod queue;
pub mod rng;
pub mod seed;
mod shard;

// region:    --- Exports
pub use config::{Config, DEFAULT_DELETE_ATTEMPTS};
pub use error::Error;
pub use pq::{EMPTY_PRIORITY, Item, Priority};
pub use queue::MultiQueue;
pub use seed::{SeedSource, Seeder};
// endregion: --- Exports
