mod heap;
mod item;
pub mod test;

// region:    --- Exports
pub use heap::MinHeap;
pub use item::{EMPTY_PRIORITY, Item, Priority, PriorityQueue};
// endregion: --- Exports
