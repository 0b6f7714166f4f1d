use std::cmp::Ordering;

use crate::{Item, Priority};

/// Array-backed binary min-heap of [`Item`]s keyed by priority.
///
/// The root (index 0) always holds an item with the smallest priority. Children of the node at
/// `i` live at `2i + 1` and `2i + 2`.
#[derive(Debug)]
pub struct MinHeap<T> {
    items: Vec<Item<T>>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// O(log n) insertion.
    pub fn push(&mut self, item: Item<T>) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    pub fn peek(&self) -> Option<&Item<T>> {
        self.items.first()
    }

    /// Priority of the root, if any.
    pub fn min_priority(&self) -> Option<Priority> {
        self.peek().map(|item| item.priority)
    }

    /// Removes the root in O(log n).
    pub fn pop(&mut self) -> Option<Item<T>> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(root)
    }

    /// Consumes the heap and returns its items in ascending priority.
    pub fn into_sorted_vec(mut self) -> Vec<Item<T>> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Some(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.items[a].cmp_priority(&self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.items.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smaller, pos) {
                break;
            }
            self.items.swap(pos, smaller);
            pos = smaller;
        }
    }
}
