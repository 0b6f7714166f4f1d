use std::cmp::Ordering;

/// Priority key of an [`Item`]. Smaller values are served first.
pub type Priority = i32;

/// Reserved priority marking an empty shard or a "nothing found" result.
pub const EMPTY_PRIORITY: Priority = Priority::MAX;

/// A concurrent min-priority queue that can be shared between threads.
pub trait PriorityQueue<T>: Send + Sync + 'static {
    fn insert(&self, value: T, priority: Priority);
    /// Removes an item with a (possibly approximate) minimum priority.
    /// `None` means nothing was found; relaxed implementations may return it while items remain.
    fn delete_min(&self) -> Option<Item<T>>;
}

/// An opaque `value` paired with the priority it was inserted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    pub value: T,
    pub priority: Priority,
}

impl<T> Item<T> {
    pub fn new(value: T, priority: Priority) -> Self {
        Self { value, priority }
    }

    /// Splits the item into its `(value, priority)` pair.
    pub fn into_parts(self) -> (T, Priority) {
        (self.value, self.priority)
    }

    /// Items are ordered by priority only, the payload is never inspected.
    pub(crate) fn cmp_priority(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::Item;
    use std::cmp::Ordering;

    /// Lower priority value -> served first
    #[test]
    fn cmp_diff_priority() {
        let low = Item::new("low", 10);
        let high = Item::new("high", 20);

        assert_eq!(low.cmp_priority(&high), Ordering::Less);
        assert_eq!(high.cmp_priority(&low), Ordering::Greater);
    }

    /// Payloads do not take part in the comparison.
    #[test]
    fn cmp_ignores_value() {
        let a = Item::new("a", 7);
        let b = Item::new("b", 7);

        assert_eq!(a.cmp_priority(&b), Ordering::Equal);
    }

    #[test]
    fn into_parts() {
        let (value, priority) = Item::new(vec![1u8, 2], -3).into_parts();
        assert_eq!(value, vec![1, 2]);
        assert_eq!(priority, -3);
    }
}
