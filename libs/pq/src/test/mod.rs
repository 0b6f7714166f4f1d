//! Reusable test tooling shared by every [`crate::PriorityQueue`] implementation.
