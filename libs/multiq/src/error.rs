use thiserror::Error;

/// Construction errors. A built queue has no failing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid shard count {0}, must be between 1 and {max}", max = u32::MAX)]
    InvalidShardCount(usize),
    #[error("delete_min attempt budget must be greater than 0")]
    ZeroDeleteAttempts,
}
