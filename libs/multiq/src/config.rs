use crate::{Error, seed::Seeder};

/// `delete_min` trials before giving up, unless configured otherwise.
pub const DEFAULT_DELETE_ATTEMPTS: usize = 10;

/// Construction-time tuning of a [`crate::MultiQueue`].
///
/// ```
/// use multiq::{Config, MultiQueue};
///
/// let config = Config::new(16).with_delete_attempts(32).with_insert_backoff_after(4);
/// let queue: MultiQueue<u64> = MultiQueue::with_config(config).unwrap();
/// assert_eq!(queue.shard_count(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) shards: usize,
    pub(crate) delete_attempts: usize,
    pub(crate) insert_backoff_after: usize,
    pub(crate) delete_backoff_after: usize,
    pub(crate) seeder: Seeder,
}

impl Config {
    /// Defaults for `shards` shards: both backoff thresholds equal the shard count.
    pub fn new(shards: usize) -> Self {
        Self {
            shards,
            delete_attempts: DEFAULT_DELETE_ATTEMPTS,
            insert_backoff_after: shards,
            delete_backoff_after: shards,
            seeder: Seeder::detect(),
        }
    }

    /// Trial budget of a single `delete_min` call.
    pub fn with_delete_attempts(mut self, attempts: usize) -> Self {
        self.delete_attempts = attempts;
        self
    }

    /// Failed lock attempts after which `insert` yields between further attempts.
    pub fn with_insert_backoff_after(mut self, attempts: usize) -> Self {
        self.insert_backoff_after = attempts;
        self
    }

    /// Trials (empty-looking ones included) after which a `delete_min` trial that lost a lock
    /// race, or found its shard drained, yields before the next one.
    pub fn with_delete_backoff_after(mut self, trials: usize) -> Self {
        self.delete_backoff_after = trials;
        self
    }

    pub fn with_seeder(mut self, seeder: Seeder) -> Self {
        self.seeder = seeder;
        self
    }

    pub fn shards(&self) -> usize {
        self.shards
    }

    pub fn delete_attempts(&self) -> usize {
        self.delete_attempts
    }

    pub fn insert_backoff_after(&self) -> usize {
        self.insert_backoff_after
    }

    pub fn delete_backoff_after(&self) -> usize {
        self.delete_backoff_after
    }

    pub fn seeder(&self) -> &Seeder {
        &self.seeder
    }

    /// Shard indices are produced by a 32-bit range reduction, so the count must fit in `u32`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.shards == 0 || u32::try_from(self.shards).is_err() {
            return Err(Error::InvalidShardCount(self.shards));
        }
        if self.delete_attempts == 0 {
            return Err(Error::ZeroDeleteAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_shard_count() {
        let config = Config::new(12);
        assert_eq!(config.shards(), 12);
        assert_eq!(config.delete_attempts(), DEFAULT_DELETE_ATTEMPTS);
        assert_eq!(config.insert_backoff_after(), 12);
        assert_eq!(config.delete_backoff_after(), 12);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn setters_override_defaults() {
        let config = Config::new(3)
            .with_delete_attempts(50)
            .with_insert_backoff_after(1)
            .with_delete_backoff_after(7);
        assert_eq!(config.delete_attempts(), 50);
        assert_eq!(config.insert_backoff_after(), 1);
        assert_eq!(config.delete_backoff_after(), 7);
    }

    #[test]
    fn rejects_out_of_range_shards() {
        assert_eq!(Config::new(0).validate(), Err(Error::InvalidShardCount(0)));
        assert_eq!(
            Config::new(u32::MAX as usize).validate(),
            Ok(()),
            "largest addressable shard count"
        );
        #[cfg(target_pointer_width = "64")]
        {
            let too_many = u32::MAX as usize + 1;
            assert_eq!(
                Config::new(too_many).validate(),
                Err(Error::InvalidShardCount(too_many))
            );
        }
    }

    #[test]
    fn rejects_zero_delete_attempts() {
        assert_eq!(
            Config::new(4).with_delete_attempts(0).validate(),
            Err(Error::ZeroDeleteAttempts)
        );
    }
}
