#[derive(Debug, Clone, clap::Parser)]
pub struct Cfg {
    /// The priority queue implementation to test.
    pub implementation: Implementation,
    /// Number of Producers that will insert items into the queue.
    #[arg(short, long)]
    pub producer_num: usize,
    /// Number of items each producer will insert during the test.
    #[arg(short, long)]
    pub item_num: usize,
    /// Number of Consumers that will pop items from the queue.
    #[arg(short, long, default_value_t = 1)]
    pub consumer_num: usize,
    /// Number of shards of the relaxed queue.
    #[arg(short, long, default_value_t = 8)]
    pub shards: usize,
    /// Trial budget of a single `delete_min` on the relaxed queue.
    #[arg(long, default_value_t = multiq::DEFAULT_DELETE_ATTEMPTS)]
    pub delete_attempts: usize,
    /// Lower bound (inclusive) of the random priorities.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_priority: i32,
    /// Upper bound (exclusive) of the random priorities.
    #[arg(long, default_value_t = 1_000_000, allow_negative_numbers = true)]
    pub max_priority: i32,
    // Hard cap on the test's execution time
    #[arg(long, default_value_t = 10)]
    pub run_duration_seconds: u64,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, strum::EnumString, strum::Display, clap::ValueEnum)]
pub enum Implementation {
    #[strum(ascii_case_insensitive)]
    Multiq,
    #[strum(ascii_case_insensitive)]
    Locked,
}
