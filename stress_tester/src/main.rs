use std::sync::Arc;

use anyhow::{Context, bail};
use cfg::Cfg;
use clap::Parser;
use locked::LockedQueue;
use multiq::{Config, MultiQueue};
use pq::{
    PriorityQueue,
    test::stress::{StressTestConfig, Tag, run_stress_test},
};
use tracing_subscriber::EnvFilter;

pub mod cfg;

fn main() {
    let cfg = cfg::Cfg::parse();
    init_logging(cfg.verbose);
    tracing::info!("running configuration:\n{cfg:#?}");

    let res = match cfg.implementation {
        cfg::Implementation::Multiq => run_multiq(&cfg),
        cfg::Implementation::Locked => run_locked(&cfg),
    };
    if let Err(e) = res {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the `--verbose` flag.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_multiq(cfg: &Cfg) -> anyhow::Result<()> {
    let config = Config::new(cfg.shards).with_delete_attempts(cfg.delete_attempts);
    let queue = MultiQueue::with_config(config).context("invalid queue configuration")?;
    run(Arc::new(queue), cfg)
}

fn run_locked(cfg: &Cfg) -> anyhow::Result<()> {
    let capacity = cfg
        .item_num
        .checked_mul(cfg.producer_num)
        .ok_or_else(|| anyhow::anyhow!("Overflow while calculating queue capacity"))?;
    run(Arc::new(LockedQueue::new(capacity)), cfg)
}

fn run<Q: PriorityQueue<Tag>>(queue: Arc<Q>, cfg: &Cfg) -> anyhow::Result<()> {
    if cfg.min_priority >= cfg.max_priority {
        bail!(
            "empty priority range {}..{}",
            cfg.min_priority,
            cfg.max_priority
        );
    }
    if u32::try_from(cfg.item_num).is_err() {
        bail!("at most {} items per producer can be tagged", u32::MAX);
    }

    let config = StressTestConfig {
        num_producers: cfg.producer_num,
        num_items: cfg.item_num,
        num_consumers: cfg.consumer_num,
        priority_range: (cfg.min_priority, cfg.max_priority),
        run_duration_seconds: cfg.run_duration_seconds,
    };
    let results = run_stress_test(queue, config);
    results.print_summary();

    if !results.is_conserved() {
        bail!(
            "{} violated conservation: {} duplicates, {} fabricated, {} missing",
            cfg.implementation,
            results.duplicates,
            results.fabricated,
            results.missing()
        );
    }
    Ok(())
}
