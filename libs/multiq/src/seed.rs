//! Sources of per-operation seeds for the shard selector.
//!
//! Seeds need not be cryptographically random. They only have to differ between concurrent
//! callers often enough that threads do not walk the same shard sequence in lockstep.

use std::fmt;
use std::sync::Arc;

/// Anything that hands out 64-bit seeds quickly.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u64;
}

/// Timestamp counter. Always available on x86_64.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Tsc;

#[cfg(target_arch = "x86_64")]
impl SeedSource for Tsc {
    #[inline]
    #[allow(unused_unsafe)]
    fn next_seed(&self) -> u64 {
        unsafe { std::arch::x86_64::_rdtsc() }
    }
}

/// Hardware random number instruction. Only constructible after runtime detection.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy)]
pub struct RdRand(());

#[cfg(target_arch = "x86_64")]
impl RdRand {
    /// Retries recommended before treating the instruction as failed.
    const RETRIES: usize = 10;

    pub fn detect() -> Option<Self> {
        is_x86_feature_detected!("rdrand").then_some(Self(()))
    }

    #[target_feature(enable = "rdrand")]
    unsafe fn step() -> Option<u64> {
        let mut value = 0;
        // Safety: the caller guarantees the CPU supports rdrand.
        (unsafe { std::arch::x86_64::_rdrand64_step(&mut value) } == 1).then_some(value)
    }
}

#[cfg(target_arch = "x86_64")]
impl SeedSource for RdRand {
    fn next_seed(&self) -> u64 {
        for _ in 0..Self::RETRIES {
            // Safety: `RdRand` only exists once rdrand support was detected.
            if let Some(value) = unsafe { Self::step() } {
                return value;
            }
        }
        // The entropy pool is drained, any noisy value will do.
        Tsc.next_seed()
    }
}

/// Thread-local generator seeded from the OS. Portable fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadEntropy;

impl SeedSource for ThreadEntropy {
    #[inline]
    fn next_seed(&self) -> u64 {
        rand::random()
    }
}

/// The seed source a queue draws from, picked once at construction.
#[derive(Clone)]
pub enum Seeder {
    #[cfg(target_arch = "x86_64")]
    RdRand(RdRand),
    #[cfg(target_arch = "x86_64")]
    Tsc(Tsc),
    Entropy(ThreadEntropy),
    Custom(Arc<dyn SeedSource>),
}

impl Seeder {
    /// Best source the running CPU supports: rdrand, then the timestamp counter, then the OS
    /// seeded thread generator.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            match RdRand::detect() {
                Some(rdrand) => Self::RdRand(rdrand),
                None => Self::Tsc(Tsc),
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            Self::Entropy(ThreadEntropy)
        }
    }

    pub fn custom(source: impl SeedSource + 'static) -> Self {
        Self::Custom(Arc::new(source))
    }

    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::RdRand(_) => "rdrand",
            #[cfg(target_arch = "x86_64")]
            Self::Tsc(_) => "rdtsc",
            Self::Entropy(_) => "thread-entropy",
            Self::Custom(_) => "custom",
        }
    }
}

impl Default for Seeder {
    fn default() -> Self {
        Self::detect()
    }
}

impl SeedSource for Seeder {
    #[inline]
    fn next_seed(&self) -> u64 {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::RdRand(source) => source.next_seed(),
            #[cfg(target_arch = "x86_64")]
            Self::Tsc(source) => source.next_seed(),
            Self::Entropy(source) => source.next_seed(),
            Self::Custom(source) => source.next_seed(),
        }
    }
}

impl fmt::Debug for Seeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Seeder").field(&self.name()).finish()
    }
}
