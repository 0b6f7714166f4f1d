//! Shard index selection: a xorshift-multiply generator and multiply-shift range reduction.

/// Replaces a zero seed, which is a fixed point of xorshift.
const NONZERO_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// One step of the 64-bit xorshift* generator (shifts 12/25/27).
#[inline]
pub fn xorshift_mult64(mut x: u64) -> u64 {
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    x.wrapping_mul(2_685_821_657_736_338_717)
}

/// Maps a uniform 32-bit `x` into `[0, n)` without a division.
///
/// `n` must fit in 32 bits for the product not to overflow.
#[inline]
pub fn reduce(x: u32, n: usize) -> usize {
    ((u64::from(x) * n as u64) >> 32) as usize
}

/// Per-operation generator of shard indices in `[0, shards)`.
#[derive(Debug, Clone)]
pub struct Selector {
    state: u64,
    shards: usize,
}

impl Selector {
    pub fn new(seed: u64, shards: usize) -> Self {
        let state = if seed == 0 { NONZERO_SEED } else { seed };
        Self { state, shards }
    }

    #[inline]
    pub fn next_index(&mut self) -> usize {
        self.state = xorshift_mult64(self.state);
        reduce(self.state as u32, self.shards)
    }
}
