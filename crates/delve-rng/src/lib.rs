//! Random number sources for dungeon generation
//!
//! The dungeon core never owns its randomness: every operation that needs it
//! borrows a [`RandomSource`]. [`GameRng`] is the seeded ChaCha implementation
//! used by games and tests; [`SequenceRng`] replays a fixed script of values.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform integers.
pub trait RandomSource {
    /// Returns a value uniformly distributed in `[lo, hi)`.
    ///
    /// An empty or inverted range yields `lo`.
    fn int_in_range(&mut self, lo: i32, hi: i32) -> i32;

    /// Returns a value in `[0, n)`, or 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let n = i32::try_from(n).unwrap_or(i32::MAX);
        self.int_in_range(0, n) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).int_in_range(lo, hi)
    }
}

/// An RNG call trace entry for debugging divergences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    pub lo: i32,
    pub hi: i32,
    pub result: i32,
}

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible generation. Only the seed is
/// serialized; a deserialized generator restarts its stream from that seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
    call_count: u64,
    tracing: bool,
    trace: Vec<RngTraceEntry>,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Start recording every draw, discarding any previous trace
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Draws recorded since tracing was enabled
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }
}

impl RandomSource for GameRng {
    fn int_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        let result = if hi <= lo {
            lo
        } else {
            self.rng.gen_range(lo..hi)
        };
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count,
                lo,
                hi,
                result,
            });
        }
        self.call_count += 1;
        result
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Replays a fixed script of values, cycling when exhausted.
///
/// Each scripted value is folded into the requested range, so a script
/// written for one set of bounds stays valid if the bounds shrink.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<i32>,
    next: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceRng {
    fn int_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo || self.values.is_empty() {
            return lo;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        if (lo..hi).contains(&value) {
            value
        } else {
            lo + value.rem_euclid(hi - lo)
        }
    }
}
