//! Replaceable source of randomness
//!
//! Weighted table draws and pool sampling go through [`RandomSource`] so the
//! gacha loop can be pinned to a fixed sequence in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Mutex;

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..upper`. `upper` is never zero.
    fn below(&self, upper: usize) -> usize;
}

/// Default source backed by a `StdRng`
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn below(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..upper.max(1))
    }
}

/// Replays a fixed sequence, reduced modulo `upper`; yields 0 once drained
#[derive(Default)]
pub struct ScriptedRandom {
    values: Mutex<VecDeque<usize>>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&self, upper: usize) -> usize {
        let mut values = self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        values.pop_front().unwrap_or(0) % upper.max(1)
    }
}
