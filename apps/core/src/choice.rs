//! Injectable random source.
//!
//! The thinking delay and the fallback greeting are the only random parts of
//! the assistant. Both go through [`ChoiceSource`] so tests and replays can
//! pin them.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::time::Duration;

pub trait ChoiceSource: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Returns a duration inside `range`.
    fn pick_delay(&mut self, range: RangeInclusive<Duration>) -> Duration;
}

/// [`ChoiceSource`] backed by any `rand` generator.
pub struct RandomChoices<R> {
    rng: R,
}

impl<R: RngCore + Send> RandomChoices<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChoices<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> ChoiceSource for RandomChoices<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn pick_delay(&mut self, range: RangeInclusive<Duration>) -> Duration {
        let (min, max) = (range.start().as_millis() as u64, range.end().as_millis() as u64);
        if min >= max {
            return *range.start();
        }
        Duration::from_millis(self.rng.gen_range(min..=max))
    }
}

/// Replays a fixed script of choices; once exhausted it always picks the
/// first index and the shortest delay.
#[derive(Debug, Default, Clone)]
pub struct ScriptedChoices {
    indices: VecDeque<usize>,
    delays: VecDeque<Duration>,
}

impl ScriptedChoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_delays(mut self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.delays.extend(delays);
        self
    }
}

impl ChoiceSource for ScriptedChoices {
    fn pick_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len.max(1)
    }

    fn pick_delay(&mut self, range: RangeInclusive<Duration>) -> Duration {
        self.delays
            .pop_front()
            .map(|d| d.clamp(*range.start(), *range.end()))
            .unwrap_or(*range.start())
    }
}
