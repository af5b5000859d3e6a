//! Injectable random sources used for placement and wandering.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the two kinds of draws the simulation makes.
///
/// The world and the session never reach for a global generator; callers hand
/// in a source, which lets tests pin every probabilistic outcome.
pub trait RandomSource {
    /// Uniform integer in `[0, sides)`. Yields zero when `sides` is zero.
    fn roll(&mut self, sides: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns `true` with the provided probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// Production random source backed by a seeded ChaCha generator.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a generator whose whole stream is determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(0..sides)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

const IDLE_UNIT: f64 = 0.999;

/// Random source that replays pre-recorded draws.
///
/// Rolls are reduced modulo the requested number of sides. Once a queue runs
/// dry, rolls yield zero and units yield the idle value (0.999 unless
/// overridden), so chance-driven behaviour stays dormant.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    rolls: VecDeque<u32>,
    units: VecDeque<f64>,
    idle_unit: f64,
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self {
            rolls: VecDeque::new(),
            units: VecDeque::new(),
            idle_unit: IDLE_UNIT,
        }
    }
}

impl ScriptedRandom {
    /// Creates a source with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends integer draws to the roll queue.
    #[must_use]
    pub fn with_rolls<I: IntoIterator<Item = u32>>(mut self, rolls: I) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Appends float draws to the unit queue.
    #[must_use]
    pub fn with_units<I: IntoIterator<Item = f64>>(mut self, units: I) -> Self {
        self.units.extend(units);
        self
    }

    /// Overrides the unit value yielded once the queue is exhausted.
    #[must_use]
    pub fn with_idle_unit(mut self, idle_unit: f64) -> Self {
        self.idle_unit = idle_unit;
        self
    }

    /// Number of queued rolls not consumed yet.
    #[must_use]
    pub fn pending_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rolls.pop_front().map_or(0, |value| value % sides)
    }

    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.idle_unit)
    }
}
