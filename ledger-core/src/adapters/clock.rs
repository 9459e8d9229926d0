//! Clock adapters
//!
//! `SimulatedClock` moves forward by a random step on every tick.
//! `ManualClock` moves by a fixed step and can be set directly, which keeps
//! timestamps predictable in tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Timestamp;
use crate::ports::Clock;

/// Clock origin used when nothing else is configured
pub const DEFAULT_START: i64 = 1_048_000_000;

/// Upper bound (exclusive) of a random tick step
pub const DEFAULT_MAX_STEP: i64 = 1000;

struct SimulatedState {
    now: Timestamp,
    rng: StdRng,
}

/// Random-step simulated clock
pub struct SimulatedClock {
    state: Mutex<SimulatedState>,
    max_step: i64,
}

impl SimulatedClock {
    /// Create a clock seeded from OS entropy
    pub fn new(start: i64, max_step: i64) -> Self {
        Self::with_rng(start, max_step, StdRng::from_entropy())
    }

    /// Create a reproducible clock
    pub fn seeded(start: i64, max_step: i64, seed: u64) -> Self {
        Self::with_rng(start, max_step, StdRng::seed_from_u64(seed))
    }

    fn with_rng(start: i64, max_step: i64, rng: StdRng) -> Self {
        Self {
            state: Mutex::new(SimulatedState {
                now: Timestamp::new(start),
                rng,
            }),
            max_step: max_step.max(1),
        }
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new(DEFAULT_START, DEFAULT_MAX_STEP)
    }
}

impl Clock for SimulatedClock {
    fn tick(&self) -> Timestamp {
        // Poisoning leaves the timestamp valid
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let step = state.rng.gen_range(0..self.max_step);
        state.now = state.now.advance(step);
        state.now
    }

    fn peek(&self) -> Timestamp {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).now
    }
}

/// Deterministic clock for tests and scripted runs
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
            step,
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, units: i64) {
        self.now.store(units, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DEFAULT_START, 60)
    }
}

impl Clock for ManualClock {
    fn tick(&self) -> Timestamp {
        Timestamp::new(self.now.fetch_add(self.step, Ordering::SeqCst) + self.step)
    }

    fn peek(&self) -> Timestamp {
        Timestamp::new(self.now.load(Ordering::SeqCst))
    }
}
