//! Candidate seed hypothesis

use crate::domain::battle_rng::lcg_rewind;
use crate::domain::datetime::GameDateTime;

/// One surviving hypothesis
///
/// Only `seed` changes after enumeration; it advances as battle turns are
/// confirmed. The remaining fields identify the hardware state that produced
/// the initial seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeedState {
    /// Current battle RNG state
    pub seed: u64,
    pub timer0: u16,
    pub vcount: u16,
    pub gx_stat: u32,
    pub tick_count: u32,
    pub vframe: u32,
    /// RTC value written into the message
    pub datetime: GameDateTime,
}

impl SeedState {
    /// Same hypothesis with an advanced seed
    #[inline]
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Initial seed, undoing `rng_advances` consumed rolls
    pub fn initial_seed(&self, rng_advances: u64) -> u64 {
        lcg_rewind(self.seed, rng_advances)
    }
}
