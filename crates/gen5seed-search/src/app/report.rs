//! Operation results and their status messages

use crate::domain::seed_state::SeedState;
use rayon::ThreadPoolBuildError;
use std::fmt;
use thiserror::Error;

/// Failure of a search operation
#[derive(Debug, Error)]
pub enum SearchError {
    /// Enumeration hit the candidate cap; the partial result was discarded
    #[error("Too many seeds to compute, add more battle turns")]
    TooManyCandidates { cap: usize },
    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// The single remaining hypothesis with its initial seed recovered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedSeed {
    pub initial_seed: u64,
    pub state: SeedState,
}

impl DecodedSeed {
    pub fn new(state: SeedState, rng_advances: u64) -> Self {
        Self {
            initial_seed: state.initial_seed(rng_advances),
            state,
        }
    }
}

impl fmt::Display for DecodedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        write!(
            f,
            "Found Initial Seed {:016X}, Current Seed State: Seed {:016X}, Timer0 {:04X}, \
             VCount {:03X}, GxStat {:08X}, TickCount {:X}, VFrame {}, DateTime {}",
            self.initial_seed,
            s.seed,
            s.timer0,
            s.vcount,
            s.gx_stat,
            s.tick_count,
            s.vframe,
            s.datetime
        )
    }
}

/// Result of a `SeedSet` operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// Enumeration finished with this many candidates
    Computed(usize),
    /// Turn stored for a later enumeration
    TurnRecorded { turns: usize },
    /// Narrowing left this many candidates
    Remaining(usize),
    /// Narrowing removed every candidate
    NoSeedFound,
    /// Exactly one candidate is left
    Found(DecodedSeed),
    /// All candidates share the same current seed
    SharedSeed { candidates: usize, seed: u64 },
    /// Candidates disagree on the current seed
    Ambiguous { candidates: usize, distinct: usize },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Computed(n) => write!(f, "Computed {} seeds", n),
            Report::TurnRecorded { turns } => write!(
                f,
                "Added battle turn outcome, {} turn outcomes currently set",
                turns
            ),
            Report::Remaining(n) => write!(f, "{} seeds remaining", n),
            Report::NoSeedFound => {
                write!(f, "Could not determine RNG seed (wrong VFrame window?)")
            }
            Report::Found(decoded) => write!(f, "{}", decoded),
            Report::SharedSeed { candidates, seed } => write!(
                f,
                "All {} remaining seeds share seed {:016X}",
                candidates, seed
            ),
            Report::Ambiguous {
                candidates,
                distinct,
            } => write!(
                f,
                "{} remaining seeds, {} distinct seed values",
                candidates, distinct
            ),
        }
    }
}
