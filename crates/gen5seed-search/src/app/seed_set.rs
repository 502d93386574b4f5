//! Candidate lifecycle
//!
//! A `SeedSet` holds the surviving hypotheses and the declared turn history.
//! `compute` populates it from scratch, `add_turn` narrows it, `reset`
//! empties it. Every operation blocks until its workers are done.

use crate::app::config::SearchConfig;
use crate::app::enumerator::enumerate_seeds;
use crate::app::report::{DecodedSeed, Report, SearchError};
use crate::app::workers::build_pool;
use crate::domain::parameters::SeedParameters;
use crate::domain::seed_state::SeedState;
use crate::domain::turn::BattleTurnOutcome;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// Surviving candidates and the evidence that produced them
#[derive(Clone, Debug, Default)]
pub struct SeedSet {
    config: SearchConfig,
    candidates: Vec<SeedState>,
    turns: Vec<BattleTurnOutcome>,
    rng_advances: u64,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Current candidates, in no particular order
    pub fn candidates(&self) -> &[SeedState] {
        &self.candidates
    }

    /// Declared turns, oldest first
    pub fn turns(&self) -> &[BattleTurnOutcome] {
        &self.turns
    }

    /// RNG advances consumed by the declared turns
    pub fn rng_advances(&self) -> u64 {
        self.rng_advances
    }

    fn decode_single(&self) -> Option<DecodedSeed> {
        match self.candidates.as_slice() {
            [only] => Some(DecodedSeed::new(*only, self.rng_advances)),
            _ => None,
        }
    }

    /// Enumerate `params` from scratch with the full turn history
    ///
    /// On overflow the collection is left empty.
    pub fn compute(&mut self, params: &SeedParameters) -> Result<Report, SearchError> {
        self.candidates = Vec::new();
        self.candidates = enumerate_seeds(params, &self.turns, &self.config)?;

        Ok(match self.decode_single() {
            Some(decoded) => Report::Found(decoded),
            None => Report::Computed(self.candidates.len()),
        })
    }

    /// Declare the next battle turn and narrow the candidates with it
    ///
    /// On error the turn is not recorded and the candidates are untouched.
    pub fn add_turn(&mut self, outcome: BattleTurnOutcome) -> Result<Report, SearchError> {
        if self.candidates.is_empty() {
            self.record_turn(outcome);
            return Ok(Report::TurnRecorded {
                turns: self.turns.len(),
            });
        }

        let pool = build_pool(self.config.workers)?;
        self.record_turn(outcome);
        let current = std::mem::take(&mut self.candidates);
        self.candidates = pool.install(|| {
            current
                .into_par_iter()
                .filter_map(|state| outcome.replay(state.seed).map(|seed| state.with_seed(seed)))
                .collect()
        });

        if self.candidates.is_empty() {
            return Ok(Report::NoSeedFound);
        }
        Ok(match self.decode_single() {
            Some(decoded) => Report::Found(decoded),
            None => Report::Remaining(self.candidates.len()),
        })
    }

    fn record_turn(&mut self, outcome: BattleTurnOutcome) {
        self.turns.push(outcome);
        self.rng_advances += outcome.rng_advances();
    }

    /// Check whether every candidate has the same current seed
    ///
    /// Returns `None` with fewer than two candidates.
    pub fn check_uniqueness(&self) -> Option<Report> {
        let (first, rest) = self.candidates.split_first()?;
        if rest.is_empty() {
            return None;
        }

        if rest.iter().all(|s| s.seed == first.seed) {
            return Some(Report::SharedSeed {
                candidates: self.candidates.len(),
                seed: first.seed,
            });
        }

        let distinct: FxHashSet<u64> = self.candidates.iter().map(|s| s.seed).collect();
        Some(Report::Ambiguous {
            candidates: self.candidates.len(),
            distinct: distinct.len(),
        })
    }

    /// Drop all candidates and history
    pub fn reset(&mut self) {
        self.candidates = Vec::new();
        self.turns.clear();
        self.rng_advances = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::battle_rng::BattleRng;
    use crate::domain::datetime::{GameDate, GameDateTime, GameTime};
    use crate::domain::turn::{EnemyAction, PlayerAction, StatusProgress};

    fn state(seed: u64, timer0: u16) -> SeedState {
        SeedState {
            seed,
            timer0,
            vcount: 0x60,
            gx_stat: 0x8600_0000,
            tick_count: 1,
            vframe: 10,
            datetime: GameDateTime::new(
                GameDate::new(2011, 3, 6).unwrap(),
                GameTime::new(12, 34, 56).unwrap(),
            ),
        }
    }

    fn set_with(candidates: Vec<SeedState>) -> SeedSet {
        SeedSet {
            config: SearchConfig::default().with_workers(2),
            candidates,
            turns: Vec::new(),
            rng_advances: 0,
        }
    }

    /// A turn that `seed` satisfies: plain roll, sure-hit enemy
    fn turn_for(seed: u64) -> BattleTurnOutcome {
        let mut rng = BattleRng::new(seed);
        let priority = rng.next_percent_below(20);
        rng.skip(1);
        let enemy = if rng.next_below(16) == 0 {
            EnemyAction::SureHitCrit
        } else {
            EnemyAction::SureHit
        };
        BattleTurnOutcome::new(PlayerAction::Other, priority, StatusProgress::None, enemy).unwrap()
    }

    #[test]
    fn test_uniqueness_noop_below_two() {
        assert_eq!(set_with(vec![]).check_uniqueness(), None);
        assert_eq!(set_with(vec![state(1, 0)]).check_uniqueness(), None);
    }

    #[test]
    fn test_uniqueness_shared_seed() {
        let set = set_with(vec![state(42, 0), state(42, 1), state(42, 2)]);
        assert_eq!(
            set.check_uniqueness(),
            Some(Report::SharedSeed {
                candidates: 3,
                seed: 42
            })
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_uniqueness_ambiguous_is_non_destructive() {
        let candidates = vec![state(1, 0), state(2, 1), state(1, 2), state(3, 3)];
        let set = set_with(candidates.clone());
        assert_eq!(
            set.check_uniqueness(),
            Some(Report::Ambiguous {
                candidates: 4,
                distinct: 3
            })
        );
        assert_eq!(set.candidates(), candidates.as_slice());
    }

    #[test]
    fn test_add_turn_without_candidates_records_only() {
        let mut set = SeedSet::with_config(SearchConfig::default().with_workers(1));
        let turn = turn_for(0x1234);
        let report = set.add_turn(turn).unwrap();
        assert_eq!(report, Report::TurnRecorded { turns: 1 });
        assert_eq!(set.turns(), &[turn]);
        assert_eq!(set.rng_advances(), turn.rng_advances());
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_turn_narrows_to_unique() {
        let target = 0x0BAD_CAFE_F00D_1234;
        let mut candidates = vec![state(target, 0)];
        candidates.extend((1..200u64).map(|i| state(i.wrapping_mul(0x9E37_79B9_7F4A_7C15), i as u16)));
        let mut set = set_with(candidates);

        let mut seed = target;
        let mut report = Report::Remaining(set.len());
        for _ in 0..64 {
            let before = set.len();
            let turn = turn_for(seed);
            seed = turn.replay(seed).unwrap();
            report = set.add_turn(turn).unwrap();
            assert!(set.len() <= before);
            if set.len() == 1 {
                break;
            }
        }

        let Report::Found(decoded) = report else {
            panic!("expected a unique seed, got {:?}", report);
        };
        assert_eq!(decoded.initial_seed, target);
        assert_eq!(decoded.state.seed, seed);
        assert_eq!(decoded.state.timer0, 0);
    }

    #[test]
    fn test_add_turn_exhausts_on_impossible_evidence() {
        let mut set = set_with((0..50u64).map(|i| state(i, i as u16)).collect());
        let impossible = BattleTurnOutcome::new(
            PlayerAction::Other,
            false,
            StatusProgress::Recovered { turns: 7, rolls: 2 },
            EnemyAction::SureHit,
        )
        .unwrap();
        assert_eq!(set.add_turn(impossible).unwrap(), Report::NoSeedFound);
        assert!(set.is_empty());
        assert_eq!(set.turns().len(), 1);
    }

    #[test]
    fn test_history_matches_applied_turns() {
        let target = 0x0123_4567_89AB_CDEF;
        let mut set = set_with(vec![state(target, 0)]);

        let mut seed = target;
        let mut advances = 0;
        for _ in 0..5 {
            let turn = turn_for(seed);
            seed = turn.replay(seed).unwrap();
            advances += turn.rng_advances();

            set.add_turn(turn).unwrap();
            assert_eq!(set.rng_advances(), advances);
            assert_eq!(set.candidates()[0].seed, seed);
            assert_eq!(set.candidates()[0].initial_seed(set.rng_advances()), target);
        }
        assert_eq!(set.turns().len(), 5);
    }

    #[test]
    fn test_reset() {
        let mut set = set_with(vec![state(1, 0), state(2, 1)]);
        set.add_turn(turn_for(1)).unwrap();
        set.reset();
        assert!(set.is_empty());
        assert!(set.turns().is_empty());
        assert_eq!(set.rng_advances(), 0);
    }
}
