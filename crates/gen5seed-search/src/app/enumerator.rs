//! Candidate enumeration workflow
//!
//! This module visits every VFrame × VCount × Timer0 × TickCount × seconds
//! offset combination of a search window, hashes its message and keeps the
//! seeds consistent with the turns declared so far.

use crate::app::config::SearchConfig;
use crate::app::report::SearchError;
use crate::app::workers::{Partition, build_pool};
use crate::constants::{GX_STAT, SECOND_OFFSETS};
use crate::domain::datetime::GameDateTime;
use crate::domain::message::SeedMessage;
use crate::domain::parameters::SeedParameters;
use crate::domain::seed_state::SeedState;
use crate::domain::timing::{presumed_tick_count, second_offsets, tick_count_range, timer0_at};
use crate::domain::turn::{BattleTurnOutcome, replay_turns};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;

/// Number of combinations visited for `params`
pub fn candidate_count_upper_bound(params: &SeedParameters) -> u64 {
    let vframes = *params.vframe.end() as u64 - *params.vframe.start() as u64 + 1;
    // VFrames whose predicted TickCount is 0 only try 2 TickCount values
    let short_tick = params
        .vframe
        .clone()
        .take_while(|&v| presumed_tick_count(v) == 0)
        .count() as u64;
    let ticks = vframes * 3 - short_tick;
    let vcounts = *params.vcount.end() as u64 - *params.vcount.start() as u64 + 1;

    ticks * vcounts * params.timer0_window.value_count() as u64 * SECOND_OFFSETS as u64
}

/// Shared state of one enumeration
struct Enumeration<'a> {
    params: &'a SeedParameters,
    turns: &'a [BattleTurnOutcome],
    cap: usize,
    accepted: AtomicUsize,
    overflow: AtomicBool,
}

impl<'a> Enumeration<'a> {
    fn new(params: &'a SeedParameters, turns: &'a [BattleTurnOutcome], cap: usize) -> Self {
        Self {
            params,
            turns,
            cap,
            accepted: AtomicUsize::new(0),
            overflow: AtomicBool::new(false),
        }
    }

    fn overflowed(&self) -> bool {
        self.overflow.load(Ordering::Relaxed) || self.accepted.load(Ordering::Relaxed) >= self.cap
    }

    /// Enumerate the Timer0 window positions in `range`
    fn run(&self, range: Range<u32>) -> Vec<SeedState> {
        let mut accepted = Vec::new();
        if range.is_empty() {
            return accepted;
        }

        let params = self.params;
        let mac = params.mac;
        let mut message = SeedMessage::new(params.version);

        for vframe in params.vframe.clone() {
            message.set_vframe(mac, vframe, GX_STAT);
            let datetimes: Vec<GameDateTime> = second_offsets(vframe)
                .map(|offset| params.datetime.add_seconds(offset))
                .collect();

            for vcount in params.vcount.clone() {
                for index in range.clone() {
                    if self.overflow.load(Ordering::Relaxed) {
                        return accepted;
                    }

                    let timer0 = timer0_at(params.timer0_window, vframe, index);
                    message.set_vcount_timer0(vcount, timer0);

                    for tick_count in tick_count_range(vframe) {
                        message.set_tick_count(mac, tick_count);

                        for datetime in &datetimes {
                            message.set_datetime(datetime);
                            let Some(seed) = replay_turns(message.seed(), self.turns) else {
                                continue;
                            };

                            accepted.push(SeedState {
                                seed,
                                timer0,
                                vcount,
                                gx_stat: GX_STAT,
                                tick_count,
                                vframe,
                                datetime: *datetime,
                            });

                            if self.accepted.fetch_add(1, Ordering::Relaxed) + 1 >= self.cap {
                                self.overflow.store(true, Ordering::Relaxed);
                                return accepted;
                            }
                        }
                    }
                }
            }
        }

        accepted
    }
}

/// Enumerate all candidates of `params` consistent with `turns`
///
/// Worker threads take contiguous Timer0 window ranges; the calling thread
/// takes the remainder once the workers are dispatched. The whole result is
/// discarded when the candidate cap is reached.
pub fn enumerate_seeds(
    params: &SeedParameters,
    turns: &[BattleTurnOutcome],
    config: &SearchConfig,
) -> Result<Vec<SeedState>, SearchError> {
    let pool = build_pool(config.workers)?;
    let partition = Partition::new(params.timer0_window.value_count(), config.workers);
    let enumeration = Enumeration::new(params, turns, config.max_candidates);

    let (tx, rx) = mpsc::channel();
    pool.in_place_scope(|scope| {
        for range in partition.workers.iter().cloned() {
            let tx = tx.clone();
            let enumeration = &enumeration;
            scope.spawn(move |_| {
                let _ = tx.send(enumeration.run(range));
            });
        }
        let _ = tx.send(enumeration.run(partition.remainder.clone()));
    });
    drop(tx);

    if enumeration.overflowed() {
        return Err(SearchError::TooManyCandidates {
            cap: config.max_candidates,
        });
    }

    Ok(rx.into_iter().flatten().collect())
}

/// Enumerate on the calling thread only
pub fn enumerate_seeds_sequential(
    params: &SeedParameters,
    turns: &[BattleTurnOutcome],
    max_candidates: usize,
) -> Result<Vec<SeedState>, SearchError> {
    let enumeration = Enumeration::new(params, turns, max_candidates);
    let candidates = enumeration.run(0..params.timer0_window.value_count());
    if enumeration.overflowed() {
        return Err(SearchError::TooManyCandidates {
            cap: max_candidates,
        });
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::datetime::{GameDate, GameTime};
    use crate::domain::parameters::{GameVersion, MacAddress, Timer0Window};
    use crate::domain::turn::{EnemyAction, PlayerAction, StatusProgress};
    use std::collections::HashSet;

    fn params(vframe: std::ops::RangeInclusive<u32>) -> SeedParameters {
        SeedParameters::new(
            "00:11:22:33:44:55".parse::<MacAddress>().unwrap(),
            GameVersion::Black,
            5..=5,
            vframe,
            GameDateTime::new(
                GameDate::new(2011, 3, 6).unwrap(),
                GameTime::new(12, 34, 56).unwrap(),
            ),
        )
        .unwrap()
    }

    fn config(workers: usize) -> SearchConfig {
        SearchConfig::default().with_workers(workers)
    }

    #[test]
    fn test_upper_bound() {
        // TickCount prediction 1 -> 3 values
        assert_eq!(candidate_count_upper_bound(&params(10..=10)), 35_013 * 3 * 3);
        // TickCount prediction 0 -> 2 values
        assert_eq!(candidate_count_upper_bound(&params(0..=0)), 35_013 * 2 * 3);
        assert_eq!(
            candidate_count_upper_bound(&params(6..=9)),
            35_013 * (2 + 2 + 3 + 3) * 3
        );
        let full = params(10..=10).with_timer0_window(Timer0Window::Full);
        assert_eq!(candidate_count_upper_bound(&full), 65_536 * 3 * 3);
    }

    #[test]
    fn test_upper_bound_whole_vframe_domain() {
        // VFrames 0-7 predict TickCount 0
        let p = params(0..=u32::MAX);
        let ticks = (1u64 << 32) * 3 - 8;
        assert_eq!(candidate_count_upper_bound(&p), ticks * 35_013 * 3);
    }

    #[test]
    fn test_full_window_parallel_matches_sequential() {
        let p = params(10..=10).with_timer0_window(Timer0Window::Full);
        let parallel: HashSet<SeedState> = enumerate_seeds(&p, &[], &config(3))
            .unwrap()
            .into_iter()
            .collect();
        let sequential: HashSet<SeedState> = enumerate_seeds_sequential(&p, &[], usize::MAX)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(parallel.len() as u64, candidate_count_upper_bound(&p));
        assert_eq!(parallel, sequential);
        assert!(parallel.iter().any(|s| s.timer0 == 0));
        assert!(parallel.iter().any(|s| s.timer0 == u16::MAX));
    }

    #[test]
    fn test_enumerate_count_matches_upper_bound() {
        let p = params(10..=10);
        let seeds = enumerate_seeds(&p, &[], &config(3)).unwrap();
        assert_eq!(seeds.len() as u64, candidate_count_upper_bound(&p));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = params(10..=10);
        let parallel: HashSet<SeedState> = enumerate_seeds(&p, &[], &config(4))
            .unwrap()
            .into_iter()
            .collect();
        let sequential: HashSet<SeedState> = enumerate_seeds_sequential(&p, &[], usize::MAX)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_enumerated_seed_matches_direct_hash() {
        let p = params(10..=10);
        let seeds = enumerate_seeds(&p, &[], &config(2)).unwrap();
        for state in seeds.iter().step_by(997) {
            let direct = SeedMessage::for_state(p.mac, p.version, state).seed();
            assert_eq!(state.seed, direct);
        }
    }

    #[test]
    fn test_declared_turns_prefilter() {
        let p = params(10..=10);
        let turn = BattleTurnOutcome::new(
            PlayerAction::Other,
            true,
            StatusProgress::None,
            EnemyAction::Miss,
        )
        .unwrap();
        let all = enumerate_seeds(&p, &[], &config(2)).unwrap();
        let filtered = enumerate_seeds(&p, &[turn], &config(2)).unwrap();

        let expected: HashSet<SeedState> = all
            .iter()
            .filter_map(|s| turn.replay(s.seed).map(|seed| s.with_seed(seed)))
            .collect();
        assert_eq!(filtered.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_cap_discards_result() {
        let p = params(10..=10);
        let capped = SearchConfig::default()
            .with_workers(3)
            .with_max_candidates(1_000);
        assert!(matches!(
            enumerate_seeds(&p, &[], &capped),
            Err(SearchError::TooManyCandidates { cap: 1_000 })
        ));
        assert!(matches!(
            enumerate_seeds_sequential(&p, &[], 1_000),
            Err(SearchError::TooManyCandidates { cap: 1_000 })
        ));
    }

    #[test]
    fn test_cap_not_reached() {
        let p = params(10..=10);
        let exact = candidate_count_upper_bound(&p) as usize;
        let capped = SearchConfig::default()
            .with_workers(2)
            .with_max_candidates(exact + 1);
        assert_eq!(enumerate_seeds(&p, &[], &capped).unwrap().len(), exact);
    }
}
