//! Battle RNG (64-bit LCG)
//!
//! The state is advanced before every read; the 32-bit roll is the upper
//! half of the new state. Reverse steps undo forward steps exactly, which
//! is used to recover the initial seed and to re-roll status durations.

use crate::constants::{LCG_ADD, LCG_ADD_INV, LCG_MULT, LCG_MULT_INV};

/// Advance the state by one step
#[inline]
pub fn lcg_next(state: u64) -> u64 {
    state.wrapping_mul(LCG_MULT).wrapping_add(LCG_ADD)
}

/// Step the state back by one step
#[inline]
pub fn lcg_prev(state: u64) -> u64 {
    state.wrapping_mul(LCG_MULT_INV).wrapping_add(LCG_ADD_INV)
}

/// Apply `s * mult + add` to `state` `count` times
///
/// Squares the affine step, so the cost is logarithmic in `count`.
fn lcg_jump(mut state: u64, mut mult: u64, mut add: u64, mut count: u64) -> u64 {
    while count > 0 {
        if count & 1 == 1 {
            state = state.wrapping_mul(mult).wrapping_add(add);
        }
        add = add.wrapping_mul(mult).wrapping_add(add);
        mult = mult.wrapping_mul(mult);
        count >>= 1;
    }
    state
}

/// Advance the state by `count` steps
pub fn lcg_advance(state: u64, count: u64) -> u64 {
    lcg_jump(state, LCG_MULT, LCG_ADD, count)
}

/// Step the state back `count` times
pub fn lcg_rewind(state: u64, count: u64) -> u64 {
    lcg_jump(state, LCG_MULT_INV, LCG_ADD_INV, count)
}

/// Scale a 32-bit roll into `0..n`
#[inline]
pub fn scale(roll: u32, n: u32) -> u32 {
    ((roll as u64 * n as u64) >> 32) as u32
}

/// Battle RNG cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleRng {
    state: u64,
}

impl BattleRng {
    pub fn new(state: u64) -> Self {
        Self { state }
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance and return the 32-bit roll
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = lcg_next(self.state);
        (self.state >> 32) as u32
    }

    /// Advance and return a value in `0..n`
    #[inline]
    pub fn next_below(&mut self, n: u32) -> u32 {
        scale(self.next_u32(), n)
    }

    /// Advance and test a percentage roll against `threshold`
    #[inline]
    pub fn next_percent_below(&mut self, threshold: u32) -> bool {
        self.next_below(100) < threshold
    }

    /// Advance without reading
    #[inline]
    pub fn skip(&mut self, count: u64) {
        self.state = lcg_advance(self.state, count);
    }

    /// Step back `count` times
    pub fn rewind(&mut self, count: u64) {
        self.state = lcg_rewind(self.state, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn test_inverse_constants() {
        assert_eq!(LCG_MULT.wrapping_mul(LCG_MULT_INV), 1);
        assert_eq!(LCG_ADD.wrapping_mul(LCG_MULT_INV).wrapping_add(LCG_ADD_INV), 0);
    }

    #[test]
    fn test_prev_undoes_next() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..10_000 {
            let s = rng.next_u64();
            assert_eq!(lcg_prev(lcg_next(s)), s);
            assert_eq!(lcg_next(lcg_prev(s)), s);
        }
    }

    #[test]
    fn test_prev_undoes_next_edges() {
        for s in [0, 1, u64::MAX, 1 << 63, LCG_ADD, LCG_ADD_INV] {
            assert_eq!(lcg_prev(lcg_next(s)), s);
            assert_eq!(lcg_next(lcg_prev(s)), s);
        }
    }

    #[test]
    fn test_next_from_zero() {
        // 0 * mult + add
        assert_eq!(lcg_next(0), 0x269EC3);
        let mut rng = BattleRng::new(0);
        assert_eq!(rng.next_u32(), 0);
        assert_eq!(rng.state(), 0x269EC3);
    }

    #[test]
    fn test_roll_reads_updated_state() {
        let seed = 0x0123_4567_89AB_CDEF;
        let mut rng = BattleRng::new(seed);
        let roll = rng.next_u32();
        assert_eq!(roll, (lcg_next(seed) >> 32) as u32);
    }

    #[test]
    fn test_rewind_matches_skip() {
        let seed = 0xDEAD_BEEF_CAFE_BABE;
        let mut rng = BattleRng::new(seed);
        rng.skip(37);
        rng.rewind(37);
        assert_eq!(rng.state(), seed);
        assert_eq!(lcg_rewind(seed, 0), seed);
    }

    #[test]
    fn test_jump_matches_single_steps() {
        let seed = 0x0BAD_CAFE_F00D_1234;
        let mut forward = seed;
        let mut backward = seed;
        for count in 0..200u64 {
            assert_eq!(lcg_advance(seed, count), forward);
            assert_eq!(lcg_rewind(seed, count), backward);
            forward = lcg_next(forward);
            backward = lcg_prev(backward);
        }
    }

    #[test]
    fn test_rewind_huge_counts() {
        // full period 2^64: rewinding 2^64 - 1 steps is one step forward
        let mut rng = StdRng::seed_from_u64(41);
        for _ in 0..100 {
            let s = rng.next_u64();
            assert_eq!(lcg_rewind(s, u64::MAX), lcg_next(s));
            assert_eq!(lcg_advance(s, u64::MAX), lcg_prev(s));
            let half = lcg_advance(s, 1 << 63);
            assert_eq!(lcg_advance(half, 1 << 63), s);
            assert_eq!(lcg_rewind(lcg_advance(s, 2_000_000_000), 2_000_000_000), s);
        }
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(scale(0, 100), 0);
        assert_eq!(scale(u32::MAX, 100), 99);
        assert_eq!(scale(u32::MAX, 4), 3);
        assert_eq!(scale(0x8000_0000, 100), 50);
        assert_eq!(scale(0x1000_0000, 16), 1);
        assert_eq!(scale(0x0FFF_FFFF, 16), 0);
    }
}
