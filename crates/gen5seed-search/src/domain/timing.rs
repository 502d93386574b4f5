//! Hardware timing predictions derived from VFrame
//!
//! One VFrame takes 560,190 CPU cycles. Timer0 increments every 64 cycles,
//! TickCount counts Timer0 overflows and the RTC advances once per
//! 33,513,982 cycles.

use crate::constants::{
    CYCLES_PER_SECOND, CYCLES_PER_TICK, CYCLES_PER_TIMER0, CYCLES_PER_VFRAME, SECOND_OFFSETS,
    TIMER0_PER_VFRAME,
};
use crate::domain::parameters::Timer0Window;
use std::ops::RangeInclusive;

#[inline]
fn cycles(vframe: u32) -> u64 {
    vframe as u64 * CYCLES_PER_VFRAME
}

/// Timer0 value expected at `vframe` (wrapping)
pub fn presumed_timer0(vframe: u32) -> u16 {
    (cycles(vframe) / CYCLES_PER_TIMER0) as u16
}

/// First Timer0 value of the predicted window
pub fn timer0_window_start(vframe: u32) -> u16 {
    presumed_timer0(vframe).wrapping_sub((TIMER0_PER_VFRAME * 2) as u16)
}

/// Timer0 value at position `index` of the window
#[inline]
pub fn timer0_at(window: Timer0Window, vframe: u32, index: u32) -> u16 {
    match window {
        Timer0Window::Predicted => timer0_window_start(vframe).wrapping_add(index as u16),
        Timer0Window::Full => index as u16,
    }
}

/// TickCount expected at `vframe`
pub fn presumed_tick_count(vframe: u32) -> u32 {
    (cycles(vframe) / CYCLES_PER_TICK) as u32
}

/// TickCount values tried for `vframe` (±1 around the prediction)
pub fn tick_count_range(vframe: u32) -> RangeInclusive<u32> {
    let presumed = presumed_tick_count(vframe);
    presumed.saturating_sub(1)..=presumed + 1
}

/// Seconds offsets tried for `vframe`
///
/// Starts one second before the elapsed RTC time.
pub fn second_offsets(vframe: u32) -> impl Iterator<Item = i64> {
    let base = (cycles(vframe) / CYCLES_PER_SECOND) as i64 - 1;
    (0..SECOND_OFFSETS).map(move |j| base + j)
}
