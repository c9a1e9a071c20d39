// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Display tick shared between the periodic timer interrupt and the superloop.
//!
//! The interrupt only ever calls [`DisplayTick::on_tick`]; the loop only ever calls
//! [`DisplayTick::take`]. The ready flag is the single value both sides touch, so it is an
//! `AtomicBool` read-and-cleared with one swap.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Timer tick period on the reference board (µs).
pub const TICK_PERIOD_US: u32 = 100;

/// Status report interval: one second of 100 µs ticks.
pub const REPORT_INTERVAL_TICKS: u32 = 10_000;

pub struct DisplayTick {
    ready: AtomicBool,
    ticks: AtomicU32,
    interval: u32,
}

impl DisplayTick {
    /// Raise the ready flag every `interval` ticks. `const` so it can live in a `static`.
    pub const fn new(interval: u32) -> Self {
        Self {
            ready: AtomicBool::new(false),
            ticks: AtomicU32::new(0),
            interval,
        }
    }

    /// Interrupt side: count one tick, raising the flag when the interval elapses.
    pub fn on_tick(&self) {
        let count = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        if count >= self.interval {
            self.ticks.store(0, Ordering::Relaxed);
            self.ready.store(true, Ordering::Release);
        }
    }

    /// Raise the flag immediately.
    #[inline]
    pub fn raise(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Loop side: returns whether a report is due and clears the flag in the same operation.
    #[inline]
    pub fn take(&self) -> bool {
        self.ready.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Default for DisplayTick {
    fn default() -> Self {
        Self::new(REPORT_INTERVAL_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raises_after_interval() {
        let tick = DisplayTick::new(3);
        tick.on_tick();
        tick.on_tick();
        assert!(!tick.is_ready());
        tick.on_tick();
        assert!(tick.is_ready());
    }

    #[test]
    fn take_clears() {
        let tick = DisplayTick::new(1);
        tick.on_tick();
        assert!(tick.take());
        assert!(!tick.take());
    }

    #[test]
    fn counter_restarts_after_raise() {
        let tick = DisplayTick::new(2);
        for _ in 0..2 {
            tick.on_tick();
        }
        assert!(tick.take());
        tick.on_tick();
        assert!(!tick.is_ready());
        tick.on_tick();
        assert!(tick.take());
    }
}
