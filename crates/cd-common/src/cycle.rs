//! Light-cycle arithmetic.
//!
//! The datasets cover a repeating 24-hour cycle split into two contiguous
//! half-cycle phases: lights off (minutes 1..=L of each day) followed by
//! lights on (minutes L+1..=2L), with L = 720 in this domain. Every
//! absolute minute index maps to exactly one (day, phase, minute-of-phase)
//! triple; all aggregation is keyed on that triple.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes per half-day in the recorded datasets (12-hour light schedule).
pub const DEFAULT_HALF_CYCLE_MINUTES: u32 = 720;

/// One of the two halves of the repeating light cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Dark half of the cycle (the active period for mice).
    LightOff,
    /// Lit half of the cycle.
    LightOn,
}

impl Phase {
    /// The other phase.
    pub fn other(&self) -> Phase {
        match self {
            Phase::LightOff => Phase::LightOn,
            Phase::LightOn => Phase::LightOff,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::LightOff => write!(f, "light_off"),
            Phase::LightOn => write!(f, "light_on"),
        }
    }
}

/// Position of an absolute minute within the repeating cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePosition {
    /// 1-based day index: `ceil(time / 2L)`.
    pub day: u32,

    /// Which half of the cycle the minute falls in.
    pub phase: Phase,

    /// 1-based minute within the phase, in `[1, L]`.
    pub minute: u32,
}

/// Maps absolute minute indices to (day, phase, minute-of-phase) triples.
///
/// A zero half-cycle length is degenerate: index construction treats it as
/// "no cycle" and produces empty structures rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleClock {
    half_cycle: u32,
}

impl CycleClock {
    /// Create a clock with the given half-cycle length in minutes.
    pub fn new(half_cycle: u32) -> Self {
        CycleClock { half_cycle }
    }

    /// Minutes per phase (L).
    pub fn half_cycle(&self) -> u32 {
        self.half_cycle
    }

    /// Minutes per full day (2L).
    pub fn full_cycle(&self) -> u32 {
        self.half_cycle * 2
    }

    /// True when the half-cycle length is zero and no position mapping exists.
    pub fn is_degenerate(&self) -> bool {
        self.half_cycle == 0
    }

    /// Map an absolute minute (>= 1) to its cycle position.
    ///
    /// Returns None for a degenerate clock. Times below 1 are clamped to 1;
    /// callers are expected to validate their time domain (out-of-range
    /// queries answer with empty results rather than panics).
    pub fn position(&self, time: u32) -> Option<CyclePosition> {
        if self.is_degenerate() {
            return None;
        }
        let time = time.max(1);
        let full = self.full_cycle();
        let day = time.div_ceil(full);
        let cycle_pos = ((time - 1) % full) + 1;
        let (phase, minute) = if cycle_pos > self.half_cycle {
            (Phase::LightOn, cycle_pos - self.half_cycle)
        } else {
            (Phase::LightOff, cycle_pos)
        };
        Some(CyclePosition { day, phase, minute })
    }

    /// Fold an absolute minute onto a single cycle, discarding the day.
    ///
    /// This is the cross-day normalization used by the fold-days
    /// accumulation policy: all days collapse onto one (phase, minute) pair.
    pub fn folded(&self, time: u32) -> Option<(Phase, u32)> {
        self.position(time).map(|p| (p.phase, p.minute))
    }

    /// Number of (possibly partial) days covered by a dataset whose last
    /// observation is at `max_time`.
    pub fn day_count(&self, max_time: u32) -> u32 {
        if self.is_degenerate() || max_time == 0 {
            return 0;
        }
        max_time.div_ceil(self.full_cycle())
    }

    /// Reconstruct the absolute minute for a (day, phase, minute) triple.
    pub fn absolute_minute(&self, day: u32, phase: Phase, minute: u32) -> u32 {
        let day_offset = (day.saturating_sub(1)) * self.full_cycle();
        let phase_offset = match phase {
            Phase::LightOff => 0,
            Phase::LightOn => self.half_cycle,
        };
        day_offset + phase_offset + minute
    }
}

impl Default for CycleClock {
    fn default() -> Self {
        CycleClock::new(DEFAULT_HALF_CYCLE_MINUTES)
    }
}
