//! Cumulative male/female share-of-total curves.
//!
//! The full-length series for a (day, phase) key is computed once and
//! memoized; every shorter query is a slice of the cached series, so
//! repeated queries at increasing `t` during animation never re-walk the
//! minutes from 1. Rebuilds on dataset change discard the whole cache;
//! entries for other (day, phase) keys stay valid across day switches.

use crate::index::MinuteIndex;
use cd_common::{Observation, Phase, Sex};
use serde::Serialize;
use std::collections::HashMap;

/// Cumulative category sums and their proportion at one minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionPoint {
    /// Minute-of-phase, 1-based.
    pub minute: u32,

    /// `male_sum / total_sum`, or exactly 0.5 when `total_sum` is 0.
    pub proportion: f64,

    /// Cumulative male-attributed value over `[1, minute]`.
    pub male_sum: f64,

    /// Cumulative female-attributed value over `[1, minute]`.
    pub female_sum: f64,

    /// `male_sum + female_sum`.
    pub total_sum: f64,
}

/// Memoizing store of full-length proportion series, keyed by (day, phase).
#[derive(Debug, Clone, Default)]
pub struct ProportionCache {
    half_cycle: u32,
    series: HashMap<(u32, Phase), Vec<ProportionPoint>>,
    computations: usize,
}

impl ProportionCache {
    /// An empty cache for a half-cycle of length L.
    pub fn new(half_cycle: u32) -> ProportionCache {
        ProportionCache {
            half_cycle,
            series: HashMap::new(),
            computations: 0,
        }
    }

    /// The series for (day, phase), truncated to `max_t` minutes.
    ///
    /// Computes and memoizes the full-length series on first access for the
    /// key; afterwards this is a pure array slice. `max_t` is clamped to L;
    /// `max_t == 0` answers an empty slice.
    pub fn series(
        &mut self,
        index: &MinuteIndex,
        observations: &[Observation],
        day: u32,
        phase: Phase,
        max_t: u32,
    ) -> &[ProportionPoint] {
        if self.half_cycle == 0 || max_t == 0 {
            return &[];
        }
        let max_t = max_t.min(self.half_cycle) as usize;
        let key = (day, phase);
        if !self.series.contains_key(&key) {
            let full = compute_series(index, observations, day, phase, self.half_cycle);
            self.computations += 1;
            self.series.insert(key, full);
        }
        &self.series[&key][..max_t]
    }

    /// Warm the cache for every (day, phase) pair up to `total_days`.
    pub fn precompute_all(
        &mut self,
        index: &MinuteIndex,
        observations: &[Observation],
        total_days: u32,
    ) {
        for day in 1..=total_days {
            for phase in [Phase::LightOff, Phase::LightOn] {
                self.series(index, observations, day, phase, self.half_cycle);
            }
        }
    }

    /// How many full-length series have been computed (not served from
    /// cache). Lets tests assert memoization by call count.
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Drop every cached series (dataset change).
    pub fn clear(&mut self) {
        self.series.clear();
    }
}

fn compute_series(
    index: &MinuteIndex,
    observations: &[Observation],
    day: u32,
    phase: Phase,
    half_cycle: u32,
) -> Vec<ProportionPoint> {
    let mut out = Vec::with_capacity(half_cycle as usize);
    let mut male_sum = 0.0;
    let mut female_sum = 0.0;

    for minute in 1..=half_cycle {
        for &i in index.indices(minute, day, phase) {
            let obs = &observations[i];
            match obs.sex {
                Sex::Male => male_sum += obs.value,
                Sex::Female => female_sum += obs.value,
            }
        }
        let total_sum = male_sum + female_sum;
        let proportion = if total_sum == 0.0 {
            0.5
        } else {
            male_sum / total_sum
        };
        out.push(ProportionPoint {
            minute,
            proportion,
            male_sum,
            female_sum,
            total_sum,
        });
    }
    out
}
