//! Per-entity cumulative tables over the half-cycle time domain.
//!
//! For each entity and each phase, an ordered table of length L where slot
//! `t-1` holds the running sum of the entity's values for minutes `[1, t]`
//! under the configured accumulation policy. After the O(n) build, running
//! sums and averages at any minute are O(1) lookups.
//!
//! Two accumulation policies coexist because the query surface needs both
//! semantics; the policy is an explicit, required parameter of every build,
//! never an implicit default.

use crate::index::MinuteIndex;
use cd_common::{CycleClock, EntityId, Observation, Phase};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How observations accumulate into the per-entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationPolicy {
    /// Cross-day modulo fold: every observation's time is normalized onto a
    /// single 2L-minute cycle regardless of day, so the running sum at
    /// minute t covers all days of the dataset.
    FoldDays,

    /// Single-day window: only the selected day's observations contribute,
    /// so running sums reset at each day boundary.
    SingleDay(u32),
}

impl AccumulationPolicy {
    /// The selected day under `SingleDay`, if any.
    pub fn day(&self) -> Option<u32> {
        match self {
            AccumulationPolicy::FoldDays => None,
            AccumulationPolicy::SingleDay(day) => Some(*day),
        }
    }
}

impl std::fmt::Display for AccumulationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccumulationPolicy::FoldDays => write!(f, "fold_days"),
            AccumulationPolicy::SingleDay(day) => write!(f, "single_day({})", day),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct PhaseTables {
    light_off: Vec<f64>,
    light_on: Vec<f64>,
}

impl PhaseTables {
    fn for_phase(&self, phase: Phase) -> &[f64] {
        match phase {
            Phase::LightOff => &self.light_off,
            Phase::LightOn => &self.light_on,
        }
    }
}

/// Running-sum tables for every entity in the roster.
#[derive(Debug, Clone)]
pub struct CumulativeTable {
    half_cycle: u32,
    policy: AccumulationPolicy,
    tables: HashMap<EntityId, PhaseTables>,
}

impl CumulativeTable {
    /// Build tables for the given entities under one accumulation policy.
    ///
    /// Entities without observations in range get all-zero tables rather
    /// than being an error; `running_sum` for them is 0 at every minute.
    /// Under `SingleDay` the observations are taken through the index, so
    /// nothing outside the selected day can leak in.
    pub fn build(
        observations: &[Observation],
        entities: &[EntityId],
        clock: &CycleClock,
        policy: AccumulationPolicy,
        index: &MinuteIndex,
    ) -> CumulativeTable {
        let half = clock.half_cycle() as usize;
        let mut buckets: HashMap<EntityId, PhaseTables> = entities
            .iter()
            .map(|e| {
                (
                    e.clone(),
                    PhaseTables {
                        light_off: vec![0.0; half],
                        light_on: vec![0.0; half],
                    },
                )
            })
            .collect();

        if half > 0 {
            match policy {
                AccumulationPolicy::FoldDays => {
                    for obs in observations {
                        let Some((phase, minute)) = clock.folded(obs.time) else {
                            continue;
                        };
                        if let Some(tables) = buckets.get_mut(&obs.entity) {
                            let slot = (minute - 1) as usize;
                            match phase {
                                Phase::LightOff => tables.light_off[slot] += obs.value,
                                Phase::LightOn => tables.light_on[slot] += obs.value,
                            }
                        }
                    }
                }
                AccumulationPolicy::SingleDay(day) => {
                    for minute in 1..=clock.half_cycle() {
                        for phase in [Phase::LightOff, Phase::LightOn] {
                            for &i in index.indices(minute, day, phase) {
                                let obs = &observations[i];
                                if let Some(tables) = buckets.get_mut(&obs.entity) {
                                    let slot = (minute - 1) as usize;
                                    match phase {
                                        Phase::LightOff => tables.light_off[slot] += obs.value,
                                        Phase::LightOn => tables.light_on[slot] += obs.value,
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Prefix-sum each bucket row into a running-sum table.
            for tables in buckets.values_mut() {
                for row in [&mut tables.light_off, &mut tables.light_on] {
                    for t in 1..row.len() {
                        row[t] += row[t - 1];
                    }
                }
            }
        }

        CumulativeTable {
            half_cycle: clock.half_cycle(),
            policy,
            tables: buckets,
        }
    }

    /// Running sum of an entity's values over minutes `[1, t]` in a phase.
    ///
    /// Unknown entities and degenerate tables answer 0; `t` is clamped to
    /// the `[1, L]` domain.
    pub fn running_sum(&self, entity: &EntityId, phase: Phase, t: u32) -> f64 {
        if self.half_cycle == 0 {
            return 0.0;
        }
        let t = t.clamp(1, self.half_cycle);
        self.tables
            .get(entity)
            .map(|tables| tables.for_phase(phase)[(t - 1) as usize])
            .unwrap_or(0.0)
    }

    /// Running average over minutes `[1, t]`: `running_sum / t`.
    pub fn running_average(&self, entity: &EntityId, phase: Phase, t: u32) -> f64 {
        if self.half_cycle == 0 {
            return 0.0;
        }
        let t = t.clamp(1, self.half_cycle);
        self.running_sum(entity, phase, t) / t as f64
    }

    /// The policy this table was built under.
    pub fn policy(&self) -> AccumulationPolicy {
        self.policy
    }

    /// Minutes per phase (L).
    pub fn half_cycle(&self) -> u32 {
        self.half_cycle
    }

    /// Whether an entity has a table (i.e., was in the build roster).
    pub fn contains(&self, entity: &EntityId) -> bool {
        self.tables.contains_key(entity)
    }
}
