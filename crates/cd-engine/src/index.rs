//! Minute-of-phase index over an observation set.
//!
//! Built once per dataset load in a single O(n) pass; immutable after
//! construction (rebuilt wholesale on dataset change, never patched).
//! Lookup of all observations active at a given (minute, day) is O(1)
//! amortized.

use cd_common::{CycleClock, Observation, Phase};
use std::collections::HashMap;

const EMPTY: &[usize] = &[];

/// Observations active in one minute-of-day, partitioned by phase.
///
/// Entries are indices into the observation slice the index was built from.
#[derive(Debug, Clone, Default)]
pub struct MinuteSlot {
    pub light_off: Vec<usize>,
    pub light_on: Vec<usize>,
}

impl MinuteSlot {
    /// The partition for one phase.
    pub fn for_phase(&self, phase: Phase) -> &[usize] {
        match phase {
            Phase::LightOff => &self.light_off,
            Phase::LightOn => &self.light_on,
        }
    }
}

/// Mapping from (minute-of-phase, day) to the observations active in that
/// minute.
#[derive(Debug, Clone, Default)]
pub struct MinuteIndex {
    slots: HashMap<(u32, u32), MinuteSlot>,
    indexed: usize,
}

impl MinuteIndex {
    /// Build the index in one pass over the observations.
    ///
    /// An empty observation set or a degenerate clock (zero half-cycle)
    /// yields an empty index; callers handle empty lookups, this is not an
    /// error.
    pub fn build(observations: &[Observation], clock: &CycleClock) -> MinuteIndex {
        let mut slots: HashMap<(u32, u32), MinuteSlot> = HashMap::new();
        if clock.is_degenerate() {
            return MinuteIndex { slots, indexed: 0 };
        }
        for (i, obs) in observations.iter().enumerate() {
            let Some(pos) = clock.position(obs.time) else {
                continue;
            };
            let slot = slots.entry((pos.minute, pos.day)).or_default();
            match pos.phase {
                Phase::LightOff => slot.light_off.push(i),
                Phase::LightOn => slot.light_on.push(i),
            }
        }
        MinuteIndex {
            slots,
            indexed: observations.len(),
        }
    }

    /// All observation indices for a (minute, day, phase) triple.
    ///
    /// Absent slots answer with an empty slice.
    pub fn indices(&self, minute: u32, day: u32, phase: Phase) -> &[usize] {
        self.slots
            .get(&(minute, day))
            .map(|slot| slot.for_phase(phase))
            .unwrap_or(EMPTY)
    }

    /// The full slot for a (minute, day) pair, if any observation fell there.
    pub fn slot(&self, minute: u32, day: u32) -> Option<&MinuteSlot> {
        self.slots.get(&(minute, day))
    }

    /// Number of observations this index was built over.
    pub fn indexed_len(&self) -> usize {
        self.indexed
    }

    /// True when no observation was indexed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
