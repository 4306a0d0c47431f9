//! Analysis session: the owner of all built engine structures.
//!
//! One session corresponds to one loaded dataset. It owns the observation
//! list, the entity roster in discovery order, the minute index, the
//! cumulative table for the current accumulation policy, and the
//! proportion-series cache. Queries go through the session so nothing
//! reads a structure that is still being (re)built: every build runs to
//! completion before the session is handed back to the caller.
//!
//! Switching the policy (or selected day) rebuilds only the cumulative
//! table; the index never changes for a given dataset, and cached
//! proportion series are keyed by (day, phase) so entries for other days
//! remain valid.

use crate::cumulative::{AccumulationPolicy, CumulativeTable};
use crate::index::MinuteIndex;
use crate::proportion::{ProportionCache, ProportionPoint};
use crate::ranking::{rank_at, EntityInfo, RankingResult};
use cd_common::{CycleClock, EntityId, Observation, Phase};

/// A loaded dataset plus every structure derived from it.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    clock: CycleClock,
    observations: Vec<Observation>,
    roster: Vec<EntityInfo>,
    max_time: u32,
    index: MinuteIndex,
    table: CumulativeTable,
    proportions: ProportionCache,
}

impl AnalysisSession {
    /// Build a session over an observation set.
    ///
    /// Construction is synchronous and complete: after this returns, every
    /// query path is ready. An empty observation set builds an empty
    /// session whose queries all answer empty results.
    pub fn build(
        observations: Vec<Observation>,
        clock: CycleClock,
        policy: AccumulationPolicy,
    ) -> AnalysisSession {
        let mut roster: Vec<EntityInfo> = Vec::new();
        let mut max_time = 0;
        for obs in &observations {
            max_time = max_time.max(obs.time);
            if !roster.iter().any(|info| info.entity == obs.entity) {
                roster.push(EntityInfo {
                    entity: obs.entity.clone(),
                    sex: obs.sex,
                });
            }
        }

        let index = MinuteIndex::build(&observations, &clock);
        let entities: Vec<EntityId> = roster.iter().map(|info| info.entity.clone()).collect();
        let table = CumulativeTable::build(&observations, &entities, &clock, policy, &index);
        let proportions = ProportionCache::new(clock.half_cycle());

        AnalysisSession {
            clock,
            observations,
            roster,
            max_time,
            index,
            table,
            proportions,
        }
    }

    /// Switch the accumulation policy, rebuilding only the cumulative
    /// table. The index and the proportion cache are untouched.
    pub fn set_policy(&mut self, policy: AccumulationPolicy) {
        if policy == self.table.policy() {
            return;
        }
        let entities: Vec<EntityId> = self.roster.iter().map(|info| info.entity.clone()).collect();
        self.table = CumulativeTable::build(
            &self.observations,
            &entities,
            &self.clock,
            policy,
            &self.index,
        );
    }

    /// Convenience for the day-selector control: single-day accumulation
    /// for `day`.
    pub fn select_day(&mut self, day: u32) {
        self.set_policy(AccumulationPolicy::SingleDay(day));
    }

    /// Entities ranked by running average at minute `t` of `phase`.
    ///
    /// `day` feeds the instantaneous branch at `t == 1` (and has no other
    /// effect; the cumulative side is governed by the session policy).
    pub fn ranking(&self, phase: Phase, day: u32, t: u32) -> RankingResult {
        rank_at(
            &self.table,
            &self.index,
            &self.observations,
            &self.roster,
            phase,
            day,
            t,
        )
    }

    /// Proportion series for (day, phase), truncated to `max_t` minutes.
    pub fn proportion_series(&mut self, day: u32, phase: Phase, max_t: u32) -> &[ProportionPoint] {
        self.proportions
            .series(&self.index, &self.observations, day, phase, max_t)
    }

    /// Warm the proportion cache for every (day, phase) pair.
    pub fn precompute_proportions(&mut self) {
        let total = self.total_days();
        self.proportions
            .precompute_all(&self.index, &self.observations, total);
    }

    /// Running average for one entity (tooltip lookups). `None` when the
    /// entity is not in the roster.
    pub fn running_average(&self, entity: &EntityId, phase: Phase, t: u32) -> Option<f64> {
        if !self.table.contains(entity) {
            return None;
        }
        Some(self.table.running_average(entity, phase, t))
    }

    /// The entity roster in dataset discovery order.
    pub fn roster(&self) -> &[EntityInfo] {
        &self.roster
    }

    /// The observations this session was built over.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Highest absolute minute in the dataset (0 when empty).
    pub fn max_time(&self) -> u32 {
        self.max_time
    }

    /// Number of (possibly partial) days the dataset covers.
    pub fn total_days(&self) -> u32 {
        self.clock.day_count(self.max_time)
    }

    /// The light-cycle clock.
    pub fn clock(&self) -> &CycleClock {
        &self.clock
    }

    /// The active accumulation policy.
    pub fn policy(&self) -> AccumulationPolicy {
        self.table.policy()
    }

    /// Full-length proportion series computed so far (cache
    /// instrumentation; lets callers verify memoization).
    pub fn proportion_computations(&self) -> usize {
        self.proportions.computations()
    }
}
