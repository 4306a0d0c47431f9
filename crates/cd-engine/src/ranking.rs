//! Running-average ranking at a queried minute.

use crate::cumulative::CumulativeTable;
use crate::index::MinuteIndex;
use cd_common::{EntityId, Observation, Phase, Sex};
use serde::Serialize;

/// Roster entry: one entity in dataset discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    pub entity: EntityId,
    pub sex: Sex,
}

/// One row of a ranking result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub entity: EntityId,
    pub average: f64,
    pub sex: Sex,
}

/// Entities ordered by running average, descending. Ephemeral: recomputed
/// on every query, never persisted.
pub type RankingResult = Vec<RankedEntity>;

/// Rank entities by running average over minutes `[1, t]` of one phase.
///
/// At `t == 1` the entity's instantaneous value at that single minute is
/// used instead of the cumulative average. The two definitions coincide
/// only when the table was built for the queried day; under a cross-day
/// fold they diverge, so this stays an explicit branch (`day` selects which
/// day's minute 1 is read).
///
/// Non-finite averages are filtered out, never returned. Ties keep roster
/// order (the sort is stable), so the result is a pure function of its
/// inputs.
pub fn rank_at(
    table: &CumulativeTable,
    index: &MinuteIndex,
    observations: &[Observation],
    roster: &[EntityInfo],
    phase: Phase,
    day: u32,
    t: u32,
) -> RankingResult {
    if table.half_cycle() == 0 {
        return Vec::new();
    }
    let t = t.clamp(1, table.half_cycle());

    let mut ranked: RankingResult = if t == 1 {
        index
            .indices(1, day, phase)
            .iter()
            .map(|&i| {
                let obs = &observations[i];
                RankedEntity {
                    entity: obs.entity.clone(),
                    average: obs.value,
                    sex: obs.sex,
                }
            })
            .filter(|r| r.average.is_finite())
            .collect()
    } else {
        roster
            .iter()
            .map(|info| RankedEntity {
                entity: info.entity.clone(),
                average: table.running_average(&info.entity, phase, t),
                sex: info.sex,
            })
            .filter(|r| r.average.is_finite())
            .collect()
    };

    ranked.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulative::AccumulationPolicy;
    use cd_common::CycleClock;

    fn obs(entity: &str, time: u32, value: f64, sex: Sex) -> Observation {
        Observation::new(entity, time, value, sex)
    }

    struct Fixture {
        observations: Vec<Observation>,
        roster: Vec<EntityInfo>,
        index: MinuteIndex,
        table: CumulativeTable,
    }

    fn fixture(observations: Vec<Observation>, policy: AccumulationPolicy) -> Fixture {
        let clock = CycleClock::default();
        let mut roster: Vec<EntityInfo> = Vec::new();
        for obs in &observations {
            if !roster.iter().any(|info| info.entity == obs.entity) {
                roster.push(EntityInfo {
                    entity: obs.entity.clone(),
                    sex: obs.sex,
                });
            }
        }
        let entities: Vec<EntityId> = roster.iter().map(|info| info.entity.clone()).collect();
        let index = MinuteIndex::build(&observations, &clock);
        let table = CumulativeTable::build(&observations, &entities, &clock, policy, &index);
        Fixture {
            observations,
            roster,
            index,
            table,
        }
    }

    #[test]
    fn test_two_entity_scenario() {
        // m1: 10 + 10 = 20, f1: 5 + 20 = 25 at t=2.
        let fx = fixture(
            vec![
                obs("m1", 1, 10.0, Sex::Male),
                obs("f1", 1, 5.0, Sex::Female),
                obs("m1", 2, 10.0, Sex::Male),
                obs("f1", 2, 20.0, Sex::Female),
            ],
            AccumulationPolicy::FoldDays,
        );

        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            2,
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entity.as_str(), "f1");
        assert_eq!(ranked[0].average, 12.5);
        assert_eq!(ranked[1].entity.as_str(), "m1");
        assert_eq!(ranked[1].average, 10.0);
    }

    #[test]
    fn test_t1_uses_instantaneous_values() {
        let fx = fixture(
            vec![
                obs("m1", 1, 3.0, Sex::Male),
                obs("f1", 1, 8.0, Sex::Female),
                // Day 2 minute 1 has different values; the fold would mix them.
                obs("m1", 1441, 100.0, Sex::Male),
            ],
            AccumulationPolicy::FoldDays,
        );

        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            1,
        );

        // Day 1, minute 1: f1=8 over m1=3, not the folded 103 average.
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entity.as_str(), "f1");
        assert_eq!(ranked[0].average, 8.0);
        assert_eq!(ranked[1].average, 3.0);

        let day2 = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            2,
            1,
        );
        assert_eq!(day2.len(), 1);
        assert_eq!(day2[0].average, 100.0);
    }

    #[test]
    fn test_entity_without_observations_ranks_last_with_zero() {
        let fx = {
            let mut fx = fixture(
                vec![obs("m1", 2, 10.0, Sex::Male)],
                AccumulationPolicy::FoldDays,
            );
            fx.roster.push(EntityInfo {
                entity: EntityId::from("ghost"),
                sex: Sex::Female,
            });
            fx
        };

        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            2,
        );

        // 0/t is well-defined: the empty entity appears with average 0,
        // ranked last; it is not excluded as non-finite.
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].entity.as_str(), "ghost");
        assert_eq!(ranked[1].average, 0.0);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let fx = fixture(
            vec![
                obs("a", 1, 4.0, Sex::Male),
                obs("b", 1, 4.0, Sex::Female),
                obs("c", 1, 4.0, Sex::Male),
            ],
            AccumulationPolicy::FoldDays,
        );

        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            2,
        );

        let order: Vec<&str> = ranked.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_order_is_non_increasing() {
        let fx = fixture(
            vec![
                obs("a", 1, 1.0, Sex::Male),
                obs("b", 2, 50.0, Sex::Female),
                obs("c", 3, 25.0, Sex::Male),
                obs("d", 700, 60.0, Sex::Female),
            ],
            AccumulationPolicy::FoldDays,
        );

        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            700,
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].average >= pair[1].average);
        }
    }

    #[test]
    fn test_empty_dataset_ranks_empty() {
        let fx = fixture(Vec::new(), AccumulationPolicy::FoldDays);
        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            100,
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_non_finite_values_filtered_at_t1() {
        let fx = fixture(
            vec![
                obs("m1", 1, f64::NAN, Sex::Male),
                obs("f1", 1, 2.0, Sex::Female),
            ],
            AccumulationPolicy::FoldDays,
        );

        let ranked = rank_at(
            &fx.table,
            &fx.index,
            &fx.observations,
            &fx.roster,
            Phase::LightOff,
            1,
            1,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].entity.as_str(), "f1");
    }
}
