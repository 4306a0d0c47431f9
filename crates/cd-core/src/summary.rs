//! Dataset extent summary: entity counts, time domain, value range.

use cd_common::{Sex, ValueField};
use cd_engine::{stats, AnalysisSession};
use serde::Serialize;

/// Extent of a loaded dataset, as reported by `summary` and `check`.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    /// Which measured quantity the values are.
    pub field: ValueField,

    pub entities: usize,
    pub males: usize,
    pub females: usize,
    pub observations: usize,

    /// Highest absolute minute in the dataset (0 when empty).
    pub max_time: u32,

    /// Days (possibly partial) the dataset covers.
    pub total_days: u32,

    /// Minutes per half-cycle the session was built with.
    pub half_cycle: u32,

    /// Minimum observed value, if any.
    pub min_value: Option<f64>,

    /// Maximum observed value, if any.
    pub max_value: Option<f64>,
}

/// Summarize a built session.
pub fn summarize(session: &AnalysisSession, field: ValueField) -> DatasetSummary {
    let values: Vec<f64> = session.observations().iter().map(|o| o.value).collect();
    let range = stats::extent(&values);
    let males = session
        .roster()
        .iter()
        .filter(|info| info.sex == Sex::Male)
        .count();

    DatasetSummary {
        field,
        entities: session.roster().len(),
        males,
        females: session.roster().len() - males,
        observations: session.observations().len(),
        max_time: session.max_time(),
        total_days: session.total_days(),
        half_cycle: session.clock().half_cycle(),
        min_value: range.map(|(lo, _)| lo),
        max_value: range.map(|(_, hi)| hi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cd_common::{CycleClock, Observation};
    use cd_engine::AccumulationPolicy;

    #[test]
    fn test_summarize() {
        let session = AnalysisSession::build(
            vec![
                Observation::new("m1", 1, 10.0, Sex::Male),
                Observation::new("f1", 1, 2.0, Sex::Female),
                Observation::new("f2", 1500, 40.0, Sex::Female),
            ],
            CycleClock::default(),
            AccumulationPolicy::FoldDays,
        );
        let summary = summarize(&session, ValueField::Activity);

        assert_eq!(summary.entities, 3);
        assert_eq!(summary.males, 1);
        assert_eq!(summary.females, 2);
        assert_eq!(summary.observations, 3);
        assert_eq!(summary.max_time, 1500);
        assert_eq!(summary.total_days, 2);
        assert_eq!(summary.min_value, Some(2.0));
        assert_eq!(summary.max_value, Some(40.0));
    }

    #[test]
    fn test_summarize_empty() {
        let session = AnalysisSession::build(
            Vec::new(),
            CycleClock::default(),
            AccumulationPolicy::FoldDays,
        );
        let summary = summarize(&session, ValueField::Temperature);
        assert_eq!(summary.entities, 0);
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.min_value, None);
    }
}
