//! Phase share of accumulated value: how much of the total falls in the
//! dark half versus the lit half, per sex and overall.

use cd_common::{CycleClock, Observation, Phase, Sex};
use serde::Serialize;

/// Accumulated value split between the two phases.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PhaseShare {
    pub light_off: f64,
    pub light_on: f64,
}

impl PhaseShare {
    fn add(&mut self, phase: Phase, value: f64) {
        match phase {
            Phase::LightOff => self.light_off += value,
            Phase::LightOn => self.light_on += value,
        }
    }

    /// Total accumulated value across both phases.
    pub fn total(&self) -> f64 {
        self.light_off + self.light_on
    }

    /// Percentage split (light_off, light_on). A zero total answers
    /// (0, 0) rather than NaN.
    pub fn percentages(&self) -> (f64, f64) {
        let total = self.total();
        if total == 0.0 {
            return (0.0, 0.0);
        }
        (
            self.light_off / total * 100.0,
            self.light_on / total * 100.0,
        )
    }
}

/// Phase shares for the whole dataset and per sex.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ShareReport {
    pub overall: PhaseShare,
    pub male: PhaseShare,
    pub female: PhaseShare,
}

/// Accumulate every observation's value into its folded phase.
pub fn share_report(observations: &[Observation], clock: &CycleClock) -> ShareReport {
    let mut report = ShareReport::default();
    for obs in observations {
        let Some((phase, _)) = clock.folded(obs.time) else {
            continue;
        };
        report.overall.add(phase, obs.value);
        match obs.sex {
            Sex::Male => report.male.add(phase, obs.value),
            Sex::Female => report.female.add(phase, obs.value),
        }
    }
    report
}
