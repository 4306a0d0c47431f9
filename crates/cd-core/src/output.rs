//! Output rendering for CLI commands.
//!
//! Every command produces one serializable report; the report renders as
//! pretty JSON (default), a one-line summary, or Markdown tables. Payloads
//! go to stdout; logs stay on stderr.

use crate::profile::ProfileReport;
use crate::share::ShareReport;
use crate::summary::DatasetSummary;
use cd_common::{OutputFormat, Phase, Result, RunId};
use cd_engine::{AccumulationPolicy, ProportionPoint, RankedEntity};
use serde::Serialize;

/// A renderable command payload.
pub trait Render: Serialize {
    /// One-line human summary.
    fn summary_line(&self) -> String;

    /// Markdown rendering.
    fn markdown(&self) -> String;
}

/// Print a report to stdout in the requested format.
pub fn emit<T: Render>(format: OutputFormat, report: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Summary => println!("{}", report.summary_line()),
        OutputFormat::Md => println!("{}", report.markdown()),
    }
    Ok(())
}

/// A report stamped with run identity and generation time.
#[derive(Debug, Clone, Serialize)]
pub struct Stamped<T: Render> {
    pub run_id: RunId,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub report: T,
}

impl<T: Render> Stamped<T> {
    /// Stamp a report with a fresh run id and the current UTC time.
    pub fn new(report: T) -> Self {
        Stamped {
            run_id: RunId::new(),
            generated_at: chrono::Utc::now(),
            report,
        }
    }
}

impl<T: Render> Render for Stamped<T> {
    fn summary_line(&self) -> String {
        self.report.summary_line()
    }

    fn markdown(&self) -> String {
        self.report.markdown()
    }
}

/// Ranking query result plus the parameters that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub phase: Phase,
    pub day: u32,
    pub time: u32,
    pub policy: AccumulationPolicy,
    pub entries: Vec<RankedEntity>,
}

impl Render for RankingReport {
    fn summary_line(&self) -> String {
        match self.entries.first() {
            Some(top) => format!(
                "{} entities at {} t={} (day {}); top: {} ({:.2})",
                self.entries.len(),
                self.phase,
                self.time,
                self.day,
                top.entity,
                top.average
            ),
            None => format!(
                "no entities at {} t={} (day {})",
                self.phase, self.time, self.day
            ),
        }
    }

    fn markdown(&self) -> String {
        let mut out = format!(
            "# Ranking at {} t={} (day {}, {})\n\n| rank | entity | sex | running avg |\n|---|---|---|---|\n",
            self.phase, self.time, self.day, self.policy
        );
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {:.3} |\n",
                i + 1,
                entry.entity,
                entry.sex,
                entry.average
            ));
        }
        out
    }
}

/// Proportion series slice plus its query parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ProportionReport {
    pub phase: Phase,
    pub day: u32,
    pub max_time: u32,
    pub points: Vec<ProportionPoint>,
}

impl Render for ProportionReport {
    fn summary_line(&self) -> String {
        match self.points.last() {
            Some(last) => format!(
                "day {} {} t={}: male share {:.3} (male {:.1}, female {:.1})",
                self.day, self.phase, last.minute, last.proportion, last.male_sum, last.female_sum
            ),
            None => format!("day {} {}: empty series", self.day, self.phase),
        }
    }

    fn markdown(&self) -> String {
        let mut out = format!(
            "# Male share of accumulated value, day {} {}\n\n| minute | proportion | male | female | total |\n|---|---|---|---|---|\n",
            self.day, self.phase
        );
        for p in &self.points {
            out.push_str(&format!(
                "| {} | {:.3} | {:.1} | {:.1} | {:.1} |\n",
                p.minute, p.proportion, p.male_sum, p.female_sum, p.total_sum
            ));
        }
        out
    }
}

impl Render for DatasetSummary {
    fn summary_line(&self) -> String {
        let fmt = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{v:.2}"));
        format!(
            "{} observations of {} across {} entities ({}m/{}f), {} days, values {}..{}",
            self.observations,
            self.field,
            self.entities,
            self.males,
            self.females,
            self.total_days,
            fmt(self.min_value),
            fmt(self.max_value)
        )
    }

    fn markdown(&self) -> String {
        format!(
            "# Dataset summary\n\n\
             | field | entities | male | female | observations | max time | days | min | max |\n\
             |---|---|---|---|---|---|---|---|---|\n\
             | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            self.field,
            self.entities,
            self.males,
            self.females,
            self.observations,
            self.max_time,
            self.total_days,
            self.min_value.map_or("-".to_string(), |v| format!("{v:.2}")),
            self.max_value.map_or("-".to_string(), |v| format!("{v:.2}")),
        )
    }
}

impl Render for ProfileReport {
    fn summary_line(&self) -> String {
        let fmt = |m: Option<f64>| m.map_or("-".to_string(), |v| format!("{v:.2}"));
        format!(
            "hourly profile: male mean {}, female mean {}",
            fmt(self.male.overall_mean),
            fmt(self.female.overall_mean)
        )
    }

    fn markdown(&self) -> String {
        let fmt = |m: &Option<f64>| m.map_or("-".to_string(), |v| format!("{v:.2}"));
        let mut out = String::from(
            "# Hourly profile\n\n| hour | male mean | male p25 | male p75 | female mean | female p25 | female p75 |\n|---|---|---|---|---|---|---|\n",
        );
        for hour in 0..self.male.hourly_mean.len() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                hour,
                fmt(&self.male.hourly_mean[hour]),
                fmt(&self.male.p25[hour]),
                fmt(&self.male.p75[hour]),
                fmt(&self.female.hourly_mean[hour]),
                fmt(&self.female.p25[hour]),
                fmt(&self.female.p75[hour]),
            ));
        }
        out
    }
}

impl Render for ShareReport {
    fn summary_line(&self) -> String {
        let (off, on) = self.overall.percentages();
        format!("phase share: {:.1}% light-off, {:.1}% light-on", off, on)
    }

    fn markdown(&self) -> String {
        let row = |label: &str, share: &crate::share::PhaseShare| {
            let (off, on) = share.percentages();
            format!(
                "| {} | {:.1} | {:.1} | {:.1}% | {:.1}% |\n",
                label, share.light_off, share.light_on, off, on
            )
        };
        let mut out = String::from(
            "# Phase share\n\n| group | light-off | light-on | off % | on % |\n|---|---|---|---|---|\n",
        );
        out.push_str(&row("all", &self.overall));
        out.push_str(&row("male", &self.male));
        out.push_str(&row("female", &self.female));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cd_common::{EntityId, Sex};

    #[test]
    fn test_ranking_summary_line() {
        let report = RankingReport {
            phase: Phase::LightOff,
            day: 1,
            time: 2,
            policy: AccumulationPolicy::FoldDays,
            entries: vec![RankedEntity {
                entity: EntityId::from("f1"),
                average: 12.5,
                sex: Sex::Female,
            }],
        };
        let line = report.summary_line();
        assert!(line.contains("top: f1 (12.50)"));

        let md = report.markdown();
        assert!(md.contains("| 1 | f1 | female | 12.500 |"));
    }

    #[test]
    fn test_empty_ranking_renders() {
        let report = RankingReport {
            phase: Phase::LightOn,
            day: 2,
            time: 1,
            policy: AccumulationPolicy::SingleDay(2),
            entries: Vec::new(),
        };
        assert!(report.summary_line().contains("no entities"));
    }

    #[test]
    fn test_proportion_summary_line() {
        let report = ProportionReport {
            phase: Phase::LightOff,
            day: 1,
            max_time: 2,
            points: vec![ProportionPoint {
                minute: 2,
                proportion: 20.0 / 45.0,
                male_sum: 20.0,
                female_sum: 25.0,
                total_sum: 45.0,
            }],
        };
        assert!(report.summary_line().contains("male share 0.444"));
    }
}
