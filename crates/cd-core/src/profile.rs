//! Hourly profiles of the measured value, split by sex.
//!
//! For each hour of the folded day (24 bins under the default clock), the
//! mean and the 25th/75th percentile of one sex's values, plus the overall
//! mean across all hours. Supports restricting to records with a given
//! estrus flag, for comparing estrus days against neighboring days.

use cd_common::{CycleClock, Observation, Sex};
use cd_engine::stats;
use serde::Serialize;

const MINUTES_PER_HOUR: u32 = 60;

/// Hourly statistics for one sex.
#[derive(Debug, Clone, Serialize)]
pub struct SexProfile {
    pub sex: Sex,

    /// Mean value per hour of the folded day; `null` for silent hours.
    pub hourly_mean: Vec<Option<f64>>,

    /// 25th percentile per hour.
    pub p25: Vec<Option<f64>>,

    /// 75th percentile per hour.
    pub p75: Vec<Option<f64>>,

    /// Mean across all of this sex's observations.
    pub overall_mean: Option<f64>,
}

/// Hourly profiles for both sexes.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub male: SexProfile,
    pub female: SexProfile,
}

/// Number of hour bins in one folded day.
pub fn hour_bins(clock: &CycleClock) -> usize {
    clock.full_cycle().div_ceil(MINUTES_PER_HOUR) as usize
}

/// Hour-of-day bin for an absolute minute, folding all days together.
fn hour_of_day(clock: &CycleClock, time: u32) -> Option<usize> {
    if clock.is_degenerate() {
        return None;
    }
    let time = time.max(1);
    let cycle_pos = (time - 1) % clock.full_cycle();
    Some((cycle_pos / MINUTES_PER_HOUR) as usize)
}

/// Build the hourly profile for one sex.
///
/// `estrus` of `Some(flag)` keeps only observations whose recorded estrus
/// state equals `flag`; `None` keeps everything.
pub fn hourly_profile(
    observations: &[Observation],
    clock: &CycleClock,
    sex: Sex,
    estrus: Option<bool>,
) -> SexProfile {
    let bins = hour_bins(clock);
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); bins];
    let mut all = Vec::new();

    for obs in observations {
        if obs.sex != sex {
            continue;
        }
        if let Some(flag) = estrus {
            if obs.estrus != Some(flag) {
                continue;
            }
        }
        let Some(hour) = hour_of_day(clock, obs.time) else {
            continue;
        };
        buckets[hour].push(obs.value);
        all.push(obs.value);
    }

    SexProfile {
        sex,
        hourly_mean: buckets.iter().map(|b| stats::mean(b)).collect(),
        p25: buckets.iter().map(|b| stats::quantile(b, 0.25)).collect(),
        p75: buckets.iter().map(|b| stats::quantile(b, 0.75)).collect(),
        overall_mean: stats::mean(&all),
    }
}

/// Hourly profiles for both sexes over the same observation set.
pub fn profile_report(
    observations: &[Observation],
    clock: &CycleClock,
    estrus: Option<bool>,
) -> ProfileReport {
    ProfileReport {
        male: hourly_profile(observations, clock, Sex::Male, estrus),
        female: hourly_profile(observations, clock, Sex::Female, estrus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(entity: &str, time: u32, value: f64, sex: Sex) -> Observation {
        Observation::new(entity, time, value, sex)
    }

    #[test]
    fn test_hour_bins_default_clock() {
        assert_eq!(hour_bins(&CycleClock::default()), 24);
    }

    #[test]
    fn test_hour_of_day_folds_days() {
        let clock = CycleClock::default();
        assert_eq!(hour_of_day(&clock, 1), Some(0));
        assert_eq!(hour_of_day(&clock, 60), Some(0));
        assert_eq!(hour_of_day(&clock, 61), Some(1));
        assert_eq!(hour_of_day(&clock, 1440), Some(23));
        // Day 2 minute 1 lands back in hour 0.
        assert_eq!(hour_of_day(&clock, 1441), Some(0));
    }

    #[test]
    fn test_profile_means_and_percentiles() {
        let clock = CycleClock::default();
        let data = vec![
            obs("f1", 1, 36.0, Sex::Female),
            obs("f1", 2, 38.0, Sex::Female),
            obs("f2", 61, 37.0, Sex::Female),
            obs("m1", 1, 35.0, Sex::Male),
        ];
        let profile = hourly_profile(&data, &clock, Sex::Female, None);

        assert_eq!(profile.hourly_mean[0], Some(37.0));
        assert_eq!(profile.hourly_mean[1], Some(37.0));
        assert_eq!(profile.hourly_mean[2], None);
        assert_eq!(profile.p25[0], Some(36.5));
        assert_eq!(profile.p75[0], Some(37.5));
        assert_eq!(profile.overall_mean, Some(37.0));
    }

    #[test]
    fn test_estrus_filter() {
        let clock = CycleClock::default();
        let mut in_estrus = obs("f1", 1, 38.0, Sex::Female);
        in_estrus.estrus = Some(true);
        let mut not_in_estrus = obs("f1", 2, 36.0, Sex::Female);
        not_in_estrus.estrus = Some(false);
        let unknown = obs("f2", 3, 30.0, Sex::Female);
        let data = vec![in_estrus, not_in_estrus, unknown];

        let estrus_only = hourly_profile(&data, &clock, Sex::Female, Some(true));
        assert_eq!(estrus_only.overall_mean, Some(38.0));

        let non_estrus = hourly_profile(&data, &clock, Sex::Female, Some(false));
        assert_eq!(non_estrus.overall_mean, Some(36.0));

        // Unfiltered includes records without an estrus flag.
        let all = hourly_profile(&data, &clock, Sex::Female, None);
        assert_eq!(all.overall_mean, Some((38.0 + 36.0 + 30.0) / 3.0));
    }

    #[test]
    fn test_empty_input() {
        let clock = CycleClock::default();
        let profile = hourly_profile(&[], &clock, Sex::Male, None);
        assert_eq!(profile.hourly_mean.len(), 24);
        assert!(profile.hourly_mean.iter().all(|m| m.is_none()));
        assert_eq!(profile.overall_mean, None);
    }
}
