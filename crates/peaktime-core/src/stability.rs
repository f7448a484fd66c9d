//! Week-to-week stability scoring.
//!
//! For every (weekday, hour) bucket, how consistent are the weekly activity
//! totals across the observation period? Scores derive from the coefficient
//! of variation of weekly sums, inverted and clipped so low relative variance
//! maps to scores near 1.0. The stability-weighted selector uses these scores
//! to discount spiky hours.

use std::collections::HashMap;

use crate::activity::{is_daytime_hour, ActivityEvent, Weekday, DAY_END_HOUR, DAY_START_HOUR};

/// Score used when a bucket has no data at all.
const SCORE_NO_DATA: f64 = 0.0;

/// Score used when there is not enough evidence to judge consistency:
/// a single observed week, or a zero mean.
const SCORE_INSUFFICIENT: f64 = 0.5;

/// Per-bucket stability scores in [0, 1].
#[derive(Debug, Clone, Default)]
pub struct StabilityMap {
    scores: HashMap<(Weekday, u8), f64>,
}

impl StabilityMap {
    /// Score for one bucket. Buckets the scorer never saw fall back to the
    /// insufficient-evidence score.
    pub fn get(&self, day: Weekday, hour: u8) -> f64 {
        self.scores
            .get(&(day, hour))
            .copied()
            .unwrap_or(SCORE_INSUFFICIENT)
    }

    /// Number of scored buckets.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether any bucket has been scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Computes per-bucket stability scores from raw events.
///
/// Pure function of its input: the scorer never annotates or mutates the
/// caller's data.
#[derive(Debug, Clone)]
pub struct StabilityScorer {
    /// Cap on the coefficient of variation before inversion, so a score
    /// never goes negative
    pub cv_cap: f64,
}

impl Default for StabilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilityScorer {
    /// Create a scorer with the standard CV cap of 1.0.
    pub fn new() -> Self {
        Self { cv_cap: 1.0 }
    }

    /// Score every (weekday, hour) bucket in the daytime window.
    ///
    /// Events are partitioned by bucket and then by ISO (year, week); the
    /// score for a bucket is `max(0, 1 - min(cv, cap))` over its weekly sums,
    /// with the special cases: no data at all scores 0.0, and a single
    /// observed week or a zero mean scores 0.5.
    pub fn compute(&self, events: &[ActivityEvent]) -> StabilityMap {
        let mut weekly: HashMap<(Weekday, u8), HashMap<(i32, u32), f64>> = HashMap::new();
        for event in events {
            let hour = event.hour();
            if !is_daytime_hour(hour) {
                continue;
            }
            *weekly
                .entry((event.weekday(), hour))
                .or_default()
                .entry(event.iso_week())
                .or_insert(0.0) += event.minutes;
        }

        let mut scores = HashMap::new();
        for day in Weekday::ALL {
            for hour in DAY_START_HOUR..=DAY_END_HOUR {
                let score = match weekly.get(&(day, hour)) {
                    None => SCORE_NO_DATA,
                    Some(weeks) => self.score_weekly_sums(weeks.values().copied()),
                };
                scores.insert((day, hour), score);
            }
        }
        StabilityMap { scores }
    }

    fn score_weekly_sums(&self, sums: impl Iterator<Item = f64>) -> f64 {
        let sums: Vec<f64> = sums.collect();
        if sums.len() < 2 {
            return SCORE_INSUFFICIENT;
        }
        let mean = sums.iter().sum::<f64>() / sums.len() as f64;
        if mean <= 0.0 {
            return SCORE_INSUFFICIENT;
        }
        // Sample standard deviation (n-1)
        let variance =
            sums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (sums.len() - 1) as f64;
        let cv = variance.sqrt() / mean;
        (1.0 - cv.min(self.cv_cap)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(date: (i32, u32, u32), hour: u32, minutes: f64) -> ActivityEvent {
        ActivityEvent {
            timestamp: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            minutes,
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn test_empty_bucket_scores_zero() {
        let map = StabilityScorer::new().compute(&[]);
        assert_eq!(map.get(Weekday::Monday, 9), 0.0);
        // One score per daytime bucket across all seven days
        assert_eq!(map.len(), 7 * 18);
    }

    #[test]
    fn test_single_week_scores_half() {
        // Both events land in the same ISO week
        let events = vec![
            event((2024, 1, 15), 9, 30.0),
            event((2024, 1, 15), 9, 20.0),
        ];
        let map = StabilityScorer::new().compute(&events);
        assert_eq!(map.get(Weekday::Monday, 9), 0.5);
    }

    #[test]
    fn test_identical_weeks_score_one() {
        // Mondays 9:00 in three consecutive ISO weeks, same total each week
        let events = vec![
            event((2024, 1, 8), 9, 40.0),
            event((2024, 1, 15), 9, 40.0),
            event((2024, 1, 22), 9, 40.0),
        ];
        let map = StabilityScorer::new().compute(&events);
        assert!((map.get(Weekday::Monday, 9) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_variable_weeks_score_between() {
        let events = vec![
            event((2024, 1, 8), 9, 10.0),
            event((2024, 1, 15), 9, 50.0),
        ];
        let map = StabilityScorer::new().compute(&events);
        // mean 30, sample stddev sqrt(800) ~= 28.28, cv ~= 0.943
        let score = map.get(Weekday::Monday, 9);
        assert!(score > 0.0 && score < 0.1, "score = {score}");
    }

    #[test]
    fn test_high_variance_clips_to_zero() {
        let events = vec![
            event((2024, 1, 8), 9, 1.0),
            event((2024, 1, 15), 9, 200.0),
        ];
        let map = StabilityScorer::new().compute(&events);
        assert_eq!(map.get(Weekday::Monday, 9), 0.0);
    }

    #[test]
    fn test_nighttime_events_ignored() {
        let events = vec![
            event((2024, 1, 8), 2, 40.0),
            event((2024, 1, 15), 2, 40.0),
        ];
        let map = StabilityScorer::new().compute(&events);
        assert_eq!(map.get(Weekday::Monday, 9), 0.0);
    }

    #[test]
    fn test_unscored_lookup_defaults_to_half() {
        let map = StabilityMap::default();
        assert!(map.is_empty());
        assert_eq!(map.get(Weekday::Sunday, 12), 0.5);
    }

    #[test]
    fn test_weekly_sums_split_across_iso_weeks() {
        // Sunday 2024-01-14 is ISO week 2, Sunday 2024-01-21 is week 3;
        // equal totals give a perfect score even though dates differ.
        let events = vec![
            event((2024, 1, 14), 12, 25.0),
            event((2024, 1, 21), 12, 25.0),
        ];
        let map = StabilityScorer::new().compute(&events);
        assert!((map.get(Weekday::Sunday, 12) - 1.0).abs() < 1e-9);
    }
}
