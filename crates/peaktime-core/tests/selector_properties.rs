//! Property tests for selection and coverage invariants.

use std::collections::HashSet;

use peaktime_core::{
    ActivityTable, CoverageEvaluator, HourlyActivityRow, PeakHourSelector, SelectorPolicy, Weekday,
};
use proptest::prelude::*;

/// Arbitrary bucket list; duplicates removed before table construction.
fn arb_rows() -> impl Strategy<Value = Vec<HourlyActivityRow>> {
    proptest::collection::vec((0usize..7, 6u8..=23, 0.0f64..5000.0), 0..60).prop_map(|entries| {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|&(day, hour, _)| seen.insert((day, hour)))
            .map(|(day, hour, minutes)| HourlyActivityRow {
                weekday: Weekday::ALL[day],
                hour,
                minutes,
            })
            .collect()
    })
}

fn policy(num_peaks: usize) -> SelectorPolicy {
    SelectorPolicy {
        num_peaks,
        ..Default::default()
    }
}

proptest! {
    /// Every day gets exactly num_peaks distinct, ascending daytime hours,
    /// whatever the table looks like.
    #[test]
    fn selection_invariants_hold(rows in arb_rows(), num_peaks in 1usize..=4) {
        let table = ActivityTable::new(rows).unwrap();
        let schedule = PeakHourSelector::with_policy(policy(num_peaks))
            .select(&table)
            .unwrap();
        for day in Weekday::ALL {
            let hours = schedule.hours(day);
            prop_assert_eq!(hours.len(), num_peaks);
            prop_assert!(hours.iter().all(|&h| (6..=23).contains(&h)));
            prop_assert!(hours.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Coverage percentages stay inside [0, 100].
    #[test]
    fn coverage_stays_in_bounds(rows in arb_rows(), num_peaks in 1usize..=4) {
        let table = ActivityTable::new(rows).unwrap();
        let schedule = PeakHourSelector::with_policy(policy(num_peaks))
            .select(&table)
            .unwrap();
        let report = CoverageEvaluator::new().evaluate(&table, &schedule).unwrap();
        prop_assert!((0.0..=100.0).contains(&report.overall_coverage_pct));
        for pct in report.daily_coverage_pct.values() {
            prop_assert!((0.0..=100.0).contains(pct));
        }
        prop_assert!(report.covered_activity <= report.total_activity + 1e-6);
    }

    /// The day's single most active hour is always covered: the greedy pass
    /// accepts the top-ranked candidate unconditionally, and later tiers
    /// never remove it.
    #[test]
    fn top_hour_always_selected(rows in arb_rows(), num_peaks in 1usize..=4) {
        let table = ActivityTable::new(rows).unwrap();
        let schedule = PeakHourSelector::with_policy(policy(num_peaks))
            .select(&table)
            .unwrap();
        for day in Weekday::ALL {
            let top = table
                .day_rows(day)
                .iter()
                .max_by(|a, b| {
                    a.minutes
                        .partial_cmp(&b.minutes)
                        .unwrap()
                        .then(b.hour.cmp(&a.hour))
                });
            if let Some(top) = top {
                prop_assert!(
                    schedule.hours(day).contains(&top.hour),
                    "top hour {} missing on {:?}: {:?}",
                    top.hour,
                    day,
                    schedule.hours(day)
                );
            }
        }
    }

    /// Evaluating the same pair twice yields identical reports.
    #[test]
    fn evaluation_is_idempotent(rows in arb_rows()) {
        let table = ActivityTable::new(rows).unwrap();
        let schedule = PeakHourSelector::new().select(&table).unwrap();
        let evaluator = CoverageEvaluator::new();
        let first = evaluator.evaluate(&table, &schedule).unwrap();
        let second = evaluator.evaluate(&table, &schedule).unwrap();
        prop_assert_eq!(first, second);
    }
}
