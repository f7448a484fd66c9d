//! Coverage evaluation.
//!
//! How much of the total activity falls inside a schedule's selected hours,
//! per day and overall. Pure function of the (table, schedule) pair.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityTable, Weekday};
use crate::error::Result;
use crate::schedule::PeakSchedule;

/// Coverage achieved by one schedule against one activity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Fraction of all activity captured, 0-100
    pub overall_coverage_pct: f64,
    /// Per-day captured fraction, 0-100
    pub daily_coverage_pct: BTreeMap<Weekday, f64>,
    /// Total activity in the table, minutes
    pub total_activity: f64,
    /// Activity inside selected hours, minutes
    pub covered_activity: f64,
}

/// Scores schedules against an activity table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageEvaluator;

impl CoverageEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a schedule. Days without activity score 0; an entirely empty
    /// table scores 0 overall.
    pub fn evaluate(&self, table: &ActivityTable, schedule: &PeakSchedule) -> Result<CoverageReport> {
        schedule.validate()?;

        let mut daily = BTreeMap::new();
        let mut covered_total = 0.0;
        for day in Weekday::ALL {
            let day_total = table.day_total(day);
            let day_covered: f64 = schedule
                .hours(day)
                .iter()
                .map(|&hour| table.minutes_at(day, hour))
                .sum();
            daily.insert(day, percentage(day_covered, day_total));
            covered_total += day_covered;
        }

        let total = table.total();
        let overall = percentage(covered_total, total);

        Ok(CoverageReport {
            overall_coverage_pct: overall,
            daily_coverage_pct: daily,
            total_activity: total,
            covered_activity: covered_total,
        })
    }
}

/// Covered share as a percentage, guarded to 0 for an empty denominator.
///
/// Divides before scaling and clamps: multiplying first can round a fully
/// covered bucket to just above 100, and summation order can leave the
/// covered sum an ulp past the total.
fn percentage(covered: f64, total: f64) -> f64 {
    if total > 0.0 {
        (covered / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
