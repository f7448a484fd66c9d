//! Peak-hour selection.
//!
//! Both selection strategies share one per-day routine: rank candidates,
//! run a greedy pass under the minimum-spacing constraint, then fall through
//! relaxation tiers until the schedule holds exactly `num_peaks` hours. The
//! production selector ranks by raw activity; the stability-weighted variant
//! ranks by activity x stability and exists as a comparison baseline.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityTable, Weekday, DAY_END_HOUR, DAY_START_HOUR};
use crate::error::{Result, ValidationError};
use crate::schedule::{PeakSchedule, MAX_PEAKS_PER_DAY};
use crate::stability::StabilityMap;

/// Tunable selection policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorPolicy {
    /// Peak hours to select per day (1-4)
    #[serde(default = "default_num_peaks")]
    pub num_peaks: usize,
    /// Minimum distance in hours between selected hours
    #[serde(default = "default_min_spacing")]
    pub min_spacing_hours: u8,
    /// Fallback hours injected for days with too little data
    #[serde(default = "default_hours")]
    pub default_hours: Vec<u8>,
}

fn default_num_peaks() -> usize {
    3
}

fn default_min_spacing() -> u8 {
    3
}

fn default_hours() -> Vec<u8> {
    vec![9, 14, 19]
}

impl Default for SelectorPolicy {
    fn default() -> Self {
        Self {
            num_peaks: default_num_peaks(),
            min_spacing_hours: default_min_spacing(),
            default_hours: default_hours(),
        }
    }
}

impl SelectorPolicy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_PEAKS_PER_DAY).contains(&self.num_peaks) {
            return Err(ValidationError::InvalidPeakCount {
                count: self.num_peaks,
            });
        }
        if self.min_spacing_hours == 0 {
            return Err(ValidationError::InvalidValue {
                field: "min_spacing_hours".to_string(),
                message: "spacing must be at least 1 hour".to_string(),
            });
        }
        let mut seen = [false; 24];
        for &hour in &self.default_hours {
            if !crate::activity::is_daytime_hour(hour) {
                return Err(ValidationError::HourOutOfRange { hour });
            }
            if seen[hour as usize] {
                return Err(ValidationError::InvalidValue {
                    field: "default_hours".to_string(),
                    message: format!("duplicate default hour {hour}"),
                });
            }
            seen[hour as usize] = true;
        }
        Ok(())
    }
}

/// How a selected hour made it into the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectionTier {
    /// Accepted by the greedy pass with the spacing constraint intact
    Greedy,
    /// Taken from the candidate pool after relaxing the spacing constraint
    RelaxedPool,
    /// Injected from the policy's default hours
    DefaultHours,
    /// Filled from the remaining daytime window once defaults ran out
    WindowFill,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PickedHour {
    pub hour: u8,
    pub tier: SelectionTier,
}

/// Select hours for one day from ranked `(hour, score)` candidates.
///
/// Candidates must arrive sorted by ascending hour; ranking breaks score
/// ties by that order, which makes the tie-break an explicit secondary key.
pub(crate) fn select_day(candidates: &[(u8, f64)], policy: &SelectorPolicy) -> Vec<PickedHour> {
    let mut picked: Vec<PickedHour> = Vec::with_capacity(policy.num_peaks);

    if !candidates.is_empty() {
        // Candidate pool: top 2*num_peaks by score, ties by ascending hour.
        let mut pool = candidates.to_vec();
        pool.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        pool.truncate(policy.num_peaks * 2);

        // Greedy pass: accept an hour only if it keeps its distance from
        // everything accepted so far.
        for &(hour, _) in &pool {
            if picked.len() >= policy.num_peaks {
                break;
            }
            if picked
                .iter()
                .all(|p| hour.abs_diff(p.hour) >= policy.min_spacing_hours)
            {
                picked.push(PickedHour {
                    hour,
                    tier: SelectionTier::Greedy,
                });
            }
        }

        // Tier 1: spacing relaxed, refill from the pool in score order.
        for &(hour, _) in &pool {
            if picked.len() >= policy.num_peaks {
                break;
            }
            if picked.iter().all(|p| p.hour != hour) {
                picked.push(PickedHour {
                    hour,
                    tier: SelectionTier::RelaxedPool,
                });
            }
        }
    }

    // Tier 2: literal default hours, duplicates skipped.
    for &hour in &policy.default_hours {
        if picked.len() >= policy.num_peaks {
            break;
        }
        if picked.iter().all(|p| p.hour != hour) {
            picked.push(PickedHour {
                hour,
                tier: SelectionTier::DefaultHours,
            });
        }
    }

    // Tier 3: defaults exhausted (num_peaks above the default list length);
    // fill with the lowest unused daytime hours.
    for hour in DAY_START_HOUR..=DAY_END_HOUR {
        if picked.len() >= policy.num_peaks {
            break;
        }
        if picked.iter().all(|p| p.hour != hour) {
            picked.push(PickedHour {
                hour,
                tier: SelectionTier::WindowFill,
            });
        }
    }

    picked.sort_by_key(|p| p.hour);
    picked.truncate(policy.num_peaks);
    picked
}

fn schedule_from_days(
    days: BTreeMap<Weekday, Vec<PickedHour>>,
) -> Result<PeakSchedule, ValidationError> {
    let hours = days
        .into_iter()
        .map(|(day, picked)| (day, picked.into_iter().map(|p| p.hour).collect()))
        .collect();
    PeakSchedule::from_days(hours)
}

/// The production selector: greedy, spacing-aware selection of the most
/// active hours per weekday.
#[derive(Debug, Clone, Default)]
pub struct PeakHourSelector {
    policy: SelectorPolicy,
}

impl PeakHourSelector {
    /// Create a selector with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector with a custom policy.
    pub fn with_policy(policy: SelectorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SelectorPolicy {
        &self.policy
    }

    /// Select peak hours for every weekday, ranking by raw activity.
    pub fn select(&self, table: &ActivityTable) -> Result<PeakSchedule> {
        self.policy.validate()?;
        let mut days = BTreeMap::new();
        for day in Weekday::ALL {
            let candidates: Vec<(u8, f64)> = table
                .day_rows(day)
                .iter()
                .map(|r| (r.hour, r.minutes))
                .collect();
            days.insert(day, select_day(&candidates, &self.policy));
        }
        Ok(schedule_from_days(days)?)
    }
}

/// Comparison baseline that weights candidates by activity x stability.
///
/// Structurally identical to [`PeakHourSelector`]; only the ranking score
/// differs. The default-hour tier stays unweighted on purpose: defaults are
/// a safety net, not a ranked choice.
#[derive(Debug, Clone, Default)]
pub struct StabilityWeightedSelector {
    policy: SelectorPolicy,
}

impl StabilityWeightedSelector {
    /// Create a selector with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector with a custom policy.
    pub fn with_policy(policy: SelectorPolicy) -> Self {
        Self { policy }
    }

    /// Select peak hours for every weekday, ranking by activity x stability.
    pub fn select(&self, table: &ActivityTable, stability: &StabilityMap) -> Result<PeakSchedule> {
        self.policy.validate()?;
        let mut days = BTreeMap::new();
        for day in Weekday::ALL {
            let candidates: Vec<(u8, f64)> = table
                .day_rows(day)
                .iter()
                .map(|r| (r.hour, r.minutes * stability.get(day, r.hour)))
                .collect();
            days.insert(day, select_day(&candidates, &self.policy));
        }
        Ok(schedule_from_days(days)?)
    }
}
