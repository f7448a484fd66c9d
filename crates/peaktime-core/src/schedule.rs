//! Peak schedules and the persisted notification schedule document.
//!
//! [`PeakSchedule`] is the in-memory result every selection strategy
//! produces; [`NotificationSchedule`] is the document shape written to disk
//! for downstream consumers, with the same hour-range and count validation
//! applied at construction so an invalid schedule never reaches
//! serialization.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::activity::{is_daytime_hour, ActivityEvent, Weekday};
use crate::error::ValidationError;

/// Maximum notifications per day allowed by the downstream schema.
pub const MAX_PEAKS_PER_DAY: usize = 4;

/// Selected notification hours per weekday.
///
/// Invariants, checked at construction: all seven days present, every day
/// carries the same number of hours (1-4), hours inside the daytime window
/// and strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeakSchedule {
    days: BTreeMap<Weekday, Vec<u8>>,
}

impl PeakSchedule {
    /// Build a schedule from per-day hour lists, validating the invariants.
    pub fn from_days(days: BTreeMap<Weekday, Vec<u8>>) -> Result<Self, ValidationError> {
        let schedule = Self { days };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Re-check the schedule invariants.
    ///
    /// Cheap, and called defensively by the coverage evaluator so a schedule
    /// deserialized from elsewhere cannot propagate invalid hours.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut expected_count = None;
        for day in Weekday::ALL {
            let hours = self
                .days
                .get(&day)
                .ok_or(ValidationError::MissingDay { weekday: day })?;

            let count = *expected_count.get_or_insert(hours.len());
            if hours.len() != count || !(1..=MAX_PEAKS_PER_DAY).contains(&hours.len()) {
                return Err(ValidationError::InvalidPeakCount { count: hours.len() });
            }
            for &hour in hours {
                if !is_daytime_hour(hour) {
                    return Err(ValidationError::HourOutOfRange { hour });
                }
            }
            if !hours.windows(2).all(|w| w[0] < w[1]) {
                return Err(ValidationError::UnorderedHours {
                    weekday: day,
                    hours: hours.clone(),
                });
            }
        }
        Ok(())
    }

    /// Selected hours for one weekday, ascending.
    pub fn hours(&self, day: Weekday) -> &[u8] {
        self.days.get(&day).map_or(&[], Vec::as_slice)
    }

    /// Number of peak hours per day.
    pub fn num_peaks(&self) -> usize {
        self.hours(Weekday::Monday).len()
    }

    /// Iterate days Monday-first with their hour lists.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[u8])> {
        self.days.iter().map(|(day, hours)| (*day, hours.as_slice()))
    }
}

/// Notification times for a single day in the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTime {
    /// Notification hours, ascending
    pub times: Vec<u8>,
    /// Notifications per day
    pub count: usize,
}

impl NotificationTime {
    /// Build from an hour list, validating range and count.
    pub fn new(times: Vec<u8>) -> Result<Self, ValidationError> {
        if !(1..=MAX_PEAKS_PER_DAY).contains(&times.len()) {
            return Err(ValidationError::InvalidPeakCount { count: times.len() });
        }
        for &hour in &times {
            if !is_daytime_hour(hour) {
                return Err(ValidationError::HourOutOfRange { hour });
            }
        }
        let count = times.len();
        Ok(Self { times, count })
    }
}

/// Full-week notification schedule in the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSchedule {
    pub monday: NotificationTime,
    pub tuesday: NotificationTime,
    pub wednesday: NotificationTime,
    pub thursday: NotificationTime,
    pub friday: NotificationTime,
    pub saturday: NotificationTime,
    pub sunday: NotificationTime,
}

impl GlobalSchedule {
    fn from_peaks(schedule: &PeakSchedule) -> Result<Self, ValidationError> {
        let day = |d: Weekday| NotificationTime::new(schedule.hours(d).to_vec());
        Ok(Self {
            monday: day(Weekday::Monday)?,
            tuesday: day(Weekday::Tuesday)?,
            wednesday: day(Weekday::Wednesday)?,
            thursday: day(Weekday::Thursday)?,
            friday: day(Weekday::Friday)?,
            saturday: day(Weekday::Saturday)?,
            sunday: day(Weekday::Sunday)?,
        })
    }
}

/// Metadata about the analysis run that produced a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub total_users_analyzed: usize,
    pub data_period_days: i64,
    pub total_activity_records: usize,
    pub analysis_date: String,
}

impl AnalysisMetadata {
    /// Derive metadata from the raw events behind an analysis.
    pub fn from_events(events: &[ActivityEvent]) -> Self {
        let mut users: Vec<&str> = events.iter().map(|e| e.user_id.as_str()).collect();
        users.sort_unstable();
        users.dedup();

        let period_days = match (
            events.iter().map(|e| e.timestamp).min(),
            events.iter().map(|e| e.timestamp).max(),
        ) {
            (Some(first), Some(last)) => (last - first).num_days().max(1),
            _ => 1,
        };

        Self {
            total_users_analyzed: users.len(),
            data_period_days: period_days,
            total_activity_records: events.len(),
            analysis_date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// The persisted schedule document: full-week schedule plus analysis
/// metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSchedule {
    pub global_schedule: GlobalSchedule,
    pub analysis_metadata: AnalysisMetadata,
}

impl NotificationSchedule {
    /// Build the document from a computed schedule and the raw events it was
    /// derived from.
    pub fn from_analysis(
        schedule: &PeakSchedule,
        events: &[ActivityEvent],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            global_schedule: GlobalSchedule::from_peaks(schedule)?,
            analysis_metadata: AnalysisMetadata::from_events(events),
        })
    }
}
