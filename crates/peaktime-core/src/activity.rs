//! Activity data model.
//!
//! This module defines the weekday/hour buckets used throughout the crate,
//! the raw per-event records stability scoring consumes, and the validated
//! hourly activity table the selectors and the coverage evaluator operate on.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// First hour of the notification-eligible daytime window (inclusive).
pub const DAY_START_HOUR: u8 = 6;

/// Last hour of the notification-eligible daytime window (inclusive).
pub const DAY_END_HOUR: u8 = 23;

/// Whether an hour falls inside the daytime window.
pub fn is_daytime_hour(hour: u8) -> bool {
    (DAY_START_HOUR..=DAY_END_HOUR).contains(&hour)
}

/// Day of week used as a grouping key. Ordered Monday-first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday-first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Full day name.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Raw per-event activity record.
///
/// Events carry a timestamp from which the weekday, hour, and ISO week are
/// derived, and an activity amount in screen-time minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp: NaiveDateTime,
    pub minutes: f64,
    pub user_id: String,
}

impl ActivityEvent {
    /// Weekday of the event timestamp.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday().into()
    }

    /// Hour of day (0-23) of the event timestamp.
    pub fn hour(&self) -> u8 {
        self.timestamp.hour() as u8
    }

    /// ISO (year, week) of the event timestamp.
    pub fn iso_week(&self) -> (i32, u32) {
        let iso = self.timestamp.iso_week();
        (iso.year(), iso.week())
    }
}

/// One aggregated (weekday, hour) bucket: summed screen-time minutes across
/// all users and dates sharing that bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyActivityRow {
    pub weekday: Weekday,
    pub hour: u8,
    pub minutes: f64,
}

/// Validated, immutable hourly activity table.
///
/// Rows are stored sorted by (weekday, ascending hour), so per-day slices are
/// pre-sorted by hour and the selector's tie-break order is a guarantee of
/// this type rather than a property of whoever produced the rows.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityTable {
    rows: Vec<HourlyActivityRow>,
}

impl ActivityTable {
    /// Build a table from aggregated rows, validating the upstream contract:
    /// hours inside the daytime window, non-negative finite activity, at most
    /// one row per (weekday, hour) bucket.
    pub fn new(mut rows: Vec<HourlyActivityRow>) -> Result<Self, ValidationError> {
        for row in &rows {
            if !is_daytime_hour(row.hour) {
                return Err(ValidationError::HourOutOfRange { hour: row.hour });
            }
            if !row.minutes.is_finite() || row.minutes < 0.0 {
                return Err(ValidationError::InvalidActivity {
                    weekday: row.weekday,
                    hour: row.hour,
                    minutes: row.minutes,
                });
            }
        }
        rows.sort_by(|a, b| (a.weekday, a.hour).cmp(&(b.weekday, b.hour)));
        if let Some(dup) = rows
            .windows(2)
            .find(|w| w[0].weekday == w[1].weekday && w[0].hour == w[1].hour)
        {
            return Err(ValidationError::DuplicateBucket {
                weekday: dup[0].weekday,
                hour: dup[0].hour,
            });
        }
        Ok(Self { rows })
    }

    /// All rows, sorted by (weekday, hour).
    pub fn rows(&self) -> &[HourlyActivityRow] {
        &self.rows
    }

    /// Rows for one weekday, sorted by ascending hour.
    pub fn day_rows(&self, day: Weekday) -> &[HourlyActivityRow] {
        let start = self.rows.partition_point(|r| r.weekday < day);
        let end = self.rows.partition_point(|r| r.weekday <= day);
        &self.rows[start..end]
    }

    /// Activity at one (weekday, hour) bucket, 0 when absent.
    pub fn minutes_at(&self, day: Weekday, hour: u8) -> f64 {
        self.day_rows(day)
            .iter()
            .find(|r| r.hour == hour)
            .map_or(0.0, |r| r.minutes)
    }

    /// Total activity for one weekday.
    pub fn day_total(&self, day: Weekday) -> f64 {
        self.day_rows(day).iter().map(|r| r.minutes).sum()
    }

    /// Total activity across all weekdays.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.minutes).sum()
    }
}

/// Aggregate raw events into an hourly activity table.
///
/// Buckets events by (weekday, hour), sums minutes per bucket, and drops
/// events outside the daytime window. Buckets with no events produce no row.
/// Events with negative or non-finite minutes are rejected, the same
/// contract [`ActivityTable::new`] enforces on pre-aggregated rows.
pub fn aggregate_hourly(events: &[ActivityEvent]) -> Result<ActivityTable, ValidationError> {
    let mut sums = [[0.0f64; 24]; 7];
    for event in events {
        let hour = event.hour();
        if !event.minutes.is_finite() || event.minutes < 0.0 {
            return Err(ValidationError::InvalidActivity {
                weekday: event.weekday(),
                hour,
                minutes: event.minutes,
            });
        }
        if !is_daytime_hour(hour) {
            continue;
        }
        sums[event.weekday() as usize][hour as usize] += event.minutes;
    }

    let mut rows = Vec::new();
    for day in Weekday::ALL {
        for hour in DAY_START_HOUR..=DAY_END_HOUR {
            let minutes = sums[day as usize][hour as usize];
            if minutes > 0.0 {
                rows.push(HourlyActivityRow {
                    weekday: day,
                    hour,
                    minutes,
                });
            }
        }
    }

    // Rows are built in (weekday, hour) order and buckets are unique, so the
    // table invariants hold by construction.
    Ok(ActivityTable { rows })
}
