//! # Peaktime Core Library
//!
//! Peaktime picks a small, fixed set of "peak" notification hours per weekday
//! from historical aggregated screen-time activity, and measures how much of
//! the total activity that choice captures compared to two baselines.
//!
//! ## Architecture
//!
//! Data flows one way: a validated [`ActivityTable`] (and, for stability
//! scoring, the raw [`ActivityEvent`]s behind it) feeds the selectors, whose
//! [`PeakSchedule`] outputs feed the [`CoverageEvaluator`], whose reports
//! feed the [`ComparisonReporter`]. Everything is synchronous and pure;
//! the only non-determinism is the random baseline, which takes an explicit
//! seed.
//!
//! ## Key Components
//!
//! - [`PeakHourSelector`]: greedy, spacing-aware selection of the most
//!   active hours per weekday
//! - [`StabilityScorer`]: week-to-week consistency scores per bucket
//! - [`StabilityWeightedSelector`]: baseline ranking by activity x stability
//! - [`RandomBaseline`]: seeded uniform baseline
//! - [`CoverageEvaluator`] / [`ComparisonReporter`]: how well a schedule
//!   captures activity, and versus the baselines

pub mod activity;
pub mod baseline;
pub mod compare;
pub mod coverage;
pub mod error;
pub mod schedule;
pub mod selector;
pub mod stability;

pub use activity::{
    aggregate_hourly, ActivityEvent, ActivityTable, HourlyActivityRow, Weekday, DAY_END_HOUR,
    DAY_START_HOUR,
};
pub use baseline::RandomBaseline;
pub use compare::{ComparisonReporter, ComparisonResult};
pub use coverage::{CoverageEvaluator, CoverageReport};
pub use error::{CoreError, Result, ValidationError};
pub use schedule::{
    AnalysisMetadata, GlobalSchedule, NotificationSchedule, NotificationTime, PeakSchedule,
};
pub use selector::{PeakHourSelector, SelectorPolicy, StabilityWeightedSelector};
pub use stability::{StabilityMap, StabilityScorer};
