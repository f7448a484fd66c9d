pub mod analyze;
pub mod schedule;
