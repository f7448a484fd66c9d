//! Screen-time CSV ingestion.
//!
//! Reads the semicolon-delimited export format: a header naming at least
//! `user_id`, `date`, and `screen_time`, one event per line. Screen time
//! accepts a decimal comma; dates accept `YYYY-MM-DD HH:MM:SS` with either a
//! space or a `T` separator, seconds optional.

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use peaktime_core::ActivityEvent;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Load raw activity events from a CSV file.
pub fn load_events(path: &Path) -> Result<Vec<ActivityEvent>, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    parse_events(&content).map_err(|e| format!("{}: {e}", path.display()).into())
}

fn parse_events(content: &str) -> Result<Vec<ActivityEvent>, String> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or("empty file")?;
    let columns: Vec<&str> = header.split(';').map(str::trim).collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("missing column '{name}' in header '{header}'"))
    };
    let user_col = column("user_id")?;
    let date_col = column("date")?;
    let minutes_col = column("screen_time")?;

    let mut events = Vec::new();
    for (index, line) in lines {
        let line_no = index + 1;
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != columns.len() {
            return Err(format!(
                "line {line_no}: expected {} fields, got {}",
                columns.len(),
                fields.len()
            ));
        }

        let timestamp = parse_timestamp(fields[date_col])
            .ok_or_else(|| format!("line {line_no}: unparseable date '{}'", fields[date_col]))?;
        let minutes = parse_minutes(fields[minutes_col]).ok_or_else(|| {
            format!(
                "line {line_no}: unparseable screen_time '{}'",
                fields[minutes_col]
            )
        })?;
        if minutes < 0.0 {
            return Err(format!("line {line_no}: negative screen_time {minutes}"));
        }

        events.push(ActivityEvent {
            timestamp,
            minutes,
            user_id: fields[user_col].to_string(),
        });
    }
    Ok(events)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_minutes(value: &str) -> Option<f64> {
    value.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_decimal_commas_and_both_separators() {
        let csv = "user_id;date;screen_time\n\
                   u1;2024-01-15 09:30:00;45,5\n\
                   u2;2024-01-16T14:00:00;30\n";
        let events = parse_events(csv).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].minutes, 45.5);
        assert_eq!(events[0].user_id, "u1");
        assert_eq!(events[0].hour(), 9);
        assert_eq!(events[1].hour(), 14);
    }

    #[test]
    fn test_header_order_is_flexible() {
        let csv = "date;screen_time;user_id\n2024-01-15 09:00;12;u9\n";
        let events = parse_events(csv).unwrap();
        assert_eq!(events[0].user_id, "u9");
        assert_eq!(events[0].minutes, 12.0);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let err = parse_events("user_id;date\nu1;2024-01-15 09:00:00\n").unwrap_err();
        assert!(err.contains("screen_time"), "{err}");
    }

    #[test]
    fn test_bad_date_names_the_line() {
        let csv = "user_id;date;screen_time\nu1;yesterday;5\n";
        let err = parse_events(csv).unwrap_err();
        assert!(err.contains("line 2"), "{err}");
        assert!(err.contains("yesterday"), "{err}");
    }

    #[test]
    fn test_negative_screen_time_rejected() {
        let csv = "user_id;date;screen_time\nu1;2024-01-15 09:00:00;-3\n";
        let err = parse_events(csv).unwrap_err();
        assert!(err.contains("negative"), "{err}");
    }

    #[test]
    fn test_field_count_mismatch_rejected() {
        let csv = "user_id;date;screen_time\nu1;2024-01-15 09:00:00\n";
        assert!(parse_events(csv).is_err());
    }
}
