//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temp CSV fixture and
//! verify outputs.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "peaktime-cli", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("screen_time.csv");
    // Two ISO weeks, two users, Monday-heavy activity with a decimal comma
    let csv = "user_id;date;screen_time\n\
               alice;2024-01-08 09:15:00;60,5\n\
               alice;2024-01-08 14:00:00;40\n\
               bob;2024-01-08 19:30:00;35\n\
               alice;2024-01-15 09:45:00;55\n\
               bob;2024-01-15 19:00:00;30\n\
               bob;2024-01-10 12:00:00;25\n";
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn test_analyze_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    let (stdout, stderr, code) = run_cli(&[
        "analyze",
        input.to_str().unwrap(),
        "--json",
        "--seed",
        "42",
    ]);
    assert_eq!(code, 0, "analyze failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    let monday = report["schedule"]["monday"].as_array().unwrap();
    assert_eq!(monday.len(), 3);
    let overall = report["coverage"]["overall_coverage_pct"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&overall));
    assert!(report["comparison"]["improvement_over_random"].is_number());
}

#[test]
fn test_schedule_document_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("schedule.json");

    let (_, stderr, code) = run_cli(&[
        "schedule",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "schedule failed: {stderr}");

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        document["global_schedule"]["monday"]["count"].as_u64(),
        Some(3)
    );
    assert_eq!(
        document["analysis_metadata"]["total_users_analyzed"].as_u64(),
        Some(2)
    );
}

#[test]
fn test_missing_file_reports_error() {
    let (_, stderr, code) = run_cli(&["analyze", "/nonexistent/input.csv"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn test_invalid_peak_count_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    let (_, stderr, code) = run_cli(&["analyze", input.to_str().unwrap(), "--peaks", "9"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("between 1 and 4"), "{stderr}");
}
