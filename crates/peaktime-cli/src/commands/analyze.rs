use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use peaktime_core::{
    aggregate_hourly, ComparisonReporter, ComparisonResult, CoverageEvaluator, CoverageReport,
    NotificationSchedule, PeakHourSelector, PeakSchedule,
};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::ingest;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input CSV file (semicolon-delimited screen time export)
    pub input: PathBuf,
    /// Peak hours per day (1-4)
    #[arg(long)]
    pub peaks: Option<usize>,
    /// Minimum spacing between peak hours
    #[arg(long)]
    pub spacing: Option<u8>,
    /// Seed for the random baseline
    #[arg(long)]
    pub seed: Option<u64>,
    /// TOML config file with a [policy] table
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Emit the full report as JSON instead of prose
    #[arg(long)]
    pub json: bool,
    /// Write the notification schedule document to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    schedule: &'a PeakSchedule,
    coverage: &'a CoverageReport,
    comparison: &'a ComparisonResult,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(peaks) = args.peaks {
        config.policy.num_peaks = peaks;
    }
    if let Some(spacing) = args.spacing {
        config.policy.min_spacing_hours = spacing;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let events = ingest::load_events(&args.input)?;
    let table = aggregate_hourly(&events)?;

    let schedule = PeakHourSelector::with_policy(config.policy.clone()).select(&table)?;
    let coverage = CoverageEvaluator::new().evaluate(&table, &schedule)?;

    let mut reporter = ComparisonReporter::with_policy(config.policy.clone());
    if let Some(seed) = config.seed {
        reporter = reporter.with_seed(seed);
    }
    let comparison = reporter.compare(&table, &events, &schedule)?;

    if args.json {
        let report = AnalysisReport {
            schedule: &schedule,
            coverage: &coverage,
            comparison: &comparison,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&schedule, &coverage, &comparison);
    }

    if let Some(output) = &args.output {
        let document = NotificationSchedule::from_analysis(&schedule, &events)?;
        fs::write(output, serde_json::to_string_pretty(&document)?)?;
        println!("schedule written to {}", output.display());
    }
    Ok(())
}

fn print_summary(
    schedule: &PeakSchedule,
    coverage: &CoverageReport,
    comparison: &ComparisonResult,
) {
    println!("Notification schedule:");
    for (day, hours) in schedule.iter() {
        let times: Vec<String> = hours.iter().map(|h| format!("{h:02}:00")).collect();
        println!("  {:<9} {}", day.name(), times.join(" "));
    }

    println!();
    println!(
        "Coverage: {:.1}% overall ({:.0} of {:.0} min)",
        coverage.overall_coverage_pct, coverage.covered_activity, coverage.total_activity
    );
    for (day, pct) in &coverage.daily_coverage_pct {
        println!("  {:<9} {pct:.1}%", day.name());
    }

    println!();
    println!("Algorithm comparison:");
    println!(
        "  spacing-aware:      {:.1}%",
        comparison.ours.overall_coverage_pct
    );
    println!(
        "  stability-weighted: {:.1}%",
        comparison.stability_weighted.overall_coverage_pct
    );
    println!(
        "  random:             {:.1}%",
        comparison.random.overall_coverage_pct
    );
    println!(
        "  improvement over stability-weighted: {:+.1}%",
        comparison.improvement_over_stability
    );
    println!(
        "  improvement over random:             {:+.1}%",
        comparison.improvement_over_random
    );
}
