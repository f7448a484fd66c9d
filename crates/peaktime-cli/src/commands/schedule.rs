use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use peaktime_core::{aggregate_hourly, NotificationSchedule, PeakHourSelector};

use crate::config::AnalysisConfig;
use crate::ingest;

#[derive(Args)]
pub struct ScheduleArgs {
    /// Input CSV file (semicolon-delimited screen time export)
    pub input: PathBuf,
    /// Peak hours per day (1-4)
    #[arg(long)]
    pub peaks: Option<usize>,
    /// TOML config file with a [policy] table
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the schedule document here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ScheduleArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(peaks) = args.peaks {
        config.policy.num_peaks = peaks;
    }

    let events = ingest::load_events(&args.input)?;
    let table = aggregate_hourly(&events)?;
    let schedule = PeakHourSelector::with_policy(config.policy).select(&table)?;
    let document = NotificationSchedule::from_analysis(&schedule, &events)?;
    let json = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(output) => {
            fs::write(output, json)?;
            println!("schedule written to {}", output.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
