use clap::{Parser, Subcommand};

mod commands;
mod config;
mod ingest;

#[derive(Parser)]
#[command(name = "peaktime-cli", version, about = "Peaktime CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: schedule, coverage, and algorithm comparison
    Analyze(commands::analyze::AnalyzeArgs),
    /// Compute and emit only the notification schedule document
    Schedule(commands::schedule::ScheduleArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Schedule(args) => commands::schedule::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
