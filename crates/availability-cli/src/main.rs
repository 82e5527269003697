//! `availability` CLI -- project league availability into a compressed schedule.
//!
//! ## Usage
//!
//! ```sh
//! # Team report for the next 8 weeks, quorum of 4 players
//! availability league.csv
//!
//! # Player-detail report for 2 weeks starting on a fixed date
//! availability league.csv --detail --weeks 2 --start 2026-03-02
//!
//! # Quorum of 5, custom timezone columns, JSON written to a file
//! availability league.csv -p 5 --timezones columns.json --format json -o report.json
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use availability_engine::{
    load_league_from_path, Horizon, ReportConfig, ReportFormat, ReportWriter, Simulator,
};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Compute when league teams and players are available to play"
)]
struct Cli {
    /// CSV file containing availability data
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,

    /// Number of weeks to output
    #[arg(short, long, default_value_t = 8)]
    weeks: u32,

    /// Minimum number of players from each team
    #[arg(short, long, default_value_t = 4)]
    players: u32,

    /// Detailed player view (instead of per team)
    #[arg(short, long)]
    detail: bool,

    /// First day of the report, YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// JSON file listing the timezone display columns
    #[arg(long, value_name = "FILE")]
    timezones: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ReportFormat::Csv,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let league = load_league_from_path(&cli.filename)
        .with_context(|| format!("Failed to load {}", cli.filename.display()))?;

    let config = match &cli.timezones {
        Some(path) => ReportConfig::from_path(path)
            .with_context(|| format!("Failed to read timezone columns from {}", path.display()))?,
        None => ReportConfig::default(),
    };

    let horizon = match cli.start {
        Some(day) => Horizon::weeks_from(day, cli.weeks),
        None => Horizon::weeks_from_today(cli.weeks),
    }
    .context("Invalid report horizon")?;
    log::info!(
        "simulating {} to {} with quorum {}",
        horizon.start,
        horizon.end,
        cli.players
    );

    let simulator = Simulator::new(&league, cli.players);
    let writer = ReportWriter::new(&config, cli.format.into());
    let mut out = open_output(cli.output.as_ref())?;

    let written = if cli.detail {
        let intervals = simulator.player_intervals(&horizon);
        writer.write_players(&mut out, &league, &intervals)
    } else {
        let intervals = simulator.team_intervals(&horizon);
        writer.write_teams(&mut out, &league, &intervals)
    };
    written.context("Failed to write report")?;

    out.flush().context("Failed to write report")?;
    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
