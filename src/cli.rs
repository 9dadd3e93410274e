//! Command-line interface components.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::batch::{BatchDecoder, ErrorPolicy};
use crate::config::DecodeConfig;
use crate::constants::{DEFAULT_DATA_ROOT, DEFAULT_MAX_RECORDED_ERRORS, DEFAULT_SHOW_RECORDS};
use crate::app::services::decoder::FixedWidthRecordDecoder;
use crate::reader::HourlyFile;
use crate::stats::DecodeStats;

#[derive(Parser, Debug)]
#[command(name = "epa-hourly")]
#[command(about = "Decode EPA fixed-width hourly climate data files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode hourly files for a station
    Decode(DecodeArgs),
    /// Print the field layout used to slice record lines
    Layout,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Directory holding one sub-directory per location
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_ROOT)]
    pub data_root: PathBuf,

    /// Location directory, e.g. worcester
    #[arg(short, long)]
    pub location: String,

    /// Station identifier, e.g. 94746
    #[arg(short, long)]
    pub station: String,

    /// Year to decode (two or four digits); may be repeated
    #[arg(short, long = "year", value_name = "YEAR", required_unless_present = "all_years")]
    pub years: Vec<String>,

    /// Decode every year file found for the station
    #[arg(long, conflicts_with = "years")]
    pub all_years: bool,

    /// What to do with a line that cannot be decoded
    #[arg(long, value_enum, default_value_t = OnError::Skip)]
    pub on_error: OnError,

    /// Number of decoded records to print
    #[arg(long, default_value_t = DEFAULT_SHOW_RECORDS)]
    pub show: usize,

    /// Malformed lines listed per file
    #[arg(long, default_value_t = DEFAULT_MAX_RECORDED_ERRORS)]
    pub max_errors: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Report the line and continue
    Skip,
    /// Stop at the first malformed line
    Abort,
}

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Skip => ErrorPolicy::Skip,
            OnError::Abort => ErrorPolicy::Abort,
        }
    }
}

impl DecodeArgs {
    pub fn to_config(&self) -> DecodeConfig {
        DecodeConfig {
            data_root: self.data_root.clone(),
            location: self.location.clone(),
            station_id: self.station.clone(),
            years: self.years.clone(),
            all_years: self.all_years,
            error_policy: self.on_error.into(),
            max_recorded_errors: self.max_errors,
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("epa_hourly={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Dispatch a parsed command
pub fn run(command: Commands) -> Result<DecodeStats> {
    match command {
        Commands::Decode(args) => {
            setup_logging(args.verbose);
            run_decode(&args)
        }
        Commands::Layout => {
            run_layout()?;
            Ok(DecodeStats::default())
        }
    }
}

fn run_decode(args: &DecodeArgs) -> Result<DecodeStats> {
    let config = args.to_config();
    config.validate()?;

    let decoder = FixedWidthRecordDecoder::epa_hourly().context("Invalid built-in layout")?;
    let batch = BatchDecoder::new(&decoder, config.error_policy)
        .with_max_recorded_errors(config.max_recorded_errors);

    let paths = config.hourly_file_paths()?;
    info!("Decoding {} file(s) for station {}", paths.len(), config.station_id);

    let mut totals = DecodeStats::new();
    let mut shown = 0;
    let mut first_end = None;
    let mut last_end = None;

    for path in &paths {
        let file = HourlyFile::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let result = batch
            .decode_file(file)
            .with_context(|| format!("Failed to decode {}", path.display()))?;

        for hour in result.hours.iter().take(args.show.saturating_sub(shown)) {
            println!("{hour:?}");
            shown += 1;
        }

        for hour in &result.hours {
            if let Some(end) = hour.observation_end() {
                first_end = Some(first_end.map_or(end, |first: NaiveDateTime| first.min(end)));
                last_end = Some(last_end.map_or(end, |last: NaiveDateTime| last.max(end)));
            }
        }

        for failure in &result.failures {
            println!("{} {}", "skipped:".yellow(), failure);
        }

        totals.merge(&result.stats);
    }

    print_summary(&totals, first_end, last_end);
    Ok(totals)
}

fn print_summary(
    stats: &DecodeStats,
    first_end: Option<NaiveDateTime>,
    last_end: Option<NaiveDateTime>,
) {
    println!();
    let headline = format!(
        "Decoded {} hours from {} lines in {} file(s)",
        stats.hours_decoded, stats.total_lines, stats.files_decoded
    );
    if stats.is_successful() {
        println!("{}", headline.bright_green().bold());
    } else {
        println!("{}", headline.bright_yellow().bold());
    }

    println!(
        "  {} {}",
        "Daily summary rows:".bright_white(),
        stats.summary_hours
    );
    println!(
        "  {} {} ({:.1}% decoded)",
        "Skipped lines:".bright_white(),
        stats.lines_skipped,
        stats.success_rate()
    );
    if stats.blank_lines > 0 {
        println!("  {} {}", "Blank lines:".bright_white(), stats.blank_lines);
    }
    if let (Some(first), Some(last)) = (first_end, last_end) {
        println!(
            "  {} {} to {}",
            "Hours ending:".bright_white(),
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        );
    }
}

fn run_layout() -> Result<()> {
    let decoder = FixedWidthRecordDecoder::epa_hourly().context("Invalid built-in layout")?;
    let layout = decoder.layout();

    println!(
        "{}",
        format!(
            "{:<42} {:>9} {:>9} {:<8} {:>4}  {}",
            "field", "columns", "bytes", "kind", "flag", "presence"
        )
        .bold()
    );
    for spec in layout.fields() {
        let range = spec.byte_range();
        println!(
            "{} {:>9} {:>9} {:<8} {:>4}  {}",
            format!("{:<42}", spec.name()).bright_cyan(),
            format!("{:03}-{:03}", spec.start, spec.end),
            format!("{}..{}", range.start, range.end),
            spec.kind.as_str(),
            spec.flag_width,
            spec.presence.as_str()
        );
    }
    println!();
    println!(
        "Ordinary hours need {} bytes, daily summary hours {}.",
        layout.min_line_len(),
        layout.summary_line_len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_args_to_config() {
        let args = Args::try_parse_from([
            "epa-hourly",
            "decode",
            "--location",
            "worcester",
            "--station",
            "94746",
            "--year",
            "75",
            "--year",
            "1976",
            "--on-error",
            "abort",
        ])
        .unwrap();

        let Some(Commands::Decode(decode)) = args.command else {
            panic!("Expected decode command");
        };
        let config = decode.to_config();

        assert_eq!(config.data_root, PathBuf::from("data"));
        assert_eq!(config.years, vec!["75", "1976"]);
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(decode.show, DEFAULT_SHOW_RECORDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_year_required_without_all_years() {
        let result = Args::try_parse_from([
            "epa-hourly",
            "decode",
            "--location",
            "worcester",
            "--station",
            "94746",
        ]);
        assert!(result.is_err());

        let args = Args::try_parse_from([
            "epa-hourly",
            "decode",
            "--location",
            "worcester",
            "--station",
            "94746",
            "--all-years",
        ])
        .unwrap();
        assert!(matches!(args.command, Some(Commands::Decode(ref d)) if d.all_years));
    }

    #[test]
    fn test_layout_command() {
        let args = Args::try_parse_from(["epa-hourly", "layout"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Layout)));
    }
}
