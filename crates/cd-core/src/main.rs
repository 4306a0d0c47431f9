//! Circadia Core - circadian dataset analysis CLI
//!
//! The main entry point for cd-core, handling:
//! - Dataset loading and validation
//! - Running-average ranking queries
//! - Proportion-over-time series
//! - Hourly profiles and phase-share summaries

use cd_common::{
    CycleClock, Error, OutputFormat, Phase, Result, ValueField, DEFAULT_HALF_CYCLE_MINUTES,
};
use cd_core::exit_codes::ExitCode;
use cd_core::loader;
use cd_core::logging::{init_logging, LogConfig, LogFormat};
use cd_core::output::{emit, ProportionReport, RankingReport, Stamped};
use cd_core::profile::profile_report;
use cd_core::share::share_report;
use cd_core::summary::summarize;
use cd_engine::{AccumulationPolicy, AnalysisSession};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Circadia Core - aggregation and ranking over circadian datasets
#[derive(Parser)]
#[command(name = "cd-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Which measured quantity becomes the observation value
    #[arg(long, global = true, default_value = "activity", env = "CD_FIELD")]
    field: ValueField,

    /// Minutes per half-cycle (12-hour light schedule)
    #[arg(long, global = true, default_value_t = DEFAULT_HALF_CYCLE_MINUTES)]
    half_cycle: u32,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Dataset extent: entities, time domain, value range
    Summary(DatasetArgs),

    /// Rank entities by running average at a minute of one phase
    Rank(RankArgs),

    /// Male share of accumulated value across a half-cycle
    Proportion(ProportionArgs),

    /// Hourly per-sex mean and 25th/75th-percentile profile
    Profile(ProfileArgs),

    /// Share of accumulated value in light-off vs light-on, per sex
    PhaseShare(DatasetArgs),

    /// Validate that a dataset loads, reporting its extent
    Check(DatasetArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Path to the JSON dataset
    dataset: PathBuf,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Path to the JSON dataset
    dataset: PathBuf,

    /// Minute of the phase to query (1..=half-cycle)
    #[arg(long, short = 't', default_value_t = 1)]
    time: u32,

    /// Phase to rank within
    #[arg(long, default_value = "light-off")]
    phase: Phase,

    /// Accumulate a single day only (running sums reset per day);
    /// all days fold onto one cycle when absent
    #[arg(long)]
    day: Option<u32>,
}

#[derive(Args, Debug)]
struct ProportionArgs {
    /// Path to the JSON dataset
    dataset: PathBuf,

    /// Day to walk
    #[arg(long, default_value_t = 1)]
    day: u32,

    /// Phase to walk
    #[arg(long, default_value = "light-off")]
    phase: Phase,

    /// Truncate the series to this many minutes (full phase when absent)
    #[arg(long)]
    max_time: Option<u32>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Path to the JSON dataset
    dataset: PathBuf,

    /// Keep only records whose estrus flag equals this value
    #[arg(long)]
    estrus: Option<bool>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_flags(
        cli.global.verbose,
        cli.global.quiet,
        cli.global.log_format,
    ));

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from_error(&err)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let clock = CycleClock::new(cli.global.half_cycle);
    let field = cli.global.field;
    let format = cli.global.format;

    match cli.command {
        Commands::Summary(args) | Commands::Check(args) => {
            let session = load_session(&args.dataset, field, clock, AccumulationPolicy::FoldDays)?;
            let report = summarize(&session, field);
            let empty = report.observations == 0;
            emit(format, &Stamped::new(report))?;
            Ok(if empty { ExitCode::NoData } else { ExitCode::Clean })
        }

        Commands::Rank(args) => {
            let policy = match args.day {
                None => AccumulationPolicy::FoldDays,
                Some(day) => AccumulationPolicy::SingleDay(day),
            };
            let session = load_session(&args.dataset, field, clock, policy)?;
            let day = args.day.unwrap_or(1);
            validate_day(day, &session)?;

            let entries = session.ranking(args.phase, day, args.time);
            let empty = entries.is_empty();
            let report = RankingReport {
                phase: args.phase,
                day,
                time: args.time.clamp(1, clock.half_cycle().max(1)),
                policy,
                entries,
            };
            emit(format, &Stamped::new(report))?;
            Ok(if empty { ExitCode::NoData } else { ExitCode::Clean })
        }

        Commands::Proportion(args) => {
            let mut session =
                load_session(&args.dataset, field, clock, AccumulationPolicy::FoldDays)?;
            validate_day(args.day, &session)?;

            let max_time = args.max_time.unwrap_or(clock.half_cycle());
            let points = session
                .proportion_series(args.day, args.phase, max_time)
                .to_vec();
            let empty = points.is_empty();
            let report = ProportionReport {
                phase: args.phase,
                day: args.day,
                max_time,
                points,
            };
            emit(format, &Stamped::new(report))?;
            Ok(if empty { ExitCode::NoData } else { ExitCode::Clean })
        }

        Commands::Profile(args) => {
            let observations = loader::load_path(&args.dataset, field)?;
            let report = profile_report(&observations, &clock, args.estrus);
            let empty = report.male.overall_mean.is_none() && report.female.overall_mean.is_none();
            emit(format, &Stamped::new(report))?;
            Ok(if empty { ExitCode::NoData } else { ExitCode::Clean })
        }

        Commands::PhaseShare(args) => {
            let observations = loader::load_path(&args.dataset, field)?;
            let report = share_report(&observations, &clock);
            let empty = report.overall.total() == 0.0;
            emit(format, &Stamped::new(report))?;
            Ok(if empty { ExitCode::NoData } else { ExitCode::Clean })
        }

        Commands::Version => {
            println!("cd-core {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::Clean)
        }
    }
}

fn load_session(
    path: &Path,
    field: ValueField,
    clock: CycleClock,
    policy: AccumulationPolicy,
) -> Result<AnalysisSession> {
    let observations = loader::load_path(path, field)?;
    info!(
        observations = observations.len(),
        field = %field,
        "dataset loaded"
    );
    Ok(AnalysisSession::build(observations, clock, policy))
}

/// Days are validated against the dataset's computed range before querying;
/// an empty dataset accepts day 1 (queries answer empty results).
fn validate_day(day: u32, session: &AnalysisSession) -> Result<()> {
    if day < 1 {
        return Err(Error::Query("day must be >= 1".to_string()));
    }
    let max_day = session.total_days();
    if max_day > 0 && day > max_day {
        return Err(Error::DayOutOfRange { day, max_day });
    }
    if max_day == 0 && day > 1 {
        return Err(Error::DayOutOfRange { day, max_day: 1 });
    }
    Ok(())
}
