//! Structured logging foundation for cd-core.
//!
//! Dual-mode logging on stderr:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSON lines for scripted workflows
//!
//! stdout is reserved for command payloads; all log output goes to stderr.
//! Respects `CD_LOG` / `RUST_LOG` env filters.

use clap::ValueEnum;
use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Console format for humans.
    #[default]
    Human,
    /// JSON lines for machines.
    Json,
}

/// Logging configuration resolved from CLI flags.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level directive used when no env filter is set.
    pub level: &'static str,
    pub format: LogFormat,
    pub timestamps: bool,
}

impl LogConfig {
    /// Resolve from `-v`/`-q` flags: quiet wins, each `-v` raises the level.
    pub fn from_flags(verbose: u8, quiet: bool, format: LogFormat) -> Self {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        LogConfig {
            level,
            format,
            timestamps: false,
        }
    }
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_env("CD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("cd_core={}", config.level)));

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);
            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .init();
            }
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
    }
}
