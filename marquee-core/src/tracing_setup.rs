//! Logging for Marquee binaries.
//!
//! The console shows Marquee's own events at the level picked on the
//! command line while HTTP client internals stay at `warn` or quieter.
//! `MARQUEE_LOG` (an `EnvFilter` directive string) replaces that filter.
//! Each run also rewrites a trace-level log file for post-mortem reading.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::{MarqueeError, Result};

const LOG_FILE_NAME: &str = "marquee-last-run.log";
const DEFAULT_LOGS_DIR: &str = "logs";
const FILTER_ENV: &str = "MARQUEE_LOG";

// Crates whose debug output drowns out search activity.
const HTTP_STACK_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "reqwest", "tower_http"];

/// Installs the global subscriber: console at `console_level`, full trace to
/// `<logs_dir>/marquee-last-run.log` (`./logs` by default).
///
/// # Errors
///
/// - `MarqueeError::Io` - The logs directory or file could not be created
/// - `MarqueeError::Configuration` - `MARQUEE_LOG` is malformed, or a
///   subscriber is already installed
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> Result<()> {
    let logs_dir = logs_dir.unwrap_or_else(|| Path::new(DEFAULT_LOGS_DIR));
    let (log_file, log_file_path) = create_log_file(logs_dir)?;

    let console_filter = match std::env::var(FILTER_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).map_err(|e| {
            MarqueeError::Configuration {
                reason: format!("{FILTER_ENV} is not a valid filter: {e}"),
            }
        })?,
        Err(_) => EnvFilter::new(console_directives(console_level)),
    };

    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_filter(console_filter);

    let trace_file = fmt::layer()
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(log_file))
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console)
        .with(trace_file)
        .try_init()
        .map_err(|e| MarqueeError::Configuration {
            reason: format!("tracing already initialized: {e}"),
        })?;

    tracing::debug!(log_file = %log_file_path.display(), "Tracing initialized");
    Ok(())
}

/// Default console directives: `level` overall, HTTP internals capped at `warn`.
fn console_directives(level: Level) -> String {
    let http_level = level.min(Level::WARN);
    let mut directives = vec![level.as_str().to_ascii_lowercase()];
    directives.extend(
        HTTP_STACK_TARGETS
            .iter()
            .map(|target| format!("{target}={}", http_level.as_str().to_ascii_lowercase())),
    );
    directives.join(",")
}

/// Creates the logs directory and truncates the last-run log file.
fn create_log_file(logs_dir: &Path) -> Result<(File, PathBuf)> {
    create_dir_all(logs_dir)?;

    let path = logs_dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;
    Ok((file, path))
}

/// Console verbosity selectable with `--log-level`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Failures only
    Error,
    /// Failures and swallowed store errors
    #[default]
    Warn,
    /// Fetch results and startup details
    Info,
    /// Settled queries and recorded metrics
    Debug,
    /// Everything, including debounce timer activity
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}
