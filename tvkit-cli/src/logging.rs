use std::{fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{AppError, Result};

const LOG_FILE_PREFIX: &str = "tvkit.log";

/// Install the global subscriber.
///
/// Console output goes to stderr so command results on stdout stay clean.
/// With `logs_dir`, a daily rolling file is written as well; the returned
/// guard must be held until exit or buffered lines are lost.
pub fn init_logging(
    verbose: bool,
    quiet: bool,
    logs_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        default_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
    };

    let console = fmt::layer()
        .with_target(false)
        .with_level(verbose)
        .with_writer(std::io::stderr);

    let Some(dir) = logs_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init()
            .map_err(|e| AppError::Logging(e.to_string()))?;
        return Ok(None);
    };

    fs::create_dir_all(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        dir,
        LOG_FILE_PREFIX,
    ));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(Some(guard))
}

/// `RUST_LOG` when set and valid, otherwise `info`.
fn default_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
