//! Tracing subscriber setup.
//!
//! The interactive REPL owns stdout, so by default events go to a daily
//! rolling file under `$DOCQA_HOME/logs`. `log.stderr = true` switches to
//! stderr.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogConfig, paths};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DOCQA_LOG";

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_PREFIX: &str = "docqa.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config);

    if config.stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("install tracing subscriber")?;
        return Ok(None);
    }

    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .context("install tracing subscriber")?;

    Ok(Some(guard))
}

/// Resolves the filter: `DOCQA_LOG`, then `log.level`, then `warn`.
fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .ok()
        .or_else(|| {
            config
                .level
                .as_deref()
                .map(str::trim)
                .filter(|level| !level.is_empty())
                .and_then(|level| EnvFilter::try_new(level).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
