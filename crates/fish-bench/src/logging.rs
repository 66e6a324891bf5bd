use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Crates whose events reach the telemetry file unless `RUST_LOG` says otherwise.
const REPLAY_TARGETS: [&str; 2] = ["fish_bot", "fish_bench"];

/// Keeps the background writer alive; dropping it flushes the telemetry file.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Routes advisor and replay events as JSON lines into `outputs.telemetry`.
/// Returns `None` when structured logging is disabled.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = outputs.telemetry.clone();
    if let Some(dir) = telemetry_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory {}", dir.display()))?;
    }
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file {}", telemetry_path.display()))?;
    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(logging.level())));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_target(true)
        .with_writer(writer)
        .finish();

    // Tests may already have installed a global subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _worker: worker,
        telemetry_path,
    }))
}

fn default_directives(level: Option<Level>) -> String {
    let level = level.unwrap_or(Level::INFO);
    REPLAY_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
