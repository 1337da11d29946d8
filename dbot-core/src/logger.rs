//! Logging initialization: human-readable lines (timestamp, level, target, message, fields) to the
//! console and, when configured, appended to a log file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
#[derive(Clone, Copy)]
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &str) -> anyhow::Result<fs::File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Initializes the global tracing subscriber.
///
/// Output: `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...` on stdout, and the same
/// lines without ANSI codes in `log_file_path` when given.
/// Level comes from `RUST_LOG` (default `info`); load `.env` before calling.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(ChronoLocal)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let file_layer = match log_file_path {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_timer(ChronoLocal)
                    .with_target(true)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
