//! File logging.
//!
//! The terminal belongs to the UI, so tracing output goes only to
//! `<log_dir>/village-<timestamp>.log`. `RUST_LOG` overrides the default
//! `info` filter.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn log_file_name(at: DateTime<Local>) -> String {
    format!("village-{}.log", at.format("%Y%m%d-%H%M%S"))
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the writer thread.
pub fn init(log_dir: &Path) -> io::Result<(WorkerGuard, PathBuf)> {
    std::fs::create_dir_all(log_dir)?;

    let file_name = log_file_name(Local::now());
    let file_appender = tracing_appender::rolling::never(log_dir, &file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let path = log_dir.join(file_name);
    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok((guard, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(log_file_name(at), "village-20240309-140507.log");
    }
}
