//! File-only tracing setup.
//!
//! Nothing is logged unless `OPTIMISTIC_COUNTER_LOG` names a file; writing
//! to stderr would corrupt the terminal UI.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV_VAR: &str = "OPTIMISTIC_COUNTER_LOG";

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "optimistic_counter=info";

/// Per-run log file: `{base}.{unix_secs}.{pid}`.
pub fn log_file_path(base: &Path, at: SystemTime, pid: u32) -> PathBuf {
    let secs = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}.{}", secs, pid));
    PathBuf::from(name)
}

/// Install the global subscriber if logging is requested.
///
/// Returns the file being written, or `None` when logging stays off.
pub fn init_tracing() -> Option<PathBuf> {
    let base = std::env::var_os(LOG_ENV_VAR).map(PathBuf::from)?;
    let path = log_file_path(&base, SystemTime::now(), std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot create log file {}: {}", path.display(), err);
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "Logging started");
    Some(path)
}
