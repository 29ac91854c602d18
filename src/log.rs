// src/log.rs
//
// Subscriber setup for the `logf!`/`logd!`/`logw!`/`loge!` macros.
// Dashboard → append to a log file; merge CLI → stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt::time::Uptime};

pub use tracing;

use crate::error::{Error, Result};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Append log lines to `path` (parent dirs created). Timestamps are elapsed
/// time since start, e.g. `0.812345s`.
/// A second call is a no-op (the first subscriber stays installed).
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(Uptime::default())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Log to stderr. Used by the merge step so stdout stays the summary.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
