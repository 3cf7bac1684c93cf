//! File logging via `tracing`.
//!
//! The terminal belongs to the TUI, so all log output goes to a file
//! through a non-blocking appender. Keep the returned guard alive for
//! the duration of the program or buffered lines are lost.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Log file used when none is given on the command line.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hbd")
        .join("hbd.log")
}

/// Filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("hbd={}", default_level)))
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path, default_level: &str) -> Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|source| Error::LogDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "hbd.log".into());
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::LogInit(e.to_string()))?;

    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(guard)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_file_is_named_hbd_log() {
        let path = default_log_file();
        assert_eq!(path.file_name().unwrap(), "hbd.log");
        assert_eq!(path.parent().unwrap().file_name().unwrap(), "hbd");
    }

    #[test]
    fn unwritable_log_dir_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a dir").unwrap();
        let err = init(&blocker.join("sub").join("hbd.log"), "info").unwrap_err();
        assert!(matches!(err, Error::LogDir { .. }));
    }
}
