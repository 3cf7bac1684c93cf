//! Crate error type.
//!
//! Only operational failures live here: the greeting itself has no
//! failure path (empty assets fall back to a placeholder, page ids are a
//! closed enum).

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the CLI and the terminal shell.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal setup, drawing or event polling failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    /// The log directory could not be created.
    #[error("cannot prepare log directory {}: {source}", path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global tracing subscriber was already installed.
    #[error("logging already initialized: {0}")]
    LogInit(String),

    /// Encoding a view document failed.
    #[error("cannot encode document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
