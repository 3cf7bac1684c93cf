//! hbd: a themed, multi-page birthday greeting for the terminal.

pub mod assets;
pub mod content;
pub mod countdown;
pub mod error;
pub mod logging;
pub mod schedule;
pub mod shuffle;
pub mod tui;
pub mod types;

pub use error::{Error, Result};
