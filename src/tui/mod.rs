//! TUI module for the interactive terminal greeting.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: app model, router, actions
//! - `update`: transitions and timer ticks
//! - `view`: rendering
//! - `run`: effects (terminal, event loop)
//! - `theme`, `confetti`: presentation

pub mod confetti;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
