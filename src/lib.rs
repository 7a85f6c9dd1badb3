//! # Super Connect Four
//!
//! Connect Four and its cascading variant, Super Connect Four, where
//! connected discs vanish and the discs above fall into place. Ships with a
//! terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Rules engine: grid, players, classic and cascading games
//! - [`ui`] — Terminal UI: lobby and game board
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — File-backed tracing setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
