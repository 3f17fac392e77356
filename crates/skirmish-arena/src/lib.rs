//! Skirmish Arena - runs games between bot strategies.
//!
//! # Modules
//!
//! - [`config`] - `arena.toml` loading and per-faction strategy lookup
//! - [`game_runner`] - the turn loop and the resulting [`game_runner::GameRecord`]
//! - [`json_output`] - JSON export of finished games

pub mod config;
pub mod game_runner;
pub mod json_output;
