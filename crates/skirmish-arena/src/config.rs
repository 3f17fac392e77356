//! Configuration file loading for the arena.
//!
//! This module provides types and functions for loading arena settings from
//! TOML files and resolving which strategy plays each faction.

use serde::{Deserialize, Serialize};
use skirmish_bots::Strategy;
use skirmish_core::Faction;
use skirmish_engine::Bot;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A `[bots]` key does not name a faction.
    #[error("Unknown faction: {0}")]
    UnknownFaction(String),
    /// A `[bots]` value does not name a strategy.
    #[error("Unknown bot strategy '{strategy}' for {faction}")]
    UnknownBot { faction: String, strategy: String },
}

/// Arena settings.
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArenaConfig {
    /// Snapshot JSON to start from. The standard 8x8 setup when unset.
    #[serde(default)]
    pub state: Option<PathBuf>,
    /// Decisions (including passes) after which the game is cut off.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Pause before each bot decision is committed, in milliseconds.
    #[serde(default)]
    pub thinking_delay_ms: u64,
    /// Seed for every bot RNG.
    #[serde(default)]
    pub seed: u64,
    /// Strategy name per faction name, e.g. `white = "aggro"`.
    #[serde(default)]
    pub bots: BTreeMap<String, String>,
}

fn default_max_turns() -> u32 {
    500
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            state: None,
            max_turns: default_max_turns(),
            thinking_delay_ms: 0,
            seed: 0,
            bots: BTreeMap::new(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from [`Self::config_path()`].
    ///
    /// If the file does not exist, returns the default configuration.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, falling back to the default when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns `arena.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("arena.toml")
    }

    /// Resolves the strategy for each faction in `turn_order`.
    ///
    /// Factions without a `[bots]` entry play [`Strategy::Random`].
    ///
    /// # Errors
    ///
    /// Fails on any `[bots]` entry naming an unknown faction or strategy,
    /// even one that is not part of `turn_order`.
    pub fn strategies(&self, turn_order: &[Faction]) -> Result<Vec<(Faction, Strategy)>, ConfigError> {
        let mut configured = BTreeMap::new();
        for (faction_name, strategy_name) in &self.bots {
            let faction = Faction::from_name(faction_name)
                .ok_or_else(|| ConfigError::UnknownFaction(faction_name.clone()))?;
            let strategy =
                Strategy::from_name(strategy_name).ok_or_else(|| ConfigError::UnknownBot {
                    faction: faction_name.clone(),
                    strategy: strategy_name.clone(),
                })?;
            configured.insert(faction, strategy);
        }

        Ok(turn_order
            .iter()
            .map(|&faction| {
                let strategy = configured.get(&faction).copied().unwrap_or_else(|| {
                    warn!(%faction, "no bot configured, falling back to random");
                    Strategy::Random
                });
                (faction, strategy)
            })
            .collect())
    }

    /// Builds one seeded bot per faction in `turn_order`.
    pub fn build_bots(&self, turn_order: &[Faction]) -> Result<Vec<Box<dyn Bot>>, ConfigError> {
        Ok(self
            .strategies(turn_order)?
            .into_iter()
            .map(|(faction, strategy)| strategy.build(faction, self.seed))
            .collect())
    }
}
