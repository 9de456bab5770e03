//! # Configuration
//!
//! Crate-wide constants and the serializable [`ArcaneConfig`] that bundles the
//! tuning knobs of every subsystem.

use crate::{ArcaneError, ArcaneResult, CombatConfig, GenerationConfig, MatchmakingConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of entries the combat log keeps
pub const COMBAT_LOG_CAPACITY: usize = 6;

/// Group size used by the dungeon finder when nothing else is configured
pub const DEFAULT_GROUP_CAPACITY: usize = 4;

/// Multiplier range applied to every basic attack
pub const DEFAULT_SWING_VARIANCE: (f64, f64) = (0.8, 1.2);

/// Multiplier range applied to every skill hit
pub const DEFAULT_SKILL_VARIANCE: (f64, f64) = (1.1, 1.5);

/// Top-level configuration for the encounter core.
///
/// Missing sections fall back to their defaults when loading, so a config
/// file only needs to mention what it changes.
///
/// # Examples
///
/// ```
/// use arcane::ArcaneConfig;
///
/// let config = ArcaneConfig::load_from_json(r#"{ "matchmaking": { "group_capacity": 6 } }"#).unwrap();
/// assert_eq!(config.matchmaking.group_capacity, 6);
/// assert_eq!(config.combat.log_capacity, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcaneConfig {
    /// Loot generation settings
    pub generation: GenerationConfig,
    /// Combat tuning
    pub combat: CombatConfig,
    /// Matchmaking settings
    pub matchmaking: MatchmakingConfig,
}

impl ArcaneConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn load_from_json(json: &str) -> ArcaneResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ArcaneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::load_from_json(&json)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn save_to_json(&self) -> ArcaneResult<String> {
        serde_json::to_string_pretty(self).map_err(ArcaneError::from)
    }

    /// Checks every section for values that could never work.
    pub fn validate(&self) -> ArcaneResult<()> {
        self.combat.validate()?;
        self.matchmaking.validate()?;
        Ok(())
    }
}
