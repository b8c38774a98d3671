//! Game rules configuration with documented defaults
//!
//! Every tunable rule lives here. The defaults reproduce the classic
//! vector-movement rules; a TOML file can override any subset.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::combat::table::CombatResultsTable;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which gravity rules the engine applies after movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityVariant {
    /// Concentric inner/middle/outer zones with fractional pull
    Radial,
    /// One-hex arrows around each body, weak or strong
    #[default]
    Arrows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Cumulative disabled turns at which a ship is destroyed
    ///
    /// Six turns of damage is the classic limit.
    pub destroy_threshold: u32,

    /// Subtract the attacker-target distance from the die roll
    pub range_penalty: bool,

    /// Relative velocity (in hexes) tolerated before each extra hex
    /// subtracts 1 from the die roll. `None` disables the modifier.
    pub velocity_allowance: Option<u32>,

    /// Disabled ships may not declare attacks
    pub disabled_ships_hold_fire: bool,

    /// The combat results table
    pub table: CombatResultsTable,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            destroy_threshold: 6,
            range_penalty: true,
            velocity_allowance: Some(2),
            disabled_ships_hold_fire: true,
            table: CombatResultsTable::classic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gravity: GravityVariant,

    /// Disabled turns repaired at the end of each of the owner's turns
    pub repair_per_turn: u32,

    /// Allowed difference between tangential and orbital speed (hexes/round)
    /// for a ship to count as being in a stable orbit
    pub orbit_tolerance: f64,

    pub combat: CombatConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GravityVariant::default(),
            repair_per_turn: 1,
            orbit_tolerance: 0.5,
            combat: CombatConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.destroy_threshold == 0 {
            return Err(ConfigError::Invalid(
                "destroy_threshold must be at least 1".into(),
            ));
        }

        if !(self.orbit_tolerance.is_finite() && self.orbit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "orbit_tolerance ({}) must be a non-negative number",
                self.orbit_tolerance
            )));
        }

        self.combat.table.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.combat.destroy_threshold, 6);
        assert_eq!(config.gravity, GravityVariant::Arrows);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::parse_toml(
            r#"
            gravity = "radial"
            [combat]
            range_penalty = false
            "#,
        )
        .unwrap();
        assert_eq!(config.gravity, GravityVariant::Radial);
        assert!(!config.combat.range_penalty);
        assert_eq!(config.combat.velocity_allowance, Some(2));
        assert_eq!(config.repair_per_turn, 1);
        assert_eq!(config.combat.table, CombatResultsTable::classic());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let result = GameConfig::parse_toml("[combat]\ndestroy_threshold = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = GameConfig {
            orbit_tolerance: -1.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(
            GameConfig::parse_toml("gravity = ["),
            Err(ConfigError::Parse(_))
        ));
    }
}
