//! Scenario files: players, ships and celestial bodies in TOML
//!
//! ```toml
//! name = "Duel"
//!
//! [[player]]
//! id = 0
//! name = "Red"
//!
//! [[ship]]
//! id = 1
//! name = "Valiant"
//! player = 0
//! class = "frigate"
//! position = { q = 0, r = 0 }
//! velocity = { q = 1, r = 0 }
//! ordnance = { mines = 1, torpedoes = 1, missiles = 0 }
//!
//! [[body]]
//! id = 1
//! name = "Mars"
//! position = { q = 6, r = -3 }
//! mass = 4.0
//! gravity_wells = [{ zone = "inner", radius = 1, pull_strength = 1.0 }]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::core::config::ConfigError;
use crate::core::error::{EngineError, Result};
use crate::core::types::{BodyId, PlayerId, ShipId};
use crate::fleet::{OrdnanceLoad, Ship, ShipStats, MAX_THRUST};
use crate::game::state::{GameState, Player};
use crate::gravity::{CelestialBody, GravityWell, GravityZone};
use crate::spatial::{HexCoord, Velocity};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub players: Vec<Player>,
    pub ships: Vec<Ship>,
    pub bodies: Vec<CelestialBody>,
}

impl Scenario {
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlScenario =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let ships = toml_data
            .ships
            .into_iter()
            .map(TomlShip::into_ship)
            .collect::<Result<Vec<_>>>()?;

        let scenario = Self {
            name: toml_data.name,
            players: toml_data
                .players
                .into_iter()
                .map(|p| Player {
                    id: PlayerId(p.id),
                    name: p.name,
                })
                .collect(),
            ships,
            bodies: toml_data.bodies,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Two frigates and an escort either side of a small planet
    pub fn duel() -> Self {
        let planet = CelestialBody::new(BodyId(1), "Mars", HexCoord::new(0, 0), 4.0).with_wells(vec![
            GravityWell::new(GravityZone::Inner, 1, 1.0),
            GravityWell::new(GravityZone::Middle, 3, 0.5),
            GravityWell::new(GravityZone::Outer, 5, 0.25),
        ]);

        let ship = |id, name: &str, player, q, r, stats| {
            Ship::new(ShipId(id), name, PlayerId(player), HexCoord::new(q, r), stats)
        };

        Self {
            name: "Duel".into(),
            players: vec![
                Player {
                    id: PlayerId(0),
                    name: "Red".into(),
                },
                Player {
                    id: PlayerId(1),
                    name: "Blue".into(),
                },
            ],
            ships: vec![
                ship(1, "Valiant", 0, -6, 2, ShipStats::frigate())
                    .with_velocity(HexCoord::new(1, 0))
                    .with_ordnance(OrdnanceLoad::new(1, 1, 0)),
                ship(2, "Swift", 0, -6, 3, ShipStats::corvette()),
                ship(3, "Raider", 1, 6, -2, ShipStats::frigate())
                    .with_velocity(HexCoord::new(-1, 0))
                    .with_ordnance(OrdnanceLoad::new(1, 0, 1)),
                ship(4, "Hauler", 1, 6, -3, ShipStats::transport()),
            ],
            bodies: vec![planet],
        }
    }

    /// Ids must be unique and every ship must belong to a listed player
    pub fn validate(&self) -> Result<()> {
        if self.players.is_empty() {
            return Err(EngineError::InvalidScenario("no players".into()));
        }

        let mut player_ids = HashSet::new();
        for player in &self.players {
            if !player_ids.insert(player.id) {
                return Err(EngineError::InvalidScenario(format!(
                    "duplicate {}",
                    player.id
                )));
            }
        }

        let mut ship_ids = HashSet::new();
        for ship in &self.ships {
            if !ship_ids.insert(ship.id) {
                return Err(EngineError::InvalidScenario(format!("duplicate {}", ship.id)));
            }
            if !player_ids.contains(&ship.player) {
                return Err(EngineError::InvalidScenario(format!(
                    "{} belongs to unknown {}",
                    ship.id, ship.player
                )));
            }
            if ship.stats.max_thrust > MAX_THRUST {
                return Err(EngineError::InvalidScenario(format!(
                    "{} has max_thrust {}, the limit is {}",
                    ship.id, ship.stats.max_thrust, MAX_THRUST
                )));
            }
        }

        let mut body_ids = HashSet::new();
        for body in &self.bodies {
            if !body_ids.insert(body.id) {
                return Err(EngineError::InvalidScenario(format!(
                    "duplicate body id {}",
                    body.id.0
                )));
            }
        }

        Ok(())
    }

    pub fn into_state(self) -> Result<GameState> {
        self.validate()?;
        tracing::info!(
            "Loaded scenario '{}': {} players, {} ships, {} bodies",
            self.name,
            self.players.len(),
            self.ships.len(),
            self.bodies.len()
        );
        GameState::new(self.players, self.ships, self.bodies)
    }
}

#[derive(Debug, Deserialize)]
struct TomlScenario {
    #[serde(default)]
    name: String,
    #[serde(rename = "player", default)]
    players: Vec<TomlPlayer>,
    #[serde(rename = "ship", default)]
    ships: Vec<TomlShip>,
    #[serde(rename = "body", default)]
    bodies: Vec<CelestialBody>,
}

#[derive(Debug, Deserialize)]
struct TomlPlayer {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlShip {
    id: u32,
    name: String,
    player: u32,
    /// corvette, frigate or transport
    class: Option<String>,
    /// Explicit stats override the class
    stats: Option<ShipStats>,
    position: HexCoord,
    #[serde(default)]
    velocity: Velocity,
    #[serde(default)]
    ordnance: OrdnanceLoad,
}

impl TomlShip {
    fn into_ship(self) -> Result<Ship> {
        let stats = match (self.stats, self.class.as_deref()) {
            (Some(stats), _) => stats,
            (None, Some("corvette")) => ShipStats::corvette(),
            (None, Some("frigate")) => ShipStats::frigate(),
            (None, Some("transport")) => ShipStats::transport(),
            (None, Some(other)) => {
                return Err(EngineError::InvalidScenario(format!(
                    "ship {}: unknown class '{}'",
                    self.id, other
                )))
            }
            (None, None) => {
                return Err(EngineError::InvalidScenario(format!(
                    "ship {}: needs a class or stats",
                    self.id
                )))
            }
        };

        Ok(Ship::new(
            ShipId(self.id),
            self.name,
            PlayerId(self.player),
            self.position,
            stats,
        )
        .with_velocity(self.velocity)
        .with_ordnance(self.ordnance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        name = "Skirmish"

        [[player]]
        id = 0
        name = "Red"

        [[player]]
        id = 1
        name = "Blue"

        [[ship]]
        id = 1
        name = "Valiant"
        player = 0
        class = "frigate"
        position = { q = 0, r = 0 }
        velocity = { q = 1, r = 0 }
        ordnance = { mines = 2, torpedoes = 0, missiles = 1 }

        [[ship]]
        id = 2
        name = "Raider"
        player = 1
        stats = { max_thrust = 3, max_hull = 5, current_hull = 5, weapons = 2 }
        position = { q = 4, r = -1 }

        [[body]]
        id = 1
        name = "Luna"
        position = { q = 2, r = 2 }
        weak_gravity = true
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse_toml(SCENARIO).unwrap();
        assert_eq!(scenario.name, "Skirmish");
        assert_eq!(scenario.players.len(), 2);

        let valiant = &scenario.ships[0];
        assert_eq!(valiant.stats, ShipStats::frigate());
        assert_eq!(valiant.velocity, HexCoord::new(1, 0));
        assert_eq!(valiant.ordnance.mines, 2);

        let raider = &scenario.ships[1];
        assert_eq!(raider.stats.max_thrust, 3);
        assert_eq!(raider.stats.defense, 0);
        assert_eq!(raider.velocity, HexCoord::ZERO);

        let luna = &scenario.bodies[0];
        assert!(luna.weak_gravity);
        assert_eq!(luna.mass, 1.0);
        assert!(luna.gravity_wells.is_empty());
    }

    #[test]
    fn test_into_state_uses_player_order() {
        let state = Scenario::parse_toml(SCENARIO).unwrap().into_state().unwrap();
        assert_eq!(state.turn.turn_order, vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(state.ships.len(), 2);
    }

    #[test]
    fn test_unknown_class_rejected() {
        let toml = r#"
            [[player]]
            id = 0
            name = "Red"
            [[ship]]
            id = 1
            name = "Odd"
            player = 0
            class = "dreadnought"
            position = { q = 0, r = 0 }
        "#;
        assert!(matches!(
            Scenario::parse_toml(toml),
            Err(EngineError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_ship_of_unknown_player_rejected() {
        let toml = r#"
            [[player]]
            id = 0
            name = "Red"
            [[ship]]
            id = 1
            name = "Ghost"
            player = 5
            class = "corvette"
            position = { q = 0, r = 0 }
        "#;
        let err = Scenario::parse_toml(toml).unwrap_err();
        assert!(err.to_string().contains("unknown player 5"));
    }

    #[test]
    fn test_oversized_thrust_rejected() {
        let toml = r#"
            [[player]]
            id = 0
            name = "Red"
            [[ship]]
            id = 1
            name = "Torch"
            player = 0
            stats = { max_thrust = 30000, max_hull = 4, current_hull = 4, weapons = 2 }
            position = { q = 0, r = 0 }
        "#;
        let err = Scenario::parse_toml(toml).unwrap_err();
        assert!(err.to_string().contains("max_thrust 30000"));

        let mut scenario = Scenario::duel();
        scenario.ships[0].stats.max_thrust = MAX_THRUST;
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_duplicate_ship_ids_rejected() {
        let mut scenario = Scenario::duel();
        scenario.ships[1].id = ShipId(1);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert!(matches!(
            Scenario::parse_toml("[[ship]\nid = "),
            Err(EngineError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_builtin_duel_is_valid() {
        let scenario = Scenario::duel();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.bodies[0].gravity_wells.len(), 3);
    }
}
