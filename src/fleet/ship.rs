//! Ships: the only pieces a player moves and fights with
//!
//! A ship carries its Newtonian state (position and velocity), a thrust
//! budget, combat stats, an ordnance magazine and a cumulative damage
//! counter. Destroyed ships stay in the fleet for history but no longer
//! plot, fight or feel gravity.

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, ShipId};
use crate::ordnance::OrdnanceKind;
use crate::spatial::{HexCoord, Velocity};

/// Largest thrust rating a hull may carry
pub const MAX_THRUST: u32 = 32;

/// Static capabilities of a hull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStats {
    /// Maximum velocity change per round, in hexes
    pub max_thrust: u32,
    pub max_hull: u32,
    pub current_hull: u32,
    /// Attack strength used for odds
    pub weapons: u32,
    /// Defense strength used for odds
    #[serde(default)]
    pub defense: u32,
}

impl ShipStats {
    pub fn new(max_thrust: u32, max_hull: u32, weapons: u32) -> Self {
        Self {
            max_thrust,
            max_hull,
            current_hull: max_hull,
            weapons,
            defense: weapons,
        }
    }

    /// Corvette: fast, lightly armed
    pub fn corvette() -> Self {
        Self::new(2, 4, 2)
    }

    /// Frigate: the standard warship
    pub fn frigate() -> Self {
        Self::new(1, 8, 4)
    }

    /// Transport: unarmed cargo hauler
    pub fn transport() -> Self {
        Self {
            defense: 1,
            ..Self::new(1, 6, 0)
        }
    }
}

/// Ordnance carried aboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrdnanceLoad {
    pub mines: u32,
    pub torpedoes: u32,
    pub missiles: u32,
}

impl OrdnanceLoad {
    pub fn new(mines: u32, torpedoes: u32, missiles: u32) -> Self {
        Self {
            mines,
            torpedoes,
            missiles,
        }
    }

    pub fn count(&self, kind: OrdnanceKind) -> u32 {
        match kind {
            OrdnanceKind::Mine => self.mines,
            OrdnanceKind::Torpedo => self.torpedoes,
            OrdnanceKind::Missile => self.missiles,
        }
    }

    /// Remove one round of `kind`. Returns false (and changes nothing) when empty.
    pub fn take(&mut self, kind: OrdnanceKind) -> bool {
        let slot = match kind {
            OrdnanceKind::Mine => &mut self.mines,
            OrdnanceKind::Torpedo => &mut self.torpedoes,
            OrdnanceKind::Missile => &mut self.missiles,
        };
        match slot.checked_sub(1) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }
}

/// One executed movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub from_position: HexCoord,
    pub velocity: Velocity,
}

/// Outcome of applying combat damage to a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Unharmed,
    Disabled { total_turns: u32 },
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub player: PlayerId,
    pub position: HexCoord,
    pub velocity: Velocity,
    /// Thrust still unspent this round
    pub remaining_thrust: u32,
    pub stats: ShipStats,
    /// Cumulative damage; reaching the destruction threshold destroys the ship
    pub disabled_turns: u32,
    pub destroyed: bool,
    pub ordnance: OrdnanceLoad,
    pub movement_history: Vec<MovementRecord>,
}

impl Ship {
    pub fn new(
        id: ShipId,
        name: impl Into<String>,
        player: PlayerId,
        position: HexCoord,
        stats: ShipStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            player,
            position,
            velocity: Velocity::ZERO,
            remaining_thrust: stats.max_thrust,
            stats,
            disabled_turns: 0,
            destroyed: false,
            ordnance: OrdnanceLoad::default(),
            movement_history: Vec::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_ordnance(mut self, ordnance: OrdnanceLoad) -> Self {
        self.ordnance = ordnance;
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    /// Disabled ships may only coast
    pub fn is_disabled(&self) -> bool {
        !self.destroyed && self.disabled_turns > 0
    }

    pub fn is_armed(&self) -> bool {
        self.stats.weapons > 0
    }

    /// Thrust that may still be spent this round
    pub fn available_thrust(&self) -> u32 {
        if self.destroyed || self.is_disabled() {
            0
        } else {
            self.remaining_thrust.min(self.stats.max_thrust)
        }
    }

    /// Apply a combat result
    ///
    /// Damage accumulates; once `disabled_turns` reaches `destroy_threshold`
    /// (or the result is an outright kill) the ship is destroyed and its
    /// damage counter resets to 0.
    pub fn take_damage(
        &mut self,
        turns_disabled: u32,
        eliminated: bool,
        destroy_threshold: u32,
    ) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::Destroyed;
        }

        self.disabled_turns = self.disabled_turns.saturating_add(turns_disabled);

        if eliminated || self.disabled_turns >= destroy_threshold {
            self.destroy();
            DamageOutcome::Destroyed
        } else if turns_disabled == 0 {
            DamageOutcome::Unharmed
        } else {
            DamageOutcome::Disabled {
                total_turns: self.disabled_turns,
            }
        }
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.disabled_turns = 0;
        self.stats.current_hull = 0;
        self.remaining_thrust = 0;
    }

    /// Repair damage during maintenance; returns turns actually repaired
    pub fn repair(&mut self, turns: u32) -> u32 {
        let repaired = turns.min(self.disabled_turns);
        self.disabled_turns -= repaired;
        repaired
    }

    /// Refill the thrust budget for a new round
    pub fn refuel(&mut self) {
        if self.is_alive() {
            self.remaining_thrust = self.stats.max_thrust;
        }
    }

    /// Execute one Newtonian step with a new velocity
    pub fn advance(&mut self, new_velocity: Velocity) {
        self.movement_history.push(MovementRecord {
            from_position: self.position,
            velocity: new_velocity,
        });
        self.velocity = new_velocity;
        self.position += new_velocity;
    }
}
