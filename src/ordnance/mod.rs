//! Ordnance lifecycle: mines, torpedoes and missiles launched from ships
//!
//! Launching is bookkeeping only. What happens when ordnance reaches a
//! ship (detonation, damage, removal) is left to the caller; the
//! `detonated` flag is the hook for it.

use serde::{Deserialize, Serialize};

use crate::core::error::RejectedCommand;
use crate::core::types::{OrdnanceId, PlayerId, Round};
use crate::fleet::Ship;
use crate::spatial::{HexCoord, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdnanceKind {
    Mine,
    Torpedo,
    Missile,
}

impl OrdnanceKind {
    pub fn all() -> [OrdnanceKind; 3] {
        [OrdnanceKind::Mine, OrdnanceKind::Torpedo, OrdnanceKind::Missile]
    }

    /// Mines are dropped in place; everything else keeps the launcher's course
    pub fn inherits_velocity(&self) -> bool {
        !matches!(self, OrdnanceKind::Mine)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrdnanceKind::Mine => "mine",
            OrdnanceKind::Torpedo => "torpedo",
            OrdnanceKind::Missile => "missile",
        }
    }
}

impl std::str::FromStr for OrdnanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mine" => Ok(OrdnanceKind::Mine),
            "torpedo" => Ok(OrdnanceKind::Torpedo),
            "missile" => Ok(OrdnanceKind::Missile),
            other => Err(format!("unknown ordnance type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordnance {
    pub id: OrdnanceId,
    pub kind: OrdnanceKind,
    pub player: PlayerId,
    pub position: HexCoord,
    pub velocity: Velocity,
    pub created_round: Round,
    pub detonated: bool,
}

impl Ordnance {
    pub fn is_active(&self) -> bool {
        !self.detonated
    }

    /// Drift one round along the current velocity
    pub fn drift(&mut self) {
        if self.is_active() {
            self.position += self.velocity;
        }
    }
}

/// Launch one round of `kind` from `ship`
///
/// Returns the updated ship (magazine decremented by exactly one) and the new
/// ordnance. The input ship is never modified.
pub fn launch(
    ship: &Ship,
    kind: OrdnanceKind,
    round: Round,
    id: OrdnanceId,
) -> Result<(Ship, Ordnance), RejectedCommand> {
    if ship.destroyed {
        return Err(RejectedCommand::ShipDestroyed(ship.id));
    }
    if ship.is_disabled() {
        return Err(RejectedCommand::ShipDisabled(ship.id));
    }

    let mut launcher = ship.clone();
    if !launcher.ordnance.take(kind) {
        return Err(RejectedCommand::NoOrdnance {
            ship: ship.id,
            kind,
        });
    }

    let velocity = if kind.inherits_velocity() {
        ship.velocity
    } else {
        Velocity::ZERO
    };

    let ordnance = Ordnance {
        id,
        kind,
        player: ship.player,
        position: ship.position,
        velocity,
        created_round: round,
        detonated: false,
    };

    tracing::debug!(
        "{} launched a {} ({} left)",
        ship.id,
        kind.name(),
        launcher.ordnance.count(kind)
    );

    Ok((launcher, ordnance))
}
