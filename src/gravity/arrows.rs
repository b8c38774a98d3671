//! Directional arrow gravity
//!
//! Every hex adjacent to a body holds an arrow pointing at it. A ship that
//! ends its move on arrows is displaced one hex per applicable arrow, and
//! the displacement becomes part of its velocity.
//!
//! Stacking: strong arrows always apply and sum. Weak arrows apply only on a
//! hex with no strong arrow; weak arrows of different bodies sum, but each
//! body counts once.

use crate::core::types::BodyId;
use crate::fleet::Ship;
use crate::gravity::body::{CelestialBody, GravityHex};
use crate::gravity::GravityModel;
use crate::spatial::{HexCoord, Velocity};

/// Every arrow on the map
pub fn gravity_hexes(bodies: &[CelestialBody]) -> Vec<GravityHex> {
    bodies.iter().flat_map(|b| b.gravity_hexes()).collect()
}

/// Arrows in a single hex
pub fn arrows_at(bodies: &[CelestialBody], position: HexCoord) -> Vec<GravityHex> {
    bodies
        .iter()
        .flat_map(|b| b.gravity_hexes())
        .filter(|h| h.position == position)
        .collect()
}

/// Net displacement for a ship ending its move at `position`
pub fn displacement_at(bodies: &[CelestialBody], position: HexCoord) -> Velocity {
    let arrows = arrows_at(bodies, position);

    let strong: Vec<&GravityHex> = arrows.iter().filter(|h| !h.is_weak).collect();
    if !strong.is_empty() {
        return strong
            .iter()
            .fold(HexCoord::ZERO, |total, h| total + h.direction.offset());
    }

    let mut seen: Vec<BodyId> = Vec::new();
    let mut total = HexCoord::ZERO;
    for arrow in arrows.iter().filter(|h| h.is_weak) {
        if seen.contains(&arrow.body) {
            continue;
        }
        seen.push(arrow.body);
        total += arrow.direction.offset();
    }
    total
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowGravity;

impl GravityModel for ArrowGravity {
    fn name(&self) -> &'static str {
        "arrows"
    }

    fn pull_at(&self, bodies: &[CelestialBody], position: HexCoord) -> Velocity {
        displacement_at(bodies, position)
    }

    fn apply(&self, bodies: &[CelestialBody], ship: &Ship) -> Ship {
        let mut ship = ship.clone();
        if ship.destroyed {
            return ship;
        }
        let shift = self.pull_at(bodies, ship.position);
        if !shift.is_zero() {
            tracing::debug!("{} deflected {} by gravity", ship.name, shift);
            ship.position += shift;
            ship.velocity += shift;
        }
        ship
    }
}
