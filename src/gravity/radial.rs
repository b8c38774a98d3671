//! Radial zone gravity
//!
//! Each body pulls with the strength of the smallest zone that covers the
//! ship. Pulls from all bodies are summed in fractional hex space and the
//! total is cube-rounded before it is added to velocity.

use crate::fleet::Ship;
use crate::gravity::body::{CelestialBody, GravityZone};
use crate::gravity::GravityModel;
use crate::spatial::{FractionalHex, HexCoord, Velocity};

/// Innermost zone covering `position` across every body
pub fn zone_at(bodies: &[CelestialBody], position: HexCoord) -> Option<GravityZone> {
    bodies
        .iter()
        .filter_map(|body| body.well_at(position))
        .map(|well| well.zone)
        .min()
}

/// Unrounded net pull at `position`
///
/// The direction toward each body is normalised by hex distance, so a pull
/// strength of 1.0 is one hex of velocity change.
pub fn force_at(bodies: &[CelestialBody], position: HexCoord) -> FractionalHex {
    bodies
        .iter()
        .filter_map(|body| {
            let distance = position.distance(&body.position);
            if distance == 0 {
                return None;
            }
            let well = body.well_at(position)?;
            let toward = FractionalHex::from(body.position - position);
            Some(toward.scale(well.pull_strength / distance as f64))
        })
        .fold(FractionalHex::default(), |total, pull| total + pull)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RadialGravity;

impl GravityModel for RadialGravity {
    fn name(&self) -> &'static str {
        "radial"
    }

    fn pull_at(&self, bodies: &[CelestialBody], position: HexCoord) -> Velocity {
        force_at(bodies, position).round()
    }

    fn apply(&self, bodies: &[CelestialBody], ship: &Ship) -> Ship {
        let mut ship = ship.clone();
        if ship.destroyed {
            return ship;
        }
        let pull = self.pull_at(bodies, ship.position);
        if !pull.is_zero() {
            tracing::debug!("{} pulled by {} (radial)", ship.name, pull);
            ship.velocity += pull;
        }
        ship
    }
}
