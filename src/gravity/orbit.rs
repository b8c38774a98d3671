//! Orbit predicates
//!
//! Speeds are measured in hexes per round. Cartesian conversions are divided
//! by the centre-to-centre spacing (sqrt 3 at unit size) to stay in hex units.

use crate::fleet::Ship;
use crate::gravity::body::CelestialBody;
use crate::spatial::HexCoord;

fn hex_units(hex: HexCoord) -> (f64, f64) {
    let (x, y) = hex.to_cartesian();
    let spacing = 3f64.sqrt();
    (x / spacing, y / spacing)
}

/// Circular orbit speed at `distance` from a body of `mass`
///
/// Decreases with distance and increases with mass; 0 at or inside the body.
pub fn orbital_velocity(distance: f64, mass: f64) -> f64 {
    if distance <= 0.0 || mass <= 0.0 {
        return 0.0;
    }
    (mass / distance).sqrt()
}

/// Component of the ship's velocity perpendicular to the line to the body
pub fn tangential_speed(ship: &Ship, body: &CelestialBody) -> f64 {
    let (rx, ry) = hex_units(ship.position - body.position);
    let (vx, vy) = hex_units(ship.velocity);
    let radius = (rx * rx + ry * ry).sqrt();
    if radius == 0.0 {
        return 0.0;
    }
    (rx * vy - ry * vx).abs() / radius
}

pub fn is_in_stable_orbit(ship: &Ship, body: &CelestialBody, tolerance: f64) -> bool {
    let distance = ship.position.distance(&body.position);
    if distance == 0 || ship.velocity.is_zero() {
        return false;
    }
    let expected = orbital_velocity(distance as f64, body.mass);
    (tangential_speed(ship, body) - expected).abs() <= tolerance
}
