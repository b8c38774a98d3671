//! Gravity field
//!
//! Two rule variants share the [`GravityModel`] interface: radial zones
//! that change velocity, and directional arrows that displace the ship.

pub mod arrows;
pub mod body;
pub mod orbit;
pub mod radial;

pub use arrows::ArrowGravity;
pub use body::{CelestialBody, GravityHex, GravityWell, GravityZone};
pub use orbit::{is_in_stable_orbit, orbital_velocity};
pub use radial::RadialGravity;

use crate::core::config::GravityVariant;
use crate::fleet::Ship;
use crate::spatial::{HexCoord, Velocity};

pub trait GravityModel {
    fn name(&self) -> &'static str;

    /// Net pull on a ship ending its move at `position`
    fn pull_at(&self, bodies: &[CelestialBody], position: HexCoord) -> Velocity;

    /// Apply gravity to a ship that has just moved, returning the new ship.
    /// Destroyed ships are returned unchanged.
    fn apply(&self, bodies: &[CelestialBody], ship: &Ship) -> Ship;
}

pub fn model_for(variant: GravityVariant) -> &'static dyn GravityModel {
    match variant {
        GravityVariant::Radial => &RadialGravity,
        GravityVariant::Arrows => &ArrowGravity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_selection() {
        assert_eq!(model_for(GravityVariant::Radial).name(), "radial");
        assert_eq!(model_for(GravityVariant::Arrows).name(), "arrows");
    }
}
