//! Celestial bodies and the gravity features they project onto the map

use serde::{Deserialize, Serialize};

use crate::core::types::BodyId;
use crate::spatial::{HexCoord, HexDirection};

/// Radial band around a body, innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityZone {
    Inner,
    Middle,
    Outer,
}

impl std::fmt::Display for GravityZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GravityZone::Inner => "inner",
            GravityZone::Middle => "middle",
            GravityZone::Outer => "outer",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityWell {
    pub zone: GravityZone,
    /// Hex distance covered by this zone
    pub radius: u32,
    /// Velocity change (hexes) toward the body per round
    pub pull_strength: f64,
}

impl GravityWell {
    pub fn new(zone: GravityZone, radius: u32, pull_strength: f64) -> Self {
        Self {
            zone,
            radius,
            pull_strength,
        }
    }
}

/// One gravity arrow in a hex adjacent to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GravityHex {
    pub body: BodyId,
    pub position: HexCoord,
    /// Points at the body
    pub direction: HexDirection,
    pub is_weak: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub position: HexCoord,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub gravity_wells: Vec<GravityWell>,
    /// Small bodies (moons, asteroids) only have weak arrows
    #[serde(default)]
    pub weak_gravity: bool,
}

fn default_mass() -> f64 {
    1.0
}

impl CelestialBody {
    pub fn new(id: BodyId, name: impl Into<String>, position: HexCoord, mass: f64) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            mass,
            gravity_wells: Vec::new(),
            weak_gravity: false,
        }
    }

    pub fn with_wells(mut self, wells: Vec<GravityWell>) -> Self {
        self.gravity_wells = wells;
        self
    }

    pub fn weak(mut self) -> Self {
        self.weak_gravity = true;
        self
    }

    /// Smallest well covering `position`, if any
    pub fn well_at(&self, position: HexCoord) -> Option<&GravityWell> {
        let distance = self.position.distance(&position);
        self.gravity_wells
            .iter()
            .filter(|w| distance <= w.radius)
            .min_by_key(|w| w.radius)
    }

    /// The six arrows surrounding this body
    pub fn gravity_hexes(&self) -> Vec<GravityHex> {
        HexDirection::all()
            .into_iter()
            .map(|dir| GravityHex {
                body: self.id,
                position: self.position.neighbor(dir),
                direction: dir.opposite(),
                is_weak: self.weak_gravity,
            })
            .collect()
    }
}
