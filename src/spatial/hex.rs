//! Hex coordinate system for the star map (axial coordinates)
//!
//! Uses axial coordinates (q, r) with the implicit cube coordinate
//! `s = -q - r`. Positions and velocities share the same type: a velocity
//! is simply the displacement applied each round.

use derive_more::{Add, AddAssign, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Axial hex coordinate
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// A velocity is a hex displacement per round
pub type Velocity = HexCoord;

impl HexCoord {
    pub const ZERO: HexCoord = HexCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance from the origin, i.e. the magnitude of a displacement
    pub fn length(&self) -> u32 {
        ((self.q.abs() + self.r.abs() + self.s().abs()) / 2) as u32
    }

    /// Manhattan distance in hex space
    pub fn distance(&self, other: &Self) -> u32 {
        (*self - *other).length()
    }

    pub fn is_zero(&self) -> bool {
        self.q == 0 && self.r == 0
    }

    /// Multiply a displacement by an integer factor
    pub fn scale(&self, factor: i32) -> Self {
        Self::new(self.q * factor, self.r * factor)
    }

    /// Get all 6 neighboring hex coordinates
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexDirection::all().map(|dir| *self + dir.offset())
    }

    /// Neighbor in a single direction
    pub fn neighbor(&self, direction: HexDirection) -> HexCoord {
        *self + direction.offset()
    }

    /// Get all hexes within range (inclusive)
    ///
    /// Always returns exactly `3 * range * (range + 1) + 1` hexes.
    pub fn hexes_in_range(&self, range: u32) -> Vec<HexCoord> {
        let mut results = Vec::with_capacity(range_len(range).unwrap_or(0));
        // Keeps `-q - range` inside i32
        let range = range.min(i32::MAX as u32 / 2) as i32;
        for q in -range..=range {
            for r in (-range).max(-q - range)..=range.min(-q + range) {
                results.push(HexCoord::new(self.q + q, self.r + r));
            }
        }
        results
    }

    /// Center of this hex in Cartesian space (pointy-top layout, unit size)
    pub fn to_cartesian(&self) -> (f64, f64) {
        FractionalHex::from(*self).to_cartesian()
    }
}

/// Number of hexes within `range` of a center, `None` if it does not fit in `usize`
pub fn range_len(range: u32) -> Option<usize> {
    let r = range as usize;
    r.checked_add(1)
        .and_then(|n| n.checked_mul(r))
        .and_then(|n| n.checked_mul(3))
        .and_then(|n| n.checked_add(1))
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Hex coordinate with fractional components, used for force sums
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Add, Sub, Neg)]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
}

impl FractionalHex {
    pub fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> f64 {
        -self.q - self.r
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.q * factor, self.r * factor)
    }

    /// Round to the nearest integer hex (cube rounding)
    pub fn round(&self) -> HexCoord {
        let s = self.s();
        let mut rq = self.q.round();
        let mut rr = self.r.round();
        let rs = s.round();

        let q_diff = (rq - self.q).abs();
        let r_diff = (rr - self.r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        HexCoord::new(rq as i32, rr as i32)
    }

    pub fn to_cartesian(&self) -> (f64, f64) {
        let x = 3f64.sqrt() * (self.q + self.r / 2.0);
        let y = 1.5 * self.r;
        (x, y)
    }
}

impl From<HexCoord> for FractionalHex {
    fn from(hex: HexCoord) -> Self {
        Self::new(hex.q as f64, hex.r as f64)
    }
}

/// The six unit directions of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// Get the hex offset for this direction
    pub fn offset(&self) -> HexCoord {
        match self {
            HexDirection::East => HexCoord::new(1, 0),
            HexDirection::NorthEast => HexCoord::new(1, -1),
            HexDirection::NorthWest => HexCoord::new(0, -1),
            HexDirection::West => HexCoord::new(-1, 0),
            HexDirection::SouthWest => HexCoord::new(-1, 1),
            HexDirection::SouthEast => HexCoord::new(0, 1),
        }
    }

    /// Direction whose offset equals `offset`, if it is a unit vector
    pub fn from_offset(offset: HexCoord) -> Option<Self> {
        Self::all().into_iter().find(|dir| dir.offset() == offset)
    }

    /// Get opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            HexDirection::East => HexDirection::West,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::West => HexDirection::East,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::SouthEast => HexDirection::NorthWest,
        }
    }

    /// All directions
    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::East,
            HexDirection::NorthEast,
            HexDirection::NorthWest,
            HexDirection::West,
            HexDirection::SouthWest,
            HexDirection::SouthEast,
        ]
    }
}
