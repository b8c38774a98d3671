//! Hex grid algebra shared by every other system

pub mod hex;

pub use hex::{FractionalHex, HexCoord, HexDirection, Velocity};
