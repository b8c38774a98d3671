//! Fleet model: ships and their loadouts

pub mod ship;

pub use ship::{DamageOutcome, MovementRecord, OrdnanceLoad, Ship, ShipStats, MAX_THRUST};
