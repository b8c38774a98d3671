//! Triplanetary - hot-seat vector-movement space combat engine
//!
//! Ships move on a hex grid with Newtonian velocity, are pulled by planetary
//! gravity, and fight with odds-based dice combat. The crate holds the rules
//! engine; drawing and input belong to the caller, which sends
//! [`game::Command`]s into a [`game::Session`] and reads the results back.

pub mod combat;
pub mod core;
pub mod fleet;
pub mod game;
pub mod gravity;
pub mod movement;
pub mod ordnance;
pub mod spatial;
pub mod turn;
