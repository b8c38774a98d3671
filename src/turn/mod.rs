pub mod phase;
pub mod state;

pub use phase::{Phase, PhaseRow, PHASE_TABLE};
pub use state::TurnState;
