//! Game state, commands and the session that owns them

pub mod command;
pub mod scenario;
pub mod session;
pub mod state;

pub use command::Command;
pub use scenario::Scenario;
pub use session::Session;
pub use state::{GameState, Player, Transition};
