pub mod config;
pub mod error;
pub mod types;

pub use config::{CombatConfig, ConfigError, GameConfig, GravityVariant};
pub use error::{EngineError, RejectedCommand};
pub use types::{BodyId, OrdnanceId, PlayerId, Round, ShipId, Tick};
