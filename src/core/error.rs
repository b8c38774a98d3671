use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::types::{PlayerId, ShipId};
use crate::ordnance::OrdnanceKind;
use crate::spatial::HexCoord;
use crate::turn::Phase;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// A command that failed validation. The game state is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectedCommand {
    #[error("No ship with id {0}")]
    UnknownShip(ShipId),

    #[error("{0} is destroyed")]
    ShipDestroyed(ShipId),

    #[error("{0} is disabled")]
    ShipDisabled(ShipId),

    #[error("No {0} in this game")]
    UnknownPlayer(PlayerId),

    #[error("{ship} does not belong to {player}")]
    NotOwner { ship: ShipId, player: PlayerId },

    #[error("Command requires the {expected:?} phase, current phase is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("{ship} cannot reach {destination}")]
    UnreachableDestination { ship: ShipId, destination: HexCoord },

    #[error("{ship} needs {requested} thrust but has {available}")]
    ThrustExceeded {
        ship: ShipId,
        requested: u32,
        available: u32,
    },

    #[error("Plotted thrust {claimed} does not match velocity change {actual} for {ship}")]
    ThrustMismatch {
        ship: ShipId,
        claimed: u32,
        actual: u32,
    },

    #[error("{ship} has no {kind:?} left")]
    NoOrdnance { ship: ShipId, kind: OrdnanceKind },

    #[error("{0} has no weapons")]
    NoWeapons(ShipId),

    #[error("{attacker} cannot target {target}")]
    InvalidTarget { attacker: ShipId, target: ShipId },

    #[error("No attack declared by {0}")]
    NoDeclaredAttack(ShipId),

    #[error("Ships without a plotted move: {0:?}")]
    UnplottedShips(Vec<ShipId>),

    #[error("The game is over")]
    GameOver,
}
