pub mod dice;
pub mod log;
pub mod odds;
pub mod resolution;
pub mod table;

pub use dice::{DiceRoller, ScriptedDice};
pub use log::{CombatLog, CombatLogEntry};
pub use odds::Odds;
pub use resolution::{
    resolve_attack, resolve_attacks, roll_penalty, validate_attack, CombatResult, CombatRound,
    CombatStage, DeclaredAttack, DeclaredAttacks, Resolution,
};
pub use table::{CombatResultsTable, DamageResult, OddsColumn};
