//! Append-only combat history

use serde::{Deserialize, Serialize};

use crate::combat::resolution::CombatResult;
use crate::core::types::Tick;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub id: u64,
    /// Engine clock at the moment the attack resolved
    pub timestamp: Tick,
    pub result: CombatResult,
    pub attacker_name: String,
    pub target_name: String,
    pub message: String,
}

/// Ordered by resolution time; entries are never edited or removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        timestamp: Tick,
        result: CombatResult,
        attacker_name: String,
        target_name: String,
    ) -> &CombatLogEntry {
        let message = describe(&result, &attacker_name, &target_name);
        self.entries.push(CombatLogEntry {
            id: self.entries.len() as u64 + 1,
            timestamp,
            result,
            attacker_name,
            target_name,
            message,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn describe(result: &CombatResult, attacker: &str, target: &str) -> String {
    let header = format!(
        "{} fires on {} at {} (roll {}, modified {})",
        attacker, target, result.attack.odds, result.die_roll, result.modified_roll
    );
    if result.target_destroyed {
        format!("{}: {} destroyed", header, target)
    } else if result.turns_disabled > 0 {
        format!(
            "{}: {} disabled for {} turn{}",
            header,
            target,
            result.turns_disabled,
            if result.turns_disabled == 1 { "" } else { "s" }
        )
    } else {
        format!("{}: miss", header)
    }
}
