//! Turn phases and the explicit phase table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a single player's turn, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Plot,
    Ordnance,
    Movement,
    Combat,
    Maintenance,
}

/// One row of the phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRow {
    pub phase: Phase,
    /// Phase that follows for the same player (ignored when `ends_turn`)
    pub next: Phase,
    /// Leaving this phase hands the turn to the next player
    pub ends_turn: bool,
    /// Label for the control that ends this phase
    pub button_label: &'static str,
}

/// Indexed by `Phase as usize`
pub const PHASE_TABLE: [PhaseRow; 5] = [
    PhaseRow {
        phase: Phase::Plot,
        next: Phase::Ordnance,
        ends_turn: false,
        button_label: "Confirm Plots",
    },
    PhaseRow {
        phase: Phase::Ordnance,
        next: Phase::Movement,
        ends_turn: false,
        button_label: "End Ordnance",
    },
    PhaseRow {
        phase: Phase::Movement,
        next: Phase::Combat,
        ends_turn: false,
        button_label: "Execute Movement",
    },
    PhaseRow {
        phase: Phase::Combat,
        next: Phase::Maintenance,
        ends_turn: false,
        button_label: "Resolve Combat",
    },
    PhaseRow {
        phase: Phase::Maintenance,
        next: Phase::Plot,
        ends_turn: true,
        button_label: "End Turn",
    },
];

impl Phase {
    pub fn all() -> [Phase; 5] {
        PHASE_TABLE.map(|row| row.phase)
    }

    pub fn row(&self) -> &'static PhaseRow {
        &PHASE_TABLE[*self as usize]
    }

    pub fn next(&self) -> Phase {
        self.row().next
    }

    pub fn ends_turn(&self) -> bool {
        self.row().ends_turn
    }

    pub fn button_label(&self) -> &'static str {
        self.row().button_label
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Plot => "Plot",
            Phase::Ordnance => "Ordnance",
            Phase::Movement => "Movement",
            Phase::Combat => "Combat",
            Phase::Maintenance => "Maintenance",
        };
        write!(f, "{}", name)
    }
}
