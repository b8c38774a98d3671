//! Whose turn it is, which phase, which round

use serde::{Deserialize, Serialize};

use crate::core::error::RejectedCommand;
use crate::core::types::{PlayerId, Round, ShipId};
use crate::turn::phase::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub current_player_index: usize,
    pub turn_order: Vec<PlayerId>,
    pub current_phase: Phase,
    /// Starts at 1
    pub round_number: Round,
}

impl TurnState {
    /// First player, Plot phase, round 1. `None` for an empty turn order.
    pub fn new(turn_order: Vec<PlayerId>) -> Option<Self> {
        if turn_order.is_empty() {
            return None;
        }
        Some(Self {
            current_player_index: 0,
            turn_order,
            current_phase: Phase::Plot,
            round_number: 1,
        })
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn_order[self.current_player_index]
    }

    /// The state one phase later, without any guard
    pub fn advanced(&self) -> TurnState {
        let mut next = self.clone();
        if self.current_phase.ends_turn() {
            next.current_player_index = (self.current_player_index + 1) % self.turn_order.len();
            if next.current_player_index == 0 {
                next.round_number += 1;
            }
        }
        next.current_phase = self.current_phase.next();
        next
    }

    /// Guarded transition
    ///
    /// `unplotted` lists the current player's living ships without a plot;
    /// leaving Plot requires it to be empty. A flagged victory freezes the
    /// machine.
    pub fn end_phase(
        &self,
        unplotted: &[ShipId],
        victory: bool,
    ) -> Result<TurnState, RejectedCommand> {
        if victory {
            return Err(RejectedCommand::GameOver);
        }
        if self.current_phase == Phase::Plot && !unplotted.is_empty() {
            return Err(RejectedCommand::UnplottedShips(unplotted.to_vec()));
        }

        let next = self.advanced();
        if next.current_player_index != self.current_player_index {
            tracing::info!(
                "Round {}: {} to move",
                next.round_number,
                next.current_player()
            );
        } else {
            tracing::debug!("{} enters {}", next.current_player(), next.current_phase);
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_players() -> TurnState {
        TurnState::new(vec![PlayerId(0), PlayerId(1)]).unwrap()
    }

    #[test]
    fn test_empty_turn_order_rejected() {
        assert!(TurnState::new(Vec::new()).is_none());
    }

    #[test]
    fn test_five_phases_hand_over_to_next_player() {
        let mut turn = two_players();
        for _ in 0..5 {
            turn = turn.end_phase(&[], false).unwrap();
        }
        assert_eq!(turn.current_player_index, 1);
        assert_eq!(turn.current_player(), PlayerId(1));
        assert_eq!(turn.current_phase, Phase::Plot);
        assert_eq!(turn.round_number, 1);

        for _ in 0..5 {
            turn = turn.end_phase(&[], false).unwrap();
        }
        assert_eq!(turn.current_player_index, 0);
        assert_eq!(turn.current_phase, Phase::Plot);
        assert_eq!(turn.round_number, 2);
    }

    #[test]
    fn test_single_player_wraps_every_turn() {
        let mut turn = TurnState::new(vec![PlayerId(7)]).unwrap();
        for _ in 0..5 {
            turn = turn.advanced();
        }
        assert_eq!(turn.round_number, 2);
        assert_eq!(turn.current_player(), PlayerId(7));
    }

    #[test]
    fn test_plot_guard() {
        let turn = two_players();
        assert_eq!(
            turn.end_phase(&[ShipId(3)], false),
            Err(RejectedCommand::UnplottedShips(vec![ShipId(3)]))
        );

        // Only Plot is guarded
        let ordnance = turn.advanced();
        assert_eq!(
            ordnance.end_phase(&[ShipId(3)], false).unwrap().current_phase,
            Phase::Movement
        );
    }

    #[test]
    fn test_victory_freezes() {
        let turn = two_players().advanced();
        assert_eq!(turn.end_phase(&[], true), Err(RejectedCommand::GameOver));
    }
}
