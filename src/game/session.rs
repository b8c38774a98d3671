//! Session: owns the current game state, the rules and the dice
//!
//! The presentation layer dispatches commands here and reads queries back.
//! A rejected command leaves the state unchanged; the rejection is logged at
//! debug level and returned for callers that want to show it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{CombatLog, DeclaredAttacks, DiceRoller};
use crate::core::config::GameConfig;
use crate::core::error::{RejectedCommand, Result};
use crate::core::types::{BodyId, PlayerId, ShipId};
use crate::fleet::Ship;
use crate::game::command::Command;
use crate::game::state::GameState;
use crate::gravity::{GravityHex, GravityZone};
use crate::movement::{PlottedMoves, ReachableHexes};
use crate::ordnance::Ordnance;
use crate::spatial::{FractionalHex, HexCoord, Velocity};
use crate::turn::TurnState;

pub struct Session<D: DiceRoller = ChaCha8Rng> {
    state: GameState,
    config: GameConfig,
    dice: D,
}

impl Session<ChaCha8Rng> {
    /// Session rolling a ChaCha8 generator seeded with `seed`
    pub fn seeded(state: GameState, config: GameConfig, seed: u64) -> Self {
        Self::new(state, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<D: DiceRoller> Session<D> {
    pub fn new(state: GameState, config: GameConfig, dice: D) -> Self {
        Self {
            state,
            config,
            dice,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dispatch(&mut self, command: Command) -> std::result::Result<(), RejectedCommand> {
        match self.state.apply(&command, &self.config, &mut self.dice) {
            Ok(next) => {
                self.state = next;
                if command.is_game_action() {
                    self.check_victory();
                }
                Ok(())
            }
            Err(rejection) => {
                tracing::debug!("Rejected '{}': {}", command, rejection);
                Err(rejection)
            }
        }
    }

    /// Flag the last player standing, if there is one
    pub fn check_victory(&mut self) -> Option<PlayerId> {
        if self.state.victory.is_none() {
            if let Some(winner) = self.state.winner() {
                if let Ok(next) = self.state.flag_victory(winner) {
                    self.state = next;
                }
            }
        }
        self.state.victory
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.state.turn
    }

    pub fn ships(&self) -> &[Ship] {
        &self.state.ships
    }

    pub fn plotted_moves(&self) -> &PlottedMoves {
        &self.state.plotted_moves
    }

    pub fn declared_attacks(&self) -> &DeclaredAttacks {
        self.state.declared_attacks()
    }

    pub fn combat_log(&self) -> &CombatLog {
        &self.state.combat_log
    }

    pub fn reachable_hexes(
        &self,
        ship: ShipId,
    ) -> std::result::Result<ReachableHexes, RejectedCommand> {
        self.state.reachable_hexes(ship)
    }

    pub fn selected_reachable_hexes(&self) -> Option<ReachableHexes> {
        self.state.selected_reachable_hexes()
    }

    pub fn gravity_zone_at(&self, position: HexCoord) -> Option<GravityZone> {
        self.state.gravity_zone_at(position)
    }

    pub fn gravity_force_at(&self, position: HexCoord) -> FractionalHex {
        self.state.gravity_force_at(position)
    }

    pub fn gravity_pull_at(&self, position: HexCoord) -> Velocity {
        self.state.gravity_pull_at(position, &self.config)
    }

    pub fn gravity_hexes(&self) -> Vec<GravityHex> {
        self.state.gravity_hexes()
    }

    /// Bodies the ship is in a stable orbit around
    pub fn orbiting(&self, ship: ShipId) -> Vec<BodyId> {
        self.state.orbiting(ship, &self.config)
    }

    pub fn ordnance(&self) -> &[Ordnance] {
        &self.state.ordnance
    }

    pub fn selected_ship(&self) -> Option<ShipId> {
        self.state.selected_ship
    }

    pub fn show_reachable_hexes(&self) -> bool {
        self.state.show_reachable_hexes
    }

    pub fn victory(&self) -> Option<PlayerId> {
        self.state.victory
    }

    pub fn button_label(&self) -> &'static str {
        self.state.button_label()
    }

    /// Full state as pretty JSON
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }
}
