//! Game state and its transitions
//!
//! Every transition takes `&self` and returns a new `GameState`; a rejected
//! command returns the rejection and the caller keeps the old value.

use serde::{Deserialize, Serialize};

use crate::combat::{
    validate_attack, CombatLog, CombatRound, DeclaredAttack, DeclaredAttacks, DiceRoller, Odds,
};
use crate::core::config::GameConfig;
use crate::core::error::{EngineError, RejectedCommand, Result};
use crate::core::types::{BodyId, OrdnanceId, PlayerId, ShipId, Tick};
use crate::fleet::Ship;
use crate::game::command::Command;
use crate::gravity::{self, radial, CelestialBody, GravityHex, GravityZone};
use crate::movement::{self, PlottedMoves, ReachableHexes};
use crate::ordnance::{self, Ordnance, OrdnanceKind};
use crate::spatial::{FractionalHex, HexCoord, Velocity};
use crate::turn::{Phase, TurnState};

/// Outcome of a command: the new state, or why nothing changed
pub type Transition = std::result::Result<GameState, RejectedCommand>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub turn: TurnState,
    pub ships: Vec<Ship>,
    pub bodies: Vec<CelestialBody>,
    pub plotted_moves: PlottedMoves,
    pub combat: CombatRound,
    pub combat_log: CombatLog,
    pub ordnance: Vec<Ordnance>,
    pub selected_ship: Option<ShipId>,
    pub show_reachable_hexes: bool,
    pub victory: Option<PlayerId>,
    pub clock: Tick,
    next_ordnance_id: u32,
}

impl GameState {
    /// Turn order follows the order of `players`
    pub fn new(
        players: Vec<Player>,
        ships: Vec<Ship>,
        bodies: Vec<CelestialBody>,
    ) -> Result<Self> {
        let turn = TurnState::new(players.iter().map(|p| p.id).collect())
            .ok_or_else(|| EngineError::InvalidScenario("no players".into()))?;

        Ok(Self {
            players,
            turn,
            ships,
            bodies,
            plotted_moves: PlottedMoves::default(),
            combat: CombatRound::new(),
            combat_log: CombatLog::new(),
            ordnance: Vec::new(),
            selected_ship: None,
            show_reachable_hexes: false,
            victory: None,
            clock: 0,
            next_ordnance_id: 1,
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player()
    }

    pub fn phase(&self) -> Phase {
        self.turn.current_phase
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn declared_attacks(&self) -> &DeclaredAttacks {
        self.combat.declared()
    }

    /// Living ships of the current player that still need a plot, by id
    pub fn unplotted_ships(&self) -> Vec<ShipId> {
        let player = self.current_player();
        let mut ids: Vec<ShipId> = self
            .ships
            .iter()
            .filter(|s| s.player == player && s.is_alive())
            .filter(|s| !self.plotted_moves.contains_key(&s.id))
            .map(|s| s.id)
            .collect();
        ids.sort();
        ids
    }

    pub fn reachable_hexes(
        &self,
        id: ShipId,
    ) -> std::result::Result<ReachableHexes, RejectedCommand> {
        let ship = self.ship(id).ok_or(RejectedCommand::UnknownShip(id))?;
        if ship.destroyed {
            return Err(RejectedCommand::ShipDestroyed(id));
        }
        Ok(movement::reachable_for(ship, self.plotted_moves.get(&id)))
    }

    /// Reachable map for the selected ship while the overlay is switched on
    pub fn selected_reachable_hexes(&self) -> Option<ReachableHexes> {
        if !self.show_reachable_hexes {
            return None;
        }
        self.reachable_hexes(self.selected_ship?).ok()
    }

    pub fn gravity_zone_at(&self, position: HexCoord) -> Option<GravityZone> {
        radial::zone_at(&self.bodies, position)
    }

    /// Unrounded radial pull at `position`
    pub fn gravity_force_at(&self, position: HexCoord) -> FractionalHex {
        radial::force_at(&self.bodies, position)
    }

    /// Velocity change the configured model applies at `position`
    pub fn gravity_pull_at(&self, position: HexCoord, config: &GameConfig) -> Velocity {
        gravity::model_for(config.gravity).pull_at(&self.bodies, position)
    }

    pub fn gravity_hexes(&self) -> Vec<GravityHex> {
        gravity::arrows::gravity_hexes(&self.bodies)
    }

    /// Bodies the ship is currently in a stable orbit around
    pub fn orbiting(&self, id: ShipId, config: &GameConfig) -> Vec<BodyId> {
        let Some(ship) = self.ship(id).filter(|s| s.is_alive()) else {
            return Vec::new();
        };
        self.bodies
            .iter()
            .filter(|b| gravity::is_in_stable_orbit(ship, b, config.orbit_tolerance))
            .map(|b| b.id)
            .collect()
    }

    /// Odds from weapons against defense, clamped down to a table column
    pub fn suggested_odds(
        &self,
        attacker: ShipId,
        target: ShipId,
        config: &GameConfig,
    ) -> std::result::Result<Odds, RejectedCommand> {
        let a = self.ship(attacker).ok_or(RejectedCommand::UnknownShip(attacker))?;
        let t = self.ship(target).ok_or(RejectedCommand::UnknownShip(target))?;
        let odds = Odds::from_strengths(a.stats.weapons, t.stats.defense);
        Ok(config
            .combat
            .table
            .column_for(odds)
            .map_or(odds, |column| column.odds))
    }

    pub fn button_label(&self) -> &'static str {
        if self.victory.is_some() {
            "Game Over"
        } else {
            self.phase().button_label()
        }
    }

    /// Players in turn order that still have a living ship
    pub fn surviving_players(&self) -> Vec<PlayerId> {
        self.turn
            .turn_order
            .iter()
            .copied()
            .filter(|p| self.ships.iter().any(|s| s.player == *p && s.is_alive()))
            .collect()
    }

    /// The last player with living ships, once every rival has none
    pub fn winner(&self) -> Option<PlayerId> {
        if self.turn.turn_order.len() < 2 {
            return None;
        }
        match self.surviving_players().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    pub fn apply(
        &self,
        command: &Command,
        config: &GameConfig,
        dice: &mut dyn DiceRoller,
    ) -> Transition {
        match command {
            Command::SelectShip(id) => self.select_ship(*id),
            Command::PlotMove {
                ship,
                velocity,
                thrust_used,
            } => self.plot_move(*ship, *velocity, *thrust_used),
            Command::PlotDestination { ship, destination } => {
                self.plot_destination(*ship, *destination)
            }
            Command::ClearPlot(ship) => self.clear_plot(*ship),
            Command::DeclareAttack {
                attacker,
                target,
                odds,
            } => self.declare_attack(*attacker, *target, *odds, config),
            Command::CancelAttack(attacker) => self.cancel_attack(*attacker),
            Command::LaunchOrdnance { ship, kind } => self.launch_ordnance(*ship, *kind),
            Command::EndPhase => self.end_phase(config, dice),
            Command::EndTurn => self.end_turn(config, dice),
            Command::ToggleReachableHexesDisplay => Ok(self.toggle_reachable_hexes()),
            Command::FlagVictory(player) => self.flag_victory(*player),
        }
    }

    fn require_running(&self) -> std::result::Result<(), RejectedCommand> {
        match self.victory {
            Some(_) => Err(RejectedCommand::GameOver),
            None => Ok(()),
        }
    }

    fn require_phase(&self, expected: Phase) -> std::result::Result<(), RejectedCommand> {
        if self.phase() != expected {
            return Err(RejectedCommand::WrongPhase {
                expected,
                actual: self.phase(),
            });
        }
        Ok(())
    }

    /// A living ship of the current player
    fn own_ship(&self, id: ShipId) -> std::result::Result<&Ship, RejectedCommand> {
        let ship = self.ship(id).ok_or(RejectedCommand::UnknownShip(id))?;
        if ship.destroyed {
            return Err(RejectedCommand::ShipDestroyed(id));
        }
        if ship.player != self.current_player() {
            return Err(RejectedCommand::NotOwner {
                ship: id,
                player: self.current_player(),
            });
        }
        Ok(ship)
    }

    fn replace_ship(&mut self, ship: Ship) {
        if let Some(slot) = self.ships.iter_mut().find(|s| s.id == ship.id) {
            *slot = ship;
        }
    }

    pub fn select_ship(&self, id: Option<ShipId>) -> Transition {
        if let Some(id) = id {
            self.ship(id).ok_or(RejectedCommand::UnknownShip(id))?;
        }
        let mut next = self.clone();
        next.selected_ship = id;
        Ok(next)
    }

    pub fn toggle_reachable_hexes(&self) -> GameState {
        let mut next = self.clone();
        next.show_reachable_hexes = !self.show_reachable_hexes;
        next
    }

    pub fn plot_move(&self, id: ShipId, velocity: Velocity, thrust_used: u32) -> Transition {
        self.require_running()?;
        self.require_phase(Phase::Plot)?;
        let ship = self.own_ship(id)?;
        let plot = movement::plot_velocity(ship, velocity, thrust_used)?;

        let mut next = self.clone();
        next.plotted_moves.insert(id, plot);
        Ok(next)
    }

    pub fn plot_destination(&self, id: ShipId, destination: HexCoord) -> Transition {
        self.require_running()?;
        self.require_phase(Phase::Plot)?;
        let ship = self.own_ship(id)?;
        let plot = movement::plot_destination(ship, self.plotted_moves.get(&id), destination)?;

        let mut next = self.clone();
        next.plotted_moves.insert(id, plot);
        Ok(next)
    }

    pub fn clear_plot(&self, id: ShipId) -> Transition {
        self.require_running()?;
        self.require_phase(Phase::Plot)?;
        self.own_ship(id)?;

        let mut next = self.clone();
        next.plotted_moves.remove(&id);
        Ok(next)
    }

    pub fn declare_attack(
        &self,
        attacker: ShipId,
        target: ShipId,
        odds: Odds,
        config: &GameConfig,
    ) -> Transition {
        self.require_running()?;
        self.require_phase(Phase::Combat)?;
        let attack = DeclaredAttack {
            attacker_id: attacker,
            target_id: target,
            odds,
        };
        validate_attack(&self.ships, self.current_player(), &attack, &config.combat)?;

        let mut next = self.clone();
        next.combat.declare(attack);
        Ok(next)
    }

    pub fn cancel_attack(&self, attacker: ShipId) -> Transition {
        self.require_running()?;
        self.require_phase(Phase::Combat)?;

        let mut next = self.clone();
        next.combat.cancel(attacker)?;
        Ok(next)
    }

    pub fn launch_ordnance(&self, id: ShipId, kind: OrdnanceKind) -> Transition {
        self.require_running()?;
        self.require_phase(Phase::Ordnance)?;
        let ship = self.own_ship(id)?;
        let (launcher, launched) = ordnance::launch(
            ship,
            kind,
            self.turn.round_number,
            OrdnanceId(self.next_ordnance_id),
        )?;

        let mut next = self.clone();
        next.replace_ship(launcher);
        next.ordnance.push(launched);
        next.next_ordnance_id += 1;
        Ok(next)
    }

    pub fn flag_victory(&self, player: PlayerId) -> Transition {
        self.require_running()?;
        if !self.turn.turn_order.contains(&player) {
            return Err(RejectedCommand::UnknownPlayer(player));
        }
        let mut next = self.clone();
        next.victory = Some(player);
        tracing::info!("Victory flagged for {}", player);
        Ok(next)
    }

    /// Leave the current phase, running whatever the phase does on exit
    pub fn end_phase(&self, config: &GameConfig, dice: &mut dyn DiceRoller) -> Transition {
        let unplotted = if self.phase() == Phase::Plot {
            self.unplotted_ships()
        } else {
            Vec::new()
        };
        let next_turn = self.turn.end_phase(&unplotted, self.victory.is_some())?;

        let mut next = self.clone();
        let player = self.current_player();
        match self.phase() {
            Phase::Plot | Phase::Ordnance => {}
            Phase::Movement => next.execute_movement(player, config),
            Phase::Combat => next.resolve_combat(config, dice),
            Phase::Maintenance => next.maintenance(player, config),
        }

        next.turn = next_turn;
        next.clock += 1;
        if next.phase() == Phase::Combat {
            next.combat.begin();
        }
        Ok(next)
    }

    /// End phases until the next player's Plot phase
    pub fn end_turn(&self, config: &GameConfig, dice: &mut dyn DiceRoller) -> Transition {
        let mut next = self.end_phase(config, dice)?;
        while next.phase() != Phase::Plot {
            next = next.end_phase(config, dice)?;
        }
        Ok(next)
    }

    fn execute_movement(&mut self, player: PlayerId, config: &GameConfig) {
        let model = gravity::model_for(config.gravity);
        self.ships =
            movement::execute_movement(&self.ships, &self.plotted_moves, player, &self.bodies, model);

        let moved: Vec<ShipId> = self
            .ships
            .iter()
            .filter(|s| s.player == player)
            .map(|s| s.id)
            .collect();
        self.plotted_moves.retain(|id, _| !moved.contains(id));
        self.ordnance = movement::drift_ordnance(&self.ordnance, player);
    }

    fn resolve_combat(&mut self, config: &GameConfig, dice: &mut dyn DiceRoller) {
        if let Some(resolution) =
            self.combat
                .resolve(&self.ships, &config.combat, dice, &self.combat_log, self.clock)
        {
            self.ships = resolution.ships;
            self.combat_log = resolution.log;
        }
        self.combat.clear();
    }

    fn maintenance(&mut self, player: PlayerId, config: &GameConfig) {
        for ship in self.ships.iter_mut().filter(|s| s.player == player && s.is_alive()) {
            let repaired = ship.repair(config.repair_per_turn);
            if repaired > 0 {
                tracing::debug!("{} repaired {} turn(s) of damage", ship.name, repaired);
            }
            ship.refuel();
        }
    }
}
