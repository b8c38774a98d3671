//! Ship-to-ship gun combat
//!
//! Attacks are declared during the Combat phase and resolved together when
//! the phase ends. Each attack rolls one die, applies range and relative
//! velocity penalties, and reads the combat results table.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::dice::DiceRoller;
use crate::combat::log::CombatLog;
use crate::combat::odds::Odds;
use crate::combat::table::DamageResult;
use crate::core::config::CombatConfig;
use crate::core::error::RejectedCommand;
use crate::core::types::{PlayerId, ShipId, Tick};
use crate::fleet::{DamageOutcome, Ship};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredAttack {
    pub attacker_id: ShipId,
    pub target_id: ShipId,
    pub odds: Odds,
}

/// Pending attacks keyed by attacker (one per attacker)
pub type DeclaredAttacks = AHashMap<ShipId, DeclaredAttack>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub attack: DeclaredAttack,
    pub die_roll: u8,
    pub modified_roll: i32,
    pub damage: DamageResult,
    pub turns_disabled: u32,
    pub target_destroyed: bool,
}

/// Lifecycle of one Combat phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombatStage {
    #[default]
    NoAttacksDeclared,
    AttacksPending,
    Resolved,
    Cleared,
}

/// Output of a batch resolution: new ship list, results, extended log
#[derive(Debug, Clone)]
pub struct Resolution {
    pub ships: Vec<Ship>,
    pub results: Vec<CombatResult>,
    pub log: CombatLog,
}

/// Check that `attack` is legal for `current_player`
pub fn validate_attack(
    ships: &[Ship],
    current_player: PlayerId,
    attack: &DeclaredAttack,
    config: &CombatConfig,
) -> Result<(), RejectedCommand> {
    let attacker = find(ships, attack.attacker_id)?;
    if attacker.destroyed {
        return Err(RejectedCommand::ShipDestroyed(attacker.id));
    }
    if attacker.player != current_player {
        return Err(RejectedCommand::NotOwner {
            ship: attacker.id,
            player: current_player,
        });
    }
    if !attacker.is_armed() {
        return Err(RejectedCommand::NoWeapons(attacker.id));
    }
    if config.disabled_ships_hold_fire && attacker.is_disabled() {
        return Err(RejectedCommand::ShipDisabled(attacker.id));
    }

    let target = find(ships, attack.target_id)?;
    if target.destroyed {
        return Err(RejectedCommand::ShipDestroyed(target.id));
    }
    if target.player == attacker.player {
        return Err(RejectedCommand::InvalidTarget {
            attacker: attacker.id,
            target: target.id,
        });
    }

    Ok(())
}

fn find(ships: &[Ship], id: ShipId) -> Result<&Ship, RejectedCommand> {
    ships
        .iter()
        .find(|s| s.id == id)
        .ok_or(RejectedCommand::UnknownShip(id))
}

/// Total amount subtracted from the die roll
pub fn roll_penalty(attacker: &Ship, target: &Ship, config: &CombatConfig) -> i32 {
    let range = if config.range_penalty {
        attacker.position.distance(&target.position) as i32
    } else {
        0
    };

    let velocity = config.velocity_allowance.map_or(0, |allowance| {
        let relative = (attacker.velocity - target.velocity).length();
        relative.saturating_sub(allowance) as i32
    });

    range + velocity
}

/// Roll and look up a single attack without applying it
pub fn resolve_attack(
    attack: DeclaredAttack,
    attacker: &Ship,
    target: &Ship,
    config: &CombatConfig,
    dice: &mut dyn DiceRoller,
) -> CombatResult {
    let die_roll = dice.roll_d6();
    let modified_roll = die_roll as i32 - roll_penalty(attacker, target, config);
    let damage = config.table.lookup(attack.odds, modified_roll);

    CombatResult {
        attack,
        die_roll,
        modified_roll,
        damage,
        turns_disabled: damage.turns_disabled(),
        target_destroyed: false,
    }
}

/// Resolve every declared attack against a copy of `ships`
///
/// Attacks resolve in attacker id order so a seeded die gives the same
/// outcome every time. An attack whose target is already destroyed (for
/// instance by an earlier attack in the same batch) is skipped and not
/// logged. Fire is simultaneous: an attacker destroyed earlier in the batch
/// still fires.
///
/// Calling this twice with the same map applies the damage twice; the
/// Combat phase clears the map after one call.
pub fn resolve_attacks(
    ships: &[Ship],
    attacks: &DeclaredAttacks,
    config: &CombatConfig,
    dice: &mut dyn DiceRoller,
    log: &CombatLog,
    clock: Tick,
) -> Resolution {
    let mut ships = ships.to_vec();
    let mut log = log.clone();
    let mut results = Vec::with_capacity(attacks.len());

    let mut ordered: Vec<&DeclaredAttack> = attacks.values().collect();
    ordered.sort_by_key(|a| a.attacker_id);

    for attack in ordered {
        let Some(attacker_idx) = ships.iter().position(|s| s.id == attack.attacker_id) else {
            continue;
        };
        let Some(target_idx) = ships.iter().position(|s| s.id == attack.target_id) else {
            continue;
        };
        if ships[target_idx].destroyed {
            tracing::debug!(
                "Skipping attack by {} on {}: target already destroyed",
                attack.attacker_id,
                attack.target_id
            );
            continue;
        }

        let mut result = resolve_attack(
            *attack,
            &ships[attacker_idx],
            &ships[target_idx],
            config,
            dice,
        );

        let target = &mut ships[target_idx];
        let outcome = target.take_damage(
            result.turns_disabled,
            result.damage == DamageResult::Eliminated,
            config.destroy_threshold,
        );
        result.target_destroyed = outcome == DamageOutcome::Destroyed;

        let attacker_name = ships[attacker_idx].name.clone();
        let target_name = ships[target_idx].name.clone();
        let entry = log.push(clock, result, attacker_name, target_name);
        tracing::info!("{}", entry.message);

        results.push(result);
    }

    Resolution {
        ships,
        results,
        log,
    }
}

/// Declared attacks plus the stage of the current Combat phase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatRound {
    stage: CombatStage,
    declared: DeclaredAttacks,
}

impl CombatRound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> CombatStage {
        self.stage
    }

    pub fn declared(&self) -> &DeclaredAttacks {
        &self.declared
    }

    /// Start a fresh Combat phase
    pub fn begin(&mut self) {
        self.declared.clear();
        self.stage = CombatStage::NoAttacksDeclared;
    }

    /// Record an attack, replacing any earlier declaration by the same ship
    pub fn declare(&mut self, attack: DeclaredAttack) -> Option<DeclaredAttack> {
        self.stage = CombatStage::AttacksPending;
        self.declared.insert(attack.attacker_id, attack)
    }

    pub fn cancel(&mut self, attacker: ShipId) -> Result<DeclaredAttack, RejectedCommand> {
        let removed = self
            .declared
            .remove(&attacker)
            .ok_or(RejectedCommand::NoDeclaredAttack(attacker))?;
        if self.declared.is_empty() {
            self.stage = CombatStage::NoAttacksDeclared;
        }
        Ok(removed)
    }

    /// Resolve the pending attacks once; later calls return `None` until
    /// the round is cleared
    pub fn resolve(
        &mut self,
        ships: &[Ship],
        config: &CombatConfig,
        dice: &mut dyn DiceRoller,
        log: &CombatLog,
        clock: Tick,
    ) -> Option<Resolution> {
        if self.stage == CombatStage::Resolved {
            return None;
        }
        let resolution = resolve_attacks(ships, &self.declared, config, dice, log, clock);
        self.stage = CombatStage::Resolved;
        Some(resolution)
    }

    pub fn clear(&mut self) {
        self.declared.clear();
        self.stage = CombatStage::Cleared;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::ScriptedDice;
    use crate::fleet::ShipStats;
    use crate::spatial::HexCoord;

    fn ship(id: u32, player: u32, q: i32) -> Ship {
        Ship::new(
            ShipId(id),
            format!("Ship {}", id),
            PlayerId(player),
            HexCoord::new(q, 0),
            ShipStats::frigate(),
        )
    }

    fn no_modifiers() -> CombatConfig {
        CombatConfig {
            range_penalty: false,
            velocity_allowance: None,
            ..CombatConfig::default()
        }
    }

    fn attack(attacker: u32, target: u32, odds: Odds) -> DeclaredAttack {
        DeclaredAttack {
            attacker_id: ShipId(attacker),
            target_id: ShipId(target),
            odds,
        }
    }

    #[test]
    fn test_validate_rejects_destroyed_target() {
        let mut ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        ships[1].destroy();
        let err = validate_attack(&ships, PlayerId(0), &attack(1, 2, Odds::EVEN), &no_modifiers())
            .unwrap_err();
        assert_eq!(err, RejectedCommand::ShipDestroyed(ShipId(2)));
    }

    #[test]
    fn test_validate_rejects_unknown_and_friendly_targets() {
        let ships = vec![ship(1, 0, 0), ship(2, 0, 1)];
        let config = no_modifiers();
        assert_eq!(
            validate_attack(&ships, PlayerId(0), &attack(1, 9, Odds::EVEN), &config),
            Err(RejectedCommand::UnknownShip(ShipId(9)))
        );
        assert_eq!(
            validate_attack(&ships, PlayerId(0), &attack(1, 2, Odds::EVEN), &config),
            Err(RejectedCommand::InvalidTarget {
                attacker: ShipId(1),
                target: ShipId(2)
            })
        );
    }

    #[test]
    fn test_validate_rejects_unarmed_attacker() {
        let mut ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        ships[0].stats.weapons = 0;
        assert_eq!(
            validate_attack(&ships, PlayerId(0), &attack(1, 2, Odds::EVEN), &no_modifiers()),
            Err(RejectedCommand::NoWeapons(ShipId(1)))
        );
    }

    #[test]
    fn test_validate_rejects_other_players_ship() {
        let ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        assert_eq!(
            validate_attack(&ships, PlayerId(1), &attack(1, 2, Odds::EVEN), &no_modifiers()),
            Err(RejectedCommand::NotOwner {
                ship: ShipId(1),
                player: PlayerId(1)
            })
        );
    }

    #[test]
    fn test_hit_pushes_target_over_threshold() {
        let mut ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        ships[1].disabled_turns = 4;
        let mut attacks = DeclaredAttacks::default();
        attacks.insert(ShipId(1), attack(1, 2, Odds::EVEN));

        // 1:1 with a 5 is D2
        let mut dice = ScriptedDice::new(vec![5]);
        let resolution = resolve_attacks(
            &ships,
            &attacks,
            &no_modifiers(),
            &mut dice,
            &CombatLog::new(),
            1,
        );

        let result = resolution.results[0];
        assert_eq!(result.damage, DamageResult::Disabled(2));
        assert!(result.target_destroyed);
        let target = &resolution.ships[1];
        assert!(target.destroyed);
        assert_eq!(target.disabled_turns, 0);
        // Input list untouched
        assert_eq!(ships[1].disabled_turns, 4);
        assert!(!ships[1].destroyed);
    }

    #[test]
    fn test_second_attack_on_destroyed_target_skipped() {
        let ships = vec![ship(1, 0, 0), ship(2, 0, 0), ship(3, 1, 1)];
        let mut attacks = DeclaredAttacks::default();
        attacks.insert(ShipId(1), attack(1, 3, Odds::new(4, 1)));
        attacks.insert(ShipId(2), attack(2, 3, Odds::new(4, 1)));

        let mut dice = ScriptedDice::new(vec![6, 6]);
        let resolution = resolve_attacks(
            &ships,
            &attacks,
            &no_modifiers(),
            &mut dice,
            &CombatLog::new(),
            1,
        );

        assert_eq!(resolution.results.len(), 1);
        assert_eq!(resolution.results[0].attack.attacker_id, ShipId(1));
        assert_eq!(resolution.log.len(), 1);
        assert_eq!(dice.rolls_made(), 1);
    }

    #[test]
    fn test_empty_declarations_produce_nothing() {
        let ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        let log = CombatLog::new();
        let mut dice = ScriptedDice::new(vec![6]);
        let resolution = resolve_attacks(
            &ships,
            &DeclaredAttacks::default(),
            &no_modifiers(),
            &mut dice,
            &log,
            1,
        );
        assert!(resolution.results.is_empty());
        assert!(resolution.log.is_empty());
        assert_eq!(resolution.ships, ships);
    }

    #[test]
    fn test_miss_is_logged() {
        let ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        let mut attacks = DeclaredAttacks::default();
        attacks.insert(ShipId(1), attack(1, 2, Odds::EVEN));
        let mut dice = ScriptedDice::new(vec![1]);
        let resolution = resolve_attacks(
            &ships,
            &attacks,
            &no_modifiers(),
            &mut dice,
            &CombatLog::new(),
            7,
        );
        assert_eq!(resolution.results[0].damage, DamageResult::Miss);
        assert_eq!(resolution.log.len(), 1);
        assert_eq!(resolution.log.entries()[0].timestamp, 7);
        assert_eq!(resolution.ships[1].disabled_turns, 0);
    }

    #[test]
    fn test_range_and_velocity_penalties() {
        let attacker = ship(1, 0, 0).with_velocity(HexCoord::new(3, 0));
        let target = ship(2, 1, 2).with_velocity(HexCoord::new(-1, 0));
        let config = CombatConfig::default();
        // Range 2, relative velocity 4 with allowance 2 => 2
        assert_eq!(roll_penalty(&attacker, &target, &config), 4);
        assert_eq!(roll_penalty(&attacker, &target, &no_modifiers()), 0);
    }

    #[test]
    fn test_modified_roll_uses_penalty() {
        let attacker = ship(1, 0, 0);
        let target = ship(2, 1, 3);
        let mut dice = ScriptedDice::new(vec![6]);
        let result = resolve_attack(
            attack(1, 2, Odds::EVEN),
            &attacker,
            &target,
            &CombatConfig::default(),
            &mut dice,
        );
        assert_eq!(result.die_roll, 6);
        assert_eq!(result.modified_roll, 3);
        assert_eq!(result.damage, DamageResult::Miss);
    }

    #[test]
    fn test_round_stages() {
        let ships = vec![ship(1, 0, 0), ship(2, 1, 1)];
        let config = no_modifiers();
        let mut round = CombatRound::new();
        assert_eq!(round.stage(), CombatStage::NoAttacksDeclared);

        assert!(round.declare(attack(1, 2, Odds::EVEN)).is_none());
        assert!(round.declare(attack(1, 2, Odds::new(2, 1))).is_some());
        assert_eq!(round.stage(), CombatStage::AttacksPending);
        assert_eq!(round.declared().len(), 1);
        assert_eq!(round.declared()[&ShipId(1)].odds, Odds::new(2, 1));

        let mut dice = ScriptedDice::new(vec![4]);
        let log = CombatLog::new();
        assert!(round.resolve(&ships, &config, &mut dice, &log, 1).is_some());
        assert_eq!(round.stage(), CombatStage::Resolved);
        assert!(round.resolve(&ships, &config, &mut dice, &log, 1).is_none());

        round.clear();
        assert_eq!(round.stage(), CombatStage::Cleared);
        assert!(round.declared().is_empty());
    }

    #[test]
    fn test_cancel_attack() {
        let mut round = CombatRound::new();
        round.declare(attack(1, 2, Odds::EVEN));
        assert!(round.cancel(ShipId(1)).is_ok());
        assert_eq!(round.stage(), CombatStage::NoAttacksDeclared);
        assert_eq!(
            round.cancel(ShipId(1)),
            Err(RejectedCommand::NoDeclaredAttack(ShipId(1)))
        );
    }
}
