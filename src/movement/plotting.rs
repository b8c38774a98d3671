//! Movement plotting
//!
//! A ship's next position is its current position plus its velocity. During
//! the Plot phase the owner spends thrust to change that velocity; each hex
//! of thrust moves the destination by one hex. Plots are cumulative within a
//! round: a second plot starts from the first plot's velocity with whatever
//! thrust is left.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::RejectedCommand;
use crate::core::types::ShipId;
use crate::fleet::Ship;
use crate::spatial::{HexCoord, Velocity};

/// Cheapest way to reach a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reachable {
    pub thrust_required: u32,
    pub resulting_velocity: Velocity,
}

pub type ReachableHexes = AHashMap<HexCoord, Reachable>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlottedMove {
    pub ship_id: ShipId,
    pub new_velocity: Velocity,
    /// Total thrust spent this round, across every plot step
    pub thrust_used: u32,
}

/// Plotted moves keyed by ship (one per ship per round)
pub type PlottedMoves = AHashMap<ShipId, PlottedMove>;

/// Every destination reachable with at most `available_thrust` hexes of
/// velocity change, with the minimum thrust needed for each
///
/// The coast destination (`position + velocity`) is always present at cost 0.
pub fn reachable_hexes(
    position: HexCoord,
    velocity: Velocity,
    available_thrust: u32,
) -> ReachableHexes {
    let mut reachable = ReachableHexes::default();

    for thrust in HexCoord::ZERO.hexes_in_range(available_thrust) {
        let resulting_velocity = velocity + thrust;
        let destination = position + resulting_velocity;
        let candidate = Reachable {
            thrust_required: thrust.length(),
            resulting_velocity,
        };
        reachable
            .entry(destination)
            .and_modify(|best| {
                if candidate.thrust_required < best.thrust_required {
                    *best = candidate;
                }
            })
            .or_insert(candidate);
    }

    reachable
}

/// Velocity and thrust a new plot step starts from
pub fn plot_base(ship: &Ship, existing: Option<&PlottedMove>) -> (Velocity, u32) {
    let available = ship.available_thrust();
    match existing {
        Some(plot) => (plot.new_velocity, available.saturating_sub(plot.thrust_used)),
        None => (ship.velocity, available),
    }
}

/// Reachable map for a ship, continuing from its current plot if it has one
pub fn reachable_for(ship: &Ship, existing: Option<&PlottedMove>) -> ReachableHexes {
    let (velocity, available) = plot_base(ship, existing);
    reachable_hexes(ship.position, velocity, available)
}

/// Validate an explicit velocity plot
///
/// `thrust_used` is the round total. It may exceed the net velocity change
/// (thrust spent in opposite directions cancels) but never the ship's
/// available thrust.
pub fn plot_velocity(
    ship: &Ship,
    new_velocity: Velocity,
    thrust_used: u32,
) -> Result<PlottedMove, RejectedCommand> {
    if ship.destroyed {
        return Err(RejectedCommand::ShipDestroyed(ship.id));
    }

    let needed = (new_velocity - ship.velocity).length();
    if thrust_used < needed {
        return Err(RejectedCommand::ThrustMismatch {
            ship: ship.id,
            claimed: thrust_used,
            actual: needed,
        });
    }

    let available = ship.available_thrust();
    if thrust_used > available {
        return Err(RejectedCommand::ThrustExceeded {
            ship: ship.id,
            requested: thrust_used,
            available,
        });
    }

    Ok(PlottedMove {
        ship_id: ship.id,
        new_velocity,
        thrust_used,
    })
}

/// Plot toward a destination chosen from the reachable map
pub fn plot_destination(
    ship: &Ship,
    existing: Option<&PlottedMove>,
    destination: HexCoord,
) -> Result<PlottedMove, RejectedCommand> {
    if ship.destroyed {
        return Err(RejectedCommand::ShipDestroyed(ship.id));
    }

    let step = reachable_for(ship, existing)
        .get(&destination)
        .copied()
        .ok_or(RejectedCommand::UnreachableDestination {
            ship: ship.id,
            destination,
        })?;

    let already_used = existing.map_or(0, |p| p.thrust_used);
    Ok(PlottedMove {
        ship_id: ship.id,
        new_velocity: step.resulting_velocity,
        thrust_used: already_used + step.thrust_required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;
    use crate::fleet::ShipStats;

    fn ship(max_thrust: u32) -> Ship {
        let stats = ShipStats {
            max_thrust,
            ..ShipStats::frigate()
        };
        Ship::new(ShipId(1), "Valiant", PlayerId(0), HexCoord::ZERO, stats)
            .with_velocity(HexCoord::new(1, 0))
    }

    #[test]
    fn test_coast_costs_nothing() {
        let map = reachable_hexes(HexCoord::ZERO, HexCoord::new(1, 0), 2);
        let coast = map[&HexCoord::new(1, 0)];
        assert_eq!(coast.thrust_required, 0);
        assert_eq!(coast.resulting_velocity, HexCoord::new(1, 0));
    }

    #[test]
    fn test_map_size_matches_thrust_disc() {
        assert_eq!(reachable_hexes(HexCoord::ZERO, HexCoord::ZERO, 0).len(), 1);
        assert_eq!(reachable_hexes(HexCoord::ZERO, HexCoord::ZERO, 1).len(), 7);
        assert_eq!(reachable_hexes(HexCoord::new(4, -2), HexCoord::new(3, 3), 2).len(), 19);
    }

    #[test]
    fn test_costs_are_distance_from_coast() {
        let map = reachable_hexes(HexCoord::ZERO, HexCoord::new(2, 0), 2);
        let coast = HexCoord::new(2, 0);
        for (destination, reach) in &map {
            assert_eq!(reach.thrust_required, destination.distance(&coast));
            assert_eq!(*destination, reach.resulting_velocity);
        }
    }

    #[test]
    fn test_plots_are_cumulative() {
        let ship = ship(2);
        let first = plot_destination(&ship, None, HexCoord::new(2, 0)).unwrap();
        assert_eq!(first.thrust_used, 1);
        assert_eq!(first.new_velocity, HexCoord::new(2, 0));

        let remaining = reachable_for(&ship, Some(&first));
        assert_eq!(remaining.len(), 7);
        assert!(remaining.contains_key(&HexCoord::new(3, 0)));
        assert!(!remaining.contains_key(&HexCoord::new(4, 0)));

        let second = plot_destination(&ship, Some(&first), HexCoord::new(3, 0)).unwrap();
        assert_eq!(second.thrust_used, 2);
        assert_eq!(second.new_velocity, HexCoord::new(3, 0));
    }

    #[test]
    fn test_unreachable_destination_rejected() {
        let ship = ship(1);
        assert_eq!(
            plot_destination(&ship, None, HexCoord::new(5, 5)),
            Err(RejectedCommand::UnreachableDestination {
                ship: ShipId(1),
                destination: HexCoord::new(5, 5),
            })
        );
    }

    #[test]
    fn test_disabled_ship_can_only_coast() {
        let mut ship = ship(2);
        ship.disabled_turns = 2;
        let map = reachable_for(&ship, None);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&HexCoord::new(1, 0)));
    }

    #[test]
    fn test_plot_velocity_checks_thrust() {
        let ship = ship(2);
        assert!(plot_velocity(&ship, HexCoord::new(3, 0), 2).is_ok());
        // Cancelling burns still cost thrust
        assert!(plot_velocity(&ship, HexCoord::new(1, 0), 2).is_ok());
        assert_eq!(
            plot_velocity(&ship, HexCoord::new(3, 0), 1),
            Err(RejectedCommand::ThrustMismatch {
                ship: ShipId(1),
                claimed: 1,
                actual: 2,
            })
        );
        assert_eq!(
            plot_velocity(&ship, HexCoord::new(4, 0), 3),
            Err(RejectedCommand::ThrustExceeded {
                ship: ShipId(1),
                requested: 3,
                available: 2,
            })
        );
    }
}
