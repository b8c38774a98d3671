//! Movement execution at the end of a player's Movement phase

use crate::core::types::PlayerId;
use crate::fleet::Ship;
use crate::gravity::{CelestialBody, GravityModel};
use crate::movement::plotting::PlottedMoves;
use crate::ordnance::Ordnance;

/// Move every living ship of `player` along its plot, then apply gravity
///
/// Ships of other players are copied unchanged. A living ship with no plot
/// coasts.
pub fn execute_movement(
    ships: &[Ship],
    plots: &PlottedMoves,
    player: PlayerId,
    bodies: &[CelestialBody],
    gravity: &dyn GravityModel,
) -> Vec<Ship> {
    ships
        .iter()
        .map(|ship| {
            if ship.player != player || ship.destroyed {
                return ship.clone();
            }

            let mut moved = ship.clone();
            match plots.get(&ship.id) {
                Some(plot) => {
                    moved.remaining_thrust = moved.remaining_thrust.saturating_sub(plot.thrust_used);
                    moved.advance(plot.new_velocity);
                }
                None => moved.advance(ship.velocity),
            }
            tracing::debug!(
                "{} moved {} -> {} (velocity {})",
                moved.name,
                ship.position,
                moved.position,
                moved.velocity
            );

            gravity.apply(bodies, &moved)
        })
        .collect()
}

/// Drift the active ordnance launched by `player`
pub fn drift_ordnance(ordnance: &[Ordnance], player: PlayerId) -> Vec<Ordnance> {
    ordnance
        .iter()
        .map(|o| {
            let mut o = o.clone();
            if o.player == player {
                o.drift();
            }
            o
        })
        .collect()
}
