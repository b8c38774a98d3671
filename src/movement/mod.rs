pub mod execution;
pub mod plotting;

pub use execution::{drift_ordnance, execute_movement};
pub use plotting::{
    plot_base, plot_destination, plot_velocity, reachable_for, reachable_hexes,
    PlottedMove, PlottedMoves, Reachable, ReachableHexes,
};
