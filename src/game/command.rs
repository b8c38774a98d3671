//! Commands accepted from the presentation layer
//!
//! Commands also have a one-line text form used by the console and by
//! script files:
//!
//! ```text
//! select 3 | select none
//! plot 3 1 -1 2        ship, velocity q r, total thrust
//! dest 3 4 5           ship, destination q r
//! clear 3
//! attack 1 2 2:1       attacker, target, odds
//! cancel 1
//! launch 1 torpedo
//! end | endturn | toggle | victory 0
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::combat::Odds;
use crate::core::types::{PlayerId, ShipId};
use crate::ordnance::OrdnanceKind;
use crate::spatial::{HexCoord, Velocity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SelectShip(Option<ShipId>),
    PlotMove {
        ship: ShipId,
        velocity: Velocity,
        thrust_used: u32,
    },
    PlotDestination {
        ship: ShipId,
        destination: HexCoord,
    },
    ClearPlot(ShipId),
    DeclareAttack {
        attacker: ShipId,
        target: ShipId,
        odds: Odds,
    },
    CancelAttack(ShipId),
    LaunchOrdnance {
        ship: ShipId,
        kind: OrdnanceKind,
    },
    EndPhase,
    EndTurn,
    ToggleReachableHexesDisplay,
    FlagVictory(PlayerId),
}

impl Command {
    /// Commands that change the game rather than the view
    pub fn is_game_action(&self) -> bool {
        !matches!(
            self,
            Command::SelectShip(_) | Command::ToggleReachableHexesDisplay
        )
    }
}

fn arg<T: FromStr>(parts: &[&str], index: usize, what: &str) -> Result<T, String> {
    let raw = parts
        .get(index)
        .ok_or_else(|| format!("missing {}", what))?;
    raw.parse()
        .map_err(|_| format!("invalid {} '{}'", what, raw))
}

fn ship_arg(parts: &[&str], index: usize) -> Result<ShipId, String> {
    arg(parts, index, "ship id").map(ShipId)
}

fn hex_arg(parts: &[&str], index: usize) -> Result<HexCoord, String> {
    Ok(HexCoord::new(
        arg(parts, index, "q")?,
        arg(parts, index + 1, "r")?,
    ))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let Some(verb) = parts.first() else {
            return Err("empty command".into());
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "select" => match parts.get(1) {
                Some(&"none") | None => Command::SelectShip(None),
                Some(_) => Command::SelectShip(Some(ship_arg(&parts, 1)?)),
            },
            "plot" => Command::PlotMove {
                ship: ship_arg(&parts, 1)?,
                velocity: hex_arg(&parts, 2)?,
                thrust_used: arg(&parts, 4, "thrust")?,
            },
            "dest" | "destination" => Command::PlotDestination {
                ship: ship_arg(&parts, 1)?,
                destination: hex_arg(&parts, 2)?,
            },
            "clear" => Command::ClearPlot(ship_arg(&parts, 1)?),
            "attack" => Command::DeclareAttack {
                attacker: ship_arg(&parts, 1)?,
                target: ship_arg(&parts, 2)?,
                odds: arg(&parts, 3, "odds")?,
            },
            "cancel" => Command::CancelAttack(ship_arg(&parts, 1)?),
            "launch" => Command::LaunchOrdnance {
                ship: ship_arg(&parts, 1)?,
                kind: arg(&parts, 2, "ordnance type")?,
            },
            "end" | "endphase" => Command::EndPhase,
            "endturn" => Command::EndTurn,
            "toggle" => Command::ToggleReachableHexesDisplay,
            "victory" => Command::FlagVictory(PlayerId(arg(&parts, 1, "player id")?)),
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SelectShip(None) => write!(f, "select none"),
            Command::SelectShip(Some(id)) => write!(f, "select {}", id.0),
            Command::PlotMove {
                ship,
                velocity,
                thrust_used,
            } => write!(f, "plot {} {} {} {}", ship.0, velocity.q, velocity.r, thrust_used),
            Command::PlotDestination { ship, destination } => {
                write!(f, "dest {} {} {}", ship.0, destination.q, destination.r)
            }
            Command::ClearPlot(ship) => write!(f, "clear {}", ship.0),
            Command::DeclareAttack {
                attacker,
                target,
                odds,
            } => write!(f, "attack {} {} {}", attacker.0, target.0, odds),
            Command::CancelAttack(ship) => write!(f, "cancel {}", ship.0),
            Command::LaunchOrdnance { ship, kind } => write!(f, "launch {} {}", ship.0, kind.name()),
            Command::EndPhase => write!(f, "end"),
            Command::EndTurn => write!(f, "endturn"),
            Command::ToggleReachableHexesDisplay => write!(f, "toggle"),
            Command::FlagVictory(player) => write!(f, "victory {}", player.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plot() {
        let cmd: Command = "plot 3 1 -1 2".parse().unwrap();
        assert_eq!(
            cmd,
            Command::PlotMove {
                ship: ShipId(3),
                velocity: HexCoord::new(1, -1),
                thrust_used: 2,
            }
        );
    }

    #[test]
    fn test_parse_attack_and_launch() {
        assert_eq!(
            "attack 1 2 3:1".parse::<Command>().unwrap(),
            Command::DeclareAttack {
                attacker: ShipId(1),
                target: ShipId(2),
                odds: Odds::new(3, 1),
            }
        );
        assert_eq!(
            "launch 4 Mine".parse::<Command>().unwrap(),
            Command::LaunchOrdnance {
                ship: ShipId(4),
                kind: OrdnanceKind::Mine,
            }
        );
    }

    #[test]
    fn test_parse_select() {
        assert_eq!("select none".parse::<Command>().unwrap(), Command::SelectShip(None));
        assert_eq!(
            "SELECT 2".parse::<Command>().unwrap(),
            Command::SelectShip(Some(ShipId(2)))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("warp 9".parse::<Command>().is_err());
        assert!("plot 3 1".parse::<Command>().unwrap_err().contains("missing"));
        assert!("attack 1 2 lots".parse::<Command>().unwrap_err().contains("odds"));
    }

    #[test]
    fn test_display_parses_back() {
        let commands = [
            Command::PlotDestination {
                ship: ShipId(1),
                destination: HexCoord::new(-2, 5),
            },
            Command::LaunchOrdnance {
                ship: ShipId(1),
                kind: OrdnanceKind::Torpedo,
            },
            Command::FlagVictory(PlayerId(1)),
            Command::EndTurn,
        ];
        for cmd in commands {
            assert_eq!(cmd.to_string().parse::<Command>().unwrap(), cmd);
        }
    }

    #[test]
    fn test_view_commands_are_not_game_actions() {
        assert!(!Command::ToggleReachableHexesDisplay.is_game_action());
        assert!(Command::EndPhase.is_game_action());
    }
}
