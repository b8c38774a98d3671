//! Triplanetary - hot-seat console
//!
//! Loads a scenario, then reads one command per line (from `--script` first,
//! then stdin) and dispatches it into the session.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use triplanetary::core::config::GameConfig;
use triplanetary::core::error::Result;
use triplanetary::core::types::ShipId;
use triplanetary::game::{Command, Scenario, Session};
use triplanetary::spatial::HexCoord;

#[derive(Parser, Debug)]
#[command(name = "triplanetary")]
#[command(about = "Hot-seat vector-movement space combat on a hex grid")]
struct Args {
    /// Scenario file (TOML); the built-in duel when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Rules file (TOML); classic rules when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dice seed
    #[arg(long)]
    seed: Option<u64>,

    /// Commands to run before reading stdin, one per line
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("triplanetary=info")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::default(),
    };
    let scenario = match &args.scenario {
        Some(path) => Scenario::load_from_toml(path)?,
        None => Scenario::duel(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Dice seed {}", seed);

    let mut session = Session::seeded(scenario.into_state()?, config, seed);

    println!("\n=== TRIPLANETARY ===");
    print_help();
    print_status(&session);

    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path)?;
        for line in script.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            println!("> {}", line);
            if !handle_line(&mut session, line)? {
                return Ok(());
            }
        }
    }

    let stdin = io::stdin();
    loop {
        print!("[{}] > ", session.button_label());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if !handle_line(&mut session, input)? {
            break;
        }
    }

    Ok(())
}

/// Returns false when the user asks to quit
fn handle_line(session: &mut Session, line: &str) -> Result<bool> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["quit"] | ["q"] => return Ok(false),
        ["help"] | ["h"] => print_help(),
        ["status"] | ["s"] => print_status(session),
        ["log"] => {
            for entry in session.combat_log().entries() {
                println!("  #{} t{} {}", entry.id, entry.timestamp, entry.message);
            }
        }
        ["reach"] => match session.state().selected_ship {
            Some(id) => print_reachable(session, id),
            None => println!("No ship selected"),
        },
        ["reach", id] => match id.parse() {
            Ok(id) => print_reachable(session, ShipId(id)),
            Err(_) => println!("Usage: reach [ship]"),
        },
        ["zone", q, r] => match (q.parse(), r.parse()) {
            (Ok(q), Ok(r)) => {
                let hex = HexCoord::new(q, r);
                let zone = session
                    .gravity_zone_at(hex)
                    .map_or("none".to_string(), |z| z.to_string());
                println!(
                    "  {}: zone {}, pull {}",
                    hex,
                    zone,
                    session.gravity_pull_at(hex)
                );
            }
            _ => println!("Usage: zone <q> <r>"),
        },
        ["arrows"] => {
            for arrow in session.gravity_hexes() {
                println!(
                    "  {} -> {:?}{}",
                    arrow.position,
                    arrow.direction,
                    if arrow.is_weak { " (weak)" } else { "" }
                );
            }
        }
        ["orbit", id] => match id.parse() {
            Ok(id) => {
                let bodies = session.orbiting(ShipId(id));
                if bodies.is_empty() {
                    println!("  Not in a stable orbit");
                }
                for body in bodies {
                    let name = session
                        .state()
                        .bodies
                        .iter()
                        .find(|b| b.id == body)
                        .map_or("?", |b| b.name.as_str());
                    println!("  Orbiting {}", name);
                }
            }
            Err(_) => println!("Usage: orbit <ship>"),
        },
        ["odds", attacker, target] => match (attacker.parse(), target.parse()) {
            (Ok(a), Ok(t)) => {
                match session
                    .state()
                    .suggested_odds(ShipId(a), ShipId(t), session.config())
                {
                    Ok(odds) => println!("  Suggested odds {}", odds),
                    Err(e) => println!("  {}", e),
                }
            }
            _ => println!("Usage: odds <attacker> <target>"),
        },
        ["json"] => println!("{}", session.snapshot_json()?),
        _ => match line.parse::<Command>() {
            Ok(command) => {
                let ends_phase = matches!(command, Command::EndPhase | Command::EndTurn);
                match session.dispatch(command) {
                    Ok(()) if ends_phase => print_status(session),
                    Ok(()) => {}
                    Err(rejection) => println!("  Rejected: {}", rejection),
                }
            }
            Err(e) => println!("  {} (type 'help')", e),
        },
    }
    Ok(true)
}

fn print_help() {
    println!("Commands:");
    println!("  select <ship>|none          - Select a ship");
    println!("  plot <ship> <q> <r> <thrust> - Plot a new velocity");
    println!("  dest <ship> <q> <r>         - Plot toward a reachable hex");
    println!("  clear <ship>                - Clear a plot");
    println!("  attack <ship> <target> <a:d> - Declare an attack");
    println!("  cancel <ship>               - Cancel an attack");
    println!("  launch <ship> <mine|torpedo|missile>");
    println!("  end / endturn               - End the phase / the turn");
    println!("  toggle                      - Show or hide reachable hexes");
    println!("  victory <player>            - Flag a winner");
    println!("  status, log, reach [ship], zone <q> <r>, arrows, orbit <ship>, odds <a> <t>, json");
    println!("  quit / q");
    println!();
}

fn print_status(session: &Session) {
    let state = session.state();
    let turn = session.turn_state();
    let player = turn.current_player();
    println!(
        "\nRound {} | {} ({}) | {} phase",
        turn.round_number,
        state.player_name(player).unwrap_or("?"),
        player,
        turn.current_phase
    );
    if let Some(winner) = session.victory() {
        println!(
            "*** {} wins ***",
            state.player_name(winner).unwrap_or("?")
        );
    }

    for ship in session.ships() {
        let status = if ship.destroyed {
            "destroyed".to_string()
        } else if ship.is_disabled() {
            format!("disabled {}", ship.disabled_turns)
        } else {
            "ok".to_string()
        };
        let plotted = session
            .plotted_moves()
            .get(&ship.id)
            .map_or(String::new(), |p| format!(" plot {} (thrust {})", p.new_velocity, p.thrust_used));
        println!(
            "  [{}] {:<10} {} at {} vel {} thrust {}/{} {}{}",
            ship.id.0,
            ship.name,
            ship.player,
            ship.position,
            ship.velocity,
            ship.available_thrust(),
            ship.stats.max_thrust,
            status,
            plotted
        );
    }

    let active = session.ordnance().iter().filter(|o| o.is_active()).count();
    if active > 0 {
        println!("  {} ordnance in flight", active);
    }
    if state.show_reachable_hexes {
        if let Some(id) = session.selected_ship() {
            print_reachable(session, id);
        }
    }
    println!();
}

fn print_reachable(session: &Session, id: ShipId) {
    match session.reachable_hexes(id) {
        Ok(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by_key(|(hex, reach)| (reach.thrust_required, *hex));
            for (hex, reach) in entries {
                println!(
                    "  {} thrust {} -> velocity {}",
                    hex, reach.thrust_required, reach.resulting_velocity
                );
            }
        }
        Err(e) => println!("  {}", e),
    }
}
