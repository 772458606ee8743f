use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use sk_battle::{ActionResult, Battle, PLAYER, Phase};

use super::render;

const HELP: &str = "\
  move + | move -        step to the next or previous region
  attack <target>        attack a combatant by roster number
  cast <power> <target>  cast a power by name or number
  end                    end your turn
  status                 show the roster
  quit                   leave the battle";

/// A parsed player command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move(i32),
    Attack(usize),
    Cast(String, usize),
    End,
    Status,
    Help,
    Quit,
}

fn parse(input: &str) -> Result<Command, String> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let target = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| format!("'{s}' is not a roster number"))
    };
    match words.as_slice() {
        ["move" | "m", dir] => match *dir {
            "+" | "forward" | "f" => Ok(Command::Move(1)),
            "-" | "back" | "b" => Ok(Command::Move(-1)),
            other => Err(format!("unknown direction '{other}' (use + or -)")),
        },
        ["attack" | "a", t] => Ok(Command::Attack(target(*t)?)),
        ["cast" | "c", power @ .., t] if !power.is_empty() => {
            Ok(Command::Cast(power.join(" "), target(*t)?))
        }
        ["end" | "e"] => Ok(Command::End),
        ["status" | "s"] => Ok(Command::Status),
        ["help" | "h" | "?"] => Ok(Command::Help),
        ["quit" | "q"] => Ok(Command::Quit),
        _ => Err(format!("unknown command '{input}' (type 'help')")),
    }
}

/// Find one of the player's powers by number or case-insensitive name.
fn power_index(battle: &Battle, power: &str) -> Option<usize> {
    let powers = &battle.combatant(PLAYER)?.powers;
    if let Ok(i) = power.parse::<usize>() {
        return (i < powers.len()).then_some(i);
    }
    powers
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(power))
}

/// Run opponents' turns until it is the player's turn or the battle ends.
fn run_opponents(battle: &mut Battle, rng: &mut StdRng) {
    while !battle.done() && !battle.is_player_turn() {
        battle.do_enemy_actions(rng);
        render::flush(battle);
        battle.advance(rng);
        render::flush(battle);
    }
}

pub fn run(path: &Path, seed: Option<u64>, no_shuffle: bool) -> Result<(), String> {
    let scenario = super::load_scenario(path)?;
    let mut config = scenario.config.clone();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if no_shuffle {
        config = config.with_shuffle(false);
    }
    let mut battle = scenario
        .build_with(config)
        .map_err(|e| format!("failed to set up battle: {e}"))?;
    let mut rng = StdRng::seed_from_u64(battle.config().seed);
    debug!(
        scenario = %path.display(),
        seed = battle.config().seed,
        no_shuffle,
        "battle set up"
    );

    println!("  {} {}", "Battle:".bold(), battle.name().cyan());
    println!("  Seed: {} | Type 'help' for commands.\n", battle.config().seed);

    battle.start(&mut rng);
    render::flush(&mut battle);
    run_opponents(&mut battle, &mut rng);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !battle.done() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match parse(input) {
            Ok(command) => command,
            Err(e) => {
                debug!(input, "rejected player input");
                println!("  {}", e.yellow());
                continue;
            }
        };
        debug!(?command, "player command");

        let result = match command {
            Command::Move(direction) => battle.move_combatant(PLAYER, direction, &mut rng),
            Command::Attack(target) => battle.attack(PLAYER, target, &mut rng),
            Command::Cast(power, target) => match power_index(&battle, &power) {
                Some(p) => battle.cast_power(PLAYER, target, p, &mut rng),
                None => {
                    println!("  {}", format!("you know no power '{power}'").yellow());
                    continue;
                }
            },
            Command::End => {
                battle.advance(&mut rng);
                render::flush(&mut battle);
                run_opponents(&mut battle, &mut rng);
                ActionResult::Success
            }
            Command::Status => {
                println!("{}", render::roster(&battle));
                ActionResult::Success
            }
            Command::Help => {
                println!("{HELP}");
                ActionResult::Success
            }
            Command::Quit => break,
        };

        render::flush(&mut battle);
        if !result.is_success() {
            println!("  {}", format!("cannot do that: {result}").yellow());
        }
    }

    match battle.phase() {
        Phase::Victory => println!("\n  {}", "Victory!".green().bold()),
        Phase::Defeat => println!("\n  {}", "Defeat.".red().bold()),
        _ => println!("\n  {}", "The battle is left undecided.".dimmed()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse("move +"), Ok(Command::Move(1)));
        assert_eq!(parse("m back"), Ok(Command::Move(-1)));
        assert_eq!(parse("attack 2"), Ok(Command::Attack(2)));
        assert_eq!(
            parse("cast Holy Fire 3"),
            Ok(Command::Cast("Holy Fire".into(), 3))
        );
        assert_eq!(parse("end"), Ok(Command::End));
        assert_eq!(parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(parse("move sideways").is_err());
        assert!(parse("attack goblin").is_err());
        assert!(parse("cast 3").is_err());
        assert!(parse("dance").is_err());
    }
}
