//! Narrative text for drained battle actions, and the roster table.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sk_battle::{Action, AttackReport, Battle, DamageReport, ModInfo, PowerOutcome, PowerReport};

fn name(battle: &Battle, index: usize) -> String {
    battle
        .combatant(index)
        .map_or_else(|| format!("#{index}"), |c| c.name.clone())
}

fn region(battle: &Battle, index: usize) -> String {
    battle
        .regions()
        .get(index)
        .map_or_else(|| format!("region {index}"), |r| r.name.clone())
}

fn mods(mods: &[ModInfo]) -> String {
    if mods.is_empty() {
        return String::new();
    }
    let list: Vec<String> = mods.iter().map(ToString::to_string).collect();
    format!(" [{}]", list.join(", ")).dimmed().to_string()
}

/// Render one action as one or more lines of text.
pub fn describe(battle: &Battle, action: &Action) -> Vec<String> {
    match action {
        Action::Move {
            combatant,
            from,
            to,
        } => vec![format!(
            "{} moves from {} to {}.",
            name(battle, *combatant).bold(),
            region(battle, *from),
            region(battle, *to)
        )],
        Action::Attack(report) => attack(battle, report),
        Action::Recover {
            combatant,
            roll,
            recovered,
            free_to_act,
        } => {
            let result = match (recovered, free_to_act) {
                (true, true) => "recovers and acts at once".green().to_string(),
                (true, false) => "recovers, but spends the turn steadying".to_string(),
                (false, _) => "is still shaken".yellow().to_string(),
            };
            vec![format!(
                "{} tries to shake it off: rolled {roll}, {result}.",
                name(battle, *combatant).bold()
            )]
        }
        Action::Power(report) => power(battle, report),
    }
}

fn attack(battle: &Battle, report: &AttackReport) -> Vec<String> {
    let weapon = report.weapon.as_deref().unwrap_or("bare hands");
    let kind = if report.free {
        "lashes out at the retreating"
    } else if report.ranged {
        "shoots at"
    } else {
        "attacks"
    };
    let verdict = if report.hit() {
        "hit".green().bold()
    } else {
        "miss".dimmed()
    };
    let mut lines = vec![format!(
        "{} {kind} {} with {weapon}: rolled {} vs {}{}, {verdict}.",
        name(battle, report.attacker).bold(),
        name(battle, report.defender).bold(),
        report.roll,
        report.target_number,
        mods(&report.mods),
    )];
    if let Some(ref damage) = report.damage {
        lines.push(self::damage(battle, report.defender, damage));
    }
    lines
}

fn damage(battle: &Battle, target: usize, damage: &DamageReport) -> String {
    let effect = if damage.killed {
        format!("{} falls!", name(battle, target)).red().bold().to_string()
    } else if damage.wounds > 0 {
        let s = if damage.wounds == 1 { "" } else { "s" };
        format!("{} wound{s}", damage.wounds).red().to_string()
    } else if damage.shaken {
        "shaken".yellow().to_string()
    } else {
        "no effect".dimmed().to_string()
    };
    format!(
        "  damage {} vs toughness {}: {effect}",
        damage.total, damage.toughness
    )
}

fn power(battle: &Battle, report: &PowerReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} casts {} on {}: rolled {} vs {}{}.",
        name(battle, report.caster).bold(),
        report.power.magenta(),
        name(battle, report.target).bold(),
        report.roll,
        report.target_number,
        mods(&report.mods),
    )];
    match &report.outcome {
        PowerOutcome::Failed => lines.push(format!("  {}", "the power fizzles".dimmed())),
        PowerOutcome::Damage(d) => lines.push(damage(battle, report.target, d)),
        PowerOutcome::Healed { wounds } => {
            lines.push(format!("  {} wounds healed", wounds.to_string().green()));
        }
        PowerOutcome::Applied { targets } => {
            let names: Vec<String> = targets.iter().map(|&t| name(battle, t)).collect();
            lines.push(format!("  takes hold on {}", names.join(", ")));
        }
    }
    lines
}

/// Print every pending action and clear the log.
pub fn flush(battle: &mut Battle) {
    for action in battle.drain_actions() {
        for line in describe(battle, &action) {
            println!("  {line}");
        }
    }
}

/// Roster of every combatant, marking whose turn it is.
pub fn roster(battle: &Battle) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "", "#", "Name", "Region", "Wounds", "State", "Tough", "Parry", "Gear", "Powers",
    ]);

    for (i, c) in battle.combatants().iter().enumerate() {
        let marker = if battle.current() == Some(i) { ">" } else { "" };
        let state = if c.is_dead() {
            "dead"
        } else if c.shaken {
            "shaken"
        } else if c.flags.defending {
            "defending"
        } else {
            "ready"
        };
        let gear: Vec<&str> = [&c.melee, &c.ranged]
            .into_iter()
            .flatten()
            .map(|w| w.name.as_str())
            .chain(c.armor.as_ref().map(|a| a.name.as_str()))
            .collect();
        let powers: Vec<&str> = c.powers.iter().map(|p| p.name.as_str()).collect();
        table.add_row(vec![
            marker.to_string(),
            i.to_string(),
            c.name.clone(),
            region(battle, c.region),
            format!("{}/{}", c.wounds, c.wound_limit()),
            state.to_string(),
            c.toughness().to_string(),
            c.parry().to_string(),
            gear.join(", "),
            powers.join(", "),
        ]);
    }
    table
}
