use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run(expr: &str, wild: bool, seed: u64) -> Result<(), String> {
    let die = super::parse_die(expr)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let roll = die.roll(wild, &mut rng);

    println!(
        "  {} {}: {}",
        "Rolled".bold(),
        die.to_string().cyan(),
        roll.value().to_string().bold()
    );
    match roll.wild {
        Some(wild) => println!("  die {} / wild {}", roll.total, wild),
        None => println!("  die {}", roll.total),
    }
    if roll.aces > 0 {
        println!("  {} x{}", "Aced".green(), roll.aces);
    }
    if roll.critical_failure {
        println!("  {}", "Critical failure!".red().bold());
    }
    Ok(())
}
