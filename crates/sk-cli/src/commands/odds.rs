use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sk_battle::{chance, wild_chance};

pub fn run(expr: &str, wild: bool) -> Result<(), String> {
    let die = super::parse_die(expr)?;

    println!("  {} {}", "Odds for".bold(), die.to_string().cyan());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["TN", "Chance"];
    if wild {
        header.push("With wild die");
    }
    table.set_header(header);

    for tn in 2..=12 {
        let mut row = vec![tn.to_string(), percent(chance(tn, die))];
        if wild {
            row.push(percent(wild_chance(tn, die)));
        }
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}

fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}
