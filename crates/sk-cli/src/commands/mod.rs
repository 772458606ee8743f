pub mod odds;
pub mod play;
pub mod render;
pub mod roll;

use std::path::Path;

use sk_battle::{Die, Scenario};

/// Read and parse a scenario file.
fn load_scenario(path: &Path) -> Result<Scenario, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Scenario::from_json(&json).map_err(|e| e.to_string())
}

/// Parse a die expression given on the command line.
fn parse_die(expr: &str) -> Result<Die, String> {
    let die = Die::try_from(expr.to_string()).map_err(|e| e.to_string())?;
    if die.is_none() {
        return Err(format!("'{expr}' has no die to roll"));
    }
    Ok(die)
}
