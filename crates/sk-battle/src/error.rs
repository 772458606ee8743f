//! Error types for battle construction.
//!
//! Runtime commands never fail with these; they report through
//! [`crate::action::ActionResult`] instead.

/// Errors that can occur while building a battle from data.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    /// A weapon referenced by an actor or template is not in the weapon table.
    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),

    /// An armor referenced by an actor or template is not in the armor table.
    #[error("unknown armor: {0}")]
    UnknownArmor(String),

    /// A power referenced by an actor or template is not in the power table.
    #[error("unknown power: {0}")]
    UnknownPower(String),

    /// A die expression could not be parsed.
    #[error("invalid die expression: {0}")]
    InvalidDie(String),

    /// The battlefield has no regions to stand in.
    #[error("battlefield '{0}' has no regions")]
    NoRegions(String),

    /// A combatant was placed in a region that does not exist.
    #[error("combatant '{name}' placed in region {region}, but only {available} regions exist")]
    InvalidRegion {
        /// Combatant name.
        name: String,
        /// Requested region index.
        region: usize,
        /// Number of regions on the battlefield.
        available: usize,
    },

    /// Index 0 must be the player on team 0; everyone else must be on team 1 or higher.
    #[error("combatant '{name}' at index {index} cannot be on team {team}")]
    InvalidTeam {
        /// Combatant name.
        name: String,
        /// Index the combatant would occupy.
        index: usize,
        /// The offending team.
        team: u32,
    },

    /// A scenario file could not be parsed.
    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience result type for battle construction.
pub type BattleResult<T> = Result<T, BattleError>;
