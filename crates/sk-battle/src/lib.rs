//! Tactical battle resolver for Skirmish.
//!
//! Provides exploding dice with wild dice and closed-form odds, combatants
//! with gear and standing powers, a one-dimensional battlefield of regions,
//! and a turn-based resolver with a rule-based enemy AI. Battles are built
//! from JSON scenarios and report what happened through an action log that
//! presentation layers drain and render.

pub mod action;
pub mod battle;
pub mod combatant;
pub mod config;
pub mod dice;
pub mod error;
pub mod field;
pub mod power;
pub mod setup;

pub use action::{Action, ActionLog, ActionResult, AttackReport, DamageReport, PowerOutcome, PowerReport};
pub use battle::{Battle, PLAYER, Phase};
pub use combatant::{Armor, Attributes, Combatant, Skills, Weapon};
pub use config::BattleConfig;
pub use dice::{Die, Roll, chance, wild_chance};
pub use error::{BattleError, BattleResult};
pub use field::{Battlefield, Cover, Region};
pub use power::{ActivePower, ModInfo, ModKind, Power, PowerEffect};
pub use setup::{ActorRecord, Scenario, TemplateRecord};
