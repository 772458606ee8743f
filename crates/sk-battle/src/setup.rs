//! Building a battle from scenario data.
//!
//! Scenarios describe combatants with small-integer ratings and refer to
//! gear and powers by name. Conversion turns ratings into dice and resolves
//! every name against the scenario's tables, failing before any battle
//! exists if a reference is dangling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battle::Battle;
use crate::combatant::{Armor, Attributes, Combatant, Skills, Weapon};
use crate::config::BattleConfig;
use crate::dice::Die;
use crate::error::{BattleError, BattleResult};
use crate::field::{Battlefield, Region};
use crate::power::Power;

fn default_attribute() -> i32 {
    4
}

fn default_count() -> u32 {
    1
}

/// Attribute ratings. Unset attributes rate 4 (a d4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRatings {
    /// Agility rating.
    #[serde(default = "default_attribute")]
    pub agility: i32,
    /// Smarts rating.
    #[serde(default = "default_attribute")]
    pub smarts: i32,
    /// Spirit rating.
    #[serde(default = "default_attribute")]
    pub spirit: i32,
    /// Strength rating.
    #[serde(default = "default_attribute")]
    pub strength: i32,
    /// Vigor rating.
    #[serde(default = "default_attribute")]
    pub vigor: i32,
}

impl Default for AttributeRatings {
    fn default() -> Self {
        Self {
            agility: 4,
            smarts: 4,
            spirit: 4,
            strength: 4,
            vigor: 4,
        }
    }
}

/// Skill ratings. 0 means untrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillRatings {
    /// Fighting rating.
    pub fighting: i32,
    /// Shooting rating.
    pub shooting: i32,
    /// Arcane rating.
    pub arcane: i32,
}

/// A combatant as described by scenario data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    /// Display name.
    pub name: String,
    /// Link to an external entity.
    #[serde(default)]
    pub entity: Option<String>,
    /// Attribute ratings.
    #[serde(default)]
    pub attributes: AttributeRatings,
    /// Skill ratings.
    #[serde(default)]
    pub skills: SkillRatings,
    /// Melee weapon name.
    #[serde(default)]
    pub melee: Option<String>,
    /// Ranged weapon name.
    #[serde(default)]
    pub ranged: Option<String>,
    /// Armor name.
    #[serde(default)]
    pub armor: Option<String>,
    /// Names of known powers.
    #[serde(default)]
    pub powers: Vec<String>,
    /// Starting region, as an index into the regions ordered by position.
    #[serde(default)]
    pub region: usize,
}

/// An opponent template, possibly spawning several combatants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Everything an actor has.
    #[serde(flatten)]
    pub actor: ActorRecord,
    /// How many combatants to spawn.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Added to every rating before conversion.
    #[serde(default)]
    pub difficulty: i32,
    /// Spawn wild combatants.
    #[serde(default)]
    pub wild: bool,
}

/// A complete battle description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Battlefield name.
    pub name: String,
    /// Regions, in any order.
    pub regions: Vec<Region>,
    /// The player's combatant.
    pub player: ActorRecord,
    /// Opponent templates.
    #[serde(default)]
    pub enemies: Vec<TemplateRecord>,
    /// Weapon table.
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    /// Armor table.
    #[serde(default)]
    pub armor: Vec<Armor>,
    /// Power table.
    #[serde(default)]
    pub powers: Vec<Power>,
    /// Battle configuration.
    #[serde(default)]
    pub config: BattleConfig,
}

/// Convert a skill rating, keeping `untrained` for a rating of 0.
fn skill_die(rating: i32, difficulty: i32, untrained: Die) -> Die {
    if rating == 0 {
        untrained
    } else {
        Die::from_rating(rating + difficulty)
    }
}

impl Scenario {
    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> BattleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a battle with the scenario's own configuration.
    pub fn build(&self) -> BattleResult<Battle> {
        self.build_with(self.config.clone())
    }

    /// Build a battle with an overriding configuration.
    pub fn build_with(&self, config: BattleConfig) -> BattleResult<Battle> {
        let mut field: Battlefield = self.regions.iter().cloned().collect();
        field.name.clone_from(&self.name);

        let mut combatants = vec![self.convert(&self.player, 0, 0)?.with_wild(true)];
        for template in &self.enemies {
            for i in 1..=template.count {
                let mut c = self
                    .convert(&template.actor, 1, template.difficulty)?
                    .with_wild(template.wild);
                if template.count > 1 {
                    c.name = format!("{} {i}", template.actor.name);
                }
                combatants.push(c);
            }
        }

        let mut battle = Battle::new(field, config)?;
        for c in combatants {
            battle.add_combatant(c)?;
        }
        debug!(
            scenario = %self.name,
            combatants = battle.combatants().len(),
            "scenario built"
        );
        Ok(battle)
    }

    fn convert(&self, record: &ActorRecord, team: u32, difficulty: i32) -> BattleResult<Combatant> {
        let a = record.attributes;
        let s = record.skills;
        let attributes = Attributes {
            agility: Die::from_rating(a.agility + difficulty),
            smarts: Die::from_rating(a.smarts + difficulty),
            spirit: Die::from_rating(a.spirit + difficulty),
            strength: Die::from_rating(a.strength + difficulty),
            vigor: Die::from_rating(a.vigor + difficulty),
        };
        let untrained = Skills::default();
        let skills = Skills {
            fighting: skill_die(s.fighting, difficulty, untrained.fighting),
            shooting: skill_die(s.shooting, difficulty, untrained.shooting),
            arcane: skill_die(s.arcane, difficulty, untrained.arcane),
        };

        let mut c = Combatant::new(record.name.clone(), team)
            .with_region(record.region)
            .with_attributes(attributes)
            .with_skills(skills);
        c.entity.clone_from(&record.entity);
        if let Some(ref name) = record.melee {
            c.melee = Some(self.weapon(name)?);
        }
        if let Some(ref name) = record.ranged {
            c.ranged = Some(self.weapon(name)?);
        }
        if let Some(ref name) = record.armor {
            c.armor = Some(self.armor(name)?);
        }
        for name in &record.powers {
            c.powers.push(self.power(name)?);
        }
        Ok(c)
    }

    fn weapon(&self, name: &str) -> BattleResult<Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name == name)
            .cloned()
            .ok_or_else(|| BattleError::UnknownWeapon(name.to_string()))
    }

    fn armor(&self, name: &str) -> BattleResult<Armor> {
        self.armor
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| BattleError::UnknownArmor(name.to_string()))
    }

    fn power(&self, name: &str) -> BattleResult<Power> {
        self.powers
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| BattleError::UnknownPower(name.to_string()))
    }
}
