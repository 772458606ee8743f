//! Powers: bolts, heals, and standing buffs or debuffs.
//!
//! Bolts and heals resolve immediately. Modifier powers stay on their target
//! as an [`ActivePower`] until the caster dies.

pub mod modifier;

pub use modifier::{ModInfo, ModKind, apply_mods};

use serde::{Deserialize, Serialize};

use crate::dice::Die;

/// What a power does when it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerEffect {
    /// Deal damage to an enemy.
    Bolt,
    /// Remove wounds from an ally.
    Heal,
    /// Grant a standing modifier of the given kind.
    Modifier(ModKind),
}

fn default_magnitude() -> i32 {
    1
}

/// A power definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    /// Display name, also used to recognise repeat casts.
    pub name: String,
    /// Power point cost; drives the casting target number.
    #[serde(default)]
    pub cost: u32,
    /// Range as a multiple of the caster's Smarts die size, in yards.
    #[serde(default)]
    pub range: u32,
    /// What the power does.
    pub effect: PowerEffect,
    /// Effect multiplier: bolt dice multiplier, wounds healed, or modifier delta.
    #[serde(default = "default_magnitude")]
    pub magnitude: i32,
    /// Base damage for bolts.
    #[serde(default)]
    pub damage: Die,
    /// Applies to every same-team combatant in the target's region.
    #[serde(default)]
    pub regional: bool,
}

impl Power {
    /// A bolt dealing `damage`.
    pub fn bolt(name: impl Into<String>, damage: Die) -> Self {
        Self {
            name: name.into(),
            cost: 1,
            range: 12,
            effect: PowerEffect::Bolt,
            magnitude: 1,
            damage,
            regional: false,
        }
    }

    /// A heal removing `wounds` wounds.
    pub fn heal(name: impl Into<String>, wounds: i32) -> Self {
        Self {
            name: name.into(),
            cost: 3,
            range: 0,
            effect: PowerEffect::Heal,
            magnitude: wounds,
            damage: Die::NONE,
            regional: false,
        }
    }

    /// A standing modifier of `kind` with a signed `delta`.
    pub fn modifier(name: impl Into<String>, kind: ModKind, delta: i32) -> Self {
        Self {
            name: name.into(),
            cost: 2,
            range: 6,
            effect: PowerEffect::Modifier(kind),
            magnitude: delta,
            damage: Die::NONE,
            regional: false,
        }
    }

    /// Set the power point cost.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the range multiplier.
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    /// Make the power affect the whole target region.
    pub fn with_regional(mut self, regional: bool) -> Self {
        self.regional = regional;
        self
    }

    /// Casting target number while the caster already maintains `maintained` powers.
    pub fn target_number(&self, maintained: usize) -> i32 {
        4 + (self.cost as i32 + 2) / 2 + maintained as i32
    }

    /// Returns true if the power is meant for allies rather than enemies.
    pub fn targets_allies(&self) -> bool {
        match self.effect {
            PowerEffect::Heal => true,
            PowerEffect::Bolt => false,
            PowerEffect::Modifier(_) => self.magnitude > 0,
        }
    }

    /// Returns true if the power resolves immediately and never stays active.
    pub fn is_transient(&self) -> bool {
        matches!(self.effect, PowerEffect::Bolt | PowerEffect::Heal)
    }

    /// Reach in yards for a caster with the given Smarts die.
    pub fn reach(&self, smarts: Die) -> u32 {
        self.range * smarts.sides
    }

    /// The standing modifier kind, if this power grants one.
    pub fn family(&self) -> Option<ModKind> {
        match self.effect {
            PowerEffect::Modifier(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A power currently affecting a combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePower {
    /// Index of the combatant maintaining the power.
    pub caster: usize,
    /// The power definition.
    pub power: Power,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_number_rises_with_cost_and_upkeep() {
        let power = Power::bolt("Bolt", Die::new(2, 6, 0)).with_cost(1);
        assert_eq!(power.target_number(0), 5);
        assert_eq!(power.target_number(2), 7);
        assert_eq!(power.clone().with_cost(2).target_number(0), 6);
        assert_eq!(power.with_cost(3).target_number(0), 6);
    }

    #[test]
    fn targeting_follows_effect() {
        assert!(Power::heal("Heal", 1).targets_allies());
        assert!(!Power::bolt("Bolt", Die::d(6)).targets_allies());
        assert!(Power::modifier("Boost", ModKind::Melee, 2).targets_allies());
        assert!(!Power::modifier("Hex", ModKind::Melee, -2).targets_allies());
    }

    #[test]
    fn transient_powers() {
        assert!(Power::heal("Heal", 1).is_transient());
        assert!(!Power::modifier("Armor", ModKind::Toughness, 2).is_transient());
        assert_eq!(
            Power::modifier("Armor", ModKind::Toughness, 2).family(),
            Some(ModKind::Toughness)
        );
    }

    #[test]
    fn reach_scales_with_smarts() {
        let power = Power::bolt("Bolt", Die::d(6)).with_range(3);
        assert_eq!(power.reach(Die::d(8)), 24);
        assert_eq!(power.reach(Die::NONE), 0);
    }

    #[test]
    fn power_from_json() {
        let power: Power = serde_json::from_str(
            r#"{ "name": "Deflection", "cost": 2, "range": 3,
                 "effect": { "modifier": "combat" }, "magnitude": 2, "regional": true }"#,
        )
        .unwrap();
        assert_eq!(power.effect, PowerEffect::Modifier(ModKind::Combat));
        assert!(power.regional);

        let bolt: Power = serde_json::from_str(
            r#"{ "name": "Bolt", "cost": 1, "range": 12, "effect": "bolt", "damage": "2d6" }"#,
        )
        .unwrap();
        assert_eq!(bolt.damage, Die::new(2, 6, 0));
        assert_eq!(bolt.magnitude, 1);
    }
}
