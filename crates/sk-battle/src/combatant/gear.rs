//! Weapons and armor.

use serde::{Deserialize, Serialize};

use crate::dice::Die;

/// A weapon. Melee weapons add the wielder's Strength die to damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name.
    pub name: String,
    /// Damage die.
    pub damage: Die,
    /// Rated range in yards (ignored for melee weapons).
    #[serde(default)]
    pub range: u32,
    /// Armor piercing.
    #[serde(default)]
    pub ap: u32,
}

impl Weapon {
    /// Create a melee weapon.
    pub fn melee(name: impl Into<String>, damage: Die) -> Self {
        Self {
            name: name.into(),
            damage,
            range: 0,
            ap: 0,
        }
    }

    /// Create a ranged weapon with a rated range in yards.
    pub fn ranged(name: impl Into<String>, damage: Die, range: u32) -> Self {
        Self {
            name: name.into(),
            damage,
            range,
            ap: 0,
        }
    }

    /// Set the armor piercing rating.
    pub fn with_ap(mut self, ap: u32) -> Self {
        self.ap = ap;
        self
    }

    /// Range band penalty for shooting at a target `distance` yards away.
    pub fn range_penalty(&self, distance: u32) -> i32 {
        let range = self.range;
        if distance <= range / 2 {
            0
        } else if distance <= range {
            -2
        } else if distance <= range.saturating_mul(2) {
            -4
        } else {
            -6
        }
    }
}

/// Worn armor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    /// Display name.
    pub name: String,
    /// Armor bonus added to toughness.
    pub armor: u32,
}

impl Armor {
    /// Create armor.
    pub fn new(name: impl Into<String>, armor: u32) -> Self {
        Self {
            name: name.into(),
            armor,
        }
    }

    /// Armor left after a weapon's piercing.
    pub fn against(&self, ap: u32) -> u32 {
        self.armor.saturating_sub(ap)
    }
}
