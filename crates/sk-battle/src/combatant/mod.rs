//! Combatants: traits, gear, powers, wounds, and per-turn state.
//!
//! Combatants are never removed from a battle. Death is a state, so dead
//! combatants stay addressable for display and power cleanup.

pub mod gear;

pub use gear::{Armor, Weapon};

use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::power::{ActivePower, ModInfo, ModKind, Power, apply_mods};

/// Wounds a wild combatant can carry before dying.
pub const WILD_WOUND_LIMIT: u32 = 3;

/// Wounds an ordinary combatant can carry before dying.
pub const EXTRA_WOUND_LIMIT: u32 = 0;

/// The five attribute dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Nimbleness and coordination.
    pub agility: Die,
    /// Wits; sets power reach.
    pub smarts: Die,
    /// Willpower; used to recover from being shaken.
    pub spirit: Die,
    /// Added to melee damage.
    pub strength: Die,
    /// Endurance; sets toughness.
    pub vigor: Die,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            agility: Die::d(4),
            smarts: Die::d(4),
            spirit: Die::d(4),
            strength: Die::d(4),
            vigor: Die::d(4),
        }
    }
}

/// The combat skill dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    /// Melee attacks; sets parry.
    pub fighting: Die,
    /// Ranged attacks.
    pub shooting: Die,
    /// Power casting. "No die" means the combatant cannot cast.
    pub arcane: Die,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            fighting: Die::new(1, 4, -2),
            shooting: Die::new(1, 4, -2),
            arcane: Die::NONE,
        }
    }
}

/// Per-turn state, cleared when the combatant's turn starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnFlags {
    /// Already moved this turn.
    pub moved: bool,
    /// Already attacked, cast, or spent the turn recovering.
    pub acted: bool,
    /// Ended the previous turn without acting.
    pub defending: bool,
}

/// A fighter on the battlefield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Display name.
    pub name: String,
    /// Link to the external entity this combatant was built from.
    pub entity: Option<String>,
    /// Team: 0 is the player's side, 1 and up are the opposition.
    pub team: u32,
    /// Index of the region the combatant stands in.
    pub region: usize,
    /// Wild combatants roll a wild die and survive more wounds.
    pub wild: bool,
    /// Attribute dice.
    pub attributes: Attributes,
    /// Skill dice.
    pub skills: Skills,
    /// Melee weapon, if any.
    pub melee: Option<Weapon>,
    /// Ranged weapon, if any.
    pub ranged: Option<Weapon>,
    /// Worn armor, if any.
    pub armor: Option<Armor>,
    /// Powers the combatant knows.
    pub powers: Vec<Power>,
    /// Powers currently affecting the combatant.
    pub active: Vec<ActivePower>,
    /// Wounds taken.
    pub wounds: u32,
    /// Shaken combatants cannot act until they recover.
    pub shaken: bool,
    /// Per-turn state.
    pub flags: TurnFlags,
}

impl Combatant {
    /// Create a combatant with d4 attributes, untrained skills, and no gear.
    pub fn new(name: impl Into<String>, team: u32) -> Self {
        Self {
            name: name.into(),
            entity: None,
            team,
            region: 0,
            wild: false,
            attributes: Attributes::default(),
            skills: Skills::default(),
            melee: None,
            ranged: None,
            armor: None,
            powers: Vec::new(),
            active: Vec::new(),
            wounds: 0,
            shaken: false,
            flags: TurnFlags::default(),
        }
    }

    /// Set whether this is a wild combatant.
    pub fn with_wild(mut self, wild: bool) -> Self {
        self.wild = wild;
        self
    }

    /// Set the starting region.
    pub fn with_region(mut self, region: usize) -> Self {
        self.region = region;
        self
    }

    /// Set the attribute dice.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the skill dice.
    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    /// Equip a melee weapon.
    pub fn with_melee(mut self, weapon: Weapon) -> Self {
        self.melee = Some(weapon);
        self
    }

    /// Equip a ranged weapon.
    pub fn with_ranged(mut self, weapon: Weapon) -> Self {
        self.ranged = Some(weapon);
        self
    }

    /// Equip armor.
    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Learn a power.
    pub fn with_power(mut self, power: Power) -> Self {
        self.powers.push(power);
        self
    }

    /// Base toughness: 2 plus half the Vigor rating.
    pub fn toughness(&self) -> i32 {
        2 + self.attributes.vigor.rating() / 2
    }

    /// Parry: 2 plus half the Fighting rating.
    pub fn parry(&self) -> i32 {
        2 + self.skills.fighting.rating() / 2
    }

    /// Armor remaining against a weapon with the given piercing.
    pub fn armor_against(&self, ap: u32) -> u32 {
        self.armor.as_ref().map_or(0, |a| a.against(ap))
    }

    /// Wounds this combatant can carry before dying.
    pub fn wound_limit(&self) -> u32 {
        if self.wild {
            WILD_WOUND_LIMIT
        } else {
            EXTRA_WOUND_LIMIT
        }
    }

    /// Returns true once wounds exceed the wound limit.
    pub fn is_dead(&self) -> bool {
        self.wounds > self.wound_limit()
    }

    /// Returns true if the combatant has a melee weapon.
    pub fn is_armed(&self) -> bool {
        self.melee.is_some()
    }

    /// Returns true if the combatant can still move this turn.
    pub fn can_move(&self) -> bool {
        !self.is_dead() && !self.flags.moved
    }

    /// Returns true if the combatant can still attack this turn.
    pub fn can_attack(&self) -> bool {
        !self.is_dead() && !self.flags.acted && !self.shaken
    }

    /// Returns true if the combatant can still cast this turn.
    pub fn can_cast(&self) -> bool {
        self.can_attack() && !self.skills.arcane.is_none()
    }

    /// Total standing modifier of `kind` on this combatant.
    pub fn mods(&self, kind: ModKind) -> (i32, Vec<ModInfo>) {
        apply_mods(kind, &self.active)
    }

    /// Returns true if a power from the same family and direction already affects this combatant.
    pub fn has_effect_like(&self, power: &Power) -> bool {
        let Some(kind) = power.family() else {
            return false;
        };
        self.active.iter().any(|ap| {
            ap.power.family() == Some(kind)
                && ap.power.magnitude.signum() == power.magnitude.signum()
        })
    }

    /// Clear per-turn flags at the start of the combatant's turn.
    pub fn start_turn(&mut self) {
        self.flags = TurnFlags::default();
    }

    /// Clear per-turn flags at the end of the turn, entering a defensive
    /// stance if the combatant neither acted nor is shaken.
    pub fn end_turn(&mut self) {
        let defending = !self.flags.acted && !self.shaken && !self.is_dead();
        self.flags = TurnFlags {
            defending,
            ..TurnFlags::default()
        };
    }

    /// Add a standing power, replacing an earlier cast of the same power by the same caster.
    pub fn add_active(&mut self, active: ActivePower) {
        self.active
            .retain(|ap| !(ap.caster == active.caster && ap.power.name == active.power.name));
        self.active.push(active);
    }

    /// Remove every standing power maintained by `caster`. Returns how many were removed.
    pub fn drop_powers_from(&mut self, caster: usize) -> usize {
        let before = self.active.len();
        self.active.retain(|ap| ap.caster != caster);
        before - self.active.len()
    }
}
