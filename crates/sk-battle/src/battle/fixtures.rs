//! Shared battle fixtures for tests.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::combatant::{Armor, Attributes, Combatant, Skills, Weapon};
use crate::config::BattleConfig;
use crate::dice::Die;
use crate::field::{Battlefield, Cover, Region};

use super::Battle;

/// Nave (0 yd, open), Aisle (10 yd, light), Altar (20 yd, heavy).
pub fn field() -> Battlefield {
    let mut field = Battlefield::new("Ruined Chapel");
    field.add_region(Region::new("Nave", 0, Cover::None));
    field.add_region(Region::new("Aisle", 10, Cover::Light));
    field.add_region(Region::new("Altar", 20, Cover::Heavy));
    field
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Wild player: Fighting d6, Vigor d6, short sword.
pub fn hero() -> Combatant {
    Combatant::new("Hero", 0)
        .with_wild(true)
        .with_attributes(Attributes {
            strength: Die::d(6),
            vigor: Die::d(6),
            ..Attributes::default()
        })
        .with_skills(Skills {
            fighting: Die::d(6),
            ..Skills::default()
        })
        .with_melee(Weapon::melee("Short Sword", Die::d(6)))
}

/// Ordinary opponent: Fighting d6, no armor, no weapon.
pub fn cultist(name: &str) -> Combatant {
    Combatant::new(name, 1)
        .with_attributes(Attributes {
            vigor: Die::d(6),
            ..Attributes::default()
        })
        .with_skills(Skills {
            fighting: Die::d(6),
            ..Skills::default()
        })
}

/// Ordinary opponent with a crossbow and leather.
pub fn archer(name: &str) -> Combatant {
    Combatant::new(name, 1)
        .with_skills(Skills {
            fighting: Die::d(4),
            shooting: Die::d(8),
            ..Skills::default()
        })
        .with_ranged(Weapon::ranged("Crossbow", Die::new(2, 6, 0), 15).with_ap(2))
        .with_armor(Armor::new("Leather", 1))
}

/// A battle on [`field`] with a fixed turn order.
pub fn battle(combatants: Vec<Combatant>) -> Battle {
    let config = BattleConfig::default().with_shuffle(false).with_max_actions(0);
    let mut battle = Battle::new(field(), config).expect("fixture field has regions");
    for c in combatants {
        battle.add_combatant(c).expect("fixture combatant is valid");
    }
    battle
}
