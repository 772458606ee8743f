//! Attack validation and resolution.
//!
//! An attack builds a modified skill die, rolls it against parry (melee) or
//! a flat 4 (ranged), and on a hit rolls damage against toughness plus
//! armor. Damage first shakes a target; a shaken target hit again takes
//! wounds instead.

use rand::rngs::StdRng;
use tracing::debug;

use crate::action::{Action, ActionResult, AttackReport, DamageReport};
use crate::combatant::Combatant;
use crate::dice::{Die, Roll};
use crate::power::{ModInfo, ModKind};

use super::Battle;

/// Target number for ranged attacks.
pub const RANGED_TN: i32 = 4;

/// Melee bonus for an armed attacker against an unarmed defender.
pub const UNARMED_BONUS: i32 = 2;

/// Extra damage die rolled when an attack hits with a raise.
pub const RAISE_DAMAGE: Die = Die::d(6);

/// How an attack is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMode {
    /// Hand-to-hand, same region only.
    Melee,
    /// With a ranged weapon, at any distance.
    Ranged,
}

/// Effect of `damage` against `toughness` on a target that may already be shaken.
///
/// Returns `(wounds, newly_shaken)`. Below toughness nothing happens. An
/// unshaken target becomes shaken and takes a wound per raise; an already
/// shaken target takes one wound plus one per raise.
pub fn damage_effect(damage: i32, toughness: i32, already_shaken: bool) -> (u32, bool) {
    if damage < toughness {
        return (0, false);
    }
    let raises = ((damage - toughness) / 4) as u32;
    if already_shaken {
        (1 + raises, false)
    } else {
        (raises, true)
    }
}

impl Battle {
    /// How `attacker` would attack `defender`: melee when sharing a region,
    /// ranged when carrying a ranged weapon, otherwise not at all.
    pub fn attack_mode(&self, attacker: usize, defender: usize) -> Option<AttackMode> {
        let a = self.combatants.get(attacker)?;
        let d = self.combatants.get(defender)?;
        if a.region == d.region {
            Some(AttackMode::Melee)
        } else if a.ranged.is_some() {
            Some(AttackMode::Ranged)
        } else {
            None
        }
    }

    /// Validate an attack without resolving it.
    pub fn check_attack(&self, attacker: usize, defender: usize) -> ActionResult {
        let (Some(a), Some(d)) = (self.combatants.get(attacker), self.combatants.get(defender))
        else {
            return ActionResult::Invalid;
        };
        if attacker == defender {
            return ActionResult::Invalid;
        }
        if self.done() || !a.can_attack() {
            return ActionResult::NoAction;
        }
        if d.is_dead() || a.team == d.team {
            return ActionResult::Invalid;
        }
        match self.attack_mode(attacker, defender) {
            Some(_) => ActionResult::Success,
            None => ActionResult::Invalid,
        }
    }

    /// Attack `defender`, using up the attacker's action for the turn.
    pub fn attack(&mut self, attacker: usize, defender: usize, rng: &mut StdRng) -> ActionResult {
        let result = self.check_attack(attacker, defender);
        if !result.is_success() {
            return result;
        }
        let Some(mode) = self.attack_mode(attacker, defender) else {
            return ActionResult::Invalid;
        };
        self.combatants[attacker].flags.acted = true;
        self.resolve_attack(attacker, defender, mode, false, rng);
        ActionResult::Success
    }

    /// Count of attackers beyond the defender's own side in the defender's region.
    pub fn gang_up(&self, attacker: usize, defender: usize) -> i32 {
        let (Some(a), Some(d)) = (self.combatants.get(attacker), self.combatants.get(defender))
        else {
            return 0;
        };
        let local = |team: u32| {
            self.combatants
                .iter()
                .filter(|c| c.team == team && c.region == d.region && !c.is_dead())
                .count() as i32
        };
        (local(a.team) - local(d.team)).max(0)
    }

    /// Modifiers and target number for an attack, plus the skill die to roll.
    fn attack_setup(
        &self,
        attacker: usize,
        defender: usize,
        mode: AttackMode,
    ) -> (Die, i32, Vec<ModInfo>) {
        let a = &self.combatants[attacker];
        let d = &self.combatants[defender];
        let mut mods = Vec::new();

        let (_, defence) = d.mods(ModKind::Combat);
        let defence = defence.into_iter().map(ModInfo::negated);

        let (skill, target) = match mode {
            AttackMode::Melee => {
                let gang = self.gang_up(attacker, defender);
                if gang > 0 {
                    mods.push(ModInfo::situational(ModKind::GangUp, gang));
                }
                if a.is_armed() && !d.is_armed() {
                    mods.push(ModInfo::situational(ModKind::Unarmed, UNARMED_BONUS));
                }
                mods.extend(defence);
                mods.extend(a.mods(ModKind::Melee).1);
                (a.skills.fighting, d.parry())
            }
            AttackMode::Ranged => {
                mods.extend(a.mods(ModKind::Ranged).1);
                mods.extend(defence);
                if let Some(ref weapon) = a.ranged {
                    let penalty = weapon.range_penalty(self.distance(attacker, defender));
                    if penalty != 0 {
                        mods.push(ModInfo::situational(ModKind::Range, penalty));
                    }
                }
                let cover = self.cover_of(defender).penalty();
                if cover != 0 {
                    mods.push(ModInfo::situational(ModKind::Cover, cover));
                }
                (a.skills.shooting, RANGED_TN)
            }
        };

        let total: i32 = mods.iter().map(|m| m.delta).sum();
        (skill.with_bonus(total), target, mods)
    }

    /// Roll an attack and apply its damage. Pushes the report onto the log.
    pub(crate) fn resolve_attack(
        &mut self,
        attacker: usize,
        defender: usize,
        mode: AttackMode,
        free: bool,
        rng: &mut StdRng,
    ) -> AttackReport {
        let (die, target_number, mods) = self.attack_setup(attacker, defender, mode);
        let a = &self.combatants[attacker];
        let roll = die.roll(a.wild, rng);

        let weapon = match mode {
            AttackMode::Melee => a.melee.clone(),
            AttackMode::Ranged => a.ranged.clone(),
        };

        let damage = if roll.succeeds(target_number) {
            let mut rolls = Vec::new();
            if let Some(ref w) = weapon {
                rolls.push(w.damage.roll(false, rng));
            }
            if mode == AttackMode::Melee {
                rolls.push(a.attributes.strength.roll(false, rng));
            }
            if roll.raises(target_number) > 0 {
                rolls.push(RAISE_DAMAGE.roll(false, rng));
            }
            let ap = weapon.as_ref().map_or(0, |w| w.ap);
            Some(self.apply_damage(defender, rolls, ap))
        } else {
            None
        };

        debug!(
            attacker,
            defender,
            ?mode,
            free,
            roll = roll.value(),
            target_number,
            hit = damage.is_some(),
            "attack resolved"
        );

        let report = AttackReport {
            attacker,
            defender,
            weapon: weapon.map(|w| w.name),
            ranged: mode == AttackMode::Ranged,
            free,
            roll,
            target_number,
            mods,
            damage,
        };
        self.log.push(Action::Attack(report.clone()));
        report
    }

    /// Apply rolled damage to a combatant, purging its powers if it dies.
    pub(crate) fn apply_damage(&mut self, target: usize, rolls: Vec<Roll>, ap: u32) -> DamageReport {
        let total: i32 = rolls.iter().map(Roll::value).sum();
        let c: &mut Combatant = &mut self.combatants[target];
        let was_dead = c.is_dead();
        let armor = c.armor_against(ap);
        let toughness = c.toughness() + armor as i32 + c.mods(ModKind::Toughness).0;

        let (wounds, shaken) = damage_effect(total, toughness, c.shaken);
        c.wounds += wounds;
        if shaken {
            c.shaken = true;
        }
        let killed = !was_dead && c.is_dead();

        debug!(target, total, toughness, wounds, shaken, killed, "damage applied");
        if killed {
            self.purge_powers_of(target);
        }

        DamageReport {
            rolls,
            total,
            toughness,
            armor,
            wounds,
            shaken,
            killed,
        }
    }
}
