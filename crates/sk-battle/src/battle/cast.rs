//! Casting powers.

use rand::rngs::StdRng;
use tracing::debug;

use crate::action::{Action, ActionResult, PowerOutcome, PowerReport};
use crate::dice::Die;
use crate::power::{ActivePower, ModInfo, ModKind, Power, PowerEffect};

use super::Battle;

/// Damage for a bolt that names no damage die of its own.
pub const DEFAULT_BOLT_DAMAGE: Die = Die::new(2, 6, 0);

/// Bolt damage: the power's dice times its magnitude, plus a die per raise.
fn bolt_damage(power: &Power, raises: u32) -> Die {
    let base = if power.damage.is_none() {
        DEFAULT_BOLT_DAMAGE
    } else {
        power.damage
    };
    let count = base
        .count
        .saturating_mul(power.magnitude.max(1) as u32)
        .saturating_add(raises);
    Die::new(count, base.sides, base.bonus)
}

impl Battle {
    /// Validate casting the caster's `power` (an index into its known powers) at `target`.
    pub fn check_power(&self, caster: usize, target: usize, power: usize) -> ActionResult {
        let (Some(c), Some(t)) = (self.combatants.get(caster), self.combatants.get(target)) else {
            return ActionResult::Invalid;
        };
        let Some(p) = c.powers.get(power) else {
            return ActionResult::Invalid;
        };
        if self.done() || !c.can_attack() {
            return ActionResult::NoAction;
        }
        if c.skills.arcane.is_none() || t.is_dead() {
            return ActionResult::Invalid;
        }
        if p.targets_allies() != (c.team == t.team) {
            return ActionResult::Invalid;
        }
        match p.effect {
            PowerEffect::Heal if t.wounds == 0 => return ActionResult::Invalid,
            PowerEffect::Modifier(kind) if !kind.is_standing() => return ActionResult::Invalid,
            _ => {}
        }
        if self.distance(caster, target) > p.reach(c.attributes.smarts) {
            return ActionResult::OutOfRange;
        }
        ActionResult::Success
    }

    /// Cast a power, using up the caster's action for the turn.
    pub fn cast_power(
        &mut self,
        caster: usize,
        target: usize,
        power: usize,
        rng: &mut StdRng,
    ) -> ActionResult {
        let result = self.check_power(caster, target, power);
        if !result.is_success() {
            return result;
        }
        let c = &self.combatants[caster];
        let p = c.powers[power].clone();
        let (arcane, wild) = (c.skills.arcane, c.wild);
        self.combatants[caster].flags.acted = true;

        let mut mods = Vec::new();
        let mut target_number = p.target_number(self.count_maintained_powers(caster));
        let across = self.combatants[target].region != self.combatants[caster].region;
        if p.effect == PowerEffect::Bolt && across {
            let tiers = self.cover_of(target).tier();
            if tiers > 0 {
                // Stored with the sign it has on the casting roll.
                mods.push(ModInfo::situational(ModKind::Cover, -2 * tiers));
                target_number += 2 * tiers;
            }
        }

        let roll = arcane.roll(wild, rng);
        let raises = roll.raises(target_number);
        let outcome = if !roll.succeeds(target_number) {
            PowerOutcome::Failed
        } else {
            self.land_power(caster, target, &p, raises, rng)
        };

        debug!(
            caster,
            target,
            power = %p.name,
            roll = roll.value(),
            target_number,
            raises,
            ?outcome,
            "power cast"
        );
        self.log.push(Action::Power(PowerReport {
            caster,
            target,
            power: p.name,
            roll,
            target_number,
            mods,
            raises,
            outcome,
        }));
        ActionResult::Success
    }

    fn land_power(
        &mut self,
        caster: usize,
        target: usize,
        power: &Power,
        raises: u32,
        rng: &mut StdRng,
    ) -> PowerOutcome {
        match power.effect {
            PowerEffect::Bolt => {
                let roll = bolt_damage(power, raises).roll(false, rng);
                PowerOutcome::Damage(self.apply_damage(target, vec![roll], 0))
            }
            PowerEffect::Heal => {
                let t = &mut self.combatants[target];
                let amount = power.magnitude.max(0) as u32 + raises;
                let healed = amount.min(t.wounds);
                t.wounds -= healed;
                PowerOutcome::Healed { wounds: healed }
            }
            PowerEffect::Modifier(_) => {
                let targets: Vec<usize> = if power.regional {
                    let (team, region) = {
                        let t = &self.combatants[target];
                        (t.team, t.region)
                    };
                    self.combatants
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| c.team == team && c.region == region && !c.is_dead())
                        .map(|(i, _)| i)
                        .collect()
                } else {
                    vec![target]
                };
                for &i in &targets {
                    self.combatants[i].add_active(ActivePower {
                        caster,
                        power: power.clone(),
                    });
                }
                PowerOutcome::Applied { targets }
            }
        }
    }
}
