//! Rule-based enemy turns.
//!
//! A greedy single-ply heuristic: cast if the combatant is a better caster
//! than fighter, otherwise reposition and attack the player. All variety
//! comes from the caller's random stream, so a fixed seed replays exactly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::{Battle, PLAYER};

impl Battle {
    /// How strongly the combatant prefers casting over fighting this turn.
    ///
    /// Arcane rating minus the rating of the combat skill it would otherwise
    /// use, minus 2 per power it is already maintaining.
    pub fn power_score(&self, index: usize) -> i32 {
        let Some(c) = self.combatants.get(index) else {
            return 0;
        };
        let co_located = self
            .combatants
            .get(PLAYER)
            .is_some_and(|p| p.region == c.region);
        let combat = if co_located || c.ranged.is_none() {
            c.skills.fighting
        } else {
            c.skills.shooting
        };
        c.skills.arcane.rating()
            - combat.rating()
            - 2 * self.count_maintained_powers(index) as i32
    }

    /// Run the current combatant's turn if it is not the player's.
    ///
    /// Does not end the turn; call [`Battle::advance`] afterwards.
    pub fn do_enemy_actions(&mut self, rng: &mut StdRng) {
        let Some(me) = self.current() else {
            return;
        };
        if me == PLAYER || self.done() || self.combatants[me].is_dead() {
            return;
        }

        if self.power_score(me) > 0 && self.combatants[me].can_cast() && self.try_cast(me, rng) {
            return;
        }

        if let Some(direction) = self.choose_step(me) {
            self.move_combatant(me, direction, rng);
        }
        if self.check_attack(me, PLAYER).is_success() {
            self.attack(me, PLAYER, rng);
        }
    }

    /// Cast the first valid power and target pair in shuffled order.
    fn try_cast(&mut self, me: usize, rng: &mut StdRng) -> bool {
        let mut powers: Vec<usize> = (0..self.combatants[me].powers.len()).collect();
        let mut targets: Vec<usize> = (0..self.combatants.len()).collect();
        powers.shuffle(rng);
        targets.shuffle(rng);

        for &p in &powers {
            for &t in &targets {
                if !self.check_power(me, t, p).is_success() {
                    continue;
                }
                let power = &self.combatants[me].powers[p];
                if self.combatants[t].has_effect_like(power) {
                    continue;
                }
                debug!(caster = me, target = t, power = %power.name, "enemy casts");
                self.cast_power(me, t, p, rng);
                return true;
            }
        }
        false
    }

    /// Which way, if any, the combatant should step this turn.
    fn choose_step(&self, me: usize) -> Option<i32> {
        let c = &self.combatants[me];
        let player = self.combatants.get(PLAYER)?;
        if c.region == player.region || !c.can_move() {
            return None;
        }
        let toward = |to: usize| if to > c.region { 1 } else { -1 };

        if c.ranged.is_some() {
            if let Some(to) = self.better_cover(c.region) {
                return Some(toward(to));
            }
            if c.skills.shooting.rating() > c.skills.fighting.rating() {
                return None;
            }
        }
        Some(toward(player.region))
    }

    /// The region with the most cover strictly better than `from`'s, nearest first on ties.
    fn better_cover(&self, from: usize) -> Option<usize> {
        let here = self.field.cover(from);
        self.field
            .regions()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.cover > here)
            .max_by_key(|(i, r)| (r.cover, std::cmp::Reverse(i.abs_diff(from))))
            .map(|(i, _)| i)
    }
}
