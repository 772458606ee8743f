//! Moving between neighbouring regions.

use rand::rngs::StdRng;
use tracing::debug;

use crate::action::{Action, ActionResult};

use super::Battle;
use super::attack::AttackMode;

impl Battle {
    /// Validate a one-region step in `direction` (+1 away, -1 back).
    pub fn check_move(&self, index: usize, direction: i32) -> ActionResult {
        let Some(c) = self.combatants.get(index) else {
            return ActionResult::Invalid;
        };
        if direction != 1 && direction != -1 {
            return ActionResult::Invalid;
        }
        if self.done() || !c.can_move() {
            return ActionResult::NoAction;
        }
        match self.field.step(c.region, direction) {
            Some(_) => ActionResult::Success,
            None => ActionResult::OutOfRange,
        }
    }

    /// Step one region, using up the combatant's move for the turn.
    ///
    /// Every able opponent in the region being left gets a free melee
    /// attack first. If one of them kills the mover, the move never happens.
    pub fn move_combatant(&mut self, index: usize, direction: i32, rng: &mut StdRng) -> ActionResult {
        let result = self.check_move(index, direction);
        if !result.is_success() {
            return result;
        }
        let from = self.combatants[index].region;
        let Some(to) = self.field.step(from, direction) else {
            return ActionResult::OutOfRange;
        };
        self.combatants[index].flags.moved = true;

        let team = self.combatants[index].team;
        let opponents: Vec<usize> = self
            .combatants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.team != team && c.region == from && !c.is_dead() && !c.shaken)
            .map(|(i, _)| i)
            .collect();
        for opponent in opponents {
            self.resolve_attack(opponent, index, AttackMode::Melee, true, rng);
            if self.combatants[index].is_dead() {
                debug!(combatant = index, opponent, "cut down while withdrawing");
                return ActionResult::Success;
            }
        }

        self.combatants[index].region = to;
        debug!(combatant = index, from, to, "moved");
        self.log.push(Action::Move {
            combatant: index,
            from,
            to,
        });
        ActionResult::Success
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{archer, battle, cultist, hero, rng};
    use super::*;
    use crate::dice::Die;

    #[test]
    fn move_within_bounds() {
        let mut b = battle(vec![hero(), archer("Archer").with_region(2)]);
        assert_eq!(b.check_move(0, -1), ActionResult::OutOfRange);
        assert_eq!(b.check_move(0, 2), ActionResult::Invalid);
        assert_eq!(b.check_move(7, 1), ActionResult::Invalid);
        assert_eq!(b.check_move(1, 1), ActionResult::OutOfRange);

        let mut rng = rng(3);
        assert_eq!(b.move_combatant(0, 1, &mut rng), ActionResult::Success);
        assert_eq!(b.combatant(0).unwrap().region, 1);
        assert_eq!(b.check_move(0, 1), ActionResult::NoAction);
        assert_eq!(
            b.drain_actions(),
            vec![Action::Move {
                combatant: 0,
                from: 0,
                to: 1
            }]
        );
    }

    #[test]
    fn shaken_combatants_may_still_move() {
        let mut b = battle(vec![hero(), cultist("A").with_region(2)]);
        b.combatant_mut(0).unwrap().shaken = true;
        assert_eq!(b.check_move(0, 1), ActionResult::Success);
    }

    #[test]
    fn leaving_provokes_free_attacks() {
        let mut b = battle(vec![hero(), cultist("A"), cultist("B"), cultist("C").with_region(1)]);
        b.combatant_mut(2).unwrap().shaken = true;
        // B is shaken and C stands elsewhere, so only A swings.
        let mut rng = rng(21);
        assert!(b.move_combatant(0, 1, &mut rng).is_success());

        let actions = b.drain_actions();
        let free: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Attack(report) => Some(report),
                _ => None,
            })
            .collect();
        assert_eq!(free.len(), 1);
        assert!(free.iter().all(|r| r.free && r.defender == 0 && r.attacker == 1));
        // A free attack costs the attacker nothing.
        assert!(b.combatant(1).unwrap().can_attack());

        let hero = b.combatant(0).unwrap();
        if hero.is_dead() {
            assert_eq!(hero.region, 0);
        } else {
            assert_eq!(hero.region, 1);
            assert!(matches!(actions.last(), Some(Action::Move { .. })));
        }
    }

    #[test]
    fn dead_mover_stays_put() {
        let killed = (0..20).find_map(|seed| {
            let mut b = battle(vec![hero(), cultist("Brute")]);
            let hero = b.combatant_mut(0).unwrap();
            hero.wounds = 3;
            hero.shaken = true;
            let brute = b.combatant_mut(1).unwrap();
            brute.skills.fighting = Die::new(1, 12, 30);
            brute.attributes.strength = Die::new(1, 12, 30);
            assert!(b.move_combatant(0, 1, &mut rng(seed)).is_success());
            b.defeat().then_some(b)
        });
        let mut b = killed.expect("a +30 brute lands a blow for some seed");
        assert_eq!(b.combatant(0).unwrap().region, 0);
        assert!(!b.drain_actions().iter().any(|a| matches!(a, Action::Move { .. })));
        assert_eq!(b.check_move(0, 1), ActionResult::NoAction);
    }
}
