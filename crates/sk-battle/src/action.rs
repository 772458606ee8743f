//! Resolved battle events and the bounded log that carries them out.
//!
//! The resolver never formats text; presentation layers drain the log and
//! render each [`Action`] however they like.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::dice::Roll;
use crate::power::ModInfo;

/// Outcome of validating or issuing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionResult {
    /// The command was accepted and resolved (the dice may still have failed).
    Success,
    /// The actor has no move or action left, or the battle is over.
    NoAction,
    /// The target is too far away.
    OutOfRange,
    /// The command makes no sense (bad index, wrong team, no weapon...).
    Invalid,
}

impl ActionResult {
    /// Returns true for [`ActionResult::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NoAction => write!(f, "no action available"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

/// What a damage roll did to its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Every damage die rolled (weapon, Strength, raise bonus).
    pub rolls: Vec<Roll>,
    /// Total damage.
    pub total: i32,
    /// Toughness the damage was compared against, including armor.
    pub toughness: i32,
    /// Armor counted after piercing.
    pub armor: u32,
    /// Wounds inflicted.
    pub wounds: u32,
    /// The hit left the target newly shaken.
    pub shaken: bool,
    /// The hit killed the target.
    pub killed: bool,
}

impl DamageReport {
    /// Returns true if the damage had any effect.
    pub fn took_effect(&self) -> bool {
        self.shaken || self.wounds > 0
    }
}

/// A resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    /// Attacking combatant.
    pub attacker: usize,
    /// Defending combatant.
    pub defender: usize,
    /// Weapon used, or none for bare hands.
    pub weapon: Option<String>,
    /// Ranged rather than melee.
    pub ranged: bool,
    /// Provoked by the defender leaving the region; costs the attacker nothing.
    pub free: bool,
    /// The attack roll.
    pub roll: Roll,
    /// Number the roll had to reach.
    pub target_number: i32,
    /// Every modifier folded into the roll.
    pub mods: Vec<ModInfo>,
    /// Damage dealt, if the attack hit.
    pub damage: Option<DamageReport>,
}

impl AttackReport {
    /// Returns true if the attack hit.
    pub fn hit(&self) -> bool {
        self.damage.is_some()
    }
}

/// What a cast power did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerOutcome {
    /// The casting roll failed.
    Failed,
    /// A bolt struck.
    Damage(DamageReport),
    /// Wounds were removed.
    Healed {
        /// Wounds actually removed.
        wounds: u32,
    },
    /// A standing effect was placed on these combatants.
    Applied {
        /// Affected combatants.
        targets: Vec<usize>,
    },
}

/// A resolved power cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerReport {
    /// Casting combatant.
    pub caster: usize,
    /// Target combatant.
    pub target: usize,
    /// Name of the power.
    pub power: String,
    /// The casting roll.
    pub roll: Roll,
    /// Number the roll had to reach.
    pub target_number: i32,
    /// Modifiers folded into the target number.
    pub mods: Vec<ModInfo>,
    /// Raises over the target number.
    pub raises: u32,
    /// What happened.
    pub outcome: PowerOutcome,
}

/// One resolved event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// A combatant changed region.
    Move {
        /// Who moved.
        combatant: usize,
        /// Region left.
        from: usize,
        /// Region entered.
        to: usize,
    },
    /// An attack was resolved.
    Attack(AttackReport),
    /// A shaken combatant tried to recover.
    Recover {
        /// Who rolled.
        combatant: usize,
        /// The Spirit roll.
        roll: Roll,
        /// No longer shaken.
        recovered: bool,
        /// Recovered with a raise and may act this turn.
        free_to_act: bool,
    },
    /// A power was cast.
    Power(PowerReport),
}

impl Action {
    /// The combatant who performed this action.
    pub fn actor(&self) -> usize {
        match self {
            Self::Move { combatant, .. } | Self::Recover { combatant, .. } => *combatant,
            Self::Attack(report) => report.attacker,
            Self::Power(report) => report.caster,
        }
    }
}

/// Bounded FIFO of actions waiting to be presented.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: VecDeque<Action>,
    max_actions: usize,
}

impl ActionLog {
    /// Create a log with the given capacity (0 = unlimited).
    pub fn new(max_actions: usize) -> Self {
        Self {
            actions: VecDeque::new(),
            max_actions,
        }
    }

    /// Append an action, dropping the oldest one if the log is full.
    pub fn push(&mut self, action: Action) {
        self.actions.push_back(action);
        if self.max_actions > 0 && self.actions.len() > self.max_actions {
            self.actions.pop_front();
        }
    }

    /// Take every pending action, oldest first.
    pub fn drain(&mut self) -> Vec<Action> {
        self.actions.drain(..).collect()
    }

    /// Iterate pending actions without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(combatant: usize) -> Action {
        Action::Move {
            combatant,
            from: 0,
            to: 1,
        }
    }

    #[test]
    fn log_drops_oldest_when_full() {
        let mut log = ActionLog::new(2);
        for i in 0..5 {
            log.push(moved(i));
        }
        assert_eq!(log.len(), 2);
        let drained = log.drain();
        assert_eq!(drained[0].actor(), 3);
        assert_eq!(drained[1].actor(), 4);
        assert!(log.is_empty());
    }

    #[test]
    fn unlimited_log_keeps_everything() {
        let mut log = ActionLog::new(0);
        for i in 0..500 {
            log.push(moved(i));
        }
        assert_eq!(log.len(), 500);
        assert_eq!(log.iter().next().map(Action::actor), Some(0));
    }

    #[test]
    fn result_display() {
        assert_eq!(ActionResult::OutOfRange.to_string(), "out of range");
        assert!(ActionResult::Success.is_success());
        assert!(!ActionResult::Invalid.is_success());
    }
}
