//! The battle resolver: combatants, regions, turn order, and the action log.
//!
//! Every command runs to completion before returning. The random stream is
//! owned by the caller and passed into each operation, so a fixed seed and a
//! fixed sequence of commands always reproduce the same battle.

pub mod ai;
pub mod attack;
pub mod cast;
#[cfg(test)]
mod fixtures;
pub mod movement;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::action::{Action, ActionLog};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::error::{BattleError, BattleResult};
use crate::field::{Battlefield, Cover, Region};
use crate::power::ModKind;

/// Index of the player-controlled combatant.
pub const PLAYER: usize = 0;

/// Target number for Spirit rolls to recover from being shaken.
pub const RECOVERY_TN: i32 = 4;

/// Where a battle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Combatants are being added; turns have not begun.
    Setup,
    /// Turns are running.
    Active {
        /// Position in the turn order.
        turn: usize,
    },
    /// Every opponent is dead.
    Victory,
    /// The player is dead.
    Defeat,
}

/// An ongoing battle.
#[derive(Debug, Clone)]
pub struct Battle {
    field: Battlefield,
    combatants: Vec<Combatant>,
    order: Vec<usize>,
    turn: usize,
    started: bool,
    log: ActionLog,
    config: BattleConfig,
}

impl Battle {
    /// Create a battle on a battlefield with at least one region.
    pub fn new(field: Battlefield, config: BattleConfig) -> BattleResult<Self> {
        if field.is_empty() {
            return Err(BattleError::NoRegions(field.name.clone()));
        }
        Ok(Self {
            field,
            combatants: Vec::new(),
            order: Vec::new(),
            turn: 0,
            started: false,
            log: ActionLog::new(config.max_actions),
            config,
        })
    }

    /// Add a combatant and return its index.
    ///
    /// The first combatant is the player and must be on team 0; everyone
    /// after must be on team 1 or higher.
    pub fn add_combatant(&mut self, combatant: Combatant) -> BattleResult<usize> {
        let index = self.combatants.len();
        if (index == PLAYER) != (combatant.team == 0) {
            return Err(BattleError::InvalidTeam {
                name: combatant.name,
                index,
                team: combatant.team,
            });
        }
        if combatant.region >= self.field.len() {
            return Err(BattleError::InvalidRegion {
                name: combatant.name,
                region: combatant.region,
                available: self.field.len(),
            });
        }
        self.combatants.push(combatant);
        Ok(index)
    }

    /// Battlefield name.
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// The configuration this battle was built with.
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// All combatants, dead ones included.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Look up a combatant by index.
    pub fn combatant(&self, index: usize) -> Option<&Combatant> {
        self.combatants.get(index)
    }

    /// Mutable access to a combatant, for callers that script the scene.
    pub fn combatant_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.combatants.get_mut(index)
    }

    /// The battlefield.
    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    /// All regions, nearest first.
    pub fn regions(&self) -> &[Region] {
        self.field.regions()
    }

    /// Combatant indices in turn order. Empty until [`Battle::start`].
    pub fn turn_order(&self) -> &[usize] {
        &self.order
    }

    /// Position of the current turn within the turn order.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Index of the combatant whose turn it is.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.turn).copied()
    }

    /// Returns true if it is the player's turn.
    pub fn is_player_turn(&self) -> bool {
        self.current() == Some(PLAYER)
    }

    /// Pending actions, not yet drained.
    pub fn actions(&self) -> &ActionLog {
        &self.log
    }

    /// Take every pending action, oldest first.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        self.log.drain()
    }

    /// Distance in yards between two combatants.
    pub fn distance(&self, a: usize, b: usize) -> u32 {
        match (self.combatants.get(a), self.combatants.get(b)) {
            (Some(a), Some(b)) => self.field.distance(a.region, b.region),
            _ => 0,
        }
    }

    /// Cover protecting a combatant: its region's cover plus any granted cover.
    pub fn cover_of(&self, index: usize) -> Cover {
        let Some(c) = self.combatants.get(index) else {
            return Cover::None;
        };
        let (granted, _) = c.mods(ModKind::Cover);
        Cover::from_tier(self.field.cover(c.region).tier() + granted)
    }

    /// Number of distinct powers `caster` is currently maintaining.
    pub fn count_maintained_powers(&self, caster: usize) -> usize {
        self.combatants
            .iter()
            .flat_map(|c| &c.active)
            .filter(|ap| ap.caster == caster)
            .map(|ap| ap.power.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every opponent of the player is dead.
    pub fn victory(&self) -> bool {
        self.combatants.len() > 1
            && self
                .combatants
                .iter()
                .skip(1)
                .all(Combatant::is_dead)
    }

    /// The player is dead.
    pub fn defeat(&self) -> bool {
        self.combatants.first().is_some_and(Combatant::is_dead)
    }

    /// The battle has been decided.
    pub fn done(&self) -> bool {
        self.victory() || self.defeat()
    }

    /// Where the battle stands.
    pub fn phase(&self) -> Phase {
        if self.defeat() {
            Phase::Defeat
        } else if self.victory() {
            Phase::Victory
        } else if self.started {
            Phase::Active { turn: self.turn }
        } else {
            Phase::Setup
        }
    }

    /// Seed the turn order and begin the first turn.
    ///
    /// The order is shuffled if configured and then stays fixed for the
    /// rest of the battle. Calling this again has no effect.
    pub fn start(&mut self, rng: &mut StdRng) {
        if self.started {
            return;
        }
        self.started = true;
        self.order = (0..self.combatants.len()).collect();
        if self.config.shuffle_turn_order {
            self.order.shuffle(rng);
        }
        self.turn = 0;
        info!(
            battle = %self.field.name,
            combatants = self.combatants.len(),
            order = ?self.order,
            "battle started"
        );
        if let Some(first) = self.current() {
            self.begin_turn(first, rng);
        }
    }

    /// End the current turn and begin the next one in order.
    pub fn advance(&mut self, rng: &mut StdRng) {
        if !self.started || self.order.is_empty() {
            return;
        }
        if let Some(current) = self.current() {
            self.combatants[current].end_turn();
        }
        self.turn = (self.turn + 1) % self.order.len();
        if let Some(next) = self.current() {
            self.begin_turn(next, rng);
        }
        if self.done() {
            info!(victory = self.victory(), defeat = self.defeat(), "battle decided");
        }
    }

    fn begin_turn(&mut self, index: usize, rng: &mut StdRng) {
        self.combatants[index].start_turn();
        self.recover(index, rng);
        self.purge_dead_casters();
        debug!(combatant = index, "turn begins");
    }

    /// A shaken combatant rolls Spirit once as its turn begins.
    fn recover(&mut self, index: usize, rng: &mut StdRng) {
        let c = &mut self.combatants[index];
        if !c.shaken || c.is_dead() {
            return;
        }
        let roll = c.attributes.spirit.roll(c.wild, rng);
        let recovered = roll.succeeds(RECOVERY_TN);
        let free_to_act = recovered && roll.raises(RECOVERY_TN) > 0;
        if recovered {
            c.shaken = false;
            if !free_to_act {
                c.flags.acted = true;
            }
        }
        debug!(
            combatant = index,
            roll = roll.value(),
            recovered,
            free_to_act,
            "shaken recovery"
        );
        self.log.push(Action::Recover {
            combatant: index,
            roll,
            recovered,
            free_to_act,
        });
    }

    /// Drop every standing power sustained by a dead combatant.
    fn purge_dead_casters(&mut self) {
        let dead: Vec<usize> = (0..self.combatants.len())
            .filter(|&i| self.combatants[i].is_dead())
            .collect();
        for index in dead {
            self.purge_powers_of(index);
        }
    }

    /// Clear a dead combatant's own standing powers and every power it maintains.
    fn purge_powers_of(&mut self, index: usize) {
        let mut removed = 0;
        if let Some(c) = self.combatants.get_mut(index) {
            removed += c.active.len();
            c.active.clear();
        }
        for c in &mut self.combatants {
            removed += c.drop_powers_from(index);
        }
        if removed > 0 {
            debug!(combatant = index, removed, "purged active powers");
        }
    }
}
