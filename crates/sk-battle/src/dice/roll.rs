//! Rolling exploding dice.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::Die;

/// Maximum consecutive aces on one die before its top face stops exploding.
pub const MAX_ACES: u32 = 4;

/// Faces on the companion wild die.
pub const WILD_DIE_SIDES: u32 = 6;

/// One die rolled until it stops acing.
#[derive(Debug, Clone, Copy)]
struct Ace {
    total: i32,
    aces: u32,
}

impl Ace {
    /// Minimum face, no explosions.
    fn is_snake_eye(&self) -> bool {
        self.aces == 0 && self.total == 1
    }
}

fn ace(sides: u32, rng: &mut StdRng) -> Ace {
    let mut total = 0;
    let mut aces = 0;
    loop {
        let face = rng.random_range(1..=sides);
        total += face as i32;
        if face == sides && aces < MAX_ACES {
            aces += 1;
        } else {
            return Ace { total, aces };
        }
    }
}

/// The result of rolling a die with an optional wild die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// The die that was rolled.
    pub die: Die,
    /// Total of the primary die including its bonus.
    pub total: i32,
    /// Total of the wild die including the shared bonus, if one was rolled.
    pub wild: Option<i32>,
    /// Number of aces across every component.
    pub aces: u32,
    /// Every component showed its minimum face without exploding.
    pub critical_failure: bool,
}

impl Roll {
    /// Roll `die`, adding a `1d6` wild die sharing its bonus if `use_wild_die`.
    ///
    /// An absent die rolls only its bonus, without a wild die.
    pub fn new(die: Die, use_wild_die: bool, rng: &mut StdRng) -> Self {
        let mut components = Vec::new();
        if !die.is_none() {
            for _ in 0..die.count {
                components.push(ace(die.sides, rng));
            }
        }
        let total = components.iter().map(|a| a.total).sum::<i32>() + die.bonus;

        let wild = (use_wild_die && !die.is_none()).then(|| {
            let wild = ace(WILD_DIE_SIDES, rng);
            components.push(wild);
            wild.total + die.bonus
        });

        let critical_failure =
            !components.is_empty() && components.iter().all(|a| a.is_snake_eye());
        let aces = components.iter().map(|a| a.aces).sum();

        Self {
            die,
            total,
            wild,
            aces,
            critical_failure,
        }
    }

    /// The better of the primary and wild totals.
    pub fn value(&self) -> i32 {
        match self.wild {
            Some(wild) => wild.max(self.total),
            None => self.total,
        }
    }

    /// Returns true if the roll meets `target` and is not a critical failure.
    pub fn succeeds(&self, target: i32) -> bool {
        !self.critical_failure && self.value() >= target
    }

    /// Raises over `target`: every full 4 points beyond it. Zero on a miss.
    pub fn raises(&self, target: i32) -> u32 {
        if self.succeeds(target) {
            ((self.value() - target) / 4) as u32
        } else {
            0
        }
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.wild {
            Some(wild) => write!(f, "{} ({} / wild {})", self.value(), self.total, wild),
            None => write!(f, "{}", self.total),
        }
    }
}

impl Die {
    /// Roll this die, optionally alongside a wild die.
    pub fn roll(self, use_wild_die: bool, rng: &mut StdRng) -> Roll {
        Roll::new(self, use_wild_die, rng)
    }
}
