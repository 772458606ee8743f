//! Exploding dice, rolls, and closed-form success probabilities.
//!
//! A [`Die`] is an `NdS+B` expression. Every die "aces": rolling its maximum
//! face adds the face and rolls again, up to [`roll::MAX_ACES`] times. A
//! [`Roll`] optionally carries a companion wild die (`1d6` sharing the
//! primary bonus) and keeps the better of the two.

pub mod chance;
pub mod roll;

pub use chance::{chance, wild_chance};
pub use roll::{MAX_ACES, Roll, WILD_DIE_SIDES};

use serde::{Deserialize, Serialize};

use crate::error::BattleError;

/// An exploding die expression: `count` dice of `sides` faces plus a flat `bonus`.
///
/// A die with zero sides (or zero count) is "no die".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Die {
    /// Number of dice rolled and summed.
    pub count: u32,
    /// Faces per die.
    pub sides: u32,
    /// Flat bonus (or penalty) added to the total.
    pub bonus: i32,
}

impl Die {
    /// The absent die.
    pub const NONE: Die = Die {
        count: 0,
        sides: 0,
        bonus: 0,
    };

    /// Create a die expression.
    pub const fn new(count: u32, sides: u32, bonus: i32) -> Self {
        Self {
            count,
            sides,
            bonus,
        }
    }

    /// A single die of the given size with no bonus.
    pub const fn d(sides: u32) -> Self {
        Self::new(1, sides, 0)
    }

    /// The companion wild die for a roll with the given bonus.
    pub const fn wild(bonus: i32) -> Self {
        Self::new(1, WILD_DIE_SIDES, bonus)
    }

    /// Returns true if this is "no die".
    pub fn is_none(&self) -> bool {
        self.sides == 0 || self.count == 0
    }

    /// The same die with `delta` added to its bonus.
    pub fn with_bonus(self, delta: i32) -> Self {
        Self {
            bonus: self.bonus + delta,
            ..self
        }
    }

    /// Trait rating: die size plus bonus (d8 = 8, d12+2 = 14, d4-2 = 2).
    ///
    /// An absent die rates 0.
    pub fn rating(&self) -> i32 {
        if self.is_none() {
            0
        } else {
            self.sides as i32 + self.bonus
        }
    }

    /// Convert a small-integer trait rating into a single die.
    ///
    /// Ratings below 4 become a d4 with a penalty, ratings above 12 a d12
    /// with a bonus, anything else the nearest even die size (odd ratings
    /// round up).
    pub fn from_rating(rating: i32) -> Self {
        if rating < 4 {
            Self::new(1, 4, rating - 4)
        } else if rating > 12 {
            Self::new(1, 12, rating - 12)
        } else {
            let sides = (rating + 1) / 2 * 2;
            Self::d(sides as u32)
        }
    }

    /// Parse a die expression like "d8", "2d6", "2d6+1", "d4-2" or "none".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() || s == "none" || s == "-" {
            return Some(Self::NONE);
        }
        let (count, rest) = s.split_once('d')?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().ok()?
        };
        let (sides, bonus) = match rest.find(['+', '-']) {
            Some(pos) => {
                let (sides, bonus) = rest.split_at(pos);
                let bonus = bonus.strip_prefix('+').unwrap_or(bonus);
                (sides.parse::<u32>().ok()?, bonus.parse::<i32>().ok()?)
            }
            None => (rest.parse::<u32>().ok()?, 0),
        };
        if sides == 0 {
            return None;
        }
        Some(Self::new(count, sides, bonus))
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        if self.count != 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "d{}", self.sides)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

impl TryFrom<String> for Die {
    type Error = BattleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(BattleError::InvalidDie(value))
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.to_string()
    }
}
