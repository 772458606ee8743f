//! Closed-form success probabilities for a single exploding die.

use super::Die;

/// Probability that a single exploding `die` meets or beats `target`.
///
/// Only the die size and bonus matter; `count` is treated as one. A natural
/// 1 always fails, so the effective target never drops below 2. The
/// explosion cap is ignored. With no die the roll is the bare bonus.
pub fn chance(target: i32, die: Die) -> f64 {
    if die.is_none() {
        return if die.bonus >= target { 1.0 } else { 0.0 };
    }
    let sides = die.sides as i32;
    let adjusted = (target - die.bonus).max(2);
    let explosions = (adjusted - 1) / sides;
    let remainder = adjusted - explosions * sides;
    let per_face = 1.0 / sides as f64;
    per_face.powi(explosions) * (1.0 - (remainder - 1) as f64 * per_face)
}

/// Probability that either `die` or a companion wild die meets `target`.
///
/// No wild die is rolled alongside an absent die.
pub fn wild_chance(target: i32, die: Die) -> f64 {
    if die.is_none() {
        return chance(target, die);
    }
    let a = chance(target, die);
    let b = chance(target, Die::wild(die.bonus));
    1.0 - (1.0 - a) * (1.0 - b)
}
