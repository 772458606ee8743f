//! Roll modifiers and stacking rules for standing powers.

use serde::{Deserialize, Serialize};

use super::{ActivePower, PowerEffect};

/// What a modifier adjusts.
///
/// The first five kinds can be granted by powers; the rest only arise from
/// the situation around a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModKind {
    /// The holder's melee attack rolls.
    Melee,
    /// The holder's ranged attack rolls.
    Ranged,
    /// Attacks made against the holder (positive makes the holder harder to hit).
    Combat,
    /// The holder's toughness against damage.
    Toughness,
    /// Extra cover tiers for the holder.
    Cover,
    /// Melee bonus for outnumbering the defender.
    GangUp,
    /// Bonus for an armed attacker against an unarmed defender.
    Unarmed,
    /// Ranged penalty for distance.
    Range,
}

impl ModKind {
    /// Returns true if a power can grant a standing modifier of this kind.
    pub fn is_standing(self) -> bool {
        matches!(
            self,
            Self::Melee | Self::Ranged | Self::Combat | Self::Toughness | Self::Cover
        )
    }
}

impl std::fmt::Display for ModKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Melee => write!(f, "melee"),
            Self::Ranged => write!(f, "ranged"),
            Self::Combat => write!(f, "defence"),
            Self::Toughness => write!(f, "toughness"),
            Self::Cover => write!(f, "cover"),
            Self::GangUp => write!(f, "gang-up"),
            Self::Unarmed => write!(f, "unarmed defender"),
            Self::Range => write!(f, "range"),
        }
    }
}

/// Why a roll was adjusted. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModInfo {
    /// What was adjusted.
    pub kind: ModKind,
    /// Signed adjustment.
    pub delta: i32,
    /// Combatant who cast the originating power, if any.
    pub caster: Option<usize>,
    /// Name of the originating power, if any.
    pub power: Option<String>,
}

impl ModInfo {
    /// A modifier arising from the situation rather than a power.
    pub fn situational(kind: ModKind, delta: i32) -> Self {
        Self {
            kind,
            delta,
            caster: None,
            power: None,
        }
    }

    /// A modifier granted by an active power.
    pub fn from_power(kind: ModKind, active: &ActivePower) -> Self {
        Self {
            kind,
            delta: active.power.magnitude,
            caster: Some(active.caster),
            power: Some(active.power.name.clone()),
        }
    }

    /// The same modifier with its sign flipped (a defender's bonus seen from the attacker).
    pub fn negated(self) -> Self {
        Self {
            delta: -self.delta,
            ..self
        }
    }
}

impl std::fmt::Display for ModInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+} {}", self.delta, self.kind)?;
        if let Some(ref power) = self.power {
            write!(f, " ({power})")?;
        }
        Ok(())
    }
}

/// Total a modifier kind across standing powers.
///
/// Buffs and debuffs do not stack: only the single largest bonus and the
/// single largest penalty of the requested kind apply. Bolts and heals never
/// contribute.
pub fn apply_mods(kind: ModKind, active: &[ActivePower]) -> (i32, Vec<ModInfo>) {
    let mut best: Option<&ActivePower> = None;
    let mut worst: Option<&ActivePower> = None;

    for ap in active {
        if ap.power.effect != PowerEffect::Modifier(kind) {
            continue;
        }
        let delta = ap.power.magnitude;
        if delta > 0 && best.is_none_or(|b| delta > b.power.magnitude) {
            best = Some(ap);
        } else if delta < 0 && worst.is_none_or(|w| delta < w.power.magnitude) {
            worst = Some(ap);
        }
    }

    let applied: Vec<ModInfo> = best
        .into_iter()
        .chain(worst)
        .map(|ap| ModInfo::from_power(kind, ap))
        .collect();
    let total = applied.iter().map(|m| m.delta).sum();
    (total, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::Power;

    fn active(caster: usize, name: &str, kind: ModKind, magnitude: i32) -> ActivePower {
        ActivePower {
            caster,
            power: Power::modifier(name, kind, magnitude),
        }
    }

    #[test]
    fn only_largest_buff_applies() {
        let powers = vec![
            active(1, "Bless", ModKind::Melee, 1),
            active(2, "Fury", ModKind::Melee, 2),
            active(3, "Blessing", ModKind::Melee, 1),
        ];
        let (total, applied) = apply_mods(ModKind::Melee, &powers);
        assert_eq!(total, 2);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].power.as_deref(), Some("Fury"));
        assert_eq!(applied[0].caster, Some(2));
    }

    #[test]
    fn buff_and_debuff_combine() {
        let powers = vec![
            active(1, "Fury", ModKind::Melee, 2),
            active(2, "Hex", ModKind::Melee, -1),
            active(3, "Curse", ModKind::Melee, -2),
        ];
        let (total, applied) = apply_mods(ModKind::Melee, &powers);
        assert_eq!(total, 0);
        assert_eq!(applied.len(), 2);
    }

    #[test]
    fn strongest_buff_plus_strongest_debuff() {
        let powers = vec![
            active(1, "Bless", ModKind::Ranged, 1),
            active(2, "Hex", ModKind::Ranged, -1),
            active(3, "Eagle Eye", ModKind::Ranged, 3),
            active(4, "Blind", ModKind::Ranged, -2),
            active(5, "Aim", ModKind::Ranged, 2),
        ];
        let (total, applied) = apply_mods(ModKind::Ranged, &powers);
        // +3 and -2 apply; neither side stacks and one does not cancel the other.
        assert_eq!(total, 1);
        let names: Vec<_> = applied.iter().filter_map(|m| m.power.as_deref()).collect();
        assert_eq!(names, ["Eagle Eye", "Blind"]);

        // Only debuffs: the worst one alone.
        let (total, applied) = apply_mods(ModKind::Ranged, &powers[1..2]);
        assert_eq!(total, -1);
        assert_eq!(applied.len(), 1);

        // A tie keeps the earlier cast.
        let tied = vec![
            active(1, "Fury", ModKind::Melee, 2),
            active(2, "Rage", ModKind::Melee, 2),
        ];
        let (total, applied) = apply_mods(ModKind::Melee, &tied);
        assert_eq!(total, 2);
        assert_eq!(applied[0].caster, Some(1));
    }

    #[test]
    fn other_kinds_ignored() {
        let mut powers = vec![active(1, "Deflect", ModKind::Combat, 2)];
        powers.push(ActivePower {
            caster: 1,
            power: Power::bolt("Bolt", crate::dice::Die::new(2, 6, 0)),
        });
        let (total, applied) = apply_mods(ModKind::Ranged, &powers);
        assert_eq!(total, 0);
        assert!(applied.is_empty());
    }

    #[test]
    fn standing_kinds() {
        assert!(ModKind::Cover.is_standing());
        assert!(ModKind::Toughness.is_standing());
        assert!(!ModKind::GangUp.is_standing());
        assert!(!ModKind::Range.is_standing());
    }

    #[test]
    fn display() {
        let info = ModInfo::situational(ModKind::GangUp, 2);
        assert_eq!(info.to_string(), "+2 gang-up");
        let info = ModInfo::from_power(ModKind::Combat, &active(0, "Deflect", ModKind::Combat, 2));
        assert_eq!(info.negated().to_string(), "-2 defence (Deflect)");
    }
}
