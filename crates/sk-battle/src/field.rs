//! Battlefield regions, cover, and distance.
//!
//! Regions are kept sorted by position so that stepping "forward" or
//! "backward" is simply moving to the neighbouring index.

use serde::{Deserialize, Serialize};

/// How much cover a region offers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Cover {
    /// Open ground.
    #[default]
    None,
    /// Light cover (brush, low walls).
    Light,
    /// Medium cover.
    Medium,
    /// Heavy cover.
    Heavy,
    /// Full cover.
    Full,
}

impl Cover {
    /// Ordinal tier, 0 (none) to 4 (full).
    pub fn tier(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Light => 1,
            Self::Medium => 2,
            Self::Heavy => 3,
            Self::Full => 4,
        }
    }

    /// Cover for a tier, clamped to the valid range.
    pub fn from_tier(tier: i32) -> Self {
        match tier {
            i32::MIN..=0 => Self::None,
            1 => Self::Light,
            2 => Self::Medium,
            3 => Self::Heavy,
            _ => Self::Full,
        }
    }

    /// Penalty applied to ranged attacks against a target in this cover.
    pub fn penalty(self) -> i32 {
        -2 * self.tier()
    }
}

impl std::fmt::Display for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "no cover"),
            Self::Light => write!(f, "light cover"),
            Self::Medium => write!(f, "medium cover"),
            Self::Heavy => write!(f, "heavy cover"),
            Self::Full => write!(f, "full cover"),
        }
    }
}

/// A named zone on the battlefield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Display name.
    pub name: String,
    /// Position along the battlefield, in yards.
    pub yards: i32,
    /// Cover offered to anyone standing here.
    #[serde(default)]
    pub cover: Cover,
}

impl Region {
    /// Create a region.
    pub fn new(name: impl Into<String>, yards: i32, cover: Cover) -> Self {
        Self {
            name: name.into(),
            yards,
            cover,
        }
    }
}

/// An ordered list of regions.
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    /// Display name of the battlefield.
    pub name: String,
    regions: Vec<Region>,
}

impl Battlefield {
    /// Create an empty battlefield.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regions: Vec::new(),
        }
    }

    /// Insert a region, keeping regions sorted by position. Returns its index.
    pub fn add_region(&mut self, region: Region) -> usize {
        let index = self.regions.partition_point(|r| r.yards <= region.yards);
        self.regions.insert(index, region);
        index
    }

    /// All regions, nearest first.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by index.
    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the battlefield has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Distance in yards between two regions. Unknown regions count as position 0.
    pub fn distance(&self, a: usize, b: usize) -> u32 {
        let ya = self.region(a).map_or(0, |r| r.yards);
        let yb = self.region(b).map_or(0, |r| r.yards);
        ya.abs_diff(yb)
    }

    /// Cover of a region, or none if it does not exist.
    pub fn cover(&self, index: usize) -> Cover {
        self.region(index).map_or(Cover::None, |r| r.cover)
    }

    /// The region one step away in `direction` (+1 or -1), if it exists.
    pub fn step(&self, from: usize, direction: i32) -> Option<usize> {
        let to = from.checked_add_signed(direction as isize)?;
        (to < self.regions.len()).then_some(to)
    }
}

impl FromIterator<Region> for Battlefield {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut field = Battlefield::default();
        for region in iter {
            field.add_region(region);
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Battlefield {
        let mut field = Battlefield::new("Ford");
        field.add_region(Region::new("Far Bank", 40, Cover::Heavy));
        field.add_region(Region::new("Near Bank", 0, Cover::Light));
        field.add_region(Region::new("Shallows", 15, Cover::None));
        field
    }

    #[test]
    fn regions_sorted_on_insert() {
        let field = field();
        let names: Vec<_> = field.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Near Bank", "Shallows", "Far Bank"]);
    }

    #[test]
    fn distance_is_symmetric() {
        let field = field();
        assert_eq!(field.distance(0, 2), 40);
        assert_eq!(field.distance(2, 1), 25);
        assert_eq!(field.distance(1, 1), 0);
    }

    #[test]
    fn step_stays_in_bounds() {
        let field = field();
        assert_eq!(field.step(0, 1), Some(1));
        assert_eq!(field.step(0, -1), None);
        assert_eq!(field.step(2, 1), None);
        assert_eq!(field.step(2, -1), Some(1));
    }

    #[test]
    fn cover_tiers() {
        assert_eq!(Cover::Heavy.tier(), 3);
        assert_eq!(Cover::Medium.penalty(), -4);
        assert_eq!(Cover::from_tier(-2), Cover::None);
        assert_eq!(Cover::from_tier(9), Cover::Full);
        assert!(Cover::Light < Cover::Medium);
    }

    #[test]
    fn collect_from_iterator() {
        let field: Battlefield = vec![
            Region::new("B", 10, Cover::None),
            Region::new("A", 0, Cover::None),
        ]
        .into_iter()
        .collect();
        assert_eq!(field.region(0).unwrap().name, "A");
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn region_json() {
        let region: Region = serde_json::from_str(r#"{ "name": "Ridge", "yards": 30, "cover": "medium" }"#).unwrap();
        assert_eq!(region.cover, Cover::Medium);
        let region: Region = serde_json::from_str(r#"{ "name": "Field", "yards": 0 }"#).unwrap();
        assert_eq!(region.cover, Cover::None);
    }
}
