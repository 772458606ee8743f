//! Configuration for a battle.

use serde::{Deserialize, Serialize};

/// Configuration for a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed callers use to build the injected random stream.
    pub seed: u64,
    /// Shuffle the initial turn order. The order stays fixed afterwards.
    pub shuffle_turn_order: bool,
    /// Action log capacity (oldest entries dropped when exceeded). 0 = unlimited.
    pub max_actions: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle_turn_order: true,
            max_actions: 64,
        }
    }
}

impl BattleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the initial turn order shuffle.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_turn_order = shuffle;
        self
    }

    /// Set the action log capacity (0 = unlimited).
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = BattleConfig::default();
        assert_eq!(cfg.seed, 42);
        assert!(cfg.shuffle_turn_order);
        assert_eq!(cfg.max_actions, 64);
    }

    #[test]
    fn builder_methods() {
        let cfg = BattleConfig::default()
            .with_seed(7)
            .with_shuffle(false)
            .with_max_actions(0);
        assert_eq!(cfg.seed, 7);
        assert!(!cfg.shuffle_turn_order);
        assert_eq!(cfg.max_actions, 0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: BattleConfig = serde_json::from_str(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(cfg.seed, 9);
        assert!(cfg.shuffle_turn_order);
        assert_eq!(cfg.max_actions, 64);
    }
}
