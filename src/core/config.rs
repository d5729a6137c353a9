//! Match configuration types.
//!
//! A match is configured once at start: the mode picks the step threshold,
//! the operand range bounds question difficulty, and the seed makes the
//! whole match reproducible. Timing constants live here too so the engine,
//! the scheduler, and the tests agree on them.

use serde::{Deserialize, Serialize};

/// Seconds each side has to answer its question.
pub const TURN_SECONDS: u32 = 10;

/// Pause between resolving one turn and starting the next, during which the
/// board animates and fresh questions are shown.
pub const TRANSITION_MS: u64 = 400;

/// Largest answer magnitude the generator will accept.
pub const MAX_ANSWER_MAGNITUDE: i64 = 999;

/// Game mode. Selects how many steps a side needs to win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Short match to 3 steps.
    Blitz,
    /// Standard match to 5 steps.
    Classic,
}

impl GameMode {
    /// Steps a side must accumulate to win in this mode.
    #[must_use]
    pub const fn total_steps(self) -> u32 {
        match self {
            GameMode::Blitz => 3,
            GameMode::Classic => 5,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Blitz => write!(f, "Blitz"),
            GameMode::Classic => write!(f, "Classic"),
        }
    }
}

/// Full configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Mode, which fixes the winning step count.
    pub mode: GameMode,

    /// Smallest operand the generator may draw.
    pub range_min: i64,

    /// Largest operand the generator may draw.
    pub range_max: i64,

    /// Seed for all match randomness.
    pub seed: u64,
}

impl MatchConfig {
    /// Create a configuration for the given mode and operand range.
    pub fn new(mode: GameMode, range_min: i64, range_max: i64) -> Self {
        Self {
            mode,
            range_min,
            range_max,
            seed: 42,
        }
    }

    /// Override the seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(GameMode::Classic, 1, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_steps() {
        assert_eq!(GameMode::Blitz.total_steps(), 3);
        assert_eq!(GameMode::Classic.total_steps(), 5);
    }

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.mode, GameMode::Classic);
        assert_eq!(config.range_min, 1);
        assert_eq!(config.range_max, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::new(GameMode::Blitz, 1, 20).with_seed(123);
        assert_eq!(config.seed, 123);
        assert_eq!(config.mode.total_steps(), 3);
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
