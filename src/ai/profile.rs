//! AI difficulty profiles.
//!
//! A profile is an immutable record of how the simulated opponent behaves:
//! how often it answers correctly and how long it "thinks" before
//! submitting. Profiles are selected by name through a registry; the three
//! built-in tiers match the original game, and embedders may register
//! custom ones.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::MatchError;

/// Built-in difficulty tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// The registry key for this tier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Behavioral configuration for the simulated opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Probability the AI targets the correct answer, in `[0, 1]`.
    pub accuracy: f64,

    /// Earliest submission delay after the turn starts.
    pub min_delay_ms: u64,

    /// Latest submission delay after the turn starts.
    pub max_delay_ms: u64,
}

impl AiProfile {
    /// Create a profile, clamping accuracy into `[0, 1]`.
    ///
    /// Panics if the delay bounds are inverted.
    pub fn new(accuracy: f64, min_delay_ms: u64, max_delay_ms: u64) -> Self {
        assert!(
            min_delay_ms <= max_delay_ms,
            "delay bounds inverted: {min_delay_ms} > {max_delay_ms}"
        );
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
            min_delay_ms,
            max_delay_ms,
        }
    }

    /// The built-in profile for a tier.
    #[must_use]
    pub fn for_tier(tier: Difficulty) -> Self {
        match tier {
            Difficulty::Easy => Self::new(0.4, 1000, 1500),
            Difficulty::Normal => Self::new(0.7, 800, 1300),
            Difficulty::Hard => Self::new(0.95, 600, 1000),
        }
    }
}

/// Named profile lookup.
///
/// Starts populated with the built-in tiers. Registration replaces any
/// existing profile under the same name.
#[derive(Clone, Debug)]
pub struct ProfileRegistry {
    profiles: FxHashMap<String, AiProfile>,
}

impl ProfileRegistry {
    /// Create a registry with the built-in tiers.
    #[must_use]
    pub fn new() -> Self {
        let mut profiles = FxHashMap::default();
        for tier in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            profiles.insert(tier.name().to_string(), AiProfile::for_tier(tier));
        }
        Self { profiles }
    }

    /// Register (or replace) a profile under a name.
    pub fn register(&mut self, name: impl Into<String>, profile: AiProfile) {
        self.profiles.insert(name.into(), profile);
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Result<&AiProfile, MatchError> {
        self.profiles
            .get(name)
            .ok_or_else(|| MatchError::UnknownDifficulty(name.to_string()))
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
