//! Match state: step counters, phase, and turn ownership.
//!
//! `MatchState` is owned exclusively by the engine and mutated only through
//! the transition methods here, which maintain the invariants:
//!
//! - `0 ≤ left_steps, right_steps ≤ total_steps`
//! - the phase moves `Idle → InProgress → GameOver`, and `GameOver` is
//!   terminal: no counter changes after it
//! - the winner check is left-first (only one counter moves per event, so
//!   both reaching the threshold simultaneously is impossible)

use serde::{Deserialize, Serialize};

use crate::core::{Side, SidePair};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No match running (home screen).
    Idle,
    /// A match is being played.
    InProgress,
    /// A side has won. Terminal.
    GameOver,
}

/// The mutable record of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    phase: Phase,
    steps: SidePair<u32>,
    total_steps: u32,
    current_turn: Side,
    is_transitioning: bool,
}

impl MatchState {
    /// An idle state with nothing played yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            steps: SidePair::with_value(0),
            total_steps: 5,
            current_turn: Side::Left,
            is_transitioning: false,
        }
    }

    /// Start a fresh match to `total_steps`. Zeroes both counters, clears
    /// flags, and gives Left the first turn.
    pub fn begin(&mut self, total_steps: u32) {
        assert!(total_steps > 0, "a match must need at least one step");
        self.phase = Phase::InProgress;
        self.steps = SidePair::with_value(0);
        self.total_steps = total_steps;
        self.current_turn = Side::Left;
        self.is_transitioning = false;
    }

    /// Abandon the match and return to idle.
    pub fn abandon(&mut self) {
        self.phase = Phase::Idle;
        self.is_transitioning = false;
    }

    /// Award one step to `side`, clamped at the threshold. Refused (returns
    /// false) once the match is over.
    pub fn award_step(&mut self, side: Side) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        self.steps[side] = (self.steps[side] + 1).min(self.total_steps);
        true
    }

    /// The winner, if a counter has reached the threshold. Checked
    /// left-first.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if self.steps[Side::Left] >= self.total_steps {
            Some(Side::Left)
        } else if self.steps[Side::Right] >= self.total_steps {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Enter the terminal phase. Counters freeze from here on.
    pub fn finish(&mut self) {
        self.phase = Phase::GameOver;
        self.is_transitioning = false;
    }

    /// Whether `side` may submit an answer right now.
    #[must_use]
    pub fn can_submit(&self, side: Side) -> bool {
        self.phase == Phase::InProgress && !self.is_transitioning && self.current_turn == side
    }

    pub fn set_current_turn(&mut self, side: Side) {
        self.current_turn = side;
    }

    pub fn set_transitioning(&mut self, value: bool) {
        self.is_transitioning = value;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    #[must_use]
    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    #[must_use]
    pub fn steps(&self, side: Side) -> u32 {
        self.steps[side]
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
