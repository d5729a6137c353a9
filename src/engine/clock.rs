//! Per-turn countdown clock.
//!
//! One clock exists per match. Every turn restarts it at the full budget;
//! the engine schedules the 1-second ticks and feeds them in. Expiry is
//! reported exactly once, after which the clock is stopped until the next
//! turn starts it again.

use serde::{Deserialize, Serialize};

use crate::core::{Side, TURN_SECONDS};

/// Outcome of one clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// Time remains; carries the new remaining seconds.
    Running(u32),
    /// The clock just hit zero. Reported once; the clock is now stopped.
    Expired,
}

/// Countdown for the active side's turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnClock {
    remaining_seconds: u32,
    active_side: Side,
    running: bool,
}

impl TurnClock {
    /// A stopped clock. `start` arms it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            remaining_seconds: TURN_SECONDS,
            active_side: Side::Left,
            running: false,
        }
    }

    /// Arm the clock for `side` with the full turn budget.
    pub fn start(&mut self, side: Side) {
        self.remaining_seconds = TURN_SECONDS;
        self.active_side = side;
        self.running = true;
    }

    /// Advance one second. Returns `None` when the clock is stopped, so a
    /// stale tick that outlived its turn is a no-op.
    pub fn tick(&mut self) -> Option<TickResult> {
        if !self.running {
            return None;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
            Some(TickResult::Expired)
        } else {
            Some(TickResult::Running(self.remaining_seconds))
        }
    }

    /// Stop without expiring. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Seconds left on the clock.
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// The side this clock is (or was last) counting down for.
    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active_side
    }

    /// Whether the clock is counting.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new()
    }
}
