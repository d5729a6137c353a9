//! Match events.
//!
//! Events are the engine's only output channel: the presentation adapter
//! drains them after every call into the engine and renders accordingly
//! (counters, messages, countdown display, audio cues). The engine never
//! calls back into the adapter.
//!
//! Events also accumulate in an append-only history on the engine, which
//! tests use to assert exact deterministic traces.

use serde::{Deserialize, Serialize};

use super::config::GameMode;
use super::side::Side;
use crate::question::Question;

/// Something observable happened in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A match was (re)started. Counters are zero, Left moves first.
    Reset { mode: GameMode, total_steps: u32 },

    /// Fresh questions were generated, one per side. Only the active
    /// side's question is answerable.
    QuestionsChanged { left: Question, right: Question },

    /// A step counter changed. Carries both so the adapter can render the
    /// board position in one pass.
    StepsChanged { left: u32, right: u32 },

    /// A side's turn began with a full clock.
    TurnStarted { side: Side, remaining_seconds: u32 },

    /// One second elapsed on the active side's clock.
    Tick { side: Side, remaining_seconds: u32 },

    /// The active side submitted an answer.
    Outcome { side: Side, correct: bool },

    /// The active side's clock expired.
    Timeout { side: Side },

    /// A side reached the step threshold. Emitted exactly once per match.
    Win { side: Side },

    /// A side's input buffer changed (digit entry, clear, or AI typing).
    InputChanged { side: Side, value: String },
}

impl MatchEvent {
    /// The side this event concerns, if it concerns exactly one.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            MatchEvent::TurnStarted { side, .. }
            | MatchEvent::Tick { side, .. }
            | MatchEvent::Outcome { side, .. }
            | MatchEvent::Timeout { side }
            | MatchEvent::Win { side }
            | MatchEvent::InputChanged { side, .. } => Some(*side),
            _ => None,
        }
    }

    /// True for events that end a turn (an outcome or a timeout).
    #[must_use]
    pub fn resolves_turn(&self) -> bool {
        matches!(
            self,
            MatchEvent::Outcome { .. } | MatchEvent::Timeout { .. }
        )
    }
}
