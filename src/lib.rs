//! # math-tug
//!
//! A deterministic engine for a two-player arithmetic "tug-of-war" match:
//! each side answers generated arithmetic questions under a 10-second turn
//! clock; correct and wrong answers and timeouts shift per-side step
//! counters until one side reaches the threshold and wins. The right side
//! can be played by a simulated opponent with configurable accuracy and
//! typing/submission delays.
//!
//! ## Design Principles
//!
//! 1. **Presentation-free**: rendering, audio, and input widgets live in an
//!    embedding adapter. The engine consumes operations and emits
//!    [`MatchEvent`]s; it never calls out.
//!
//! 2. **Deterministic**: all randomness flows through a seeded, forkable
//!    RNG with independent context streams; all timing flows through a
//!    virtual-time scheduler driven by `advance(ms)`. Same seed, same
//!    calls, same events.
//!
//! 3. **Epoch-cancelled timers**: turn resolution and resets bump a
//!    scheduler epoch that invalidates every outstanding timer, so stale
//!    callbacks from a finished turn can never touch a later one.
//!
//! ## Modules
//!
//! - `core`: sides, RNG, configuration, events, errors
//! - `question`: expression form, evaluator, and random generator
//! - `engine`: match state, turn clock, scheduler, and the engine itself
//! - `ai`: difficulty profiles, answer decisions, typing simulation

pub mod ai;
pub mod core;
pub mod engine;
pub mod question;

// Re-export commonly used types
pub use crate::core::{
    GameMode, MatchConfig, MatchError, MatchEvent, MatchRng, Side, SidePair, MAX_ANSWER_MAGNITUDE,
    TRANSITION_MS, TURN_SECONDS,
};

pub use crate::question::{generate, EvalError, Expr, Op, Question};

pub use crate::engine::{MatchEngine, MatchState, Phase, Scheduler, Task, TickResult, TurnClock};

pub use crate::ai::{
    decide_answer, AiProfile, Difficulty, PendingAnswer, ProfileRegistry, TYPE_INTERVAL_MAX_MS,
    TYPE_INTERVAL_MIN_MS, TYPING_LEAD_MS,
};
