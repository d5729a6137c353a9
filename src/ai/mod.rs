//! Simulated opponent: difficulty profiles, answer decisions, typing state.

pub mod opponent;
pub mod profile;

pub use opponent::{
    decide_answer, PendingAnswer, TYPE_INTERVAL_MAX_MS, TYPE_INTERVAL_MIN_MS, TYPING_LEAD_MS,
};
pub use profile::{AiProfile, Difficulty, ProfileRegistry};
