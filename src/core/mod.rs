//! Core types: sides, RNG, configuration, events, errors.
//!
//! These are the building blocks the rest of the engine is assembled from.
//! Nothing here owns match flow; that lives in `engine`.

pub mod config;
pub mod error;
pub mod event;
pub mod rng;
pub mod side;

pub use config::{GameMode, MatchConfig, MAX_ANSWER_MAGNITUDE, TRANSITION_MS, TURN_SECONDS};
pub use error::MatchError;
pub use event::MatchEvent;
pub use rng::MatchRng;
pub use side::{Side, SidePair};
