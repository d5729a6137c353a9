//! Error taxonomy.
//!
//! The surface is deliberately small. Most "errors" in a match are not
//! errors at all: a submission from the wrong side, a stale timer firing
//! after reset, a double submit — all of those are silently discarded by
//! guards. What remains is configuration that can never work.

use thiserror::Error;

/// Errors the engine can surface to the embedding adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// The operand range can never produce a valid question, so the
    /// generator's retry loop would not terminate.
    #[error("operand range [{min}, {max}] cannot produce a valid question")]
    InvalidRange { min: i64, max: i64 },

    /// No AI profile is registered under this name.
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
}
