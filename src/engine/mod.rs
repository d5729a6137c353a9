//! Match engine: state machine, turn clock, scheduler, and orchestration.

pub mod clock;
pub mod machine;
pub mod scheduler;
pub mod state;

pub use clock::{TickResult, TurnClock};
pub use machine::MatchEngine;
pub use scheduler::{Scheduler, Task};
pub use state::{MatchState, Phase};
