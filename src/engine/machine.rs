//! The match engine: state machine, turn flow, and AI scheduling.
//!
//! `MatchEngine` owns everything mutable about a match — state, clock,
//! scheduler, RNG streams, input buffers — and is driven entirely by the
//! embedding adapter: user-facing operations (`start_game`,
//! `submit_answer`, `push_digit`, ...) plus `advance(ms)` for the passage
//! of time. Output flows back through [`MatchEvent`]s drained with
//! `drain_events`.
//!
//! ## Turn flow
//!
//! ```text
//! start_game ─► start_turn(Left) ─► ticks... ─► submit / timeout
//!                    ▲                               │
//!                    │      400ms transition window  │
//!                    └── start_turn(other) ◄─────────┘  (or Win, terminal)
//! ```
//!
//! Resolving a turn bumps the scheduler epoch, cancelling the countdown and
//! any in-flight AI work for the old turn before anything new is scheduled.

use im::Vector;

use crate::ai::{
    decide_answer, AiProfile, Difficulty, PendingAnswer, ProfileRegistry, TYPE_INTERVAL_MAX_MS,
    TYPE_INTERVAL_MIN_MS, TYPING_LEAD_MS,
};
use crate::core::{
    GameMode, MatchConfig, MatchError, MatchEvent, MatchRng, Side, SidePair, TRANSITION_MS,
    TURN_SECONDS,
};
use crate::question::{generate, Question};

use super::clock::{TickResult, TurnClock};
use super::scheduler::{Scheduler, Task};
use super::state::{MatchState, Phase};

/// Milliseconds between countdown ticks.
const TICK_MS: u64 = 1_000;

/// The complete, single-threaded match engine.
pub struct MatchEngine {
    config: MatchConfig,
    state: MatchState,
    clock: TurnClock,
    scheduler: Scheduler,

    questions: Option<SidePair<Question>>,
    inputs: SidePair<String>,

    registry: ProfileRegistry,
    profile: AiProfile,
    difficulty_name: String,
    ai_enabled: bool,
    pending_ai: Option<PendingAnswer>,

    base_rng: MatchRng,
    question_rng: MatchRng,
    ai_rng: MatchRng,
    timing_rng: MatchRng,

    pending_events: Vec<MatchEvent>,
    history: Vector<MatchEvent>,
}

impl MatchEngine {
    /// Create an idle engine. `seed` fixes every random choice the engine
    /// will ever make, including across restarts.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let base_rng = MatchRng::new(seed);
        Self {
            config: MatchConfig::default().with_seed(seed),
            state: MatchState::new(),
            clock: TurnClock::new(),
            scheduler: Scheduler::new(),
            questions: None,
            inputs: SidePair::default(),
            registry: ProfileRegistry::new(),
            profile: AiProfile::for_tier(Difficulty::Normal),
            difficulty_name: Difficulty::Normal.name().to_string(),
            ai_enabled: true,
            pending_ai: None,
            question_rng: base_rng.for_context("questions"),
            ai_rng: base_rng.for_context("ai"),
            timing_rng: base_rng.for_context("timing"),
            base_rng,
            pending_events: Vec::new(),
            history: Vector::new(),
        }
    }

    // === Adapter-facing operations ===

    /// Start a match: mode picks the step threshold, `[min, max]` bounds
    /// question operands. Fails only if the range can never yield a valid
    /// question; nothing is mutated in that case beyond the RNG fork.
    pub fn start_game(&mut self, mode: GameMode, min: i64, max: i64) -> Result<(), MatchError> {
        let match_rng = self.base_rng.fork();
        let mut question_rng = match_rng.for_context("questions");

        // Generate up front so a hopeless range is rejected before any
        // state changes; mid-match regeneration then cannot fail.
        let left = generate(min, max, &mut question_rng)?;
        let right = generate(min, max, &mut question_rng)?;

        self.scheduler.bump_epoch();
        self.clock.stop();
        self.pending_ai = None;
        self.config = MatchConfig::new(mode, min, max).with_seed(self.config.seed);
        self.question_rng = question_rng;
        self.ai_rng = match_rng.for_context("ai");
        self.timing_rng = match_rng.for_context("timing");
        self.history.clear();

        self.state.begin(mode.total_steps());
        log::debug!("match started: {mode} to {} steps, operands [{min}, {max}]", mode.total_steps());

        self.emit(MatchEvent::Reset {
            mode,
            total_steps: mode.total_steps(),
        });
        self.install_questions(left, right);
        self.emit_steps();
        self.start_turn(Side::Left);
        Ok(())
    }

    /// Restart with the same mode and operand range.
    pub fn restart_game(&mut self) -> Result<(), MatchError> {
        log::debug!("match restarting");
        self.start_game(self.config.mode, self.config.range_min, self.config.range_max)
    }

    /// Abandon the match and return to idle. Cancels all scheduled work.
    pub fn back_to_home(&mut self) {
        self.scheduler.bump_epoch();
        self.clock.stop();
        self.pending_ai = None;
        self.state.abandon();
        log::debug!("match abandoned");
    }

    /// Submit an answer for `side`. Silently ignored unless the match is in
    /// progress, the board is not transitioning, and it is `side`'s turn —
    /// late submissions, double submissions, and off-turn submissions are
    /// all no-ops. Unparseable input counts as a wrong answer.
    pub fn submit_answer(&mut self, side: Side, raw: &str) {
        if !self.state.can_submit(side) {
            log::trace!("ignored submission from {side}");
            return;
        }
        let Some(questions) = &self.questions else {
            return;
        };
        let correct = raw
            .trim()
            .parse::<i64>()
            .is_ok_and(|v| questions[side].is_correct(v));

        // Cancel the countdown and any in-flight AI work for this turn.
        self.scheduler.bump_epoch();
        self.clock.stop();
        self.pending_ai = None;

        log::debug!("{side} submitted {raw:?}: {}", if correct { "correct" } else { "wrong" });
        self.emit(MatchEvent::Outcome { side, correct });

        // Correct moves yourself forward; wrong moves the opponent.
        let beneficiary = if correct { side } else { side.opponent() };
        self.state.award_step(beneficiary);
        self.emit_steps();
        self.resolve_after(side);
    }

    /// Append a digit to `side`'s input buffer. Ignored for the inactive
    /// side, during transitions, or after game over.
    pub fn push_digit(&mut self, side: Side, digit: char) {
        if !digit.is_ascii_digit() || !self.state.can_submit(side) {
            return;
        }
        self.append_input(side, digit);
    }

    /// Clear `side`'s input buffer. Same guards as `push_digit`.
    pub fn clear_input(&mut self, side: Side) {
        if !self.state.can_submit(side) || self.inputs[side].is_empty() {
            return;
        }
        self.inputs[side].clear();
        self.emit(MatchEvent::InputChanged {
            side,
            value: String::new(),
        });
    }

    /// Select the AI profile by registry name. Takes effect from the next
    /// AI turn.
    pub fn set_ai_difficulty(&mut self, name: &str) -> Result<(), MatchError> {
        self.profile = self.registry.get(name)?.clone();
        self.difficulty_name = name.to_string();
        log::debug!("ai difficulty set to {name}");
        Ok(())
    }

    /// Enable or disable the simulated opponent on the right side.
    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.ai_enabled = enabled;
    }

    /// Register a custom AI profile under `name`.
    pub fn register_profile(&mut self, name: impl Into<String>, profile: AiProfile) {
        self.registry.register(name, profile);
    }

    /// Advance virtual time by `ms`, firing every due timer in order:
    /// countdown ticks, timeouts, turn transitions, AI typing and
    /// submission. Splitting an advance into smaller ones is equivalent.
    pub fn advance(&mut self, ms: u64) {
        let target = self.scheduler.now_ms() + ms;
        while let Some(task) = self.scheduler.pop_due(target) {
            self.dispatch(task);
        }
        self.scheduler.settle(target);
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn current_turn(&self) -> Side {
        self.state.current_turn()
    }

    #[must_use]
    pub fn steps(&self, side: Side) -> u32 {
        self.state.steps(side)
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.state.total_steps()
    }

    /// The question currently posed to `side`, if a match is running.
    #[must_use]
    pub fn question(&self, side: Side) -> Option<&Question> {
        self.questions.as_ref().map(|q| &q[side])
    }

    /// The current content of `side`'s input buffer.
    #[must_use]
    pub fn input(&self, side: Side) -> &str {
        &self.inputs[side]
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Name of the active AI difficulty.
    #[must_use]
    pub fn ai_difficulty(&self) -> &str {
        &self.difficulty_name
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Every event emitted since the match started, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<MatchEvent> {
        &self.history
    }

    // === Internals ===

    fn emit(&mut self, event: MatchEvent) {
        self.history.push_back(event.clone());
        self.pending_events.push(event);
    }

    fn emit_steps(&mut self) {
        self.emit(MatchEvent::StepsChanged {
            left: self.state.steps(Side::Left),
            right: self.state.steps(Side::Right),
        });
    }

    fn install_questions(&mut self, left: Question, right: Question) {
        self.inputs = SidePair::default();
        self.emit(MatchEvent::QuestionsChanged {
            left: left.clone(),
            right: right.clone(),
        });
        self.questions = Some(SidePair::new(|side| match side {
            Side::Left => left.clone(),
            Side::Right => right.clone(),
        }));
    }

    /// Regenerate both questions for the next turn. The range was proven
    /// viable in `start_game`, so failure here is unreachable in practice;
    /// it is logged and the transition abandoned rather than panicking.
    fn refresh_questions(&mut self) -> bool {
        let (min, max) = (self.config.range_min, self.config.range_max);
        let left = generate(min, max, &mut self.question_rng);
        let right = generate(min, max, &mut self.question_rng);
        match (left, right) {
            (Ok(left), Ok(right)) => {
                self.install_questions(left, right);
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("question regeneration failed mid-match: {e}");
                false
            }
        }
    }

    fn append_input(&mut self, side: Side, c: char) {
        self.inputs[side].push(c);
        self.emit(MatchEvent::InputChanged {
            side,
            value: self.inputs[side].clone(),
        });
    }

    /// Begin `side`'s turn: full clock, first tick scheduled, AI cycle when
    /// the right side is machine-driven.
    fn start_turn(&mut self, side: Side) {
        if self.state.is_game_over() || self.state.is_transitioning() {
            return;
        }
        self.state.set_current_turn(side);
        self.clock.start(side);
        log::debug!("turn started for {side}");
        self.emit(MatchEvent::TurnStarted {
            side,
            remaining_seconds: TURN_SECONDS,
        });
        self.scheduler.schedule_in(TICK_MS, Task::ClockTick);

        if side == Side::Right && self.ai_enabled {
            self.start_ai_turn();
        }
    }

    /// After a counter moved: either the match is over, or flip the turn
    /// behind a transition window with fresh questions.
    fn resolve_after(&mut self, from: Side) {
        if let Some(winner) = self.state.winner() {
            self.state.finish();
            self.clock.stop();
            self.scheduler.bump_epoch();
            log::debug!("{winner} wins");
            self.emit(MatchEvent::Win { side: winner });
            return;
        }

        self.state.set_transitioning(true);
        if self.refresh_questions() {
            self.scheduler
                .schedule_in(TRANSITION_MS, Task::StartTurn(from.opponent()));
        }
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::ClockTick => self.on_clock_tick(),
            Task::StartTurn(side) => {
                self.state.set_transitioning(false);
                self.start_turn(side);
            }
            Task::AiBeginTyping => self.ai_begin_typing(),
            Task::AiTypeDigit => self.ai_type_next_char(),
            Task::AiSubmit => self.ai_submit(),
        }
    }

    fn on_clock_tick(&mut self) {
        match self.clock.tick() {
            // Stopped clock: a stale tick that survived cancellation.
            None => {}
            Some(TickResult::Running(remaining)) => {
                let side = self.clock.active_side();
                self.emit(MatchEvent::Tick {
                    side,
                    remaining_seconds: remaining,
                });
                self.scheduler.schedule_in(TICK_MS, Task::ClockTick);
            }
            Some(TickResult::Expired) => {
                let side = self.clock.active_side();
                self.emit(MatchEvent::Tick {
                    side,
                    remaining_seconds: 0,
                });
                log::debug!("{side} ran out of time");
                self.emit(MatchEvent::Timeout { side });

                self.scheduler.bump_epoch();
                self.pending_ai = None;

                // A timeout yields a point to the other side.
                self.state.award_step(side.opponent());
                self.emit_steps();
                self.resolve_after(side);
            }
        }
    }

    // === AI turn cycle ===

    /// Schedule the AI's typing lead-in and its submission deadline.
    fn start_ai_turn(&mut self) {
        if self.state.is_game_over() || self.state.current_turn() != Side::Right {
            return;
        }
        let delay = self
            .timing_rng
            .gen_inclusive_u64(self.profile.min_delay_ms, self.profile.max_delay_ms);
        log::debug!("ai ({}) will submit in {delay}ms", self.difficulty_name);
        self.scheduler.schedule_in(TYPING_LEAD_MS, Task::AiBeginTyping);
        self.scheduler.schedule_in(delay, Task::AiSubmit);
    }

    /// Decide the target answer and type its first character.
    fn ai_begin_typing(&mut self) {
        if self.state.is_game_over() || self.state.current_turn() != Side::Right || !self.ai_enabled
        {
            return;
        }
        let Some(questions) = &self.questions else {
            return;
        };
        let truth = questions[Side::Right].answer;
        let target = decide_answer(truth, self.profile.accuracy, &mut self.ai_rng);
        log::trace!("ai targets {target} (truth {truth})");
        self.pending_ai = Some(PendingAnswer::new(target));
        self.ai_type_next_char();
    }

    /// Reveal the next character of the pending answer into the right
    /// input buffer; aborts if the match ended or the turn changed.
    fn ai_type_next_char(&mut self) {
        if self.state.is_game_over() || self.state.current_turn() != Side::Right {
            self.pending_ai = None;
            return;
        }
        let Some(pending) = self.pending_ai.as_mut() else {
            return;
        };
        let Some(c) = pending.next_char() else {
            return;
        };
        let more = !pending.is_done();

        self.append_input(Side::Right, c);

        if more {
            let gap = self
                .timing_rng
                .gen_inclusive_u64(TYPE_INTERVAL_MIN_MS, TYPE_INTERVAL_MAX_MS);
            self.scheduler.schedule_in(gap, Task::AiTypeDigit);
        }
    }

    /// Submit whatever the right buffer holds at the deadline. A premature
    /// game-over or turn change leaves it partially typed; the submission
    /// guards upstream then make this a no-op.
    fn ai_submit(&mut self) {
        if self.state.is_game_over() || self.state.current_turn() != Side::Right {
            return;
        }
        let raw = self.inputs[Side::Right].clone();
        self.pending_ai = None;
        log::debug!("ai submits {raw:?}");
        self.submit_answer(Side::Right, &raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_engine() -> MatchEngine {
        let mut engine = MatchEngine::new(42);
        engine.set_ai_enabled(false);
        engine.start_game(GameMode::Classic, 1, 10).unwrap();
        engine
    }

    /// Answer the current question correctly for whoever's turn it is.
    fn answer_correctly(engine: &mut MatchEngine) {
        let side = engine.current_turn();
        let answer = engine.question(side).unwrap().answer.to_string();
        engine.submit_answer(side, &answer);
    }

    #[test]
    fn test_start_game_initial_state() {
        let engine = {
            let mut e = MatchEngine::new(42);
            e.set_ai_enabled(false);
            e.start_game(GameMode::Blitz, 1, 10).unwrap();
            e
        };

        assert_eq!(engine.phase(), Phase::InProgress);
        assert_eq!(engine.current_turn(), Side::Left);
        assert_eq!(engine.steps(Side::Left), 0);
        assert_eq!(engine.steps(Side::Right), 0);
        assert_eq!(engine.total_steps(), 3);
        assert!(engine.question(Side::Left).is_some());
        assert!(engine.question(Side::Right).is_some());
    }

    #[test]
    fn test_start_game_invalid_range() {
        let mut engine = MatchEngine::new(42);
        assert_eq!(
            engine.start_game(GameMode::Classic, 5, 2),
            Err(MatchError::InvalidRange { min: 5, max: 2 })
        );
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_correct_answer_moves_own_side() {
        let mut engine = started_engine();
        answer_correctly(&mut engine);
        assert_eq!(engine.steps(Side::Left), 1);
        assert_eq!(engine.steps(Side::Right), 0);
    }

    #[test]
    fn test_wrong_answer_moves_opponent() {
        let mut engine = started_engine();
        let wrong = engine.question(Side::Left).unwrap().answer + 1;
        engine.submit_answer(Side::Left, &wrong.to_string());
        assert_eq!(engine.steps(Side::Left), 0);
        assert_eq!(engine.steps(Side::Right), 1);
    }

    #[test]
    fn test_unparseable_input_is_wrong() {
        let mut engine = started_engine();
        engine.submit_answer(Side::Left, "not a number");
        assert_eq!(engine.steps(Side::Right), 1);
    }

    #[test]
    fn test_off_turn_submission_ignored() {
        let mut engine = started_engine();
        engine.submit_answer(Side::Right, "0");
        assert_eq!(engine.steps(Side::Left), 0);
        assert_eq!(engine.steps(Side::Right), 0);
    }

    #[test]
    fn test_submission_during_transition_ignored() {
        let mut engine = started_engine();
        answer_correctly(&mut engine);
        // Inside the 400ms transition window nobody can submit.
        let answer = engine.question(Side::Left).unwrap().answer.to_string();
        engine.submit_answer(Side::Left, &answer);
        assert_eq!(engine.steps(Side::Left), 1);
    }

    #[test]
    fn test_turn_flips_after_transition() {
        let mut engine = started_engine();
        answer_correctly(&mut engine);
        assert_eq!(engine.current_turn(), Side::Left); // still, until window ends
        engine.advance(TRANSITION_MS);
        assert_eq!(engine.current_turn(), Side::Right);
    }

    #[test]
    fn test_double_submission_is_noop() {
        let mut engine = started_engine();
        let answer = engine.question(Side::Left).unwrap().answer.to_string();
        engine.submit_answer(Side::Left, &answer);
        engine.submit_answer(Side::Left, &answer);
        assert_eq!(engine.steps(Side::Left), 1);
    }

    #[test]
    fn test_input_buffer_flow() {
        let mut engine = started_engine();
        engine.push_digit(Side::Left, '4');
        engine.push_digit(Side::Left, '2');
        assert_eq!(engine.input(Side::Left), "42");

        // Non-digits and off-turn digits are ignored.
        engine.push_digit(Side::Left, 'x');
        engine.push_digit(Side::Right, '9');
        assert_eq!(engine.input(Side::Left), "42");
        assert_eq!(engine.input(Side::Right), "");

        engine.clear_input(Side::Left);
        assert_eq!(engine.input(Side::Left), "");
    }

    #[test]
    fn test_set_ai_difficulty() {
        let mut engine = MatchEngine::new(1);
        engine.set_ai_difficulty("hard").unwrap();
        assert_eq!(engine.ai_difficulty(), "hard");

        assert_eq!(
            engine.set_ai_difficulty("nightmare"),
            Err(MatchError::UnknownDifficulty("nightmare".into()))
        );
        assert_eq!(engine.ai_difficulty(), "hard");
    }

    #[test]
    fn test_custom_profile_registration() {
        let mut engine = MatchEngine::new(1);
        engine.register_profile("perfect", AiProfile::new(1.0, 100, 200));
        engine.set_ai_difficulty("perfect").unwrap();
        assert_eq!(engine.ai_difficulty(), "perfect");
    }

    #[test]
    fn test_back_to_home_cancels_everything() {
        let mut engine = started_engine();
        engine.back_to_home();
        assert_eq!(engine.phase(), Phase::Idle);

        // Timers from the abandoned match never fire.
        engine.drain_events();
        engine.advance(60_000);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut engine = started_engine();
        answer_correctly(&mut engine);
        assert_eq!(engine.steps(Side::Left), 1);

        engine.restart_game().unwrap();
        assert_eq!(engine.steps(Side::Left), 0);
        assert_eq!(engine.steps(Side::Right), 0);
        assert!(!engine.is_game_over());
        assert_eq!(engine.current_turn(), Side::Left);
    }
}
