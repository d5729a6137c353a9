//! Single-threaded virtual-time scheduler.
//!
//! All timer-driven behavior — countdown ticks, turn transitions, AI typing
//! and submission — runs through this one queue instead of ad hoc timer
//! cascades. The embedding adapter drives time forward via
//! `MatchEngine::advance`, which pops due tasks in (due time, insertion)
//! order and dispatches them.
//!
//! ## Epochs
//!
//! Every task is stamped with the epoch current when it was scheduled.
//! `bump_epoch` invalidates all outstanding tasks at once: a popped task
//! whose stamp no longer matches is dropped, never dispatched. Turn
//! resolution, reset, and abandon each bump the epoch, so a callback from a
//! previous turn can never mutate the state of a later one. Handlers still
//! guard on game-over/turn as a second line of defense.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// A unit of deferred work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// One second of the active side's countdown.
    ClockTick,
    /// End of the transition window: begin this side's turn.
    StartTurn(Side),
    /// The AI decides its answer and types the first character.
    AiBeginTyping,
    /// The AI types the next character of its pending answer.
    AiTypeDigit,
    /// The AI submits whatever its input buffer holds.
    AiSubmit,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due_ms: u64,
    seq: u64,
    epoch: u64,
    task: Task,
}

/// Epoch-stamped task queue over virtual time.
///
/// The queue is tiny (at most a clock tick, a transition, and an AI chain),
/// so a linear scan beats a heap.
#[derive(Clone, Debug)]
pub struct Scheduler {
    now_ms: u64,
    epoch: u64,
    next_seq: u64,
    queue: Vec<Entry>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            epoch: 0,
            next_seq: 0,
            queue: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Current epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Schedule `task` to fire `delay_ms` from now, stamped with the
    /// current epoch.
    pub fn schedule_in(&mut self, delay_ms: u64, task: Task) {
        let entry = Entry {
            due_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
            epoch: self.epoch,
            task,
        };
        self.next_seq += 1;
        self.queue.push(entry);
    }

    /// Invalidate every outstanding task.
    pub fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Pop the next current-epoch task due at or before `limit_ms`,
    /// advancing `now` to its due time. Stale tasks encountered on the way
    /// are discarded. Returns `None` when nothing (valid) is due.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<Task> {
        loop {
            let idx = self
                .queue
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due_ms <= limit_ms)
                .min_by_key(|(_, e)| (e.due_ms, e.seq))
                .map(|(i, _)| i)?;

            let entry = self.queue.swap_remove(idx);
            if entry.epoch != self.epoch {
                continue; // cancelled by an epoch bump
            }

            self.now_ms = self.now_ms.max(entry.due_ms);
            return Some(entry.task);
        }
    }

    /// Move virtual time to `target_ms` after all due tasks were popped.
    pub fn settle(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Number of outstanding entries, stale ones included. Test hook.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule_in(500, Task::AiSubmit);
        s.schedule_in(100, Task::ClockTick);
        s.schedule_in(300, Task::AiBeginTyping);

        assert_eq!(s.pop_due(1000), Some(Task::ClockTick));
        assert_eq!(s.now_ms(), 100);
        assert_eq!(s.pop_due(1000), Some(Task::AiBeginTyping));
        assert_eq!(s.pop_due(1000), Some(Task::AiSubmit));
        assert_eq!(s.pop_due(1000), None);
    }

    #[test]
    fn test_insertion_order_breaks_ties() {
        let mut s = Scheduler::new();
        s.schedule_in(200, Task::AiTypeDigit);
        s.schedule_in(200, Task::AiSubmit);

        assert_eq!(s.pop_due(200), Some(Task::AiTypeDigit));
        assert_eq!(s.pop_due(200), Some(Task::AiSubmit));
    }

    #[test]
    fn test_not_due_yet() {
        let mut s = Scheduler::new();
        s.schedule_in(400, Task::StartTurn(Side::Right));

        assert_eq!(s.pop_due(399), None);
        assert_eq!(s.pop_due(400), Some(Task::StartTurn(Side::Right)));
    }

    #[test]
    fn test_epoch_bump_cancels_pending() {
        let mut s = Scheduler::new();
        s.schedule_in(100, Task::ClockTick);
        s.schedule_in(200, Task::AiSubmit);
        s.bump_epoch();
        s.schedule_in(300, Task::StartTurn(Side::Left));

        // Stale entries are dropped, the fresh one still fires.
        assert_eq!(s.pop_due(1000), Some(Task::StartTurn(Side::Left)));
        assert_eq!(s.pop_due(1000), None);
        assert_eq!(s.pending_len(), 0);
    }

    #[test]
    fn test_cascading_schedules_within_one_advance() {
        // A handler scheduling relative to the fired task's time keeps
        // cascades correct inside a single advance window.
        let mut s = Scheduler::new();
        s.schedule_in(100, Task::AiTypeDigit);

        assert_eq!(s.pop_due(1000), Some(Task::AiTypeDigit));
        s.schedule_in(150, Task::AiTypeDigit); // fires at 250
        assert_eq!(s.pop_due(1000), Some(Task::AiTypeDigit));
        assert_eq!(s.now_ms(), 250);
    }

    #[test]
    fn test_settle_advances_time() {
        let mut s = Scheduler::new();
        s.settle(500);
        assert_eq!(s.now_ms(), 500);
        s.schedule_in(100, Task::ClockTick);
        assert_eq!(s.pop_due(600), Some(Task::ClockTick));
        assert_eq!(s.now_ms(), 600);
    }
}
