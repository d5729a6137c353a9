//! Simulated opponent decisions and typing state.
//!
//! The opponent plays the right side. Per turn it rolls once against the
//! profile's accuracy to pick a target answer (the truth, or a plausible
//! perturbation of it), then "types" the target digit by digit into the
//! right input buffer before auto-submitting. The scheduling itself lives in
//! `engine::machine`; this module is the pure decision logic plus the
//! ephemeral typing state.

use serde::{Deserialize, Serialize};

use crate::core::MatchRng;

/// Lead time before the AI starts typing after its turn begins.
pub const TYPING_LEAD_MS: u64 = 300;

/// Shortest pause between typed digits.
pub const TYPE_INTERVAL_MIN_MS: u64 = 100;

/// Longest pause between typed digits.
pub const TYPE_INTERVAL_MAX_MS: u64 = 200;

/// Decide what the AI will answer this turn.
///
/// With probability `accuracy` the target is `correct`; otherwise a wrong
/// integer near it. Guaranteed to differ from `correct` in the wrong branch.
pub fn decide_answer(correct: i64, accuracy: f64, rng: &mut MatchRng) -> i64 {
    if rng.gen_bool(accuracy) {
        correct
    } else {
        plausible_wrong_answer(correct, rng)
    }
}

/// Synthesize a wrong answer that still looks like an attempt.
///
/// One of four perturbation strategies, chosen uniformly: offset up or down
/// by a variation bounded by the answer's magnitude, a small random nudge
/// floored at zero, or an unrelated value near the answer. A coincidental
/// hit on the correct answer is forced off by one.
fn plausible_wrong_answer(correct: i64, rng: &mut MatchRng) -> i64 {
    let variation = rng.gen_inclusive(1, correct.abs().max(3));

    let candidate = match rng.gen_inclusive(0, 3) {
        0 => correct + variation,
        1 => correct - variation,
        2 => (correct + rng.gen_inclusive(-10, 10)).max(0),
        _ => {
            // Answers can be negative; keep the draw range well-formed.
            let lo = (correct - 20).max(0);
            let hi = (correct + 20).max(lo);
            rng.gen_inclusive(lo, hi)
        }
    };

    if candidate == correct {
        if rng.gen_bool(0.5) {
            correct + 1
        } else {
            correct - 1
        }
    } else {
        candidate
    }
}

/// Ephemeral typing state for one AI turn.
///
/// Created when the AI begins typing, destroyed on submit or reset. The
/// target is kept as its decimal string so a leading minus sign is typed
/// like any other character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAnswer {
    digits: String,
    typed: usize,
}

impl PendingAnswer {
    /// Start typing toward `target`.
    #[must_use]
    pub fn new(target: i64) -> Self {
        Self {
            digits: target.to_string(),
            typed: 0,
        }
    }

    /// The next character to type, advancing the cursor. `None` once the
    /// full target has been revealed.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.digits.chars().nth(self.typed)?;
        self.typed += 1;
        Some(c)
    }

    /// True when every character has been typed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.typed >= self.digits.len()
    }

    /// The full target string.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_accuracy_always_correct() {
        let mut rng = MatchRng::new(42);
        for correct in [-50, 0, 7, 999] {
            for _ in 0..50 {
                assert_eq!(decide_answer(correct, 1.0, &mut rng), correct);
            }
        }
    }

    #[test]
    fn test_zero_accuracy_never_correct() {
        let mut rng = MatchRng::new(42);
        for correct in [-50, 0, 7, 999] {
            for _ in 0..200 {
                assert_ne!(decide_answer(correct, 0.0, &mut rng), correct);
            }
        }
    }

    #[test]
    fn test_accuracy_rate_within_band() {
        // 1000 decisions at 0.95 accuracy should land well inside ±0.05.
        let mut rng = MatchRng::new(1234);
        let trials = 1000;
        let correct_count = (0..trials)
            .filter(|_| decide_answer(17, 0.95, &mut rng) == 17)
            .count();
        let rate = correct_count as f64 / trials as f64;
        assert!(
            (rate - 0.95).abs() < 0.05,
            "observed correct rate {rate} outside tolerance of 0.95"
        );
    }

    #[test]
    fn test_wrong_answers_near_truth() {
        let mut rng = MatchRng::new(9);
        for _ in 0..500 {
            let wrong = plausible_wrong_answer(100, &mut rng);
            assert_ne!(wrong, 100);
            // Every strategy stays within |answer| + 20 of the truth.
            assert!((wrong - 100).abs() <= 120, "implausible answer {wrong}");
        }
    }

    #[test]
    fn test_wrong_answer_negative_truth() {
        // Exercises the well-formed-range guard for strongly negative answers.
        let mut rng = MatchRng::new(11);
        for _ in 0..500 {
            let wrong = plausible_wrong_answer(-100, &mut rng);
            assert_ne!(wrong, -100);
        }
    }

    #[test]
    fn test_pending_answer_typing() {
        let mut pending = PendingAnswer::new(42);
        assert_eq!(pending.target(), "42");
        assert!(!pending.is_done());

        assert_eq!(pending.next_char(), Some('4'));
        assert_eq!(pending.next_char(), Some('2'));
        assert!(pending.is_done());
        assert_eq!(pending.next_char(), None);
    }

    #[test]
    fn test_pending_answer_negative_target() {
        let mut pending = PendingAnswer::new(-7);
        assert_eq!(pending.next_char(), Some('-'));
        assert_eq!(pending.next_char(), Some('7'));
        assert!(pending.is_done());
    }
}
