//! Randomized question generation.
//!
//! Draws three operands and two operators, patches division sites so every
//! quotient can be exact, and resamples until evaluation yields a bounded
//! integer. The retry loop is capped so a hopeless range surfaces
//! `MatchError::InvalidRange` instead of spinning forever.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::expr::{Expr, Op};
use crate::core::{MatchError, MatchRng, MAX_ANSWER_MAGNITUDE};

/// Operands per question. Fixed: two operators, three operands.
const OPERAND_COUNT: usize = 3;

/// Resample cap before the range is declared invalid. Sane ranges succeed
/// within a handful of attempts; this only exists to bound the loop.
const MAX_ATTEMPTS: usize = 10_000;

/// One generated question. Immutable once created; discarded after the turn
/// it was asked in resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Rendered expression followed by `" = ?"`.
    pub text: String,
    /// The one correct answer.
    pub answer: i64,
}

impl Question {
    /// Check a parsed candidate against the answer.
    #[must_use]
    pub fn is_correct(&self, candidate: i64) -> bool {
        candidate == self.answer
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Divisors of `value` available in `[min, max]`, zero excluded.
fn valid_divisors(value: i64, min: i64, max: i64) -> SmallVec<[i64; 8]> {
    (min..=max).filter(|&d| d != 0 && value % d == 0).collect()
}

/// Draw one candidate expression. Division sites get their following
/// operand replaced by a random in-range divisor of the preceding operand
/// (fallback 1), sequentially so a patched operand feeds the next site.
fn draw_expr(min: i64, max: i64, rng: &mut MatchRng) -> Expr {
    let mut operands: SmallVec<[i64; 3]> = (0..OPERAND_COUNT)
        .map(|_| rng.gen_inclusive(min, max))
        .collect();
    let ops: SmallVec<[Op; 2]> = (0..OPERAND_COUNT - 1)
        .map(|_| *rng.choose(&Op::ALL).expect("Op::ALL is non-empty"))
        .collect();

    for i in 0..ops.len() {
        if ops[i] == Op::Div {
            let divisors = valid_divisors(operands[i], min, max);
            operands[i + 1] = rng.choose(&divisors).copied().unwrap_or(1);
        }
    }

    Expr::new(operands, ops)
}

/// Generate a question whose answer is an integer with magnitude ≤ 999.
///
/// Candidates that fail evaluation (inexact or zero division, overflow) or
/// exceed the magnitude bound are resampled. Fails with
/// [`MatchError::InvalidRange`] when `min > max` or the cap is exhausted.
pub fn generate(min: i64, max: i64, rng: &mut MatchRng) -> Result<Question, MatchError> {
    if min > max {
        return Err(MatchError::InvalidRange { min, max });
    }

    for _ in 0..MAX_ATTEMPTS {
        let expr = draw_expr(min, max, rng);
        match expr.evaluate() {
            Ok(answer) if answer.abs() <= MAX_ANSWER_MAGNITUDE => {
                return Ok(Question {
                    text: format!("{} = ?", expr.render()),
                    answer,
                });
            }
            // Out-of-bound answer or rejected evaluation: resample.
            Ok(_) | Err(_) => {}
        }
    }

    log::warn!("question generation exhausted {MAX_ATTEMPTS} attempts for [{min}, {max}]");
    Err(MatchError::InvalidRange { min, max })
}
