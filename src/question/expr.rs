//! Arithmetic expression form and its evaluator.
//!
//! The generator produces a flat operand/operator list; this module renders
//! it for display and computes its value with an explicit stepwise
//! evaluator. No dynamic evaluation facility is involved.
//!
//! ## Evaluation order
//!
//! Standard operator precedence: `×` and `÷` bind tighter than `+` and `−`,
//! and operators of equal precedence associate left-to-right. So
//! `2 + 6 ÷ 3` is 4, not 2. This is the order the expression text reads as
//! under ordinary arithmetic conventions, and it decides which answers are
//! "correct".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// An arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// All operators, for uniform random selection.
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    /// The display glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '×',
            Op::Div => '÷',
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Why evaluation rejected an expression.
///
/// Never escapes the crate: the generator catches these and resamples.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("quotient is not an integer")]
    NonIntegerQuotient,

    #[error("intermediate value overflowed")]
    Overflow,
}

/// A flat arithmetic expression: `operands[0] ops[0] operands[1] ops[1] ...`.
///
/// Invariant: `operands.len() == ops.len() + 1` and both are non-empty.
/// The inline capacities match the generator's fixed 3-operand shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    pub operands: SmallVec<[i64; 3]>,
    pub ops: SmallVec<[Op; 2]>,
}

impl Expr {
    /// Build an expression from operands and the operators between them.
    ///
    /// Panics if the lengths are inconsistent.
    pub fn new(operands: impl Into<SmallVec<[i64; 3]>>, ops: impl Into<SmallVec<[Op; 2]>>) -> Self {
        let operands = operands.into();
        let ops = ops.into();
        assert!(!operands.is_empty(), "expression needs at least one operand");
        assert_eq!(
            operands.len(),
            ops.len() + 1,
            "expression needs exactly one more operand than operators"
        );
        Self { operands, ops }
    }

    /// Render as display text, e.g. `"3 + 4 × 2"`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.operands[0].to_string();
        for (op, operand) in self.ops.iter().zip(&self.operands[1..]) {
            out.push(' ');
            out.push(op.glyph());
            out.push(' ');
            out.push_str(&operand.to_string());
        }
        out
    }

    /// Evaluate with standard precedence (see module docs).
    ///
    /// Division must be exact; a fractional quotient, division by zero, or
    /// any intermediate overflow rejects the expression.
    pub fn evaluate(&self) -> Result<i64, EvalError> {
        // Fold ×/÷ into the running term; flush the term into the total on
        // each +/- boundary. `negate` carries the sign the pending term was
        // introduced with.
        let mut total: i64 = 0;
        let mut term: i64 = self.operands[0];
        let mut negate = false;

        let flush = |total: i64, term: i64, negate: bool| -> Result<i64, EvalError> {
            let signed = if negate {
                term.checked_neg().ok_or(EvalError::Overflow)?
            } else {
                term
            };
            total.checked_add(signed).ok_or(EvalError::Overflow)
        };

        for (op, &next) in self.ops.iter().zip(&self.operands[1..]) {
            match op {
                Op::Mul => {
                    term = term.checked_mul(next).ok_or(EvalError::Overflow)?;
                }
                Op::Div => {
                    if next == 0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    if term % next != 0 {
                        return Err(EvalError::NonIntegerQuotient);
                    }
                    term /= next;
                }
                Op::Add => {
                    total = flush(total, term, negate)?;
                    term = next;
                    negate = false;
                }
                Op::Sub => {
                    total = flush(total, term, negate)?;
                    term = next;
                    negate = true;
                }
            }
        }

        flush(total, term, negate)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
