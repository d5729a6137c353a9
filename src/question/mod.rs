//! Question generation: expression form, evaluator, and generator.

pub mod expr;
pub mod generator;

pub use expr::{EvalError, Expr, Op};
pub use generator::{generate, Question};
