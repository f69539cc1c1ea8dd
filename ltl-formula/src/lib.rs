//! Formula AST, negation-normal-form conversion, and proposition identity
//! for the LTL model checker.

mod error;
mod formula;
mod nnf;
mod pid;
mod proposition;

pub use error::{EvalError, FormulaError};
pub use formula::{formula_hash, Formula};
pub use nnf::{is_nnf, nnf};
pub use pid::Pid;
pub use proposition::{ClosureProposition, Proposition};
