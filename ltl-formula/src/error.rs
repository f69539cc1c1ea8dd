use thiserror::Error;

/// Errors raised while constructing or processing formulas.
///
/// This is the `InvalidFormula` error kind from the top-level error
/// taxonomy; `ltl-check` wraps it into `ModelCheckError::InvalidFormula`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("invalid proposition identifier {value:?}: {reason}")]
    InvalidPid { value: String, reason: &'static str },
}

/// Raised by a [`crate::proposition::Proposition`] implementation when its
/// user-supplied predicate cannot be evaluated against a given state.
///
/// This is the `PropositionEvaluation` error kind; it is only ever produced
/// by the out-of-core `step` evaluator, never by the model checker itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("proposition {proposition:?} failed to evaluate: {reason}")]
pub struct EvalError {
    pub proposition: String,
    pub reason: String,
}

impl EvalError {
    pub fn new(proposition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            proposition: proposition.into(),
            reason: reason.into(),
        }
    }
}
