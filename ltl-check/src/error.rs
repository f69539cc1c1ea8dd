use ltl_automata::AutomataError;
use ltl_formula::{EvalError, FormulaError};
use thiserror::Error;

/// The error taxonomy surfaced at the `check` boundary (spec §7), unifying
/// [`FormulaError`] and [`AutomataError`] the way the teacher stack unifies
/// its per-crate errors into a top-level `LogosError`/`VerifiedPlanError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelCheckError {
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("invalid formula: {0}")]
    InvalidFormula(String),

    #[error("internal limit exceeded: {0}")]
    InternalLimitExceeded(String),

    #[error("internal processing error: {0}")]
    InternalProcessingError(String),

    #[error("proposition evaluation failed: {0}")]
    PropositionEvaluation(#[from] EvalError),
}

impl From<FormulaError> for ModelCheckError {
    fn from(err: FormulaError) -> Self {
        Self::InvalidFormula(err.to_string())
    }
}

impl From<AutomataError> for ModelCheckError {
    fn from(err: AutomataError) -> Self {
        match err {
            AutomataError::InvalidModel(msg) => Self::InvalidModel(msg),
            AutomataError::TableauNodeLimitExceeded { .. }
            | AutomataError::ProductStateLimitExceeded { .. } => {
                Self::InternalLimitExceeded(err.to_string())
            }
            AutomataError::Internal(msg) => Self::InternalProcessingError(msg),
        }
    }
}
