use thiserror::Error;

/// Errors raised while constructing or searching automata.
///
/// `ltl-check` folds this, together with [`ltl_formula::FormulaError`], into
/// its top-level `ModelCheckError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomataError {
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error(
        "tableau node limit exceeded: built {built} nodes, limit is {limit}"
    )]
    TableauNodeLimitExceeded { built: usize, limit: usize },

    #[error(
        "product state limit exceeded: built {built} states, limit is {limit}"
    )]
    ProductStateLimitExceeded { built: usize, limit: usize },

    #[error("internal invariant violated: {0}")]
    Internal(String),
}
