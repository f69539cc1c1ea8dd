//! Orchestration entry point for LTL model checking: fast paths for trivial
//! formulas, the full tableau-GBA-BA-product-emptiness pipeline otherwise,
//! and a minimal single-step evaluator for callers that only need bounded,
//! non-temporal trace checks.

mod error;
mod orchestrator;
mod step;

pub use error::ModelCheckError;
pub use orchestrator::{check, CheckConfig, CheckResult, Counterexample};
pub use step::{step_formula, EvaluationContext, TraceStep};

pub use ltl_automata::{Kripke, ModelState};
pub use ltl_formula::{ClosureProposition, Formula, Pid, Proposition};
