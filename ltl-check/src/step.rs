use crate::error::ModelCheckError;
use ltl_formula::{Formula, Proposition};

/// Typed retrieval of the current state and an optional trace index, for the
/// out-of-core trace-at-a-time evaluator (spec §6, "Consumed — Evaluation
/// context"). `ltl-check` only specifies and minimally exercises this
/// interface; full bounded-trace semantics (windowing, caching) are a caller
/// concern, not the core model checker's.
pub trait EvaluationContext<S> {
    fn current_state(&self) -> &S;
    fn trace_index(&self) -> Option<usize>;
}

/// A single state of a trace paired with its position.
pub struct TraceStep<'a, S> {
    state: &'a S,
    index: usize,
}

impl<'a, S> TraceStep<'a, S> {
    pub fn new(state: &'a S, index: usize) -> Self {
        Self { state, index }
    }
}

impl<'a, S> EvaluationContext<S> for TraceStep<'a, S> {
    fn current_state(&self) -> &S {
        self.state
    }

    fn trace_index(&self) -> Option<usize> {
        Some(self.index)
    }
}

/// Evaluates one LTL obligation against one state of a trace using a
/// proposition's `evaluate` callback. Only propositional and boolean-leaf
/// obligations are handled directly; temporal obligations (`X`, `F`, `G`,
/// `U`, `W`, `R`) require the surrounding trace and are reported as
/// unsupported rather than silently approximated.
pub fn step_formula<S, P, C>(
    formula: &Formula,
    proposition_for: &impl Fn(&ltl_formula::Pid) -> Option<P>,
    context: &C,
) -> Result<bool, ModelCheckError>
where
    P: Proposition<S>,
    C: EvaluationContext<S>,
{
    match formula {
        Formula::BoolLit(b) => Ok(*b),
        Formula::Atom(pid) => {
            let prop = proposition_for(pid).ok_or_else(|| {
                ModelCheckError::PropositionEvaluation(ltl_formula::EvalError::new(
                    pid.as_str(),
                    "no proposition registered for this identifier",
                ))
            })?;
            Ok(prop.evaluate(context.current_state())?)
        }
        Formula::Not(a) => Ok(!step_formula(a, proposition_for, context)?),
        Formula::And(a, b) => Ok(step_formula(a, proposition_for, context)?
            && step_formula(b, proposition_for, context)?),
        Formula::Or(a, b) => Ok(step_formula(a, proposition_for, context)?
            || step_formula(b, proposition_for, context)?),
        Formula::Implies(a, b) => Ok(!step_formula(a, proposition_for, context)?
            || step_formula(b, proposition_for, context)?),
        Formula::Next(_)
        | Formula::Eventually(_)
        | Formula::Globally(_)
        | Formula::Until(_, _)
        | Formula::WeakUntil(_, _)
        | Formula::Release(_, _) => Err(ModelCheckError::InvalidFormula(format!(
            "temporal operator {formula} requires a full trace, not a single step"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltl_formula::{ClosureProposition, Pid};

    #[test]
    fn evaluates_boolean_connectives_over_one_state() {
        let p = ClosureProposition::infallible(Pid::new("p").unwrap(), "p", |s: &bool| *s);
        let formula = Formula::and(
            Formula::atom(Pid::new("p").unwrap()),
            Formula::not(Formula::bool_lit(false)),
        );
        let context = TraceStep::new(&true, 0);
        let result = step_formula(&formula, &|_| Some(p.clone()), &context).unwrap();
        assert!(result);
    }

    #[test]
    fn temporal_operators_are_rejected() {
        let p = ClosureProposition::infallible(Pid::new("p").unwrap(), "p", |s: &bool| *s);
        let formula = Formula::next(Formula::atom(Pid::new("p").unwrap()));
        let context = TraceStep::new(&true, 0);
        let err = step_formula(&formula, &|_| Some(p.clone()), &context).unwrap_err();
        assert!(matches!(err, ModelCheckError::InvalidFormula(_)));
    }
}
