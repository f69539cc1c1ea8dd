use crate::error::EvalError;
use crate::pid::Pid;
use std::fmt;
use std::rc::Rc;

/// A named, evaluable atomic proposition over application state `S`.
///
/// `evaluate` is never called by the core model checker — it is only used by
/// the out-of-core `step` evaluator (`ltl_check::step`). Identity and hashing
/// use `id` only, so two propositions with the same id but different
/// predicates are treated as the same atom throughout the pipeline.
pub trait Proposition<S> {
    fn id(&self) -> &Pid;
    fn name(&self) -> &str;
    fn evaluate(&self, state: &S) -> Result<bool, EvalError>;
}

/// A [`Proposition`] backed by a boxed closure.
///
/// Grounded in `logos_ffi`'s closure-backed predicate wrapper: most callers
/// have no existing type to hang `Proposition` off, so a constructor that
/// takes an `Fn(&S) -> bool` is the common path.
#[derive(Clone)]
pub struct ClosureProposition<S> {
    id: Pid,
    name: String,
    f: Rc<dyn Fn(&S) -> Result<bool, EvalError>>,
}

impl<S> ClosureProposition<S> {
    pub fn new(
        id: Pid,
        name: impl Into<String>,
        f: impl Fn(&S) -> Result<bool, EvalError> + 'static,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            f: Rc::new(f),
        }
    }

    /// Construct from an infallible predicate.
    pub fn infallible(
        id: Pid,
        name: impl Into<String>,
        f: impl Fn(&S) -> bool + 'static,
    ) -> Self {
        Self::new(id, name, move |s| Ok(f(s)))
    }
}

impl<S> Proposition<S> for ClosureProposition<S> {
    fn id(&self) -> &Pid {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, state: &S) -> Result<bool, EvalError> {
        (self.f)(state)
    }
}

impl<S> fmt::Debug for ClosureProposition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureProposition")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<S> PartialEq for ClosureProposition<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S> Eq for ClosureProposition<S> {}

impl<S> std::hash::Hash for ClosureProposition<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
