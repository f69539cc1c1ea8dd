use crate::pid::Pid;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::rc::Rc;

/// An immutable LTL formula over atomic propositions identified by [`Pid`].
///
/// Structural equality and hashing follow the derived implementations (they
/// recurse through the `Rc` children by value, not by pointer identity), so
/// two formulas built independently from the same syntax compare equal.
/// There is no required `Ord`; tableau obligation sets use `Formula`'s `Hash`
/// + `Eq` via `HashSet`, not a total order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    BoolLit(bool),
    Atom(Pid),
    Not(Rc<Formula>),
    Next(Rc<Formula>),
    Eventually(Rc<Formula>),
    Globally(Rc<Formula>),
    And(Rc<Formula>, Rc<Formula>),
    Or(Rc<Formula>, Rc<Formula>),
    Implies(Rc<Formula>, Rc<Formula>),
    Until(Rc<Formula>, Rc<Formula>),
    WeakUntil(Rc<Formula>, Rc<Formula>),
    Release(Rc<Formula>, Rc<Formula>),
}

impl Formula {
    pub fn bool_lit(b: bool) -> Self {
        Self::BoolLit(b)
    }

    pub fn top() -> Self {
        Self::BoolLit(true)
    }

    pub fn bottom() -> Self {
        Self::BoolLit(false)
    }

    pub fn atom(id: Pid) -> Self {
        Self::Atom(id)
    }

    pub fn not(f: Formula) -> Self {
        Self::Not(Rc::new(f))
    }

    pub fn next(f: Formula) -> Self {
        Self::Next(Rc::new(f))
    }

    pub fn eventually(f: Formula) -> Self {
        Self::Eventually(Rc::new(f))
    }

    pub fn globally(f: Formula) -> Self {
        Self::Globally(Rc::new(f))
    }

    pub fn and(l: Formula, r: Formula) -> Self {
        Self::And(Rc::new(l), Rc::new(r))
    }

    pub fn or(l: Formula, r: Formula) -> Self {
        Self::Or(Rc::new(l), Rc::new(r))
    }

    pub fn implies(l: Formula, r: Formula) -> Self {
        Self::Implies(Rc::new(l), Rc::new(r))
    }

    pub fn until(l: Formula, r: Formula) -> Self {
        Self::Until(Rc::new(l), Rc::new(r))
    }

    pub fn weak_until(l: Formula, r: Formula) -> Self {
        Self::WeakUntil(Rc::new(l), Rc::new(r))
    }

    pub fn release(l: Formula, r: Formula) -> Self {
        Self::Release(Rc::new(l), Rc::new(r))
    }

    /// `true` for the two leaf shapes (`BoolLit`, `Atom`).
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::BoolLit(_) | Self::Atom(_))
    }

    /// Every distinct subformula reachable from `self`, including itself.
    ///
    /// Used to size the tableau's reachable-node bound (`2^|sub(φ)|`, spec
    /// §4.2) and by tests that assert node counts stay within it.
    pub fn subformulas(&self) -> Vec<Formula> {
        let mut out = Vec::new();
        self.collect_subformulas(&mut out);
        out.sort_by_key(formula_hash);
        out.dedup();
        out
    }

    fn collect_subformulas(&self, out: &mut Vec<Formula>) {
        out.push(self.clone());
        match self {
            Self::BoolLit(_) | Self::Atom(_) => {}
            Self::Not(a) | Self::Next(a) | Self::Eventually(a) | Self::Globally(a) => {
                a.collect_subformulas(out)
            }
            Self::And(a, b)
            | Self::Or(a, b)
            | Self::Implies(a, b)
            | Self::Until(a, b)
            | Self::WeakUntil(a, b)
            | Self::Release(a, b) => {
                a.collect_subformulas(out);
                b.collect_subformulas(out);
            }
        }
    }
}

/// A deterministic content hash of a formula, used as a memoization key for
/// tableau nodes and as a stable diagnostic identifier. Mirrors
/// `logos_ffi::formula_hash`.
pub fn formula_hash(formula: &Formula) -> String {
    let json = serde_json::to_string(formula).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    hex::encode(hasher.finalize())
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoolLit(true) => write!(f, "true"),
            Self::BoolLit(false) => write!(f, "false"),
            Self::Atom(p) => write!(f, "{p}"),
            Self::Not(a) => write!(f, "¬{a}"),
            Self::Next(a) => write!(f, "X {a}"),
            Self::Eventually(a) => write!(f, "F {a}"),
            Self::Globally(a) => write!(f, "G {a}"),
            Self::And(a, b) => write!(f, "({a} ∧ {b})"),
            Self::Or(a, b) => write!(f, "({a} ∨ {b})"),
            Self::Implies(a, b) => write!(f, "({a} → {b})"),
            Self::Until(a, b) => write!(f, "({a} U {b})"),
            Self::WeakUntil(a, b) => write!(f, "({a} W {b})"),
            Self::Release(a, b) => write!(f, "({a} R {b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Formula {
        Formula::atom(Pid::new(name).unwrap())
    }

    #[test]
    fn display_renders_standard_notation() {
        let f = Formula::globally(Formula::implies(p("p"), Formula::eventually(p("q"))));
        assert_eq!(format!("{f}"), "G (p → F q)");
    }

    #[test]
    fn subformulas_are_deduplicated() {
        let shared = p("p");
        let f = Formula::and(shared.clone(), shared);
        // {f, p}
        assert_eq!(f.subformulas().len(), 2);
    }

    #[test]
    fn hash_is_stable_and_structural() {
        let a = Formula::and(p("p"), p("q"));
        let b = Formula::and(p("p"), p("q"));
        assert_eq!(formula_hash(&a), formula_hash(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn hash_distinguishes_structure() {
        let a = Formula::and(p("p"), p("q"));
        let b = Formula::or(p("p"), p("q"));
        assert_ne!(formula_hash(&a), formula_hash(&b));
    }
}
