use crate::formula::Formula;

/// Rewrites `formula` into negation normal form: negation appears only
/// directly above atoms, and `Implies` is eliminated.
///
/// Implemented as a single negation-accumulating recursion (`go(f, negated)`)
/// rather than a literal double-negation/De-Morgan rewrite loop — the two are
/// rule-equivalent (each `Formula` shape has exactly one NNF image under a
/// given polarity) but the accumulator form needs no fixpoint and terminates
/// in one pass over the formula tree.
pub fn nnf(formula: &Formula) -> Formula {
    go(formula, false)
}

fn go(formula: &Formula, negated: bool) -> Formula {
    match formula {
        Formula::BoolLit(b) => Formula::BoolLit(b ^ negated),
        Formula::Atom(p) => {
            if negated {
                Formula::not(Formula::Atom(p.clone()))
            } else {
                Formula::Atom(p.clone())
            }
        }
        Formula::Not(a) => go(a, !negated),
        Formula::Next(a) => Formula::next(go(a, negated)),
        Formula::Eventually(a) => {
            if negated {
                Formula::globally(go(a, true))
            } else {
                Formula::eventually(go(a, false))
            }
        }
        Formula::Globally(a) => {
            if negated {
                Formula::eventually(go(a, true))
            } else {
                Formula::globally(go(a, false))
            }
        }
        Formula::And(a, b) => {
            if negated {
                Formula::or(go(a, true), go(b, true))
            } else {
                Formula::and(go(a, false), go(b, false))
            }
        }
        Formula::Or(a, b) => {
            if negated {
                Formula::and(go(a, true), go(b, true))
            } else {
                Formula::or(go(a, false), go(b, false))
            }
        }
        Formula::Implies(a, b) => {
            // a -> b  ==  !a \/ b
            if negated {
                Formula::and(go(a, false), go(b, true))
            } else {
                Formula::or(go(a, true), go(b, false))
            }
        }
        Formula::Until(a, b) => {
            if negated {
                Formula::release(go(a, true), go(b, true))
            } else {
                Formula::until(go(a, false), go(b, false))
            }
        }
        // WeakUntil is eliminated, not preserved: a W b == (a U b) \/ G a.
        Formula::WeakUntil(a, b) => {
            if negated {
                Formula::and(
                    Formula::release(go(b, true), go(a, true)),
                    Formula::eventually(go(a, true)),
                )
            } else {
                Formula::or(
                    Formula::until(go(a, false), go(b, false)),
                    Formula::globally(go(a, false)),
                )
            }
        }
        Formula::Release(a, b) => {
            if negated {
                Formula::until(go(a, true), go(b, true))
            } else {
                Formula::release(go(a, false), go(b, false))
            }
        }
    }
}

/// `true` if every `Not` node in `formula` is applied directly to an atom,
/// and neither `Implies` nor `WeakUntil` remain (both are eliminated by
/// [`nnf`]).
pub fn is_nnf(formula: &Formula) -> bool {
    match formula {
        Formula::BoolLit(_) | Formula::Atom(_) => true,
        Formula::Not(a) => matches!(a.as_ref(), Formula::Atom(_)),
        Formula::Implies(_, _) | Formula::WeakUntil(_, _) => false,
        Formula::Next(a) | Formula::Eventually(a) | Formula::Globally(a) => is_nnf(a),
        Formula::And(a, b) | Formula::Or(a, b) | Formula::Until(a, b) | Formula::Release(a, b) => {
            is_nnf(a) && is_nnf(b)
        }
    }
}
