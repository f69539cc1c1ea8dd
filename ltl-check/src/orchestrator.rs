use crate::error::ModelCheckError;
use ltl_automata::{
    build_gba, find_accepting_lasso, from_gba, lift_model, synchronous_product, validate_model,
    Alphabet, Kripke, ModelState,
};
use ltl_formula::{nnf, Formula, Pid};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Resource limits for one `check` invocation (spec §5). Mirrors the
/// teacher's small `Copy`/`Clone` config-with-`Default` convention
/// (`GoapPlannerConfig`, `Z3Config`).
#[derive(Debug, Clone, Copy)]
pub struct CheckConfig {
    /// Tableau node cap (spec §4.2 default floor: 150).
    pub max_tableau_nodes: usize,
    /// Product-automaton state cap (spec §5, implementation-defined).
    pub max_product_states: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_tableau_nodes: 150,
            max_product_states: 50_000,
        }
    }
}

/// A lasso-shaped counterexample projected onto model states only — the
/// synthetic `⊥_init` entry and the automaton component are both dropped
/// (spec §4.9 "Result shape").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterexample<S> {
    pub prefix: Vec<S>,
    pub cycle: Vec<S>,
}

/// The outcome of `check(φ, M)` (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult<S> {
    Holds,
    Fails(Counterexample<S>),
}

/// Decides whether every infinite execution of `model` starting from an
/// initial state satisfies `formula` (spec §4.9).
#[instrument(skip(formula, model, config))]
pub fn check<M: Kripke>(
    formula: &Formula,
    model: &M,
    config: &CheckConfig,
) -> Result<CheckResult<M::State>, ModelCheckError> {
    validate_model(model)?;

    if let Some(result) = fast_path(formula, model)? {
        return Ok(result);
    }

    general_case(formula, model, config)
}

fn fast_path<M: Kripke>(
    formula: &Formula,
    model: &M,
) -> Result<Option<CheckResult<M::State>>, ModelCheckError> {
    match formula {
        Formula::BoolLit(true) => Ok(Some(CheckResult::Holds)),
        Formula::BoolLit(false) => {
            let initial = model.initial_states();
            let cycle = initial.into_iter().next().into_iter().collect();
            Ok(Some(CheckResult::Fails(Counterexample {
                prefix: Vec::new(),
                cycle,
            })))
        }
        Formula::Atom(p) => {
            let initial = model.initial_states();
            let holds = initial
                .iter()
                .all(|s| model.atomic_props_true(s).contains(p));
            Ok(Some(if holds {
                CheckResult::Holds
            } else {
                CheckResult::Fails(Counterexample {
                    prefix: vec![initial.into_iter().next().expect("non-holding implies non-empty S0")],
                    cycle: Vec::new(),
                })
            }))
        }
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Atom(p) => {
                let initial = model.initial_states();
                if initial.is_empty() {
                    return Ok(Some(CheckResult::Fails(Counterexample {
                        prefix: Vec::new(),
                        cycle: Vec::new(),
                    })));
                }
                let holds = initial
                    .iter()
                    .all(|s| !model.atomic_props_true(s).contains(p));
                Ok(Some(if holds {
                    CheckResult::Holds
                } else {
                    CheckResult::Fails(Counterexample {
                        prefix: vec![initial
                            .into_iter()
                            .find(|s| model.atomic_props_true(s).contains(p))
                            .expect("non-holding implies a witnessing state")],
                        cycle: Vec::new(),
                    })
                }))
            }
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

fn general_case<M: Kripke>(
    formula: &Formula,
    model: &M,
    config: &CheckConfig,
) -> Result<CheckResult<M::State>, ModelCheckError> {
    let vocabulary = relevant_vocabulary(formula, model);
    let alphabet = Alphabet::new(vocabulary.clone());

    let negated_nnf = nnf(&Formula::not(formula.clone()));
    debug!(%negated_nnf, "built nnf(not phi)");

    let (gba, _) = build_gba(&negated_nnf, &alphabet, config.max_tableau_nodes)?;
    let ba_phi = from_gba(&gba);
    let ba_m = lift_model(model, &vocabulary)?;
    let product = synchronous_product(&ba_m, &ba_phi, config.max_product_states)?;

    match find_accepting_lasso(&product)? {
        None => Ok(CheckResult::Holds),
        Some(lasso) => {
            let project = |states: Vec<(ModelState<M::State>, _)>| -> Vec<M::State> {
                states
                    .into_iter()
                    .filter_map(|(ms, _)| match ms {
                        ModelState::State(s) => Some(s),
                        ModelState::Init => None,
                    })
                    .collect()
            };
            Ok(CheckResult::Fails(Counterexample {
                prefix: project(lasso.prefix),
                cycle: project(lasso.cycle),
            }))
        }
    }
}

fn relevant_vocabulary<M: Kripke>(formula: &Formula, model: &M) -> Vec<Pid> {
    let mut vocabulary: BTreeSet<Pid> = atoms_in(formula);
    for state in model.all_states() {
        vocabulary.extend(model.atomic_props_true(&state));
    }
    vocabulary.into_iter().collect()
}

fn atoms_in(formula: &Formula) -> BTreeSet<Pid> {
    let mut out = BTreeSet::new();
    collect_atoms(formula, &mut out);
    out
}

fn collect_atoms(formula: &Formula, out: &mut BTreeSet<Pid>) {
    match formula {
        Formula::BoolLit(_) => {}
        Formula::Atom(p) => {
            out.insert(p.clone());
        }
        Formula::Not(a) | Formula::Next(a) | Formula::Eventually(a) | Formula::Globally(a) => {
            collect_atoms(a, out)
        }
        Formula::And(a, b)
        | Formula::Or(a, b)
        | Formula::Implies(a, b)
        | Formula::Until(a, b)
        | Formula::WeakUntil(a, b)
        | Formula::Release(a, b) => {
            collect_atoms(a, out);
            collect_atoms(b, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet as Set;

    struct Empty;

    impl Kripke for Empty {
        type State = u32;
        fn all_states(&self) -> Vec<u32> {
            vec![]
        }
        fn initial_states(&self) -> Vec<u32> {
            vec![]
        }
        fn successors(&self, _state: &u32) -> Vec<u32> {
            vec![]
        }
        fn atomic_props_true(&self, _state: &u32) -> Set<Pid> {
            Set::new()
        }
    }

    fn p() -> Formula {
        Formula::atom(Pid::new("p").unwrap())
    }

    #[test]
    fn empty_initial_vacuity() {
        assert_eq!(
            check(&p(), &Empty, &CheckConfig::default()).unwrap(),
            CheckResult::Holds
        );
        assert_eq!(
            check(&Formula::not(p()), &Empty, &CheckConfig::default()).unwrap(),
            CheckResult::Fails(Counterexample {
                prefix: Vec::new(),
                cycle: Vec::new(),
            })
        );
    }
}
