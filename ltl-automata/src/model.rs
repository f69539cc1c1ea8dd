use crate::ba::Ba;
use crate::error::AutomataError;
use crate::symbol::Symbol;
use ltl_formula::Pid;
use std::collections::{BTreeSet, HashMap, HashSet};

/// The finite-state transition system being checked (spec §6, "Consumed —
/// Kripke structure"). `State` must be equatable and hashable; the checker
/// never mutates it.
pub trait Kripke {
    type State: Clone + Eq + std::hash::Hash;

    fn all_states(&self) -> Vec<Self::State>;
    fn initial_states(&self) -> Vec<Self::State>;
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;
    fn atomic_props_true(&self, state: &Self::State) -> BTreeSet<Pid>;
}

/// A Kripke state, or the synthetic pre-initial state `⊥_init` the lifter
/// adds so the BA has a single, edge-free entry point (spec §4.5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelState<S> {
    Init,
    State(S),
}

/// Validates `S₀ ⊆ S` (spec §4.6), the only structural precondition the
/// model must satisfy before product construction.
pub fn validate<M: Kripke>(model: &M) -> Result<(), AutomataError> {
    let all: HashSet<M::State> = model.all_states().into_iter().collect();
    for s0 in model.initial_states() {
        if !all.contains(&s0) {
            return Err(AutomataError::InvalidModel(
                "initial state is not a member of the model's state set".to_string(),
            ));
        }
    }
    Ok(())
}

/// Lifts a Kripke structure into an always-accepting BA (spec §4.5). Terminal
/// states (no outgoing edges) receive an implicit self-loop so every path
/// extends to an infinite one.
///
/// `vocabulary` is the same relevant-proposition vocabulary the ¬φ
/// automaton's alphabet was enumerated over; state labels are projected onto
/// it so transition symbols compare equal across both automata during
/// product construction (§4.7).
pub fn lift_model<M: Kripke>(
    model: &M,
    vocabulary: &[Pid],
) -> Result<Ba<ModelState<M::State>>, AutomataError> {
    validate(model)?;

    let project = |props: BTreeSet<Pid>| -> Symbol {
        Symbol::new(props.into_iter().filter(|p| vocabulary.contains(p)))
    };

    let mut transitions: HashMap<ModelState<M::State>, Vec<(Symbol, ModelState<M::State>)>> =
        HashMap::new();
    let mut states: Vec<ModelState<M::State>> = vec![ModelState::Init];

    let init_edges = model
        .initial_states()
        .into_iter()
        .map(|s0| {
            let symbol = project(model.atomic_props_true(&s0));
            (symbol, ModelState::State(s0))
        })
        .collect();
    transitions.insert(ModelState::Init, init_edges);

    for s in model.all_states() {
        states.push(ModelState::State(s.clone()));
        let successors = model.successors(&s);
        let edges: Vec<(Symbol, ModelState<M::State>)> = if successors.is_empty() {
            let symbol = project(model.atomic_props_true(&s));
            vec![(symbol, ModelState::State(s.clone()))]
        } else {
            successors
                .into_iter()
                .map(|s2| {
                    let symbol = project(model.atomic_props_true(&s2));
                    (symbol, ModelState::State(s2))
                })
                .collect()
        };
        transitions.insert(ModelState::State(s), edges);
    }

    let accepting: HashSet<ModelState<M::State>> = states.iter().cloned().collect();

    Ok(Ba {
        initial: vec![ModelState::Init],
        states,
        transitions,
        accepting,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line;

    impl Kripke for Line {
        type State = u32;

        fn all_states(&self) -> Vec<u32> {
            vec![0, 1]
        }

        fn initial_states(&self) -> Vec<u32> {
            vec![0]
        }

        fn successors(&self, state: &u32) -> Vec<u32> {
            match state {
                0 => vec![1],
                _ => vec![],
            }
        }

        fn atomic_props_true(&self, state: &u32) -> BTreeSet<Pid> {
            if *state == 0 {
                BTreeSet::from([Pid::new("p").unwrap()])
            } else {
                BTreeSet::new()
            }
        }
    }

    struct BadModel;

    impl Kripke for BadModel {
        type State = u32;
        fn all_states(&self) -> Vec<u32> {
            vec![0]
        }
        fn initial_states(&self) -> Vec<u32> {
            vec![99]
        }
        fn successors(&self, _state: &u32) -> Vec<u32> {
            vec![]
        }
        fn atomic_props_true(&self, _state: &u32) -> BTreeSet<Pid> {
            BTreeSet::new()
        }
    }

    fn vocab() -> Vec<Pid> {
        vec![Pid::new("p").unwrap()]
    }

    #[test]
    fn terminal_state_gets_self_loop() {
        let ba = lift_model(&Line, &vocab()).unwrap();
        let edges = ba.successors(&ModelState::State(1));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].1, ModelState::State(1));
    }

    #[test]
    fn all_states_including_init_are_accepting() {
        let ba = lift_model(&Line, &vocab()).unwrap();
        assert!(ba.accepting.contains(&ModelState::Init));
        assert!(ba.accepting.contains(&ModelState::State(0)));
    }

    #[test]
    fn rejects_initial_state_outside_state_set() {
        assert!(matches!(
            validate(&BadModel),
            Err(AutomataError::InvalidModel(_))
        ));
    }
}
