use crate::gba::{Gba, NodeId};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// A standard Büchi automaton: `(Q, Σ, δ, Q₀, F ⊆ Q)`, accepting iff some
/// state in `F` is visited infinitely often.
#[derive(Debug, Clone)]
pub struct Ba<S> {
    pub states: Vec<S>,
    pub initial: Vec<S>,
    pub transitions: HashMap<S, Vec<(Symbol, S)>>,
    pub accepting: HashSet<S>,
}

impl<S> Ba<S>
where
    S: Clone + Eq + std::hash::Hash,
{
    pub fn successors(&self, state: &S) -> &[(Symbol, S)] {
        self.transitions
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A GBA state counted against one of its `k` acceptance sets; the state
/// space of the counter-product BA built by [`from_gba`].
pub type CounterState = (NodeId, usize);

/// Converts a GBA to a BA via the counter-indexed product (spec §4.4): the
/// counter cycles `0..k` on transitions out of states counted at index `i`
/// of `Fᵢ`, and `(q, 0)` is accepting iff `q ∈ F₀`.
///
/// `k = 0` (no acceptance sets) is interpreted as "every run accepts": the
/// GBA is copied with every state marked accepting.
pub fn from_gba(gba: &Gba) -> Ba<CounterState> {
    let k = gba.acceptance.len();
    if k == 0 {
        let states: Vec<CounterState> = gba.states.iter().map(|&q| (q, 0)).collect();
        let mut transitions = HashMap::new();
        for &q in &gba.states {
            let edges = gba
                .successors(q)
                .iter()
                .map(|(sym, q2)| (sym.clone(), (*q2, 0)))
                .collect();
            transitions.insert((q, 0), edges);
        }
        return Ba {
            initial: vec![(gba.initial, 0)],
            accepting: states.iter().cloned().collect(),
            states,
            transitions,
        };
    }

    let states: Vec<CounterState> = gba
        .states
        .iter()
        .flat_map(|&q| (0..k).map(move |i| (q, i)))
        .collect();

    let mut transitions: HashMap<CounterState, Vec<(Symbol, CounterState)>> = HashMap::new();
    for &q in &gba.states {
        for i in 0..k {
            let edges = gba
                .successors(q)
                .iter()
                .map(|(sym, q2)| {
                    let j = if gba.acceptance[i].contains(&q) { (i + 1) % k } else { i };
                    (sym.clone(), (*q2, j))
                })
                .collect();
            transitions.insert((q, i), edges);
        }
    }

    let accepting: HashSet<CounterState> = gba.acceptance[0].iter().map(|&q| (q, 0)).collect();

    Ba {
        initial: vec![(gba.initial, 0)],
        states,
        transitions,
        accepting,
    }
}
