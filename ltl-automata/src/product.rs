use crate::ba::Ba;
use crate::error::AutomataError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Builds the synchronous product of `ba_m` (the lifted model, whose own
/// acceptance is trivial — every state accepts) and `ba_phi` (the BA for
/// `¬φ`), by forward reachability from the initial states (spec §4.7).
/// Unreachable product states are never constructed.
pub fn synchronous_product<A, B>(
    ba_m: &Ba<A>,
    ba_phi: &Ba<B>,
    max_states: usize,
) -> Result<Ba<(A, B)>, AutomataError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
{
    let mut states: Vec<(A, B)> = Vec::new();
    let mut seen: HashSet<(A, B)> = HashSet::new();
    let mut transitions: HashMap<(A, B), Vec<(crate::symbol::Symbol, (A, B))>> = HashMap::new();
    let mut queue: VecDeque<(A, B)> = VecDeque::new();

    for s in &ba_m.initial {
        for q in &ba_phi.initial {
            let state = (s.clone(), q.clone());
            if seen.insert(state.clone()) {
                states.push(state.clone());
                queue.push_back(state);
            }
        }
    }
    if states.len() > max_states {
        return Err(AutomataError::ProductStateLimitExceeded {
            built: states.len(),
            limit: max_states,
        });
    }

    while let Some((s, q)) = queue.pop_front() {
        let mut edges = Vec::new();
        for (sym_m, s2) in ba_m.successors(&s) {
            for (sym_phi, q2) in ba_phi.successors(&q) {
                if sym_m != sym_phi {
                    continue;
                }
                let next = (s2.clone(), q2.clone());
                if seen.insert(next.clone()) {
                    states.push(next.clone());
                    queue.push_back(next.clone());
                    if states.len() > max_states {
                        return Err(AutomataError::ProductStateLimitExceeded {
                            built: states.len(),
                            limit: max_states,
                        });
                    }
                }
                edges.push((sym_m.clone(), next));
            }
        }
        transitions.insert((s, q), edges);
    }

    let accepting: HashSet<(A, B)> = states
        .iter()
        .filter(|(_, q)| ba_phi.accepting.contains(q))
        .cloned()
        .collect();

    let initial: Vec<(A, B)> = ba_m
        .initial
        .iter()
        .flat_map(|s| {
            ba_phi
                .initial
                .iter()
                .map(move |q| (s.clone(), q.clone()))
        })
        .filter(|state| seen.contains(state))
        .collect();

    Ok(Ba {
        states,
        initial,
        transitions,
        accepting,
    })
}
