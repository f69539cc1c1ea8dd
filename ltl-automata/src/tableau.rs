use crate::error::AutomataError;
use crate::gba::{Gba, NodeId};
use crate::symbol::Alphabet;
use ltl_formula::{formula_hash, Formula, Pid};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// A tableau node: a pair of obligation sets, canonicalized (deduplicated,
/// sorted by content hash) so structural equality is plain `Vec` equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableauNode {
    pub current: Vec<Formula>,
    pub next: Vec<Formula>,
}

impl TableauNode {
    fn canonical(current: HashSet<Formula>, next: HashSet<Formula>) -> Self {
        let mut current: Vec<Formula> = current.into_iter().collect();
        let mut next: Vec<Formula> = next.into_iter().collect();
        current.sort_by_key(formula_hash);
        next.sort_by_key(formula_hash);
        Self { current, next }
    }

    /// The obligations to run through [`solve`] when expanding this node:
    /// what was claimed true on arrival, plus what was deferred to it.
    fn worklist(&self) -> Vec<Formula> {
        self.current.iter().chain(self.next.iter()).cloned().collect()
    }
}

/// One completed branch of the [`solve`] rewriter: the atoms claimed true
/// and false "now", and the obligations deferred to the successor's
/// `current` via `next`.
#[derive(Debug, Clone)]
struct Outcome {
    p_plus: BTreeSet<Pid>,
    p_minus: BTreeSet<Pid>,
    v: HashSet<Formula>,
}

#[derive(Debug, Clone)]
struct Branch {
    worklist: Vec<Formula>,
    processed: HashSet<Formula>,
    v: HashSet<Formula>,
    p_plus: BTreeSet<Pid>,
    p_minus: BTreeSet<Pid>,
}

/// The depth-first rewriter from spec §4.2: expands `worklist` into every
/// consistent `(P⁺, P⁻, V)` outcome. Implemented as controlled recursion
/// with an accumulator, not an explicit stack, per the design note that the
/// accumulator form is easier to reason about for determinism.
fn solve(worklist: Vec<Formula>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    step(
        Branch {
            worklist,
            processed: HashSet::new(),
            v: HashSet::new(),
            p_plus: BTreeSet::new(),
            p_minus: BTreeSet::new(),
        },
        &mut outcomes,
    );
    outcomes
}

fn step(mut branch: Branch, outcomes: &mut Vec<Outcome>) {
    loop {
        let Some(f) = branch.worklist.pop() else {
            outcomes.push(Outcome {
                p_plus: branch.p_plus,
                p_minus: branch.p_minus,
                v: branch.v,
            });
            return;
        };
        if branch.processed.contains(&f) {
            continue;
        }
        branch.processed.insert(f.clone());
        match f {
            Formula::BoolLit(true) => continue,
            Formula::BoolLit(false) => return,
            Formula::Atom(p) => {
                branch.p_plus.insert(p);
            }
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Atom(p) => {
                    branch.p_minus.insert(p.clone());
                }
                other => unreachable!("NNF violation: Not over non-atom {other}"),
            },
            Formula::And(a, b) => {
                branch.worklist.push((*b).clone());
                branch.worklist.push((*a).clone());
            }
            Formula::Or(a, b) => {
                let mut left = branch.clone();
                left.worklist.push((*a).clone());
                step(left, outcomes);
                branch.worklist.push((*b).clone());
                step(branch, outcomes);
                return;
            }
            Formula::Next(a) => {
                branch.v.insert((*a).clone());
            }
            Formula::Until(a, b) => {
                let mut discharge = branch.clone();
                discharge.worklist.push((*b).clone());
                step(discharge, outcomes);
                branch.worklist.push((*a).clone());
                branch.v.insert(Formula::until((*a).clone(), (*b).clone()));
                step(branch, outcomes);
                return;
            }
            Formula::Release(a, b) => {
                let mut discharge = branch.clone();
                discharge.worklist.push((*b).clone());
                discharge.worklist.push((*a).clone());
                step(discharge, outcomes);
                branch.worklist.push((*b).clone());
                branch.v.insert(Formula::release((*a).clone(), (*b).clone()));
                step(branch, outcomes);
                return;
            }
            Formula::Eventually(a) => {
                let mut discharge = branch.clone();
                discharge.worklist.push((*a).clone());
                step(discharge, outcomes);
                branch.v.insert(Formula::eventually((*a).clone()));
                step(branch, outcomes);
                return;
            }
            Formula::Globally(a) => {
                branch.worklist.push((*a).clone());
                branch.v.insert(Formula::globally((*a).clone()));
            }
            Formula::Implies(_, _) | Formula::WeakUntil(_, _) => {
                unreachable!("eliminated by nnf before reaching the tableau")
            }
        }
    }
}

/// Builds a GBA from an NNF formula via tableau expansion, returning the
/// automaton plus the node table (needed by [`crate::acceptance`] to derive
/// acceptance sets).
///
/// `max_nodes` enforces the §4.2 safety valve; exceeding it aborts with
/// [`AutomataError::TableauNodeLimitExceeded`] rather than building an
/// unbounded automaton.
pub fn build_gba(
    nnf_formula: &Formula,
    alphabet: &Alphabet,
    max_nodes: usize,
) -> Result<(Gba, Vec<TableauNode>), AutomataError> {
    if max_nodes == 0 {
        return Err(AutomataError::TableauNodeLimitExceeded { built: 1, limit: 0 });
    }
    let initial = TableauNode::canonical([nnf_formula.clone()].into_iter().collect(), HashSet::new());

    let mut nodes: Vec<TableauNode> = vec![initial.clone()];
    let mut index: HashMap<TableauNode, NodeId> = HashMap::from([(initial, 0)]);
    let mut transitions: HashMap<NodeId, Vec<(crate::symbol::Symbol, NodeId)>> = HashMap::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::from([0]);
    let mut expanded: HashSet<NodeId> = HashSet::new();

    while let Some(id) = frontier.pop_front() {
        if !expanded.insert(id) {
            continue;
        }
        let outcomes = solve(nodes[id].worklist());
        let mut edges: Vec<(crate::symbol::Symbol, NodeId)> = Vec::new();

        for symbol in alphabet.symbols() {
            for outcome in &outcomes {
                if !outcome.p_plus.is_disjoint(&outcome.p_minus) {
                    continue; // internally inconsistent branch
                }
                if !symbol.satisfies(&outcome.p_plus, &outcome.p_minus) {
                    continue;
                }
                let succ_current: HashSet<Formula> = outcome
                    .p_plus
                    .iter()
                    .cloned()
                    .map(Formula::atom)
                    .chain(
                        outcome
                            .p_minus
                            .iter()
                            .cloned()
                            .map(|p| Formula::not(Formula::atom(p))),
                    )
                    .collect();
                let succ_node = TableauNode::canonical(succ_current, outcome.v.clone());

                let succ_id = match index.get(&succ_node) {
                    Some(&id) => id,
                    None => {
                        let id = nodes.len();
                        nodes.push(succ_node.clone());
                        index.insert(succ_node, id);
                        frontier.push_back(id);
                        if nodes.len() > max_nodes {
                            return Err(AutomataError::TableauNodeLimitExceeded {
                                built: nodes.len(),
                                limit: max_nodes,
                            });
                        }
                        id
                    }
                };

                if !edges.iter().any(|(s, t)| *s == *symbol && *t == succ_id) {
                    edges.push((symbol.clone(), succ_id));
                }
            }
        }

        transitions.insert(id, edges);
    }

    let gba = Gba {
        states: (0..nodes.len()).collect(),
        initial: 0,
        transitions,
        acceptance: crate::acceptance::generate(nnf_formula, &nodes),
    };
    Ok((gba, nodes))
}
