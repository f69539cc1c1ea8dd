use crate::ba::Ba;
use crate::error::AutomataError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// A lasso-shaped accepting run: a finite prefix from an initial state to
/// the cycle's pivot, followed by the repeating cycle (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lasso<S> {
    pub prefix: Vec<S>,
    pub cycle: Vec<S>,
}

/// Decides Büchi emptiness of `ba` and returns a witnessing lasso if one
/// exists (spec §4.8). Tries nested DFS first, then falls back to an SCC
/// sweep if nested DFS finds nothing but accepting states remain reachable.
pub fn find_accepting_lasso<S>(ba: &Ba<S>) -> Result<Option<Lasso<S>>, AutomataError>
where
    S: Clone + Eq + Hash,
{
    if let Some(lasso) = nested_dfs(ba)? {
        return Ok(Some(lasso));
    }

    let reachable_accepting = ba.accepting.iter().any(|s| ba.states.contains(s));
    if !reachable_accepting {
        return Ok(None);
    }

    scc_fallback(ba)
}

fn nested_dfs<S>(ba: &Ba<S>) -> Result<Option<Lasso<S>>, AutomataError>
where
    S: Clone + Eq + Hash,
{
    let mut visited: HashSet<S> = HashSet::new();
    let mut parent: HashMap<S, S> = HashMap::new();
    let roots: HashSet<S> = ba.initial.iter().cloned().collect();

    for root in &ba.initial {
        if visited.contains(root) {
            continue;
        }
        if ba.accepting.contains(root) && ba.successors(root).is_empty() {
            return Ok(Some(Lasso {
                prefix: Vec::new(),
                cycle: vec![root.clone()],
            }));
        }

        visited.insert(root.clone());
        let mut stack: Vec<(S, usize)> = vec![(root.clone(), 0)];

        while let Some((state, idx)) = stack.last().cloned() {
            let successors = ba.successors(&state);
            if idx < successors.len() {
                stack.last_mut().unwrap().1 += 1;
                let (_, next) = successors[idx].clone();
                if visited.insert(next.clone()) {
                    parent.insert(next.clone(), state.clone());
                    stack.push((next, 0));
                }
                continue;
            }

            stack.pop();
            if ba.accepting.contains(&state) {
                if let Some(cycle) = find_cycle_back_to(ba, &state) {
                    // The prefix already ends at the pivot; the pivot is
                    // restated as the cycle's first element, not duplicated.
                    let mut prefix = reconstruct_path(&parent, &roots, &state)?;
                    prefix.pop();
                    return Ok(Some(Lasso { prefix, cycle }));
                }
            }
        }
    }

    Ok(None)
}

/// Inner DFS: searches the states reachable from `target` for an edge back
/// to `target`, returning the closing path `[target, .., closing_state]`.
fn find_cycle_back_to<S>(ba: &Ba<S>, target: &S) -> Option<Vec<S>>
where
    S: Clone + Eq + Hash,
{
    let mut visited: HashSet<S> = HashSet::from([target.clone()]);
    let mut inner_parent: HashMap<S, S> = HashMap::new();
    let mut stack: Vec<S> = vec![target.clone()];
    let singleton_root: HashSet<S> = HashSet::from([target.clone()]);

    while let Some(state) = stack.pop() {
        for (_, next) in ba.successors(&state) {
            if next == target {
                return reconstruct_path(&inner_parent, &singleton_root, &state).ok();
            }
            if visited.insert(next.clone()) {
                inner_parent.insert(next.clone(), state.clone());
                stack.push(next.clone());
            }
        }
    }
    None
}

/// Walks `parent` backward from `leaf` to a member of `roots`, returning the
/// path in forward order. An error here means a parent pointer was missing
/// for a node that should have one — an invariant violation, never a
/// silently truncated counterexample (spec §4.8 "Failure semantics").
fn reconstruct_path<S>(
    parent: &HashMap<S, S>,
    roots: &HashSet<S>,
    leaf: &S,
) -> Result<Vec<S>, AutomataError>
where
    S: Clone + Eq + Hash,
{
    let mut path = vec![leaf.clone()];
    let mut current = leaf.clone();
    while !roots.contains(&current) {
        match parent.get(&current) {
            Some(p) => {
                current = p.clone();
                path.push(current.clone());
            }
            None => {
                return Err(AutomataError::Internal(
                    "missing parent pointer during lasso reconstruction".to_string(),
                ))
            }
        }
    }
    path.reverse();
    Ok(path)
}

fn scc_fallback<S>(ba: &Ba<S>) -> Result<Option<Lasso<S>>, AutomataError>
where
    S: Clone + Eq + Hash,
{
    for scc in tarjan_sccs(ba) {
        let members: HashSet<S> = scc.iter().cloned().collect();
        let nontrivial = members.len() > 1
            || members.iter().next().map_or(false, |s| {
                ba.successors(s).iter().any(|(_, t)| t == s)
            });
        if !nontrivial {
            continue;
        }
        let Some(pivot) = scc.iter().find(|s| ba.accepting.contains(*s)) else {
            continue;
        };
        let Some(cycle) = find_cycle_back_to(ba, pivot) else {
            continue;
        };
        let mut prefix = bfs_path(ba, &ba.initial, pivot)?;
        prefix.pop();
        return Ok(Some(Lasso { prefix, cycle }));
    }
    Ok(None)
}

fn bfs_path<S>(ba: &Ba<S>, starts: &[S], target: &S) -> Result<Vec<S>, AutomataError>
where
    S: Clone + Eq + Hash,
{
    let roots: HashSet<S> = starts.iter().cloned().collect();
    if roots.contains(target) {
        return Ok(vec![target.clone()]);
    }
    let mut parent: HashMap<S, S> = HashMap::new();
    let mut visited: HashSet<S> = roots.clone();
    let mut queue: VecDeque<S> = starts.iter().cloned().collect();

    while let Some(state) = queue.pop_front() {
        for (_, next) in ba.successors(&state) {
            if next == target {
                parent.insert(next.clone(), state.clone());
                return reconstruct_path(&parent, &roots, next);
            }
            if visited.insert(next.clone()) {
                parent.insert(next.clone(), state.clone());
                queue.push_back(next.clone());
            }
        }
    }
    Err(AutomataError::Internal(
        "SCC pivot state is unreachable from any initial state".to_string(),
    ))
}

/// Tarjan's strongly connected components algorithm, iterative to avoid
/// recursion depth limits on large product automata.
fn tarjan_sccs<S>(ba: &Ba<S>) -> Vec<Vec<S>>
where
    S: Clone + Eq + Hash,
{
    let mut index_of: HashMap<S, usize> = HashMap::new();
    let mut lowlink: HashMap<S, usize> = HashMap::new();
    let mut on_stack: HashSet<S> = HashSet::new();
    let mut tarjan_stack: Vec<S> = Vec::new();
    let mut next_index = 0usize;
    let mut sccs: Vec<Vec<S>> = Vec::new();

    for start in &ba.states {
        if index_of.contains_key(start) {
            continue;
        }
        let mut work: Vec<(S, usize)> = vec![(start.clone(), 0)];
        index_of.insert(start.clone(), next_index);
        lowlink.insert(start.clone(), next_index);
        next_index += 1;
        tarjan_stack.push(start.clone());
        on_stack.insert(start.clone());

        while let Some((v, idx)) = work.last().cloned() {
            let successors = ba.successors(&v);
            if idx < successors.len() {
                work.last_mut().unwrap().1 += 1;
                let (_, w) = successors[idx].clone();
                if !index_of.contains_key(&w) {
                    index_of.insert(w.clone(), next_index);
                    lowlink.insert(w.clone(), next_index);
                    next_index += 1;
                    tarjan_stack.push(w.clone());
                    on_stack.insert(w.clone());
                    work.push((w, 0));
                } else if on_stack.contains(&w) {
                    let w_index = index_of[&w];
                    if w_index < lowlink[&v] {
                        lowlink.insert(v.clone(), w_index);
                    }
                }
                continue;
            }

            work.pop();
            if let Some((parent, _)) = work.last() {
                if lowlink[&v] < lowlink[parent] {
                    lowlink.insert(parent.clone(), lowlink[&v]);
                }
            }
            if lowlink[&v] == index_of[&v] {
                let mut scc = Vec::new();
                loop {
                    let w = tarjan_stack.pop().expect("tarjan stack underflow");
                    on_stack.remove(&w);
                    let is_root = w == v;
                    scc.push(w);
                    if is_root {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }
    sccs
}
