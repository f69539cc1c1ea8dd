use crate::tableau::TableauNode;
use ltl_formula::Formula;
use std::collections::HashSet;

fn carries(node: &TableauNode, obligation: &Formula) -> bool {
    node.current.contains(obligation) || node.next.contains(obligation)
}

/// Derives one acceptance set per liveness subformula of `formula` (spec
/// §4.3): `ψ U χ` and `F ψ` contribute a strong-eventuality set, `ψ R χ` and
/// `G ψ` contribute a safety set. If none are present, a single set
/// containing every node is produced ("all infinite runs accept").
pub fn generate(formula: &Formula, nodes: &[TableauNode]) -> Vec<HashSet<usize>> {
    let liveness = liveness_subformulas(formula);
    if liveness.is_empty() {
        return vec![(0..nodes.len()).collect()];
    }

    liveness
        .into_iter()
        .map(|obligation| {
            (0..nodes.len())
                .filter(|&q| accepts(&obligation, &nodes[q]))
                .collect()
        })
        .collect()
}

fn accepts(obligation: &Formula, node: &TableauNode) -> bool {
    match obligation {
        // Strong eventuality: accept once χ holds, or once the obligation
        // has been discharged (no longer carried).
        Formula::Until(_, chi) => carries(node, chi) || !carries(node, obligation),
        Formula::Eventually(psi) => carries(node, psi) || !carries(node, obligation),
        // Safety: accept unless the negation of the guarded formula is
        // witnessed as still-carried — i.e. the obligation was violated.
        Formula::Release(_, chi) => !carries(node, &Formula::not((**chi).clone())),
        Formula::Globally(psi) => !carries(node, &Formula::not((**psi).clone())),
        _ => true,
    }
}

fn liveness_subformulas(formula: &Formula) -> Vec<Formula> {
    formula
        .subformulas()
        .into_iter()
        .filter(|f| {
            matches!(
                f,
                Formula::Until(_, _) | Formula::Release(_, _) | Formula::Eventually(_) | Formula::Globally(_)
            )
        })
        .collect()
}
