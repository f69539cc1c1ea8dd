//! Property-based checks for the orchestrator's documented universal
//! properties: dual consistency, determinism, and counterexample validity
//! over randomly generated small models and formulas.

use ltl_check::{check, CheckConfig, CheckResult, Formula, Kripke, Pid};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
struct SmallModel {
    transitions: Vec<Vec<u32>>,
    labels: Vec<BTreeSet<Pid>>,
    initial: Vec<u32>,
}

impl Kripke for SmallModel {
    type State = u32;

    fn all_states(&self) -> Vec<u32> {
        (0..self.transitions.len() as u32).collect()
    }

    fn initial_states(&self) -> Vec<u32> {
        self.initial.clone()
    }

    fn successors(&self, state: &u32) -> Vec<u32> {
        self.transitions[*state as usize].clone()
    }

    fn atomic_props_true(&self, state: &u32) -> BTreeSet<Pid> {
        self.labels[*state as usize].clone()
    }
}

fn small_model_strategy() -> impl Strategy<Value = SmallModel> {
    let n = 3usize;
    let successor = prop::collection::vec(0..n as u32, 1..=2);
    let label = prop::collection::btree_set(prop_oneof![Just(0u8), Just(1u8)], 0..=2)
        .prop_map(|bits| {
            bits.into_iter()
                .map(|b| Pid::new(if b == 0 { "p" } else { "q" }).unwrap())
                .collect::<BTreeSet<_>>()
        });

    (
        prop::collection::vec(successor, n),
        prop::collection::vec(label, n),
    )
        .prop_map(move |(transitions, labels)| SmallModel {
            transitions,
            labels,
            initial: vec![0],
        })
}

fn small_formula_strategy() -> impl Strategy<Value = Formula> {
    let atom = prop_oneof![Just("p"), Just("q")].prop_map(|n| Formula::atom(Pid::new(n).unwrap()));
    atom.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            inner.clone().prop_map(Formula::eventually),
            inner.clone().prop_map(Formula::globally),
            (inner.clone(), inner).prop_map(|(a, b)| Formula::until(a, b)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn determinism_repeated_calls_agree(f in small_formula_strategy(), m in small_model_strategy()) {
        let config = CheckConfig::default();
        let first = check(&f, &m, &config);
        let second = check(&f, &m, &config);
        match (first, second) {
            (Ok(CheckResult::Holds), Ok(CheckResult::Holds)) => {}
            (Ok(CheckResult::Fails(_)), Ok(CheckResult::Fails(_))) => {}
            (Err(_), Err(_)) => {}
            other => prop_assert!(false, "check was not deterministic: {:?}", other),
        }
    }

    #[test]
    fn phi_holding_rules_out_not_phi_holding(f in small_formula_strategy(), m in small_model_strategy()) {
        // every generated model has a total transition relation, so at least
        // one infinite trace always exists from the initial state; phi and
        // not(phi) can therefore never both hold.
        let config = CheckConfig::default();
        let phi = check(&f.clone(), &m, &config).unwrap();
        if matches!(phi, CheckResult::Holds) {
            let not_phi = check(&Formula::not(f), &m, &config).unwrap();
            prop_assert!(matches!(not_phi, CheckResult::Fails(_)));
        }
    }

    #[test]
    fn counterexample_validity(f in small_formula_strategy(), m in small_model_strategy()) {
        let config = CheckConfig::default();
        if let Ok(CheckResult::Fails(cex)) = check(&f, &m, &config) {
            if let Some(&first) = cex.prefix.first() {
                prop_assert!(m.initial_states().contains(&first));
            } else if let Some(&first) = cex.cycle.first() {
                prop_assert!(m.initial_states().contains(&first));
            }
            let full: Vec<u32> = cex.prefix.iter().chain(cex.cycle.iter()).copied().collect();
            for pair in full.windows(2) {
                prop_assert!(m.successors(&pair[0]).contains(&pair[1]));
            }
            if let (Some(&last), Some(&first)) = (cex.cycle.last(), cex.cycle.first()) {
                prop_assert!(m.successors(&last).contains(&first));
            }
        }
    }
}

#[test]
fn empty_initial_vacuity_holds_for_any_atom() {
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
        fn atomic_props_true(&self, _state: &u32) -> BTreeSet<Pid> {
            BTreeSet::new()
        }
    }

    let p = Formula::atom(Pid::new("p").unwrap());
    assert_eq!(
        check(&p, &Empty, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
    assert!(matches!(
        check(&Formula::not(p), &Empty, &CheckConfig::default()).unwrap(),
        CheckResult::Fails(_)
    ));
}
