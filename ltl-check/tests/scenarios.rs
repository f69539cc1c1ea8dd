//! Hand-written seed scenarios over the two reference models from the
//! testable-properties section: M1 (a 4-state cycle with a disconnected
//! self-loop) and M2 (a single-state self-loop).

use ltl_check::{check, CheckConfig, CheckResult, Counterexample, Formula, Kripke, Pid};
use std::collections::BTreeSet as Set;

struct M1;

impl Kripke for M1 {
    type State = u32;

    fn all_states(&self) -> Vec<u32> {
        vec![0, 1, 2, 3]
    }

    fn initial_states(&self) -> Vec<u32> {
        vec![0]
    }

    fn successors(&self, state: &u32) -> Vec<u32> {
        match state {
            0 => vec![1],
            1 => vec![2],
            2 => vec![0],
            3 => vec![3],
            _ => vec![],
        }
    }

    fn atomic_props_true(&self, state: &u32) -> Set<Pid> {
        match state {
            0 => Set::from([Pid::new("p").unwrap()]),
            1 => Set::from([Pid::new("q").unwrap()]),
            2 => Set::from([Pid::new("p").unwrap(), Pid::new("q").unwrap()]),
            3 => Set::from([Pid::new("r").unwrap()]),
            _ => Set::new(),
        }
    }
}

struct M2;

impl Kripke for M2 {
    type State = u32;
    fn all_states(&self) -> Vec<u32> {
        vec![3]
    }
    fn initial_states(&self) -> Vec<u32> {
        vec![3]
    }
    fn successors(&self, _state: &u32) -> Vec<u32> {
        vec![3]
    }
    fn atomic_props_true(&self, _state: &u32) -> Set<Pid> {
        Set::from([Pid::new("r").unwrap()])
    }
}

fn p() -> Formula {
    Formula::atom(Pid::new("p").unwrap())
}
fn q() -> Formula {
    Formula::atom(Pid::new("q").unwrap())
}
fn r() -> Formula {
    Formula::atom(Pid::new("r").unwrap())
}

#[test]
fn scenario_1_atom_p_holds() {
    assert_eq!(
        check(&p(), &M1, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
}

#[test]
fn scenario_2_atom_q_fails() {
    let result = check(&q(), &M1, &CheckConfig::default()).unwrap();
    match result {
        CheckResult::Fails(cex) => assert_eq!(cex.prefix, vec![0]),
        CheckResult::Holds => panic!("expected Fails"),
    }
}

#[test]
fn scenario_3_eventually_q_holds() {
    assert_eq!(
        check(&Formula::eventually(q()), &M1, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
}

#[test]
fn scenario_4_globally_p_fails() {
    let result = check(&Formula::globally(p()), &M1, &CheckConfig::default()).unwrap();
    assert!(matches!(result, CheckResult::Fails(_)));
}

#[test]
fn scenario_5_next_q_holds() {
    assert_eq!(
        check(&Formula::next(q()), &M1, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
}

#[test]
fn scenario_6_p_until_q_holds() {
    assert_eq!(
        check(&Formula::until(p(), q()), &M1, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
}

#[test]
fn scenario_7_q_until_r_fails() {
    let result = check(&Formula::until(q(), r()), &M1, &CheckConfig::default()).unwrap();
    assert!(matches!(result, CheckResult::Fails(_)));
}

#[test]
fn scenario_8_globally_r_holds_on_self_loop() {
    assert_eq!(
        check(&Formula::globally(r()), &M2, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
}

#[test]
fn scenario_9_true_and_false() {
    assert_eq!(
        check(&Formula::top(), &M1, &CheckConfig::default()).unwrap(),
        CheckResult::Holds
    );
    assert!(matches!(
        check(&Formula::bottom(), &M1, &CheckConfig::default()).unwrap(),
        CheckResult::Fails(_)
    ));
}

#[test]
fn counterexample_validity_for_scenario_4() {
    let result = check(&Formula::globally(p()), &M1, &CheckConfig::default()).unwrap();
    let Counterexample { prefix, cycle } = match result {
        CheckResult::Fails(cex) => cex,
        CheckResult::Holds => panic!("expected Fails"),
    };
    assert_eq!(prefix.first().copied(), Some(0));
    let m = M1;
    let full: Vec<u32> = prefix.iter().chain(cycle.iter()).copied().collect();
    for pair in full.windows(2) {
        assert!(m.successors(&pair[0]).contains(&pair[1]));
    }
    if let (Some(&last), Some(&first)) = (cycle.last(), cycle.first()) {
        assert!(m.successors(&last).contains(&first));
    }
    assert!(!cycle
        .iter()
        .all(|s| m.atomic_props_true(s).contains(&Pid::new("p").unwrap())));
}
