use ltl_formula::Pid;
use std::collections::BTreeSet;
use std::fmt;

/// A subset of the relevant propositions: "exactly these hold now, all
/// others are false".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(BTreeSet<Pid>);

impl Symbol {
    pub fn new(props: impl IntoIterator<Item = Pid>) -> Self {
        Self(props.into_iter().collect())
    }

    pub fn contains(&self, p: &Pid) -> bool {
        self.0.contains(p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pid> {
        self.0.iter()
    }

    /// `true` iff `positive ⊆ self` and `negative ∩ self = ∅` — the §4.2
    /// symbol-consistency check for a tableau branch outcome.
    pub fn satisfies(&self, positive: &BTreeSet<Pid>, negative: &BTreeSet<Pid>) -> bool {
        positive.is_subset(&self.0) && negative.is_disjoint(&self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "}}")
    }
}

/// The alphabet Σ: every subset of a fixed, sorted proposition vocabulary.
///
/// Enumerated eagerly (vocabularies are small — bounded by the distinct
/// atoms in a formula plus model labels), in a deterministic order so that
/// transition iteration order, and therefore tie-broken counterexample
/// shapes, are reproducible (spec §4.2 "tie-breaks").
#[derive(Debug, Clone)]
pub struct Alphabet {
    vocabulary: Vec<Pid>,
    symbols: Vec<Symbol>,
}

impl Alphabet {
    pub fn new(mut vocabulary: Vec<Pid>) -> Self {
        vocabulary.sort();
        vocabulary.dedup();
        let n = vocabulary.len();
        let mut symbols = Vec::with_capacity(1usize << n.min(20));
        for mask in 0u32..(1u32 << n) {
            let props = vocabulary
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, p)| p.clone());
            symbols.push(Symbol::new(props));
        }
        Self {
            vocabulary,
            symbols,
        }
    }

    pub fn vocabulary(&self) -> &[Pid] {
        &self.vocabulary
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}
