//! Closedness and Consistency checks and their repair rules (spec §4.3).

use itertools::Itertools;
use tracing::trace;

use crate::oracle::MembershipOracle;
use crate::table::ObservationTable;
use crate::word::{Symbol, Word};

/// A word `s·a` whose row is not yet represented anywhere in `S`.
pub type ClosednessWitness = Word;

/// Two access strings with equal rows whose one-step extensions on `a`
/// disagree.
pub struct ConsistencyWitness {
    pub s1: Word,
    pub s2: Word,
    pub a: Symbol,
}

/// Returns the first `s·a` (in the order spec §4.3 fixes: `S` in
/// insertion order, Σ in its fixed order) whose row is not the row of any
/// access string in `S`, or `None` if the table is closed.
pub fn find_closedness_witness(
    table: &mut ObservationTable,
    alphabet: &[Symbol],
    oracle: &impl MembershipOracle,
) -> Option<ClosednessWitness> {
    let access_strings: Vec<Word> = table.access_strings().cloned().collect();
    let known_rows: Vec<Vec<_>> = access_strings
        .iter()
        .map(|s| table.row(s, oracle))
        .collect();

    for s in &access_strings {
        for a in alphabet {
            let sa = s.extended(a);
            let row_sa = table.row(&sa, oracle);
            if !known_rows.iter().any(|r| r == &row_sa) {
                trace!(witness = ?sa, "closedness violated");
                return Some(sa);
            }
        }
    }
    None
}

/// Returns the first pair `(s1, s2)` with equal rows whose extension on
/// some `a` disagrees, together with that `a`, or `None` if the table is
/// consistent.
pub fn find_consistency_witness(
    table: &mut ObservationTable,
    alphabet: &[Symbol],
    oracle: &impl MembershipOracle,
) -> Option<ConsistencyWitness> {
    let access_strings: Vec<Word> = table.access_strings().cloned().collect();
    for (s1, s2) in access_strings.iter().tuple_combinations() {
        if table.row(s1, oracle) != table.row(s2, oracle) {
            continue;
        }
        for a in alphabet {
            let r1 = table.row(&s1.extended(a), oracle);
            let r2 = table.row(&s2.extended(a), oracle);
            if r1 != r2 {
                trace!(?s1, ?s2, ?a, "consistency violated");
                return Some(ConsistencyWitness {
                    s1: s1.clone(),
                    s2: s2.clone(),
                    a: a.clone(),
                });
            }
        }
    }
    None
}

/// Repairs a closedness violation by adding the witness to `S`.
pub fn repair_closedness(table: &mut ObservationTable, witness: ClosednessWitness) {
    table.add_access(witness);
}

/// Repairs a consistency violation by locating the smallest index `i`
/// where the two one-step extensions disagree and appending `a · E[i]`
/// to `E`.
pub fn repair_consistency(
    table: &mut ObservationTable,
    witness: ConsistencyWitness,
    oracle: &impl MembershipOracle,
) {
    let ConsistencyWitness { s1, s2, a } = witness;
    let r1 = table.row(&s1.extended(&a), oracle);
    let r2 = table.row(&s2.extended(&a), oracle);
    let suffixes: Vec<Word> = table.suffixes().cloned().collect();
    for (i, e) in suffixes.iter().enumerate() {
        if r1[i] != r2[i] {
            let new_suffix = e.with_prefix(&a);
            trace!(?new_suffix, "repairing consistency violation");
            table.add_suffix(new_suffix);
            return;
        }
    }
    unreachable!("consistency witness must disagree at some index in E by construction");
}

/// Runs closedness and consistency checks to a fixed point, applying the
/// repair rules of spec §4.3. Closedness is re-checked after every
/// consistency repair because growing `E` changes every row vector and
/// can unmask new closedness violations.
pub fn close(table: &mut ObservationTable, alphabet: &[Symbol], oracle: &impl MembershipOracle) {
    loop {
        if let Some(witness) = find_closedness_witness(table, alphabet, oracle) {
            repair_closedness(table, witness);
            continue;
        }
        if let Some(witness) = find_consistency_witness(table, alphabet, oracle) {
            repair_consistency(table, witness, oracle);
            continue;
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Output;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// A deterministic in-memory oracle backed by a hand-written Mealy
    /// machine, used purely to exercise the closer in isolation.
    struct MapOracle {
        transitions: HashMap<(u32, String), (u32, String)>,
        initial: u32,
        calls: RefCell<usize>,
    }

    impl MembershipOracle for MapOracle {
        fn ask(&self, word: &Word) -> Vec<Output> {
            *self.calls.borrow_mut() += 1;
            let mut state = self.initial;
            let mut out = vec![];
            for sym in word {
                match self.transitions.get(&(state, sym.as_str().to_string())) {
                    Some((next, o)) => {
                        out.push(Output::new(o.clone()));
                        state = *next;
                    }
                    None => out.push(Output::OFF()),
                }
            }
            out
        }
    }

    #[test_log::test]
    fn close_terminates_and_leaves_table_closed_and_consistent() {
        // 0 --a/x--> 1 --a/y--> 0, both states self-loop on 'b'.
        let mut transitions = HashMap::new();
        transitions.insert((0, "a".to_string()), (1, "x".to_string()));
        transitions.insert((0, "b".to_string()), (0, "z".to_string()));
        transitions.insert((1, "a".to_string()), (0, "y".to_string()));
        transitions.insert((1, "b".to_string()), (1, "z".to_string()));
        let oracle = MapOracle {
            transitions,
            initial: 0,
            calls: RefCell::new(0),
        };
        let alphabet = vec![Symbol::new("a"), Symbol::new("b")];
        let mut table = ObservationTable::new();
        close(&mut table, &alphabet, &oracle);

        assert!(find_closedness_witness(&mut table, &alphabet, &oracle).is_none());
        assert!(find_consistency_witness(&mut table, &alphabet, &oracle).is_none());
    }
}
