//! The observation table: access sequences `S`, distinguishing suffixes
//! `E`, and the memoized oracle-response map `T`.

use indexmap::IndexSet;
use std::collections::HashMap;
use tracing::trace;

use crate::oracle::MembershipOracle;
use crate::word::{Output, Word};

/// Stores `S`, `E` and the memoized map `T: Word -> Vec<Output>` described
/// in spec §3/§4.2.
///
/// `S` and `E` are insertion-ordered (`indexmap::IndexSet`) so that
/// iteration matches the fixed order spec §4.3 requires for closedness
/// witness search, and so that row vectors are deterministic for a given
/// `E` snapshot.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    s: IndexSet<Word>,
    e: IndexSet<Word>,
    t: HashMap<Word, Vec<Output>>,
}

impl ObservationTable {
    /// A fresh table with `S = {ε}`, `E = {ε}`, as mandated by spec §4.6's
    /// initial learner state.
    pub fn new() -> Self {
        let mut s = IndexSet::new();
        s.insert(Word::empty());
        let mut e = IndexSet::new();
        e.insert(Word::empty());
        Self {
            s,
            e,
            t: HashMap::new(),
        }
    }

    pub fn access_strings(&self) -> impl Iterator<Item = &Word> {
        self.s.iter()
    }

    pub fn suffixes(&self) -> impl Iterator<Item = &Word> {
        self.e.iter()
    }

    pub fn num_access_strings(&self) -> usize {
        self.s.len()
    }

    pub fn num_suffixes(&self) -> usize {
        self.e.len()
    }

    pub fn contains_access(&self, s: &Word) -> bool {
        self.s.contains(s)
    }

    /// Appends `s` to `S` if it is not already present. Returns `true` if
    /// `S` grew.
    pub fn add_access(&mut self, s: Word) -> bool {
        if self.s.insert(s.clone()) {
            trace!(access = ?s, "added access string to S");
            true
        } else {
            false
        }
    }

    /// Appends `e` to `E` if it is not already present. Returns `true` if
    /// `E` grew.
    pub fn add_suffix(&mut self, e: Word) -> bool {
        if self.e.insert(e.clone()) {
            trace!(suffix = ?e, "added distinguishing suffix to E");
            true
        } else {
            false
        }
    }

    /// `entry(s, e)`: `INIT` for `s = e = ε`, otherwise the last oracle
    /// output for `s · e`, querying the oracle at most once per distinct
    /// word across the table's lifetime.
    pub fn entry(&mut self, s: &Word, e: &Word, oracle: &impl MembershipOracle) -> Output {
        if s.is_empty() && e.is_empty() {
            return Output::INIT();
        }
        let full = s.concat(e);
        debug_assert!(!full.is_empty(), "oracle must never be queried with ε");
        if !self.t.contains_key(&full) {
            let outputs = oracle.ask(&full);
            debug_assert_eq!(
                outputs.len(),
                full.len(),
                "membership oracle must return one output per input symbol"
            );
            self.t.insert(full.clone(), outputs);
        }
        self.t[&full]
            .last()
            .cloned()
            .expect("non-empty word must yield a non-empty output sequence")
    }

    /// `row(s)`: the vector of `entry(s, e)` for `e` in `E`'s fixed order.
    ///
    /// `s` need not be a member of `S`; this is used both for rows of
    /// access strings and for one-step extensions `s·a` during
    /// closedness/consistency checks.
    pub fn row(&mut self, s: &Word, oracle: &impl MembershipOracle) -> Vec<Output> {
        let suffixes: Vec<Word> = self.e.iter().cloned().collect();
        suffixes
            .into_iter()
            .map(|e| self.entry(s, &e, oracle))
            .collect()
    }

    /// Number of distinct oracle queries memoized so far (for diagnostics
    /// and the "monotone memoization" property in spec §8).
    pub fn memoized_queries(&self) -> usize {
        self.t.len()
    }
}
