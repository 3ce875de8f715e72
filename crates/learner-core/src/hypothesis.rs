//! Builds a [`MealyMachine`] from a closed, consistent observation table
//! (spec §4.4).

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{LearnerError, Result};
use crate::mealy::{MealyMachine, State};
use crate::oracle::MembershipOracle;
use crate::table::ObservationTable;
use crate::word::{Output, Symbol, Word};

/// Folds `table` by row-equivalence into a deterministic, total Mealy
/// machine.
///
/// Requires `table` to already be closed and consistent (spec §4.3); if
/// it is not, a one-step extension may have no matching row in `S` and
/// this returns [`LearnerError::Invariant`] rather than panicking or
/// silently building a partial machine.
pub fn build_hypothesis(
    table: &mut ObservationTable,
    alphabet: &[Symbol],
    oracle: &impl MembershipOracle,
) -> Result<MealyMachine> {
    let access_strings: Vec<Word> = table.access_strings().cloned().collect();

    // Distinct rows in first-occurrence order, each assigned a dense state id.
    let mut row_to_state: IndexMap<Vec<Output>, State> = IndexMap::new();
    let mut representative: Vec<Word> = Vec::new();
    for s in &access_strings {
        let row = table.row(s, oracle);
        if !row_to_state.contains_key(&row) {
            let id = row_to_state.len();
            row_to_state.insert(row, id);
            representative.push(s.clone());
        }
    }

    let epsilon_row = table.row(&Word::empty(), oracle);
    let initial = *row_to_state.get(&epsilon_row).ok_or_else(|| {
        LearnerError::Invariant("row(ε) has no assigned state; ε must be in S".to_string())
    })?;

    let mut mm = MealyMachine::new(initial);
    for (state, s) in representative.iter().enumerate() {
        for a in alphabet {
            let output = table.entry(s, &Word::from(vec![a.clone()]), oracle);
            let sa_row = table.row(&s.extended(a), oracle);
            let target = *row_to_state.get(&sa_row).ok_or_else(|| {
                LearnerError::Invariant(format!(
                    "table not closed: row({s:?}·{a:?}) has no matching access string"
                ))
            })?;
            mm.add_transition(state, a.clone(), target, output);
        }
    }

    debug!(states = row_to_state.len(), "built hypothesis");
    Ok(mm)
}
