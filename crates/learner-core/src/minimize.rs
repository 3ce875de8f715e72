//! Partition-refinement minimizer for a hypothesis Mealy machine (spec
//! §4.7).

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{LearnerError, Result};
use crate::mealy::{MealyMachine, State};
use crate::word::{Output, Symbol};

/// Runs Hopcroft-style partition refinement on `mm` and returns the
/// canonical minimized machine: one state per final block, transitions
/// taken from an arbitrary representative of each block, initial state =
/// the block containing `mm`'s old initial state.
///
/// Requires every state reachable from the initial state to have a
/// transition defined for every symbol in `alphabet` (the Totality
/// invariant, spec §8); this always holds for a machine produced by
/// [`crate::hypothesis::build_hypothesis`].
pub fn minimize(mm: &MealyMachine, alphabet: &[Symbol]) -> Result<MealyMachine> {
    let states: Vec<State> = mm.states().collect();

    // P0: group by output signature <out(q, a) : a in alphabet>.
    let mut signature_order: IndexMap<Vec<Output>, Vec<State>> = IndexMap::new();
    for &q in &states {
        let sig = output_signature(mm, alphabet, q)?;
        signature_order.entry(sig).or_default().push(q);
    }
    let mut blocks: Vec<Vec<State>> = signature_order.into_values().collect();

    loop {
        let block_index = block_index_array(&blocks, states.len());
        let mut changed = false;
        let mut next_blocks: Vec<Vec<State>> = Vec::new();

        for block in &blocks {
            let mut by_signature: IndexMap<Vec<usize>, Vec<State>> = IndexMap::new();
            for &q in block {
                let sig = next_block_signature(mm, alphabet, q, &block_index)?;
                by_signature.entry(sig).or_default().push(q);
            }
            if by_signature.len() > 1 {
                changed = true;
            }
            next_blocks.extend(by_signature.into_values());
        }

        blocks = next_blocks;
        if !changed {
            break;
        }
    }

    debug!(blocks = blocks.len(), "minimization converged");
    build_from_blocks(mm, alphabet, &blocks)
}

fn output_signature(mm: &MealyMachine, alphabet: &[Symbol], q: State) -> Result<Vec<Output>> {
    alphabet
        .iter()
        .map(|a| {
            mm.transition(q, a)
                .map(|(_, o)| o)
                .ok_or_else(|| LearnerError::Invariant(format!("state {q} missing transition on {a:?}")))
        })
        .collect()
}

fn next_block_signature(
    mm: &MealyMachine,
    alphabet: &[Symbol],
    q: State,
    block_index: &[usize],
) -> Result<Vec<usize>> {
    alphabet
        .iter()
        .map(|a| {
            mm.transition(q, a)
                .map(|(next, _)| block_index[next])
                .ok_or_else(|| LearnerError::Invariant(format!("state {q} missing transition on {a:?}")))
        })
        .collect()
}

fn block_index_array(blocks: &[Vec<State>], num_states: usize) -> Vec<usize> {
    let mut index = vec![usize::MAX; num_states];
    for (block_id, block) in blocks.iter().enumerate() {
        for &q in block {
            index[q] = block_id;
        }
    }
    index
}

fn build_from_blocks(
    mm: &MealyMachine,
    alphabet: &[Symbol],
    blocks: &[Vec<State>],
) -> Result<MealyMachine> {
    let block_index = block_index_array(blocks, mm.num_states());
    let initial_block = block_index[mm.initial_state()];

    let mut minimized = MealyMachine::new(initial_block);
    for (block_id, block) in blocks.iter().enumerate() {
        let representative = *block
            .first()
            .ok_or_else(|| LearnerError::Invariant("minimizer produced an empty block".into()))?;
        for a in alphabet {
            let (next, output) = mm.transition(representative, a).ok_or_else(|| {
                LearnerError::Invariant(format!(
                    "representative state {representative} missing transition on {a:?}"
                ))
            })?;
            minimized.add_transition(block_id, a.clone(), block_index[next], output);
        }
    }
    Ok(minimized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Word;

    #[test_log::test]
    fn minimizing_already_minimal_machine_is_isomorphic() {
        let mut mm = MealyMachine::new(0);
        mm.add_transition(0, Symbol::new("a"), 1, Output::new("x"));
        mm.add_transition(0, Symbol::new("b"), 0, Output::new("z"));
        mm.add_transition(1, Symbol::new("a"), 0, Output::new("y"));
        mm.add_transition(1, Symbol::new("b"), 1, Output::new("z"));
        let alphabet = vec![Symbol::new("a"), Symbol::new("b")];

        let minimized = minimize(&mm, &alphabet).unwrap();
        assert_eq!(minimized.num_states(), 2);

        // same outputs on all words up to some length
        for w in all_words(&alphabet, 4) {
            assert_eq!(mm.simulate(&w), minimized.simulate(&w));
        }
    }

    #[test_log::test]
    fn merges_equivalent_states() {
        // States 1 and 2 are behaviorally identical sinks.
        let mut mm = MealyMachine::new(0);
        mm.add_transition(0, Symbol::new("a"), 1, Output::new("x"));
        mm.add_transition(0, Symbol::new("b"), 2, Output::new("x"));
        mm.add_transition(1, Symbol::new("a"), 1, Output::new("z"));
        mm.add_transition(1, Symbol::new("b"), 1, Output::new("z"));
        mm.add_transition(2, Symbol::new("a"), 2, Output::new("z"));
        mm.add_transition(2, Symbol::new("b"), 2, Output::new("z"));
        let alphabet = vec![Symbol::new("a"), Symbol::new("b")];

        let minimized = minimize(&mm, &alphabet).unwrap();
        assert_eq!(minimized.num_states(), 2);
        for w in all_words(&alphabet, 4) {
            assert_eq!(mm.simulate(&w), minimized.simulate(&w));
        }
    }

    fn all_words(alphabet: &[Symbol], max_len: usize) -> Vec<Word> {
        let mut out = vec![Word::empty()];
        let mut frontier = vec![Word::empty()];
        for _ in 0..max_len {
            let mut next = vec![];
            for w in &frontier {
                for a in alphabet {
                    let w2 = w.extended(a);
                    out.push(w2.clone());
                    next.push(w2);
                }
            }
            frontier = next;
        }
        out
    }
}
