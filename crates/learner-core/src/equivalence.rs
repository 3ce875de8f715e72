//! The random-sampling equivalence oracle (spec §4.5).

use rand::Rng;
use tracing::{debug, trace};

use crate::mealy::MealyMachine;
use crate::oracle::MembershipOracle;
use crate::word::{Symbol, Word};

/// Equivalence-query sampling parameters.
///
/// Spec §4.5 suggests `150`/`8` for fast/local oracles and `50`/`5` for
/// slow/network oracles; neither is load-bearing for correctness, only
/// for how quickly a counterexample is found, so both are exposed as
/// configuration rather than hard-coded.
#[derive(Debug, Clone, Copy)]
pub struct EqParams {
    pub samples: usize,
    pub max_len: usize,
}

impl Default for EqParams {
    /// The fast/local-oracle defaults from spec §4.5.
    fn default() -> Self {
        Self {
            samples: 150,
            max_len: 8,
        }
    }
}

impl EqParams {
    /// The slow/network-oracle defaults from spec §4.5, appropriate when
    /// wiring a real socket-based oracle.
    pub fn slow_oracle() -> Self {
        Self {
            samples: 50,
            max_len: 5,
        }
    }
}

/// Samples `params.samples` random words of length drawn uniformly from
/// `[1, params.max_len]` over `alphabet`, comparing the oracle's output
/// against `hypothesis`'s simulation. Returns the first word on which
/// they disagree, or `None` if none of the samples disagree
/// ("equivalent", within the sampling budget).
pub fn random_equivalence_query(
    hypothesis: &MealyMachine,
    alphabet: &[Symbol],
    oracle: &impl MembershipOracle,
    params: &EqParams,
    rng: &mut impl Rng,
) -> Option<Word> {
    debug!(
        samples = params.samples,
        max_len = params.max_len,
        "starting equivalence query"
    );
    for _ in 0..params.samples {
        let len = rng.gen_range(1..=params.max_len);
        let symbols: Vec<Symbol> = (0..len)
            .map(|_| {
                let idx = rng.gen_range(0..alphabet.len());
                alphabet[idx].clone()
            })
            .collect();
        let word = Word::from(symbols);
        let expected = oracle.ask(&word);
        let actual = hypothesis.simulate(&word);
        if expected != actual {
            trace!(?word, ?expected, ?actual, "counterexample found");
            return Some(word);
        }
    }
    None
}
