//! The top-level learner fixed point (spec §4.6).

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::closer::close;
use crate::equivalence::{EqParams, random_equivalence_query};
use crate::error::Result;
use crate::hypothesis::build_hypothesis;
use crate::mealy::MealyMachine;
use crate::minimize::minimize;
use crate::oracle::MembershipOracle;
use crate::table::ObservationTable;
use crate::word::Symbol;

/// Learns a minimized Mealy machine model of `oracle` over `alphabet`.
///
/// Implements the outer fixed point of spec §4.6:
///
/// ```text
/// STABILIZING  -> run Closer; when both checks pass -> HYPOTHESIZING
/// HYPOTHESIZING -> build hypothesis -> EQUIV_CHECK
/// EQUIV_CHECK   -> sample; on CE add suffixes to E -> STABILIZING
///                 ; on "equivalent" -> DONE
/// ```
///
/// `rng_seed` makes equivalence-query sampling reproducible: identical
/// `(alphabet, oracle, eq_params, rng_seed)` yield a bitwise-identical
/// returned machine (spec §8, "Determinism under seed").
pub fn learn(
    alphabet: &[Symbol],
    oracle: &impl MembershipOracle,
    eq_params: &EqParams,
    rng_seed: u64,
) -> Result<MealyMachine> {
    let mut table = ObservationTable::new();
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let mut round = 0usize;

    let hypothesis = loop {
        round += 1;
        info!(round, phase = "STABILIZING", "closing observation table");
        close(&mut table, alphabet, oracle);

        info!(round, phase = "HYPOTHESIZING", "building hypothesis");
        let hypothesis = build_hypothesis(&mut table, alphabet, oracle)?;

        info!(
            round,
            phase = "EQUIV_CHECK",
            states = hypothesis.num_states(),
            "checking equivalence"
        );
        match random_equivalence_query(&hypothesis, alphabet, oracle, eq_params, &mut rng) {
            Some(counterexample) => {
                info!(round, ?counterexample, "counterexample found, growing E");
                for suffix in counterexample.non_empty_suffixes() {
                    table.add_suffix(suffix);
                }
            }
            None => {
                info!(round, "no counterexample found, hypothesis accepted");
                break hypothesis;
            }
        }
    };

    info!("minimizing accepted hypothesis");
    minimize(&hypothesis, alphabet)
}
