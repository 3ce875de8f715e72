//! The membership oracle boundary: the only external collaborator the
//! core depends on.

use crate::word::{Output, Word};

/// A minimally adequate teacher's membership side: given a finite word,
/// answer with an equal-length sequence of outputs.
///
/// Implementations own all transport concerns (sockets, timing, session
/// lifecycle) and must never let a transport failure propagate out of
/// `ask` — once a session dies, the remaining positions are filled with
/// [`Output::OFF`]. The learner treats `ask` as effectively pure; see
/// spec §5/§7 for the failure-handling contract this implies.
///
/// `ask` must never be called with the empty word ([`Word::is_empty`]);
/// the table's convention `entry(ε, ε) = INIT` exists precisely so this
/// degenerate query never needs to reach the oracle.
pub trait MembershipOracle {
    fn ask(&self, word: &Word) -> Vec<Output>;
}

impl<T: MembershipOracle + ?Sized> MembershipOracle for &T {
    fn ask(&self, word: &Word) -> Vec<Output> {
        (**self).ask(word)
    }
}
