//! Console reporting for a learned [`MealyMachine`].
//!
//! Out of the CORE's scope per spec.md §1; grounded on the teacher's use
//! of `tabled`/`owo-colors` for reporting learning results (e.g.
//! `automata-learning`'s `dpainf` module) and on
//! `Lstar_fast.py`'s `build_hypothesis` table audit printout.

use owo_colors::OwoColorize;
use tabled::builder::Builder;

use learner_core::{MealyMachine, Symbol};

/// Renders a `state x symbol -> next/output` table, highlighting `OFF`
/// cells, plus a one-line summary.
pub fn render(mm: &MealyMachine, alphabet: &[Symbol]) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["state".to_string()];
    header.extend(alphabet.iter().map(|a| a.to_string()));
    builder.push_record(header);

    for q in mm.states() {
        let mut row = vec![if q == mm.initial_state() {
            format!("-> {q}")
        } else {
            q.to_string()
        }];
        for a in alphabet {
            let cell = match mm.transition(q, a) {
                Some((next, output)) if output.is_off() => {
                    format!("{}", format!("{next}/{output}").red())
                }
                Some((next, output)) => format!("{next}/{output}"),
                None => "-".to_string(),
            };
            row.push(cell);
        }
        builder.push_record(row);
    }

    let table = builder.build();
    format!(
        "{table}\n{} states, {} symbols\n",
        mm.num_states().green(),
        alphabet.len()
    )
}
