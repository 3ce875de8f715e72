//! Graphviz dot-file export for a learned [`MealyMachine`].
//!
//! Out of the CORE's scope per spec.md §1 ("Dot-file emission... is
//! specified only via the interface it exposes"); this is the CLI-level
//! consumer of that interface, grounded on
//! `examples/original_source/Lstar_fast.py`'s `export_dot`.

use std::fs;
use std::path::Path;

use learner_core::MealyMachine;

use crate::error::CliError;

/// Renders `mm` as a Graphviz `digraph`, one edge per transition labelled
/// `symbol / output`, with a point node marking the initial state.
pub fn to_dot(mm: &MealyMachine) -> String {
    let mut edges: Vec<(usize, String, usize, String)> = mm
        .transitions()
        .map(|(q, a, q2, o)| (q, a.to_string(), q2, o.to_string()))
        .collect();
    edges.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    let mut dot = String::new();
    dot.push_str("digraph MealyMachine {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=circle];\n");
    dot.push_str("  start [shape=point];\n");
    dot.push_str(&format!("  start -> {};\n", mm.initial_state()));
    for (q, a, q2, o) in edges {
        dot.push_str(&format!("  {q} -> {q2} [label=\"{a} / {o}\"];\n"));
    }
    dot.push_str("}\n");
    dot
}

pub fn write_dot(mm: &MealyMachine, path: &Path) -> Result<(), CliError> {
    fs::write(path, to_dot(mm)).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })
}
