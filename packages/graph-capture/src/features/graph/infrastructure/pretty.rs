//! Textual inspection of a finalized graph
//!
//! Debug aid only; the layout is not a persisted format.

use crate::features::graph::domain::Graph;
use crate::shared::models::{Identifier, OperationRecord};
use std::fmt;

fn join(values: &[Identifier]) -> String {
    values
        .iter()
        .map(Identifier::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `{in1, in2} -> {id} -> {out1, out2}`
pub fn describe_record(record: &OperationRecord) -> String {
    format!(
        "{{{}}} -> {{{}}} -> {{{}}}",
        join(&record.inputs),
        record.id,
        join(&record.outputs)
    )
}

impl Graph {
    /// One-line description of node `id`, None if it is not in the graph
    pub fn describe(&self, id: &str) -> Option<String> {
        self.node(id).map(describe_record)
    }

    /// One line per live node, in recording order
    pub fn dump(&self) -> Vec<String> {
        self.nodes().iter().map(describe_record).collect()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placeholders = self
            .placeholders()
            .iter()
            .map(Identifier::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            f,
            "Graph Structure (node_count={}, placeholders={{{}}}):",
            self.node_count(),
            placeholders
        )?;
        for line in self.dump() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
