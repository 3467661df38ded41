//! Common test utilities for graph-capture
//!
//! Fixtures build small sessions the way calling code would; assertions
//! check the structural invariants every finalized graph must satisfy.

#![allow(dead_code)]

use graph_capture::{Graph, GraphBuilder, Identifier, Program};
use std::collections::{HashMap, HashSet};

/// Builder over a fresh default-configured program
pub fn builder(name: &str) -> GraphBuilder {
    GraphBuilder::new(Program::new(name).into_shared())
}

pub fn explicit(name: &str) -> Identifier {
    Identifier::explicit(name)
}

/// Every consumed value is a placeholder or produced by an earlier node
///
/// Checked both by name and through the producer each input was resolved
/// to when it was recorded.
pub fn assert_sound(graph: &Graph) {
    let mut produced: HashSet<&Identifier> = HashSet::new();
    let position: HashMap<&str, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.as_str(), index))
        .collect();

    for (index, node) in graph.nodes().iter().enumerate() {
        for (slot, input) in node.inputs.iter().enumerate() {
            assert!(
                graph.placeholders().contains(input) || produced.contains(input),
                "{} consumes '{}' with no earlier producer in the graph",
                node.id,
                input
            );
            match graph.producer_of_input(node.id.as_str(), slot) {
                Some(producer) => {
                    assert!(
                        position[producer.id.as_str()] < index,
                        "{} reads input {} from later node {}",
                        node.id,
                        slot,
                        producer.id
                    );
                    assert!(
                        producer.produces(input.as_str()),
                        "{} does not produce '{}' read by {}",
                        producer.id,
                        input,
                        node.id
                    );
                }
                None => assert!(
                    graph.placeholders().contains(input),
                    "{} reads '{}' with neither a producer nor a placeholder",
                    node.id,
                    input
                ),
            }
        }
        produced.extend(node.outputs.iter());
    }
}

/// Ids of the live nodes, in order
pub fn node_ids(graph: &Graph) -> Vec<String> {
    graph.nodes().iter().map(|node| node.id.to_string()).collect()
}
