//! Finalized dataflow graph
//!
//! Immutable output of dead code elimination: the surviving records in
//! recording order plus every declared placeholder. Recording order is
//! already a valid topological order, so nodes are never re-sorted.

use crate::shared::models::{Identifier, NodeId, OperationRecord};
use std::collections::{BTreeSet, HashMap};

/// Read-only query surface over the DCE output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<OperationRecord>,
    /// Per node, per input: index (into `nodes`) of the producing node
    sources: Vec<Vec<Option<usize>>>,
    placeholders: BTreeSet<Identifier>,
    /// NodeId -> index into `nodes`
    index: HashMap<NodeId, usize>,
    eliminated: usize,
}

impl Graph {
    pub(crate) fn from_parts(
        nodes: Vec<OperationRecord>,
        sources: Vec<Vec<Option<usize>>>,
        placeholders: BTreeSet<Identifier>,
        eliminated: usize,
    ) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();
        Self {
            nodes,
            sources,
            placeholders,
            index,
            eliminated,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Records removed by dead code elimination
    pub fn eliminated_count(&self) -> usize {
        self.eliminated
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live nodes in recording order
    pub fn nodes(&self) -> &[OperationRecord] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&OperationRecord> {
        self.position(id).map(|idx| &self.nodes[idx])
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn produces(&self, id: &str, value: &str) -> bool {
        self.node(id).map_or(false, |node| node.produces(value))
    }

    pub fn consumes(&self, id: &str, value: &str) -> bool {
        self.node(id).map_or(false, |node| node.consumes(value))
    }

    pub fn inputs_of(&self, id: &str) -> Option<&[Identifier]> {
        self.node(id).map(|node| node.inputs.as_slice())
    }

    pub fn outputs_of(&self, id: &str) -> Option<&[Identifier]> {
        self.node(id).map(|node| node.outputs.as_slice())
    }

    pub fn operator_class_of(&self, id: &str) -> Option<&str> {
        self.node(id).map(|node| node.operator_class.as_str())
    }

    pub fn is_placeholder(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p.as_str() == name)
    }

    /// Placeholders in name order
    pub fn placeholders(&self) -> &BTreeSet<Identifier> {
        &self.placeholders
    }

    /// True if some node consumes `from` and produces `to`
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.nodes
            .iter()
            .any(|node| node.consumes(from) && node.produces(to))
    }

    /// Node that produced input `input_idx` of node `id`
    ///
    /// None for placeholders and for inputs recorded without a producer.
    pub fn producer_of_input(&self, id: &str, input_idx: usize) -> Option<&OperationRecord> {
        let idx = self.position(id)?;
        let source = (*self.sources[idx].get(input_idx)?)?;
        Some(&self.nodes[source])
    }

    pub(crate) fn sources(&self) -> &[Vec<Option<usize>>] {
        &self.sources
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}
