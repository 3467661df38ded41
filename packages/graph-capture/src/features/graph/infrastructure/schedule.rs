//! Scheduling view - live nodes as a Petgraph DAG
//!
//! Edge A → B labelled `v` means B consumes value `v` produced by A.
//! Placeholder inputs produce no edge.

use crate::features::graph::domain::Graph;
use crate::shared::models::{Identifier, NodeId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use tracing::warn;

impl Graph {
    /// Build the producer → consumer dependency graph
    ///
    /// Node indices follow recording order: `NodeIndex::new(i)` is `nodes()[i]`.
    pub fn dependency_graph(&self) -> DiGraph<NodeId, Identifier> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.node_count());
        for node in self.nodes() {
            graph.add_node(node.id.clone());
        }

        for (consumer, node_sources) in self.sources().iter().enumerate() {
            let node = &self.nodes()[consumer];
            for (input, source) in node.inputs.iter().zip(node_sources) {
                if let Some(producer) = source {
                    graph.add_edge(
                        NodeIndex::new(*producer),
                        NodeIndex::new(consumer),
                        input.clone(),
                    );
                }
            }
        }
        graph
    }

    /// Topological execution order of live nodes
    ///
    /// Recording order is always valid; this is the order an external
    /// scheduler would derive from the edges alone.
    pub fn execution_order(&self) -> Vec<NodeId> {
        let graph = self.dependency_graph();
        match toposort(&graph, None) {
            Ok(order) => order.into_iter().map(|idx| graph[idx].clone()).collect(),
            Err(cycle) => {
                // Inputs bind to earlier records only, so this is an internal bug
                warn!(
                    node = %graph[cycle.node_id()],
                    "dependency cycle in captured graph, falling back to recording order"
                );
                self.nodes().iter().map(|node| node.id.clone()).collect()
            }
        }
    }

    /// Nodes whose outputs node `id` consumes
    pub fn dependencies_of(&self, id: &str) -> Vec<NodeId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Nodes consuming an output of node `id`
    pub fn dependents_of(&self, id: &str) -> Vec<NodeId> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<NodeId> {
        let Some(position) = self.nodes().iter().position(|node| node.id == id) else {
            return Vec::new();
        };
        let graph = self.dependency_graph();
        let mut result: Vec<NodeId> = graph
            .neighbors_directed(NodeIndex::new(position), direction)
            .map(|idx| graph[idx].clone())
            .collect();
        result.sort();
        result.dedup();
        result
    }
}
