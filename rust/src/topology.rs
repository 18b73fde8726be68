//! Deterministic topological ordering (Kahn's algorithm).
//!
//! The ready set is a min-heap keyed by activity id, so among all activities
//! whose predecessors are done the smallest id is always emitted next. The
//! resulting order depends only on the graph, never on input order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::ActivityGraph;
use crate::interner::NodeId;

/// Error types for topological ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The listed activities (ascending id) could not be ordered: cycle
    /// members plus everything downstream of them.
    CircularDependency(Vec<String>),
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::CircularDependency(ids) => {
                write!(f, "Activities blocked by a circular dependency: {:?}", ids)
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Order the graph so every activity follows all of its predecessors.
pub fn topological_order(graph: &ActivityGraph) -> Result<Vec<NodeId>, TopologyError> {
    let n = graph.len();
    let mut in_degree: Vec<usize> = (0..n as NodeId)
        .map(|node| graph.predecessors(node).len())
        .collect();

    let mut ready: BinaryHeap<Reverse<(&str, NodeId)>> = (0..n as NodeId)
        .filter(|&node| in_degree[node as usize] == 0)
        .map(|node| Reverse((graph.id(node), node)))
        .collect();

    let mut order: Vec<NodeId> = Vec::with_capacity(n);

    while let Some(Reverse((_, node))) = ready.pop() {
        order.push(node);

        for &succ in graph.successors(node) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                ready.push(Reverse((graph.id(succ), succ)));
            }
        }
    }

    if order.len() != n {
        let mut unresolved: Vec<String> = (0..n as NodeId)
            .filter(|&node| in_degree[node as usize] > 0)
            .map(|node| graph.id(node).to_string())
            .collect();
        unresolved.sort();
        return Err(TopologyError::CircularDependency(unresolved));
    }

    Ok(order)
}
