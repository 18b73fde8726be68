//! Forward pass: earliest start and finish times.

use crate::graph::ActivityGraph;
use crate::interner::NodeId;
use crate::log_debug;
use crate::models::ActivityTiming;

/// Result of the forward pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardPassResult {
    /// Timings indexed by node; only the early fields are filled in.
    pub timings: Vec<ActivityTiming>,
    /// Maximum early finish across all activities (0 when there are none).
    pub project_finish: i64,
}

/// Compute early start/finish for every node.
///
/// `order` must be a topological order of `graph`, so each predecessor's early
/// finish is final by the time its successors are visited.
pub fn forward_pass(graph: &ActivityGraph, order: &[NodeId], verbosity: u8) -> ForwardPassResult {
    let mut timings = vec![ActivityTiming::default(); graph.len()];

    for &node in order {
        let early_start = graph
            .predecessors(node)
            .iter()
            .map(|&pred| timings[pred as usize].early_finish)
            .max()
            .unwrap_or(0);
        let early_finish = early_start + graph.duration(node);

        let timing = &mut timings[node as usize];
        timing.early_start = early_start;
        timing.early_finish = early_finish;

        log_debug!(
            verbosity,
            "  forward {}: ES={} EF={}",
            graph.id(node),
            early_start,
            early_finish
        );
    }

    let project_finish = timings.iter().map(|t| t.early_finish).max().unwrap_or(0);

    ForwardPassResult {
        timings,
        project_finish,
    }
}
