//! Backward pass: latest start/finish times, slack and criticality.

use crate::graph::ActivityGraph;
use crate::interner::NodeId;
use crate::log_debug;
use crate::models::ActivityTiming;

/// Fill in late start/finish and slack for every node.
///
/// Nodes are visited in reverse topological order, so every successor's late
/// start is known before its predecessors are visited. `timings` must already
/// carry the forward pass results.
pub fn backward_pass(
    graph: &ActivityGraph,
    order: &[NodeId],
    timings: &mut [ActivityTiming],
    project_finish: i64,
    verbosity: u8,
) {
    let mut late_starts: Vec<Option<i64>> = vec![None; graph.len()];

    for &node in order.iter().rev() {
        let successors = graph.successors(node);
        let min_successor_start = successors
            .iter()
            .filter_map(|&succ| late_starts[succ as usize])
            .min();

        let late_finish = match min_successor_start {
            Some(start) => start,
            None => {
                if !successors.is_empty() {
                    log_debug!(
                        verbosity,
                        "  backward {}: no successor late start known, using project finish {}",
                        graph.id(node),
                        project_finish
                    );
                }
                project_finish
            }
        };
        let late_start = late_finish - graph.duration(node);
        late_starts[node as usize] = Some(late_start);

        let timing = &mut timings[node as usize];
        timing.late_finish = late_finish;
        timing.late_start = late_start;
        timing.slack = late_start - timing.early_start;
        debug_assert_eq!(timing.slack, timing.late_finish - timing.early_finish);

        log_debug!(
            verbosity,
            "  backward {}: LS={} LF={} slack={}",
            graph.id(node),
            late_start,
            late_finish,
            timing.slack
        );
    }
}
