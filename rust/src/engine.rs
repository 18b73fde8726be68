//! CPM engine entry points.
//!
//! A calculation runs four ordered phases over a freshly built graph:
//! 1. Successor linking (graph construction)
//! 2. Topological ordering
//! 3. Forward pass (earliest schedule and project finish)
//! 4. Backward pass (latest schedule, slack, critical flag)
//!
//! Every call owns its working structures, so independent calls can run
//! concurrently without locking.

use thiserror::Error;

use crate::backward_pass::backward_pass;
use crate::config::CpmConfig;
use crate::forward_pass::forward_pass;
use crate::graph::ActivityGraph;
use crate::models::{Activity, CpmSchedule};
use crate::topology::{topological_order, TopologyError};
use crate::{log_passes, log_warnings};

/// Errors that can occur during a CPM calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    /// Activities (ascending id) that sit on a cycle or downstream of one.
    #[error("Activities blocked by a circular dependency: {0:?}")]
    CircularDependency(Vec<String>),
}

impl From<TopologyError> for CpmError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::CircularDependency(ids) => CpmError::CircularDependency(ids),
        }
    }
}

/// Run the critical path method over a batch of activities.
///
/// # Returns
/// * `Ok(CpmSchedule)` with activities sorted by `(early_start, id)`. Empty
///   input yields an empty schedule.
/// * `Err(CpmError::CircularDependency)` if the precedence graph has a cycle.
pub fn calculate_schedule(
    activities: &[Activity],
    config: &CpmConfig,
) -> Result<CpmSchedule, CpmError> {
    let verbosity = config.verbosity;
    if activities.is_empty() {
        return Ok(CpmSchedule::default());
    }

    let (graph, diagnostics) = ActivityGraph::build(activities, verbosity);
    log_passes!(
        verbosity,
        "CPM: {} activities indexed, {} dangling references",
        graph.len(),
        diagnostics.dangling_references.len()
    );

    let order = match topological_order(&graph) {
        Ok(order) => order,
        Err(err) => {
            log_warnings!(verbosity, "CPM calculation error: {}", err);
            return Err(err.into());
        }
    };

    let forward = forward_pass(&graph, &order, verbosity);
    let project_finish = forward.project_finish;
    log_passes!(verbosity, "CPM: forward pass done, project finish {}", project_finish);

    let mut timings = forward.timings;
    backward_pass(&graph, &order, &mut timings, project_finish, verbosity);
    log_passes!(verbosity, "CPM: backward pass done");

    let mut annotated = graph.into_activities();
    for (activity, timing) in annotated.iter_mut().zip(&timings) {
        activity.apply_timing(timing);
    }
    annotated.sort_by(|a, b| {
        a.early_start
            .cmp(&b.early_start)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(CpmSchedule {
        activities: annotated,
        project_finish,
        dangling_references: diagnostics.dangling_references,
        duplicate_ids: diagnostics.duplicate_ids,
    })
}

/// Annotate activities with CPM timings, sorted by `(early_start, id)`.
///
/// Returns an empty list when the graph contains a cycle. An empty result for
/// non-empty input therefore means the schedule could not be computed; use
/// [`calculate_schedule`] to get the reason.
pub fn calculate(activities: &[Activity]) -> Vec<Activity> {
    calculate_schedule(activities, &CpmConfig::default())
        .map(|schedule| schedule.activities)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(id: &str, duration: u32, preds: &[&str]) -> Activity {
        Activity::new(id, format!("activity {id}"), duration)
            .with_predecessors(preds.iter().copied())
    }

    fn silent() -> CpmConfig {
        CpmConfig::silent()
    }

    fn ids(activities: &[Activity]) -> Vec<&str> {
        activities.iter().map(|a| a.id.as_str()).collect()
    }

    fn times(activity: &Activity) -> (i64, i64, i64, i64, i64, bool) {
        (
            activity.early_start,
            activity.early_finish,
            activity.late_start,
            activity.late_finish,
            activity.slack,
            activity.is_critical,
        )
    }

    fn diamond() -> Vec<Activity> {
        vec![
            make_activity("A", 2, &[]),
            make_activity("B", 3, &["A"]),
            make_activity("C", 1, &["A"]),
            make_activity("D", 1, &["B", "C"]),
        ]
    }

    fn assert_consistent(schedule: &CpmSchedule) {
        for a in &schedule.activities {
            let duration = i64::from(a.duration);
            assert_eq!(a.early_finish, a.early_start + duration, "{}", a.id);
            assert_eq!(a.late_start, a.late_finish - duration, "{}", a.id);
            assert_eq!(a.slack, a.late_start - a.early_start, "{}", a.id);
            assert_eq!(a.slack, a.late_finish - a.early_finish, "{}", a.id);
            assert_eq!(a.is_critical, a.slack == 0, "{}", a.id);
        }
    }

    #[test]
    fn test_empty_input() {
        let schedule = calculate_schedule(&[], &silent()).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.project_finish, 0);
        assert!(calculate(&[]).is_empty());
    }

    #[test]
    fn test_single_activity() {
        let result = calculate(&[make_activity("A", 5, &[])]);
        assert_eq!(result.len(), 1);
        assert_eq!(times(&result[0]), (0, 5, 0, 5, 0, true));
    }

    #[test]
    fn test_two_activity_chain() {
        let schedule = calculate_schedule(
            &[make_activity("B", 2, &["A"]), make_activity("A", 3, &[])],
            &silent(),
        )
        .unwrap();

        assert_eq!(ids(&schedule.activities), vec!["A", "B"]);
        assert_eq!(times(schedule.get("A").unwrap()), (0, 3, 0, 3, 0, true));
        assert_eq!(times(schedule.get("B").unwrap()), (3, 5, 3, 5, 0, true));
        assert_eq!(schedule.project_finish, 5);
        let a = schedule.get("A").unwrap();
        assert!(a.successor_ids.contains("B"));
    }

    #[test]
    fn test_diamond() {
        let schedule = calculate_schedule(&diamond(), &silent()).unwrap();

        assert_eq!(schedule.project_finish, 6);
        assert_eq!(ids(&schedule.activities), vec!["A", "B", "C", "D"]);

        let c = schedule.get("C").unwrap();
        assert_eq!(times(c), (2, 3, 4, 5, 2, false));
        let critical: Vec<&str> = schedule
            .critical_path()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(critical, vec!["A", "B", "D"]);
        assert_consistent(&schedule);
    }

    #[test]
    fn test_self_cycle_returns_empty() {
        let activities = vec![make_activity("A", 1, &["A"])];
        assert!(calculate(&activities).is_empty());
        assert_eq!(
            calculate_schedule(&activities, &silent()),
            Err(CpmError::CircularDependency(vec!["A".to_string()]))
        );
    }

    #[test]
    fn test_mutual_cycle_returns_empty() {
        let activities = vec![make_activity("A", 1, &["B"]), make_activity("B", 1, &["A"])];
        assert!(calculate(&activities).is_empty());
        assert!(matches!(
            calculate_schedule(&activities, &silent()),
            Err(CpmError::CircularDependency(ids)) if ids == vec!["A", "B"]
        ));
    }

    #[test]
    fn test_transitive_cycle_fails_whole_batch() {
        let activities = vec![
            make_activity("ok", 3, &[]),
            make_activity("x", 1, &["z"]),
            make_activity("y", 1, &["x"]),
            make_activity("z", 1, &["y"]),
        ];
        assert!(calculate(&activities).is_empty());
    }

    #[test]
    fn test_dangling_predecessor_is_ignored() {
        let schedule = calculate_schedule(
            &[make_activity("A", 4, &["Z"]), make_activity("B", 1, &["A"])],
            &silent(),
        )
        .unwrap();

        assert_eq!(times(schedule.get("A").unwrap()), (0, 4, 0, 4, 0, true));
        assert_eq!(times(schedule.get("B").unwrap()), (4, 5, 4, 5, 0, true));
        assert_eq!(schedule.dangling_references.len(), 1);
        assert_eq!(schedule.dangling_references[0].activity_id, "A");
        assert_eq!(schedule.dangling_references[0].missing_predecessor_id, "Z");
        assert!(schedule.get("Z").is_none());
    }

    #[test]
    fn test_dangling_counts_as_one_fewer_predecessor() {
        let with_dangling = calculate(&[
            make_activity("A", 2, &[]),
            make_activity("B", 3, &["A", "missing"]),
        ]);
        let without = calculate(&[make_activity("A", 2, &[]), make_activity("B", 3, &["A"])]);
        assert_eq!(ids(&with_dangling), ids(&without));
        for (a, b) in with_dangling.iter().zip(&without) {
            assert_eq!(times(a), times(b));
            assert_eq!(a.successor_ids, b.successor_ids);
        }
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let schedule = calculate_schedule(
            &[
                make_activity("A", 1, &[]),
                make_activity("B", 2, &["A"]),
                make_activity("A", 4, &[]),
            ],
            &silent(),
        )
        .unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.duplicate_ids, vec!["A".to_string()]);
        assert_eq!(schedule.get("A").unwrap().duration, 4);
        assert_eq!(schedule.get("B").unwrap().early_start, 4);
    }

    #[test]
    fn test_result_ordering_by_early_start_then_id() {
        let result = calculate(&[
            make_activity("z", 1, &[]),
            make_activity("m", 2, &["z"]),
            make_activity("a", 1, &["z"]),
            make_activity("b", 5, &[]),
        ]);

        assert_eq!(ids(&result), vec!["b", "z", "a", "m"]);
        for pair in result.windows(2) {
            assert!((pair[0].early_start, &pair[0].id) <= (pair[1].early_start, &pair[1].id));
        }
    }

    #[test]
    fn test_idempotent() {
        let first = calculate(&diamond());
        let second = calculate(&diamond());
        assert_eq!(first, second);

        // Feeding annotated output back in gives the same answer.
        let third = calculate(&first);
        assert_eq!(first, third);
    }

    #[test]
    fn test_permutations_give_identical_output() {
        let mut activities = vec![
            make_activity("design", 3, &[]),
            make_activity("permits", 5, &[]),
            make_activity("foundation", 4, &["design", "permits"]),
            make_activity("framing", 6, &["foundation"]),
            make_activity("plumbing", 2, &["framing"]),
            make_activity("electrical", 3, &["framing"]),
            make_activity("inspection", 0, &["plumbing", "electrical"]),
        ];
        let expected = calculate(&activities);
        assert_eq!(expected.len(), activities.len());

        for shift in 1..activities.len() {
            activities.rotate_left(1);
            assert_eq!(calculate(&activities), expected, "rotation {shift}");
        }
        activities.reverse();
        assert_eq!(calculate(&activities), expected);
    }

    #[test]
    fn test_critical_path_spans_project() {
        let schedule = calculate_schedule(
            &[
                make_activity("design", 3, &[]),
                make_activity("permits", 5, &[]),
                make_activity("foundation", 4, &["design", "permits"]),
                make_activity("framing", 6, &["foundation"]),
                make_activity("plumbing", 2, &["framing"]),
                make_activity("electrical", 3, &["framing"]),
                make_activity("inspection", 0, &["plumbing", "electrical"]),
            ],
            &silent(),
        )
        .unwrap();

        assert_eq!(schedule.project_finish, 18);
        let critical = schedule.critical_path();
        assert!(!critical.is_empty());
        assert_eq!(critical.first().map(|a| a.early_start), Some(0));
        assert_eq!(
            critical.iter().map(|a| a.early_finish).max(),
            Some(schedule.project_finish)
        );
        assert_eq!(schedule.get("design").unwrap().slack, 2);
        assert_eq!(schedule.get("plumbing").unwrap().slack, 1);
        assert!(schedule.get("inspection").unwrap().is_critical);
        assert_consistent(&schedule);
    }

    #[test]
    fn test_error_display() {
        let err = CpmError::CircularDependency(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            err.to_string(),
            "Activities blocked by a circular dependency: [\"A\", \"B\"]"
        );
    }
}
