//! Views over a computed schedule for timeline charts.

use std::collections::BTreeMap;

use crate::models::Activity;

/// Group activities into timeline columns keyed by early start.
///
/// Within a column activities keep their order in `activities`.
pub fn group_by_early_start(activities: &[Activity]) -> BTreeMap<i64, Vec<&Activity>> {
    let mut columns: BTreeMap<i64, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        columns.entry(activity.early_start).or_default().push(activity);
    }
    columns
}

/// Dependency arrows as `(from, to)` pairs, drawn from each activity to its successors.
pub fn dependency_edges(activities: &[Activity]) -> Vec<(&str, &str)> {
    activities
        .iter()
        .flat_map(|activity| {
            activity
                .successor_ids
                .iter()
                .map(move |succ| (activity.id.as_str(), succ.as_str()))
        })
        .collect()
}
