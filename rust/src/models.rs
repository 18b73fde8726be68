//! Core data types for the CPM engine.

use pyo3::prelude::*;
use std::collections::BTreeSet;

/// An activity in a precedence network.
///
/// Callers fill in `id`, `name`, `duration` and `predecessor_ids`. The engine
/// recomputes `successor_ids` and the timing annotations on every calculation;
/// the annotations are meaningless before that.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    /// Duration in days. Zero models a milestone.
    #[pyo3(get, set)]
    pub duration: u32,
    #[pyo3(get, set)]
    pub predecessor_ids: BTreeSet<String>,
    #[pyo3(get)]
    pub successor_ids: BTreeSet<String>,
    #[pyo3(get)]
    pub early_start: i64,
    #[pyo3(get)]
    pub early_finish: i64,
    #[pyo3(get)]
    pub late_start: i64,
    #[pyo3(get)]
    pub late_finish: i64,
    #[pyo3(get)]
    pub slack: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessor_ids: BTreeSet::new(),
            successor_ids: BTreeSet::new(),
            early_start: 0,
            early_finish: 0,
            late_start: 0,
            late_finish: 0,
            slack: 0,
            is_critical: false,
        }
    }

    pub fn with_predecessor(mut self, predecessor_id: impl Into<String>) -> Self {
        self.predecessor_ids.insert(predecessor_id.into());
        self
    }

    pub fn with_predecessors<I, S>(mut self, predecessor_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessor_ids
            .extend(predecessor_ids.into_iter().map(Into::into));
        self
    }

    /// Clear everything the engine derives, leaving only caller input.
    pub(crate) fn reset_derived(&mut self) {
        self.successor_ids.clear();
        self.apply_timing(&ActivityTiming::default());
    }

    pub(crate) fn apply_timing(&mut self, timing: &ActivityTiming) {
        self.early_start = timing.early_start;
        self.early_finish = timing.early_finish;
        self.late_start = timing.late_start;
        self.late_finish = timing.late_finish;
        self.slack = timing.slack;
        self.is_critical = timing.is_critical();
    }
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (id, name, duration, predecessor_ids=None))]
    fn py_new(
        id: String,
        name: String,
        duration: u32,
        predecessor_ids: Option<BTreeSet<String>>,
    ) -> Self {
        let mut activity = Self::new(id, name, duration);
        activity.predecessor_ids = predecessor_ids.unwrap_or_default();
        activity
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={:?}, duration={}, es={}, ef={}, ls={}, lf={}, slack={}, critical={})",
            self.id,
            self.duration,
            self.early_start,
            self.early_finish,
            self.late_start,
            self.late_finish,
            self.slack,
            self.is_critical
        )
    }
}

/// Per-activity timing produced by the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityTiming {
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    /// Slack = late_start - early_start.
    pub slack: i64,
}

impl ActivityTiming {
    pub fn is_critical(&self) -> bool {
        self.slack == 0
    }
}

/// A predecessor id that names no activity in the batch.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    #[pyo3(get)]
    pub activity_id: String,
    #[pyo3(get)]
    pub missing_predecessor_id: String,
}

#[pymethods]
impl DanglingReference {
    fn __repr__(&self) -> String {
        format!(
            "DanglingReference(activity_id={:?}, missing_predecessor_id={:?})",
            self.activity_id, self.missing_predecessor_id
        )
    }
}

/// A successfully computed schedule.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpmSchedule {
    /// Annotated activities sorted by (early_start, id).
    #[pyo3(get)]
    pub activities: Vec<Activity>,
    /// Overall project duration (maximum early finish).
    #[pyo3(get)]
    pub project_finish: i64,
    #[pyo3(get)]
    pub dangling_references: Vec<DanglingReference>,
    /// Ids that occurred more than once in the input; the last occurrence was used.
    #[pyo3(get)]
    pub duplicate_ids: Vec<String>,
}

impl CpmSchedule {
    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Critical activities, in schedule order.
    pub fn critical_path(&self) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.is_critical).collect()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[pymethods]
impl CpmSchedule {
    #[pyo3(name = "critical_path")]
    fn py_critical_path(&self) -> Vec<Activity> {
        self.critical_path().into_iter().cloned().collect()
    }

    fn __len__(&self) -> usize {
        self.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "CpmSchedule(activities={}, project_finish={}, dangling_references={})",
            self.activities.len(),
            self.project_finish,
            self.dangling_references.len()
        )
    }
}
