//! Critical Path Method (CPM) scheduling engine.
//!
//! Given activities with durations and precedence constraints, computes each
//! activity's earliest/latest start and finish, slack, and critical-path
//! membership. The engine is a pure function of its input; the same code is
//! usable from Rust and, through PyO3, from Python.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod backward_pass;
mod config;
pub mod delivery;
pub mod engine;
pub mod forward_pass;
pub mod graph;
pub mod interner;
pub mod logging;
mod models;
pub mod timeline;
pub mod topology;

pub use config::{CpmConfig, DeliveryConfig};
pub use delivery::{delivery_activities, estimate_arrival, projected_completion, DeliveryError};
pub use engine::{calculate, calculate_schedule, CpmError};
pub use graph::{ActivityGraph, GraphDiagnostics};
pub use interner::NodeId;
pub use models::{Activity, ActivityTiming, CpmSchedule, DanglingReference};
pub use topology::{topological_order, TopologyError};

/// Run CPM and return annotated activities sorted by (early_start, id).
///
/// Returns an empty list if the activities contain a circular dependency.
#[pyfunction]
#[pyo3(name = "calculate", signature = (activities, config=None))]
fn py_calculate(activities: Vec<Activity>, config: Option<CpmConfig>) -> Vec<Activity> {
    let config = config.unwrap_or_default();
    calculate_schedule(&activities, &config)
        .map(|schedule| schedule.activities)
        .unwrap_or_default()
}

/// Run CPM and return the full schedule with diagnostics.
///
/// # Raises
/// * ValueError if a circular dependency is detected
#[pyfunction]
#[pyo3(name = "calculate_schedule", signature = (activities, config=None))]
fn py_calculate_schedule(
    activities: Vec<Activity>,
    config: Option<CpmConfig>,
) -> PyResult<CpmSchedule> {
    let config = config.unwrap_or_default();
    calculate_schedule(&activities, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Estimate when an order placed on `order_date` arrives.
///
/// # Raises
/// * ValueError if the delivery chain cannot be scheduled or the date overflows
#[pyfunction]
#[pyo3(
    name = "estimate_arrival",
    signature = (wait_list, speedup_days, order_date, delivery_config=None, config=None)
)]
fn py_estimate_arrival(
    wait_list: i64,
    speedup_days: i64,
    order_date: NaiveDate,
    delivery_config: Option<DeliveryConfig>,
    config: Option<CpmConfig>,
) -> PyResult<NaiveDate> {
    estimate_arrival(
        wait_list,
        speedup_days,
        order_date,
        &delivery_config.unwrap_or_default(),
        &config.unwrap_or_default(),
    )
    .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The cpm_engine Python module.
#[pymodule]
fn cpm_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Activity>()?;
    m.add_class::<DanglingReference>()?;
    m.add_class::<CpmSchedule>()?;

    // Config types
    m.add_class::<CpmConfig>()?;
    m.add_class::<DeliveryConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_calculate, m)?)?;
    m.add_function(wrap_pyfunction!(py_calculate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_estimate_arrival, m)?)?;

    Ok(())
}
