//! Configuration types for the CPM engine and delivery projection.

use pyo3::prelude::*;

use crate::logging::{VERBOSITY_SILENT, VERBOSITY_WARNINGS};

/// Configuration for a CPM calculation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpmConfig {
    /// Verbosity level: 0=silent, 1=warnings, 2=passes, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            verbosity: VERBOSITY_WARNINGS,
        }
    }
}

impl CpmConfig {
    /// Config that never writes to stderr.
    pub fn silent() -> Self {
        Self {
            verbosity: VERBOSITY_SILENT,
        }
    }
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (verbosity=None))]
    fn py_new(verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!("CpmConfig(verbosity={})", self.verbosity)
    }
}

/// Durations (in days) and throughput used to build the Mars delivery chain.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryConfig {
    /// Wait-list positions cleared per production day.
    #[pyo3(get, set)]
    pub wait_list_per_day: i64,
    #[pyo3(get, set)]
    pub production_days: u32,
    #[pyo3(get, set)]
    pub earth_calibration_days: u32,
    #[pyo3(get, set)]
    pub launch_site_transport_days: u32,
    #[pyo3(get, set)]
    pub launch_wait_days: u32,
    #[pyo3(get, set)]
    pub launch_days: u32,
    #[pyo3(get, set)]
    pub flight_days: u32,
    #[pyo3(get, set)]
    pub landing_days: u32,
    #[pyo3(get, set)]
    pub mars_calibration_days: u32,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            wait_list_per_day: 5000,
            production_days: 2,
            earth_calibration_days: 1,
            launch_site_transport_days: 3,
            launch_wait_days: 20,
            launch_days: 1,
            flight_days: 203,
            landing_days: 1,
            mars_calibration_days: 1,
        }
    }
}

#[pymethods]
impl DeliveryConfig {
    #[new]
    #[pyo3(signature = (
        wait_list_per_day=None,
        production_days=None,
        earth_calibration_days=None,
        launch_site_transport_days=None,
        launch_wait_days=None,
        launch_days=None,
        flight_days=None,
        landing_days=None,
        mars_calibration_days=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        wait_list_per_day: Option<i64>,
        production_days: Option<u32>,
        earth_calibration_days: Option<u32>,
        launch_site_transport_days: Option<u32>,
        launch_wait_days: Option<u32>,
        launch_days: Option<u32>,
        flight_days: Option<u32>,
        landing_days: Option<u32>,
        mars_calibration_days: Option<u32>,
    ) -> PyResult<Self> {
        let defaults = Self::default();
        let wait_list_per_day = wait_list_per_day.unwrap_or(defaults.wait_list_per_day);
        if wait_list_per_day <= 0 {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "wait_list_per_day must be positive",
            ));
        }
        Ok(Self {
            wait_list_per_day,
            production_days: production_days.unwrap_or(defaults.production_days),
            earth_calibration_days: earth_calibration_days
                .unwrap_or(defaults.earth_calibration_days),
            launch_site_transport_days: launch_site_transport_days
                .unwrap_or(defaults.launch_site_transport_days),
            launch_wait_days: launch_wait_days.unwrap_or(defaults.launch_wait_days),
            launch_days: launch_days.unwrap_or(defaults.launch_days),
            flight_days: flight_days.unwrap_or(defaults.flight_days),
            landing_days: landing_days.unwrap_or(defaults.landing_days),
            mars_calibration_days: mars_calibration_days.unwrap_or(defaults.mars_calibration_days),
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "DeliveryConfig(wait_list_per_day={}, flight_days={}, launch_wait_days={})",
            self.wait_list_per_day, self.flight_days, self.launch_wait_days
        )
    }
}
