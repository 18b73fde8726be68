//! Delivery-date projection for robot orders.
//!
//! An order moves through a fixed chain of manufacturing, launch and transit
//! activities. The chain is scheduled with the CPM engine and the arrival
//! date is the order date plus the early finish of the last activity.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::config::{CpmConfig, DeliveryConfig};
use crate::engine::{calculate_schedule, CpmError};
use crate::models::{Activity, CpmSchedule};

/// Id of the final activity in the delivery chain.
pub const TERMINAL_ACTIVITY_ID: &str = "J";

/// Errors that can occur while projecting a delivery date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Cannot compute schedule: {0}")]
    Schedule(#[from] CpmError),
    #[error("Terminal activity missing from schedule: {0}")]
    MissingTerminal(String),
    #[error("Projected date out of range: {start} + {days} days")]
    DateOutOfRange { start: NaiveDate, days: i64 },
}

/// Days spent waiting for a production slot.
///
/// Each sponsorship speed-up day clears `wait_list_per_day` positions. Any
/// remaining wait rounds to the nearest whole day, but never below one day.
pub fn production_wait_days(wait_list: i64, speedup_days: i64, config: &DeliveryConfig) -> u32 {
    let per_day = config.wait_list_per_day.max(1);
    let remaining = wait_list
        .saturating_sub(speedup_days.saturating_mul(per_day))
        .max(0);
    if remaining == 0 {
        return 0;
    }
    let days = (remaining as f64 / per_day as f64).round() as i64;
    days.clamp(1, i64::from(u32::MAX)) as u32
}

/// Build the linear delivery chain for an order.
pub fn delivery_activities(
    wait_list: i64,
    speedup_days: i64,
    config: &DeliveryConfig,
) -> Vec<Activity> {
    let stages = [
        (
            "B",
            "Production wait",
            production_wait_days(wait_list, speedup_days, config),
        ),
        ("C", "Production", config.production_days),
        ("D", "Calibration (Earth)", config.earth_calibration_days),
        ("E", "Launch site transport", config.launch_site_transport_days),
        ("F", "Launch wait", config.launch_wait_days),
        ("G", "Launch", config.launch_days),
        ("H", "Space flight", config.flight_days),
        ("I", "Mars landing", config.landing_days),
        (TERMINAL_ACTIVITY_ID, "Calibration (Mars)", config.mars_calibration_days),
    ];

    let mut activities: Vec<Activity> = Vec::with_capacity(stages.len());
    for (id, name, duration) in stages {
        let mut activity = Activity::new(id, name, duration);
        if let Some(previous) = activities.last() {
            activity = activity.with_predecessor(previous.id.clone());
        }
        activities.push(activity);
    }
    activities
}

/// Date on which `terminal_id` finishes when the schedule starts on `start`.
pub fn projected_completion(
    schedule: &CpmSchedule,
    terminal_id: &str,
    start: NaiveDate,
) -> Result<NaiveDate, DeliveryError> {
    let terminal = schedule
        .get(terminal_id)
        .ok_or_else(|| DeliveryError::MissingTerminal(terminal_id.to_string()))?;
    let days = terminal.early_finish;
    u64::try_from(days)
        .ok()
        .and_then(|d| start.checked_add_days(Days::new(d)))
        .ok_or(DeliveryError::DateOutOfRange { start, days })
}

/// Estimate the arrival date of an order placed on `order_date`.
pub fn estimate_arrival(
    wait_list: i64,
    speedup_days: i64,
    order_date: NaiveDate,
    delivery_config: &DeliveryConfig,
    config: &CpmConfig,
) -> Result<NaiveDate, DeliveryError> {
    let activities = delivery_activities(wait_list, speedup_days, delivery_config);
    let schedule = calculate_schedule(&activities, config)?;
    projected_completion(&schedule, TERMINAL_ACTIVITY_ID, order_date)
}
