//! Standby battery sizing for fire alarm and emergency systems (BS 5839-1).

use crate::config::BATTERY_AGEING_FACTOR;
use crate::error::{require_non_negative, require_positive, DomainError};

/// Required capacity in Ah:
/// `C = 1.25 × (I_standby × T_standby + I_alarm × T_alarm)`.
pub fn standby_battery_capacity(
    standby_current_a: f64,
    standby_hours: f64,
    alarm_current_a: f64,
    alarm_hours: f64,
) -> Result<f64, DomainError> {
    let is = require_non_negative("standby_current_a", standby_current_a)?;
    let ts = require_non_negative("standby_hours", standby_hours)?;
    let ia = require_non_negative("alarm_current_a", alarm_current_a)?;
    let ta = require_non_negative("alarm_hours", alarm_hours)?;
    Ok(BATTERY_AGEING_FACTOR * (is * ts + ia * ta))
}

/// Hours a battery can supply a constant load.
pub fn battery_runtime_hours(capacity_ah: f64, load_a: f64) -> Result<f64, DomainError> {
    let capacity = require_non_negative("capacity_ah", capacity_ah)?;
    let load = require_positive("load_a", load_a)?;
    Ok(capacity / load)
}
