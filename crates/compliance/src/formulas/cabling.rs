//! Cable thermal withstand and voltage drop.

use crate::config::{VOLTAGE_DROP_LIGHTING, VOLTAGE_DROP_OTHER};
use crate::error::{require_non_negative, require_positive, DomainError};

/// Adiabatic equation: minimum protective conductor CSA `S = √(I²t) / k` (mm²).
pub fn adiabatic_min_csa(fault_current: f64, time_s: f64, k: f64) -> Result<f64, DomainError> {
    let i = require_non_negative("fault_current", fault_current)?;
    let t = require_non_negative("time_s", time_s)?;
    let k = require_positive("k", k)?;
    Ok((i * i * t).sqrt() / k)
}

/// Voltage drop in volts: `mV/A/m × Ib × L / 1000`.
pub fn voltage_drop(mv_per_a_m: f64, design_current: f64, length_m: f64) -> Result<f64, DomainError> {
    let mv = require_positive("mv_per_a_m", mv_per_a_m)?;
    let ib = require_non_negative("design_current", design_current)?;
    let length = require_non_negative("length_m", length_m)?;
    Ok(mv * ib * length / 1000.0)
}

/// Voltage drop as a percentage of the nominal voltage.
pub fn voltage_drop_percent(drop_v: f64, nominal_v: f64) -> Result<f64, DomainError> {
    let drop = require_non_negative("drop_v", drop_v)?;
    let nominal = require_positive("nominal_v", nominal_v)?;
    Ok(drop / nominal * 100.0)
}

/// Permitted drop in volts: 3% for lighting, 5% for other uses.
pub fn max_voltage_drop(nominal_v: f64, lighting: bool) -> Result<f64, DomainError> {
    let nominal = require_positive("nominal_v", nominal_v)?;
    let fraction = if lighting {
        VOLTAGE_DROP_LIGHTING
    } else {
        VOLTAGE_DROP_OTHER
    };
    Ok(nominal * fraction)
}
