//! Water-side flow sizing.

use crate::error::{require_non_negative, require_positive, DomainError};
use crate::tables::WaterSystem;

/// Water mass flow needed to carry a load: `ṁ_w = Q / (cp_w · ΔT_w)`.
///
/// A zero or negative temperature difference cannot carry heat and is a
/// domain error.
pub fn water_mass_flow(load_kw: f64, cp_w: f64, delta_t_w: f64) -> Result<f64, DomainError> {
    let q = require_non_negative("load_kw", load_kw)?;
    let cp = require_positive("cp_w", cp_w)?;
    let dt = require_positive("delta_t_w", delta_t_w)?;
    Ok(q / (cp * dt))
}

/// Heat carried by a water flow, `Q = ṁ · cp · ΔT`.
pub fn water_heat_transfer(mass_flow: f64, cp_w: f64, delta_t_w: f64) -> Result<f64, DomainError> {
    let m = require_non_negative("mass_flow", mass_flow)?;
    let cp = require_positive("cp_w", cp_w)?;
    let dt = require_positive("delta_t_w", delta_t_w)?;
    Ok(m * cp * dt)
}

/// Design flow for a standard water system using its flow/return band.
pub fn design_flow_for(system: WaterSystem, load_kw: f64) -> Result<f64, DomainError> {
    water_mass_flow(load_kw, crate::config::CP_WATER, system.band().delta_t())
}
