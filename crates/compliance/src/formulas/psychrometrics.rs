//! Cooling coil and air-side load formulas.
//!
//! - `T_off = ADP + BF × (T_in − ADP)`
//! - `T_off = T_in − CF × (T_in − ADP)`, with `CF + BF = 1`
//! - `Q_s = ṁ·cp·ΔT`, `Q_L = ṁ·Δg·h_fg`, `Q_t = ṁ·Δh`

use crate::error::{
    require_finite, require_non_negative, require_positive, require_unit_interval, DomainError,
};

/// Specific heat of water vapour, kJ/kg·K.
const CP_VAPOUR: f64 = 1.86;

/// Latent heat of vaporisation at 0 °C, kJ/kg.
const HFG_0C: f64 = 2501.0;

/// `BF = 1 − CF`.
pub fn bypass_factor(contact_factor: f64) -> Result<f64, DomainError> {
    let cf = require_unit_interval("contact_factor", contact_factor)?;
    Ok(1.0 - cf)
}

/// Off-coil temperature from the bypass factor.
pub fn off_coil_temp_bypass(t_in: f64, adp: f64, bypass_factor: f64) -> Result<f64, DomainError> {
    let t_in = require_finite("t_in", t_in)?;
    let adp = require_finite("adp", adp)?;
    let bf = require_unit_interval("bypass_factor", bypass_factor)?;
    Ok(adp + bf * (t_in - adp))
}

/// Off-coil temperature from the contact factor.
pub fn off_coil_temp_contact(t_in: f64, adp: f64, contact_factor: f64) -> Result<f64, DomainError> {
    let t_in = require_finite("t_in", t_in)?;
    let adp = require_finite("adp", adp)?;
    let cf = require_unit_interval("contact_factor", contact_factor)?;
    Ok(t_in - cf * (t_in - adp))
}

/// Contact factor achieved by a coil, `CF = (T_in − T_off) / (T_in − ADP)`.
///
/// Undefined when the on-coil temperature equals the ADP.
pub fn contact_factor(t_in: f64, t_off: f64, adp: f64) -> Result<f64, DomainError> {
    let t_in = require_finite("t_in", t_in)?;
    let t_off = require_finite("t_off", t_off)?;
    let adp = require_finite("adp", adp)?;
    let span = t_in - adp;
    if span.abs() < f64::EPSILON {
        return Err(DomainError::NonPositive {
            name: "t_in - adp".to_string(),
            value: span,
        });
    }
    let cf = (t_in - t_off) / span;
    require_unit_interval("contact_factor", cf)
}

/// Specific enthalpy of moist air (kJ/kg dry air) at `t` °C and moisture
/// content `g` kg/kg.
pub fn moist_air_enthalpy(t: f64, g: f64) -> Result<f64, DomainError> {
    let t = require_finite("t", t)?;
    let g = require_non_negative("moisture_content", g)?;
    Ok(crate::config::CP_AIR * t + g * (HFG_0C + CP_VAPOUR * t))
}

/// Sensible load `Q_s = ṁ·cp·ΔT` (kW for kg/s, kJ/kg·K, K).
pub fn sensible_load(mass_flow: f64, cp: f64, delta_t: f64) -> Result<f64, DomainError> {
    let m = require_non_negative("mass_flow", mass_flow)?;
    let cp = require_positive("cp", cp)?;
    let dt = require_finite("delta_t", delta_t)?;
    Ok(m * cp * dt)
}

/// Latent load `Q_L = ṁ·Δg·h_fg`.
pub fn latent_load(mass_flow: f64, delta_g: f64, hfg: f64) -> Result<f64, DomainError> {
    let m = require_non_negative("mass_flow", mass_flow)?;
    let dg = require_finite("delta_g", delta_g)?;
    let hfg = require_positive("hfg", hfg)?;
    Ok(m * dg * hfg)
}

/// Total load `Q_t = ṁ·(h_in − h_out)`.
pub fn total_load(mass_flow: f64, h_in: f64, h_out: f64) -> Result<f64, DomainError> {
    let m = require_non_negative("mass_flow", mass_flow)?;
    let h_in = require_finite("h_in", h_in)?;
    let h_out = require_finite("h_out", h_out)?;
    Ok(m * (h_in - h_out))
}

/// Relative mismatch `|Q_s + Q_L − Q_t| / |Q_t|`.
pub fn load_balance_error(q_total: f64, q_sensible: f64, q_latent: f64) -> Result<f64, DomainError> {
    let q_t = require_finite("q_total", q_total)?;
    let q_s = require_finite("q_sensible", q_sensible)?;
    let q_l = require_finite("q_latent", q_latent)?;
    if q_t.abs() < f64::EPSILON {
        return Err(DomainError::NonPositive {
            name: "q_total".to_string(),
            value: q_t,
        });
    }
    Ok(((q_s + q_l) - q_t).abs() / q_t.abs())
}

/// Whether sensible plus latent agrees with total within `tolerance`.
///
/// Inputs read from a psychrometric chart carry rounding error, so exact
/// agreement is not expected.
pub fn load_balance_within(
    q_total: f64,
    q_sensible: f64,
    q_latent: f64,
    tolerance: f64,
) -> Result<bool, DomainError> {
    let tolerance = require_unit_interval("tolerance", tolerance)?;
    Ok(load_balance_error(q_total, q_sensible, q_latent)? <= tolerance)
}
