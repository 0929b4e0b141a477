//! Earth fault loop impedance and protective conductor arithmetic.

use crate::config::CONDUCTOR_TEMP_MULTIPLIER;
use crate::error::{require_non_negative, require_positive, require_unit_interval, DomainError};
use crate::tables::copper_resistance_mohm_per_m;

/// On-site Zs limit: `Zs_table × derating` (0.8 in normal use).
pub fn site_max_zs(table_zs: f64, derating: f64) -> Result<f64, DomainError> {
    let zs = require_positive("table_zs", table_zs)?;
    let derating = require_unit_interval("derating", derating)?;
    if derating == 0.0 {
        return Err(DomainError::NonPositive {
            name: "derating".to_string(),
            value: derating,
        });
    }
    Ok(zs * derating)
}

/// `Zs = Ze + (R1 + R2)`.
pub fn zs_from_components(ze: f64, r1r2: f64) -> Result<f64, DomainError> {
    let ze = require_non_negative("ze", ze)?;
    let r1r2 = require_non_negative("r1r2", r1r2)?;
    Ok(ze + r1r2)
}

/// Largest R1+R2 that keeps `Ze + R1+R2` within `max_zs`.
///
/// Negative when Ze alone already exceeds the limit.
pub fn max_r1r2(max_zs: f64, ze: f64) -> Result<f64, DomainError> {
    let max_zs = require_positive("max_zs", max_zs)?;
    let ze = require_non_negative("ze", ze)?;
    Ok(max_zs - ze)
}

/// `Zs_max = U0 × Cmin / Ia`, where `Ia` is the current causing
/// disconnection in the required time.
pub fn max_zs_from_trip_current(u0: f64, cmin: f64, ia: f64) -> Result<f64, DomainError> {
    let u0 = require_positive("u0", u0)?;
    let cmin = require_positive("cmin", cmin)?;
    let ia = require_positive("ia", ia)?;
    Ok(u0 * cmin / ia)
}

/// Prospective earth fault current `If = U0 / Zs`.
pub fn prospective_fault_current(u0: f64, zs: f64) -> Result<f64, DomainError> {
    let u0 = require_positive("u0", u0)?;
    let zs = require_positive("zs", zs)?;
    Ok(u0 / zs)
}

/// Expected R1+R2 for a copper circuit at operating temperature:
/// `(r1 + r2) × L × 1.20 / 1000`.
pub fn expected_r1r2(line_csa: f64, cpc_csa: f64, length_m: f64) -> Result<f64, DomainError> {
    let r1 = copper_resistance_mohm_per_m(line_csa)?;
    let r2 = copper_resistance_mohm_per_m(cpc_csa)?;
    let length = require_non_negative("length_m", length_m)?;
    Ok((r1 + r2) * length * CONDUCTOR_TEMP_MULTIPLIER / 1000.0)
}

/// TT touch voltage `RA × IΔn`; must not exceed 50 V.
pub fn tt_touch_voltage(ra: f64, rated_residual_current: f64) -> Result<f64, DomainError> {
    let ra = require_non_negative("ra", ra)?;
    let idn = require_positive("idn", rated_residual_current)?;
    Ok(ra * idn)
}
