use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Nominal line-to-earth voltage U0 for UK single-phase supplies (V).
pub const NOMINAL_VOLTAGE_U0: f64 = 230.0;

/// Minimum voltage factor Cmin applied to U0 when deriving tabulated Zs.
pub const VOLTAGE_FACTOR_CMIN: f64 = 0.95;

/// Tabulated Zs assumes conductors at operating temperature; readings are taken
/// cold, so on-site limits are 80% of the table value.
pub const SITE_DERATING_FACTOR: f64 = 0.8;

/// Readings inside the limit but with less relative headroom than this are
/// flagged `Marginal` for re-test.
pub const DEFAULT_MARGINAL_BAND: f64 = 0.05;

/// Accepted relative mismatch between `Q_t` and `Q_s + Q_L` (chart-derived
/// inputs carry rounding error).
pub const ENERGY_BALANCE_TOLERANCE: f64 = 0.05;

/// Specific heat capacity of water, kJ/kg·K.
pub const CP_WATER: f64 = 4.19;

/// Specific heat capacity of dry air, kJ/kg·K.
pub const CP_AIR: f64 = 1.005;

/// Latent heat of vaporisation of water near coil conditions, kJ/kg.
pub const HFG_WATER: f64 = 2450.0;

/// R1+R2 multiplier from 20 °C to 70 °C for thermoplastic conductors.
pub const CONDUCTOR_TEMP_MULTIPLIER: f64 = 1.20;

/// BS 5839-1 standby battery ageing/derating factor.
pub const BATTERY_AGEING_FACTOR: f64 = 1.25;

/// Touch voltage limit for TT systems (RA × IΔn ≤ 50 V).
pub const TOUCH_VOLTAGE_LIMIT: f64 = 50.0;

/// Voltage drop limits as a fraction of nominal voltage.
pub const VOLTAGE_DROP_LIGHTING: f64 = 0.03;
pub const VOLTAGE_DROP_OTHER: f64 = 0.05;

/// Tunable thresholds used by the validator.
///
/// Held as a resource so a host app can load site-specific tolerances once at
/// startup. Every field has a default, so partial JSON documents are accepted.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Relative headroom below which a passing reading is `Marginal`.
    pub marginal_band: f64,
    /// Multiplier turning tabulated Zs into the on-site limit.
    pub site_derating: f64,
    /// Allowed mismatch between total and summed sensible/latent loads.
    pub energy_balance_tolerance: f64,
    /// U0 used by loop-impedance formulas (V).
    pub nominal_voltage: f64,
    /// Cmin used by loop-impedance formulas.
    pub voltage_factor_cmin: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            marginal_band: DEFAULT_MARGINAL_BAND,
            site_derating: SITE_DERATING_FACTOR,
            energy_balance_tolerance: ENERGY_BALANCE_TOLERANCE,
            nominal_voltage: NOMINAL_VOLTAGE_U0,
            voltage_factor_cmin: VOLTAGE_FACTOR_CMIN,
        }
    }
}

impl ValidatorConfig {
    /// Parse and range-check a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Parse a JSON config document, logging a warning and returning the
    /// defaults if it is unusable.
    pub fn from_json_or_warn(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "ValidatorConfig: {} ({} bytes), falling back to defaults",
                    e,
                    json.len()
                );
                Self::default()
            }
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        let unit_open = |v: f64| v.is_finite() && (0.0..1.0).contains(&v);
        if !unit_open(self.marginal_band) {
            return Err(ConfigError::Invalid {
                field: "marginal_band",
                value: self.marginal_band,
            });
        }
        if !(self.site_derating.is_finite() && self.site_derating > 0.0 && self.site_derating <= 1.0)
        {
            return Err(ConfigError::Invalid {
                field: "site_derating",
                value: self.site_derating,
            });
        }
        if !unit_open(self.energy_balance_tolerance) {
            return Err(ConfigError::Invalid {
                field: "energy_balance_tolerance",
                value: self.energy_balance_tolerance,
            });
        }
        if !(self.nominal_voltage.is_finite() && self.nominal_voltage > 0.0) {
            return Err(ConfigError::Invalid {
                field: "nominal_voltage",
                value: self.nominal_voltage,
            });
        }
        if !(self.voltage_factor_cmin.is_finite()
            && self.voltage_factor_cmin > 0.0
            && self.voltage_factor_cmin <= 1.0)
        {
            return Err(ConfigError::Invalid {
                field: "voltage_factor_cmin",
                value: self.voltage_factor_cmin,
            });
        }
        Ok(())
    }
}
