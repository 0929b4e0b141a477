//! Formula evaluators.
//!
//! Every formula is a pure function over explicit arguments returning either
//! a number or a [`DomainError`]. [`evaluate_formula`] dispatches by name for
//! callers that hold arguments in a keyed map (certificate forms, calculators).

pub mod cabling;
pub mod hydronics;
pub mod loop_impedance;
pub mod psychrometrics;
pub mod standby;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SITE_DERATING_FACTOR;
use crate::error::DomainError;

pub use cabling::{adiabatic_min_csa, max_voltage_drop, voltage_drop, voltage_drop_percent};
pub use hydronics::{design_flow_for, water_heat_transfer, water_mass_flow};
pub use loop_impedance::{
    expected_r1r2, max_r1r2, max_zs_from_trip_current, prospective_fault_current, site_max_zs,
    tt_touch_voltage, zs_from_components,
};
pub use psychrometrics::{
    bypass_factor, contact_factor, latent_load, load_balance_error, load_balance_within,
    moist_air_enthalpy, off_coil_temp_bypass, off_coil_temp_contact, sensible_load, total_load,
};
pub use standby::{battery_runtime_hours, standby_battery_capacity};

/// Named numeric arguments for [`evaluate_formula`].
pub type FormulaArgs = BTreeMap<String, f64>;

/// Build a [`FormulaArgs`] map from `(name, value)` pairs.
pub fn formula_args(pairs: &[(&str, f64)]) -> FormulaArgs {
    pairs
        .iter()
        .map(|&(name, value)| (name.to_string(), value))
        .collect()
}

// =============================================================================
// FormulaKind
// =============================================================================

/// Every formula reachable through [`evaluate_formula`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaKind {
    OffCoilTempBypass,
    OffCoilTempContact,
    BypassFactor,
    ContactFactor,
    MoistAirEnthalpy,
    SensibleLoad,
    LatentLoad,
    TotalLoad,
    WaterMassFlow,
    SiteMaxZs,
    ZsFromComponents,
    MaxZsFromTripCurrent,
    ProspectiveFaultCurrent,
    ExpectedR1R2,
    TtTouchVoltage,
    AdiabaticMinCsa,
    VoltageDrop,
    StandbyBatteryCapacity,
    BatteryRuntimeHours,
}

impl FormulaKind {
    pub const ALL: [FormulaKind; 19] = [
        FormulaKind::OffCoilTempBypass,
        FormulaKind::OffCoilTempContact,
        FormulaKind::BypassFactor,
        FormulaKind::ContactFactor,
        FormulaKind::MoistAirEnthalpy,
        FormulaKind::SensibleLoad,
        FormulaKind::LatentLoad,
        FormulaKind::TotalLoad,
        FormulaKind::WaterMassFlow,
        FormulaKind::SiteMaxZs,
        FormulaKind::ZsFromComponents,
        FormulaKind::MaxZsFromTripCurrent,
        FormulaKind::ProspectiveFaultCurrent,
        FormulaKind::ExpectedR1R2,
        FormulaKind::TtTouchVoltage,
        FormulaKind::AdiabaticMinCsa,
        FormulaKind::VoltageDrop,
        FormulaKind::StandbyBatteryCapacity,
        FormulaKind::BatteryRuntimeHours,
    ];

    /// Stable snake_case name used for lookup.
    pub fn name(self) -> &'static str {
        match self {
            FormulaKind::OffCoilTempBypass => "off_coil_temp_bypass",
            FormulaKind::OffCoilTempContact => "off_coil_temp_contact",
            FormulaKind::BypassFactor => "bypass_factor",
            FormulaKind::ContactFactor => "contact_factor",
            FormulaKind::MoistAirEnthalpy => "moist_air_enthalpy",
            FormulaKind::SensibleLoad => "sensible_load",
            FormulaKind::LatentLoad => "latent_load",
            FormulaKind::TotalLoad => "total_load",
            FormulaKind::WaterMassFlow => "water_mass_flow",
            FormulaKind::SiteMaxZs => "site_max_zs",
            FormulaKind::ZsFromComponents => "zs_from_components",
            FormulaKind::MaxZsFromTripCurrent => "max_zs_from_trip_current",
            FormulaKind::ProspectiveFaultCurrent => "prospective_fault_current",
            FormulaKind::ExpectedR1R2 => "expected_r1r2",
            FormulaKind::TtTouchVoltage => "tt_touch_voltage",
            FormulaKind::AdiabaticMinCsa => "adiabatic_min_csa",
            FormulaKind::VoltageDrop => "voltage_drop",
            FormulaKind::StandbyBatteryCapacity => "standby_battery_capacity",
            FormulaKind::BatteryRuntimeHours => "battery_runtime_hours",
        }
    }

    /// Arguments the formula requires, in the order the function takes them.
    pub fn arguments(self) -> &'static [&'static str] {
        match self {
            FormulaKind::OffCoilTempBypass => &["t_in", "adp", "bf"],
            FormulaKind::OffCoilTempContact => &["t_in", "adp", "cf"],
            FormulaKind::BypassFactor => &["cf"],
            FormulaKind::ContactFactor => &["t_in", "t_off", "adp"],
            FormulaKind::MoistAirEnthalpy => &["t", "g"],
            FormulaKind::SensibleLoad => &["m", "cp", "delta_t"],
            FormulaKind::LatentLoad => &["m", "delta_g", "hfg"],
            FormulaKind::TotalLoad => &["m", "h_in", "h_out"],
            FormulaKind::WaterMassFlow => &["q", "cp_w", "delta_t_w"],
            FormulaKind::SiteMaxZs => &["table_zs"],
            FormulaKind::ZsFromComponents => &["ze", "r1r2"],
            FormulaKind::MaxZsFromTripCurrent => &["u0", "cmin", "ia"],
            FormulaKind::ProspectiveFaultCurrent => &["u0", "zs"],
            FormulaKind::ExpectedR1R2 => &["line_csa", "cpc_csa", "length_m"],
            FormulaKind::TtTouchVoltage => &["ra", "idn"],
            FormulaKind::AdiabaticMinCsa => &["fault_current", "time_s", "k"],
            FormulaKind::VoltageDrop => &["mv_per_a_m", "ib", "length_m"],
            FormulaKind::StandbyBatteryCapacity => {
                &["standby_a", "standby_h", "alarm_a", "alarm_h"]
            }
            FormulaKind::BatteryRuntimeHours => &["capacity_ah", "load_a"],
        }
    }

    /// Evaluate against a keyed argument map.
    pub fn evaluate(self, args: &FormulaArgs) -> Result<f64, DomainError> {
        let a = |name: &str| required(self, args, name);
        match self {
            FormulaKind::OffCoilTempBypass => off_coil_temp_bypass(a("t_in")?, a("adp")?, a("bf")?),
            FormulaKind::OffCoilTempContact => {
                off_coil_temp_contact(a("t_in")?, a("adp")?, a("cf")?)
            }
            FormulaKind::BypassFactor => bypass_factor(a("cf")?),
            FormulaKind::ContactFactor => contact_factor(a("t_in")?, a("t_off")?, a("adp")?),
            FormulaKind::MoistAirEnthalpy => moist_air_enthalpy(a("t")?, a("g")?),
            FormulaKind::SensibleLoad => sensible_load(a("m")?, a("cp")?, a("delta_t")?),
            FormulaKind::LatentLoad => latent_load(a("m")?, a("delta_g")?, a("hfg")?),
            FormulaKind::TotalLoad => total_load(a("m")?, a("h_in")?, a("h_out")?),
            FormulaKind::WaterMassFlow => water_mass_flow(a("q")?, a("cp_w")?, a("delta_t_w")?),
            FormulaKind::SiteMaxZs => {
                // `derating` is optional and defaults to the standard 0.8.
                let derating = args.get("derating").copied().unwrap_or(SITE_DERATING_FACTOR);
                site_max_zs(a("table_zs")?, derating)
            }
            FormulaKind::ZsFromComponents => zs_from_components(a("ze")?, a("r1r2")?),
            FormulaKind::MaxZsFromTripCurrent => {
                max_zs_from_trip_current(a("u0")?, a("cmin")?, a("ia")?)
            }
            FormulaKind::ProspectiveFaultCurrent => prospective_fault_current(a("u0")?, a("zs")?),
            FormulaKind::ExpectedR1R2 => {
                expected_r1r2(a("line_csa")?, a("cpc_csa")?, a("length_m")?)
            }
            FormulaKind::TtTouchVoltage => tt_touch_voltage(a("ra")?, a("idn")?),
            FormulaKind::AdiabaticMinCsa => {
                adiabatic_min_csa(a("fault_current")?, a("time_s")?, a("k")?)
            }
            FormulaKind::VoltageDrop => voltage_drop(a("mv_per_a_m")?, a("ib")?, a("length_m")?),
            FormulaKind::StandbyBatteryCapacity => standby_battery_capacity(
                a("standby_a")?,
                a("standby_h")?,
                a("alarm_a")?,
                a("alarm_h")?,
            ),
            FormulaKind::BatteryRuntimeHours => {
                battery_runtime_hours(a("capacity_ah")?, a("load_a")?)
            }
        }
    }
}

impl FromStr for FormulaKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FormulaKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownFormula(s.to_string()))
    }
}

fn required(kind: FormulaKind, args: &FormulaArgs, name: &str) -> Result<f64, DomainError> {
    args.get(name)
        .copied()
        .ok_or_else(|| DomainError::MissingArgument {
            formula: kind.name().to_string(),
            argument: name.to_string(),
        })
}

/// Evaluate a formula by name, e.g.
/// `evaluate_formula("water_mass_flow", &formula_args(&[("q", 120.0), ("cp_w", 4.19), ("delta_t_w", 6.0)]))`.
pub fn evaluate_formula(name: &str, args: &FormulaArgs) -> Result<f64, DomainError> {
    let kind: FormulaKind = name.parse()?;
    kind.evaluate(args)
}
