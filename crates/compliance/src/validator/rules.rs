//! One rule per measurement kind. Each resolves the applicable bound or
//! reports why it cannot.

use crate::config::ValidatorConfig;
use crate::device::{DeviceCurve, DeviceSpec, DeviceType};
use crate::error::DomainError;
use crate::formulas::{max_r1r2, off_coil_temp_contact, site_max_zs, water_mass_flow, FormulaKind};
use crate::measurement::Measurement;
use crate::tables::{
    max_disconnection_time_ms, trip_requirement, LimitEntry, TableRef, TripRequirement,
};

use super::types::{Bound, IndeterminateReason, LimitRef, ValidationContext};
use super::LimitSource;

/// The rule's resolved bound plus context for the explanation.
pub(crate) struct Resolved {
    pub limit_ref: LimitRef,
    pub bound: Bound,
    /// Extra wording appended after the limit, e.g. `"(Ze 0.35 Ω)"`.
    pub note: Option<String>,
    /// Set when the device cannot disconnect fast enough for the circuit,
    /// whatever the reading. Forces a fail.
    pub shortfall: Option<String>,
}

pub(crate) type RuleOutcome = Result<Resolved, IndeterminateReason>;

/// Readings at or beyond this at ½ × IΔn mean the RCD held.
pub const HALF_CURRENT_HOLD_MS: f64 = 2000.0;

fn invalid(e: DomainError) -> IndeterminateReason {
    IndeterminateReason::InvalidInput(e)
}

fn require_device(context: &ValidationContext) -> Result<DeviceSpec, IndeterminateReason> {
    context
        .device
        .ok_or_else(|| IndeterminateReason::MissingContext("protective device".to_string()))
}

/// Table entry plus the on-site limit derived from it.
///
/// The 0.8 factor corrects for conductor temperature, which only applies to
/// the overcurrent tables; Table 41.5 is a touch-voltage limit.
fn site_limit(
    device: &DeviceSpec,
    tables: &dyn LimitSource,
    config: &ValidatorConfig,
) -> Result<(LimitEntry, f64, f64), IndeterminateReason> {
    let entry = tables
        .limit_for(device)
        .map_err(IndeterminateReason::NoTableEntry)?;
    let derating = match entry.table {
        TableRef::Table41_5 => 1.0,
        TableRef::Table41_2 | TableRef::Table41_3 => config.site_derating,
    };
    let limit = site_max_zs(entry.max_zs_ohms, derating).map_err(invalid)?;
    Ok((entry, derating, limit))
}

/// Table 41.1 check of the tabulated disconnection time against the earthing
/// arrangement. Devices with residual current protection meet the TT times
/// through the RCD (Regulation 411.5.3), so only overcurrent devices can fall
/// short.
fn disconnection_shortfall(
    device: &DeviceSpec,
    entry: &LimitEntry,
    context: &ValidationContext,
) -> Option<String> {
    let required = max_disconnection_time_ms(context.earthing, context.circuit_class);
    if device.has_rcd() || entry.max_disconnection_time_ms <= required {
        return None;
    }
    Some(format!(
        "{} disconnects within {} ms but a {} {} circuit requires {} ms (BS 7671 Table 41.1)",
        device.describe(),
        entry.max_disconnection_time_ms,
        context.earthing.label(),
        context.circuit_class.label(),
        required
    ))
}

pub(crate) fn zs_rule(
    context: &ValidationContext,
    tables: &dyn LimitSource,
    config: &ValidatorConfig,
) -> RuleOutcome {
    let device = require_device(context)?;
    let (entry, derating, limit) = site_limit(&device, tables, config)?;
    let shortfall = disconnection_shortfall(&device, &entry, context);
    Ok(Resolved {
        limit_ref: LimitRef::Table { entry, derating },
        bound: Bound::Maximum {
            limit,
            scale: limit,
        },
        note: Some(format!("for {}", device.describe())),
        shortfall,
    })
}

pub(crate) fn r1r2_rule(
    context: &ValidationContext,
    tables: &dyn LimitSource,
    config: &ValidatorConfig,
) -> RuleOutcome {
    let device = require_device(context)?;
    let ze = context
        .ze_ohms
        .ok_or_else(|| IndeterminateReason::MissingContext("measured Ze".to_string()))?;
    let (entry, derating, site_zs) = site_limit(&device, tables, config)?;
    let limit = max_r1r2(site_zs, ze).map_err(invalid)?;
    let shortfall = disconnection_shortfall(&device, &entry, context);
    Ok(Resolved {
        limit_ref: LimitRef::Table { entry, derating },
        // Margin is a share of the whole Zs budget, so it stays meaningful when
        // Ze alone leaves no room for R1+R2.
        bound: Bound::Maximum {
            limit,
            scale: site_zs,
        },
        note: Some(format!("(site Zs {:.2} Ω − Ze {:.2} Ω)", site_zs, ze)),
        shortfall,
    })
}

pub(crate) fn insulation_rule(context: &ValidationContext) -> RuleOutcome {
    let band = context.circuit_voltage;
    Ok(Resolved {
        limit_ref: LimitRef::Threshold {
            citation: "BS 7671 Table 64".to_string(),
        },
        bound: Bound::Minimum {
            limit: band.min_insulation_megohms(),
        },
        note: Some(format!("at {} V DC", band.test_voltage())),
        shortfall: None,
    })
}

/// RCD class governing trip times. RCBOs record only their overcurrent
/// curve, so they are judged as general (non-delayed) devices.
fn rcd_class(device: &DeviceSpec) -> Option<DeviceCurve> {
    match device.device_type {
        DeviceType::Rcd => Some(device.effective_curve()),
        DeviceType::Rcbo => Some(DeviceCurve::TypeA),
        DeviceType::Mcb | DeviceType::Fuse => None,
    }
}

pub(crate) fn rcd_trip_rule(context: &ValidationContext) -> RuleOutcome {
    let device = require_device(context)?;
    let class = rcd_class(&device).ok_or_else(|| {
        IndeterminateReason::MissingContext(format!(
            "residual current protection ({} has none)",
            device.describe()
        ))
    })?;
    let multiple = context.rcd_test_multiple;
    let bound = match trip_requirement(class, multiple) {
        TripRequirement::MustNotTrip => Bound::MustNotTrip {
            hold_ms: HALF_CURRENT_HOLD_MS,
        },
        TripRequirement::Within { min_ms, max_ms } => Bound::Window {
            min: min_ms,
            max: max_ms,
        },
    };
    Ok(Resolved {
        limit_ref: LimitRef::Threshold {
            citation: format!(
                "BS 7671 Regulation 643.7, {} at {}",
                class.label(),
                multiple.label()
            ),
        },
        bound,
        note: None,
        shortfall: None,
    })
}

pub(crate) fn temperature_rule(
    measurement: &Measurement,
    context: &ValidationContext,
) -> RuleOutcome {
    let coil = context
        .coil
        .ok_or_else(|| IndeterminateReason::MissingContext("coil design data".to_string()))?;
    let design = off_coil_temp_contact(coil.t_in, coil.adp, coil.contact_factor).map_err(invalid)?;
    let span = coil.t_in - coil.adp;
    if span <= 0.0 {
        return Err(invalid(DomainError::NonPositive {
            name: "t_in - adp".to_string(),
            value: span,
        }));
    }
    if measurement.value < coil.adp {
        // Air cannot leave a coil colder than its apparatus dew point.
        return Err(invalid(DomainError::OutOfRange {
            name: "off_coil_temperature".to_string(),
            value: measurement.value,
            min: coil.adp,
            max: coil.t_in,
        }));
    }
    Ok(Resolved {
        limit_ref: LimitRef::Formula {
            formula: FormulaKind::OffCoilTempContact,
            citation: format!(
                "T_off = T_in − CF × (T_in − ADP) with CF {:.2}",
                coil.contact_factor
            ),
        },
        bound: Bound::Maximum {
            limit: design,
            scale: span,
        },
        note: None,
        shortfall: None,
    })
}

pub(crate) fn flow_rule(context: &ValidationContext) -> RuleOutcome {
    let water = context
        .water
        .ok_or_else(|| IndeterminateReason::MissingContext("water design data".to_string()))?;
    let required = water_mass_flow(water.load_kw, water.cp_w, water.delta_t_w).map_err(invalid)?;
    if required <= 0.0 {
        return Err(invalid(DomainError::NonPositive {
            name: "design_flow".to_string(),
            value: required,
        }));
    }
    Ok(Resolved {
        limit_ref: LimitRef::Formula {
            formula: FormulaKind::WaterMassFlow,
            citation: format!(
                "ṁ = Q / (cp × ΔT) for {:.1} kW at ΔT {:.1} K",
                water.load_kw, water.delta_t_w
            ),
        },
        bound: Bound::Minimum { limit: required },
        note: None,
        shortfall: None,
    })
}
