//! Rule Validator.
//!
//! Selects the limit that applies to a measurement, compares the reading to
//! it and classifies the outcome. Stateless: the same measurement, context,
//! tables and config always produce the same [`ComplianceResult`].

mod rules;
pub mod types;


use crate::config::ValidatorConfig;
use crate::device::DeviceSpec;
use crate::error::NotFoundError;
use crate::measurement::{Measurement, MeasurementKind};
use crate::tables::{lookup_limit_for, LimitEntry, LimitTables};

pub use rules::HALF_CURRENT_HOLD_MS;
pub use types::{
    Bound, CoilDesign, ComplianceResult, IndeterminateReason, LimitRef, ValidationContext,
    Verdict, WaterDesign,
};

// =============================================================================
// Limit sources
// =============================================================================

/// Anything that can resolve a device to its loop impedance table row.
pub trait LimitSource {
    fn limit_for(&self, device: &DeviceSpec) -> Result<LimitEntry, NotFoundError>;
}

impl LimitSource for LimitTables {
    fn limit_for(&self, device: &DeviceSpec) -> Result<LimitEntry, NotFoundError> {
        self.lookup(device)
    }
}

/// The compiled-in BS 7671 tables, without building a [`LimitTables`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTables;

impl LimitSource for StaticTables {
    fn limit_for(&self, device: &DeviceSpec) -> Result<LimitEntry, NotFoundError> {
        lookup_limit_for(device)
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Judge a measurement against the standard tables and default thresholds.
pub fn validate(measurement: &Measurement, context: &ValidationContext) -> ComplianceResult {
    validate_with(
        measurement,
        context,
        &StaticTables,
        &ValidatorConfig::default(),
    )
}

/// Judge a measurement against the given tables and thresholds.
pub fn validate_with(
    measurement: &Measurement,
    context: &ValidationContext,
    tables: &dyn LimitSource,
    config: &ValidatorConfig,
) -> ComplianceResult {
    // Fields are public, so a hand-built reading may bypass `Measurement::new`.
    if let Err(e) = Measurement::new(measurement.kind, measurement.value, measurement.unit) {
        return ComplianceResult::indeterminate(*measurement, IndeterminateReason::InvalidInput(e));
    }

    let outcome = match measurement.kind {
        MeasurementKind::Zs => rules::zs_rule(context, tables, config),
        MeasurementKind::R1R2 => rules::r1r2_rule(context, tables, config),
        MeasurementKind::InsulationResistance => rules::insulation_rule(context),
        MeasurementKind::RcdTripTime => rules::rcd_trip_rule(context),
        MeasurementKind::Temperature => rules::temperature_rule(measurement, context),
        MeasurementKind::Flow => rules::flow_rule(context),
    };

    match outcome {
        Ok(resolved) => {
            let (mut verdict, mut margin) =
                classify(measurement.value, resolved.bound, config.marginal_band);
            let mut explanation = explain(
                measurement,
                &resolved.limit_ref,
                resolved.bound,
                &verdict,
                margin,
                resolved.note.as_deref(),
            );
            // A slow device fails the circuit however low the reading is.
            if let Some(shortfall) = &resolved.shortfall {
                verdict = Verdict::Fail;
                margin = None;
                explanation.push_str("; ");
                explanation.push_str(shortfall);
            }
            ComplianceResult {
                measurement: *measurement,
                limit_ref: resolved.limit_ref,
                bound: Some(resolved.bound),
                verdict,
                margin,
                explanation,
            }
        }
        Err(reason) => ComplianceResult::indeterminate(*measurement, reason),
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Relative headroom of `value` against `bound`; negative when outside.
///
/// `None` for must-not-trip checks, which are pass/fail only.
pub fn margin_for(value: f64, bound: Bound) -> Option<f64> {
    match bound {
        Bound::Maximum { limit, scale } => Some((limit - value) / scale),
        Bound::Minimum { limit } => Some((value - limit) / limit),
        Bound::Window { min, max } => {
            let upper = (max - value) / max;
            if min > 0.0 {
                Some(upper.min((value - min) / min))
            } else {
                Some(upper)
            }
        }
        Bound::MustNotTrip { .. } => None,
    }
}

/// Classify a reading: Fail below zero margin, Marginal inside the band,
/// otherwise Pass. A reading exactly on the limit is Marginal.
pub fn classify(value: f64, bound: Bound, marginal_band: f64) -> (Verdict, Option<f64>) {
    if let Bound::MustNotTrip { hold_ms } = bound {
        let verdict = if value >= hold_ms {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        return (verdict, None);
    }
    let margin = margin_for(value, bound);
    let verdict = match margin {
        Some(m) if m < 0.0 => Verdict::Fail,
        Some(m) if m < marginal_band => Verdict::Marginal,
        Some(_) => Verdict::Pass,
        None => Verdict::Fail,
    };
    (verdict, margin)
}

fn explain(
    measurement: &Measurement,
    limit_ref: &LimitRef,
    bound: Bound,
    verdict: &Verdict,
    margin: Option<f64>,
    note: Option<&str>,
) -> String {
    let symbol = measurement.unit.symbol();
    let limit = match bound {
        Bound::Window { min, max } if min > 0.0 => {
            format!("{:.2}–{:.2} {}", min, max, symbol)
        }
        Bound::MustNotTrip { hold_ms } => format!("no trip within {:.0} {}", hold_ms, symbol),
        other => format!("{} {:.2} {}", other.symbol(), other.headline(), symbol),
    };
    let outcome = match verdict {
        Verdict::Pass => "meets",
        Verdict::Marginal => "only just meets",
        Verdict::Fail => "does not meet",
        Verdict::Indeterminate(_) => "cannot be compared with",
    };
    let mut text = format!(
        "{} {} {} the limit {} ({})",
        measurement.kind.label(),
        measurement.display_value(),
        outcome,
        limit,
        limit_ref.citation()
    );
    if let Some(note) = note {
        text.push(' ');
        text.push_str(note);
    }
    if let Some(m) = margin {
        text.push_str(&format!("; margin {:.1}%", m * 100.0));
    }
    text
}
