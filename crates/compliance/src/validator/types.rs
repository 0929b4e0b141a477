//! Types shared by the validator, reporter and pipeline.

use serde::{Deserialize, Serialize};

use crate::config::CP_WATER;
use crate::device::DeviceSpec;
use crate::error::{DomainError, NotFoundError};
use crate::formulas::FormulaKind;
use crate::measurement::Measurement;
use crate::tables::{
    CircuitClass, CircuitVoltage, EarthingSystem, LimitEntry, TestMultiple, WaterSystem,
};

// =============================================================================
// Verdict
// =============================================================================

/// Why a measurement could not be judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndeterminateReason {
    /// The device has no row in any limit table.
    NoTableEntry(NotFoundError),
    /// A formula input or the reading itself is outside its valid domain.
    InvalidInput(DomainError),
    /// The context lacks something this kind of measurement needs.
    MissingContext(String),
}

impl IndeterminateReason {
    pub fn describe(&self) -> String {
        match self {
            IndeterminateReason::NoTableEntry(e) => e.to_string(),
            IndeterminateReason::InvalidInput(e) => e.to_string(),
            IndeterminateReason::MissingContext(what) => format!("Missing {what}"),
        }
    }
}

/// Outcome of comparing a reading with its limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    /// Within the limit but with less headroom than the marginal band; re-test.
    Marginal,
    Fail,
    Indeterminate(IndeterminateReason),
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Marginal => "MARGINAL",
            Verdict::Fail => "FAIL",
            Verdict::Indeterminate(_) => "INDETERMINATE",
        }
    }

    /// Pass or Marginal. Indeterminate never counts as compliant.
    pub fn is_compliant(&self) -> bool {
        matches!(self, Verdict::Pass | Verdict::Marginal)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Verdict::Indeterminate(_))
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Where the limit a reading was judged against came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LimitRef {
    /// A loop impedance table row, scaled by `derating` for site conditions.
    Table { entry: LimitEntry, derating: f64 },
    /// A design value computed by a formula.
    Formula {
        formula: FormulaKind,
        citation: String,
    },
    /// A fixed regulatory threshold.
    Threshold { citation: String },
    /// Nothing resolved (only on Indeterminate results).
    Unresolved,
}

impl LimitRef {
    pub fn citation(&self) -> String {
        match self {
            LimitRef::Table { entry, derating } => {
                if (*derating - 1.0).abs() < f64::EPSILON {
                    entry.citation().to_string()
                } else {
                    format!("{} × {}", entry.citation(), derating)
                }
            }
            LimitRef::Formula { citation, .. } | LimitRef::Threshold { citation } => {
                citation.clone()
            }
            LimitRef::Unresolved => "no applicable limit".to_string(),
        }
    }
}

/// Direction of a limit check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Reading must not exceed `limit`. Margin is `(limit − value) / scale`.
    Maximum { limit: f64, scale: f64 },
    /// Reading must be at least `limit`.
    Minimum { limit: f64 },
    /// Reading must lie in `[min, max]`.
    Window { min: f64, max: f64 },
    /// The device must hold for at least `hold_ms`.
    MustNotTrip { hold_ms: f64 },
}

impl Bound {
    /// The headline limit value shown to users.
    pub fn headline(&self) -> f64 {
        match *self {
            Bound::Maximum { limit, .. } => limit,
            Bound::Minimum { limit } => limit,
            Bound::Window { max, .. } => max,
            Bound::MustNotTrip { hold_ms } => hold_ms,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Bound::Maximum { .. } => "≤",
            Bound::Minimum { .. } | Bound::MustNotTrip { .. } => "≥",
            Bound::Window { .. } => "within",
        }
    }
}

// =============================================================================
// ComplianceResult
// =============================================================================

/// A judged measurement. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub measurement: Measurement,
    pub limit_ref: LimitRef,
    /// The bound applied; `None` when Indeterminate.
    pub bound: Option<Bound>,
    pub verdict: Verdict,
    /// Relative headroom; negative when failing, `None` when not computable.
    pub margin: Option<f64>,
    pub explanation: String,
}

impl ComplianceResult {
    pub fn limit_value(&self) -> Option<f64> {
        self.bound.map(|b| b.headline())
    }

    pub(crate) fn indeterminate(measurement: Measurement, reason: IndeterminateReason) -> Self {
        let explanation = format!(
            "{} could not be assessed: {}",
            measurement.kind.label(),
            reason.describe()
        );
        Self {
            measurement,
            limit_ref: LimitRef::Unresolved,
            bound: None,
            verdict: Verdict::Indeterminate(reason),
            margin: None,
            explanation,
        }
    }
}

// =============================================================================
// Validation context
// =============================================================================

/// Cooling coil design data used to judge off-coil temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoilDesign {
    pub t_in: f64,
    pub adp: f64,
    pub contact_factor: f64,
}

/// Water-side design data used to judge measured flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterDesign {
    pub load_kw: f64,
    pub cp_w: f64,
    pub delta_t_w: f64,
}

impl WaterDesign {
    /// Design using a standard system's flow/return band and water cp.
    pub fn for_system(system: WaterSystem, load_kw: f64) -> Self {
        Self {
            load_kw,
            cp_w: CP_WATER,
            delta_t_w: system.band().delta_t(),
        }
    }
}

/// Everything besides the reading itself that a rule may need.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationContext {
    pub device: Option<DeviceSpec>,
    pub earthing: EarthingSystem,
    /// Selects the Table 41.1 disconnection time together with `earthing`.
    #[serde(default)]
    pub circuit_class: CircuitClass,
    /// Measured external loop impedance.
    pub ze_ohms: Option<f64>,
    pub circuit_voltage: CircuitVoltage,
    pub rcd_test_multiple: TestMultiple,
    pub coil: Option<CoilDesign>,
    pub water: Option<WaterDesign>,
}

impl ValidationContext {
    pub fn for_device(device: DeviceSpec) -> Self {
        Self {
            device: Some(device),
            ..Default::default()
        }
    }

    pub fn with_ze(mut self, ze_ohms: f64) -> Self {
        self.ze_ohms = Some(ze_ohms);
        self
    }

    pub fn with_earthing(mut self, earthing: EarthingSystem) -> Self {
        self.earthing = earthing;
        self
    }

    pub fn with_circuit_class(mut self, class: CircuitClass) -> Self {
        self.circuit_class = class;
        self
    }

    pub fn with_circuit_voltage(mut self, voltage: CircuitVoltage) -> Self {
        self.circuit_voltage = voltage;
        self
    }

    pub fn with_test_multiple(mut self, multiple: TestMultiple) -> Self {
        self.rcd_test_multiple = multiple;
        self
    }

    pub fn with_coil(mut self, coil: CoilDesign) -> Self {
        self.coil = Some(coil);
        self
    }

    pub fn with_water(mut self, water: WaterDesign) -> Self {
        self.water = Some(water);
        self
    }
}
