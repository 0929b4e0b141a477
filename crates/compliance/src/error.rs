// ---------------------------------------------------------------------------
// Error types for table lookups, formula evaluation and configuration
// ---------------------------------------------------------------------------

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceCurve, DeviceType};

/// No limit table carries an entry for the requested device.
///
/// Callers must surface this rather than assume a default limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFoundError {
    pub device_type: DeviceType,
    pub curve: Option<DeviceCurve>,
    pub rating_amps: f64,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.curve {
            Some(curve) => write!(
                f,
                "No matching table entry for {} {} rated {} A",
                self.device_type.label(),
                curve.label(),
                self.rating_amps
            ),
            None => write!(
                f,
                "No matching table entry for {} rated {} A",
                self.device_type.label(),
                self.rating_amps
            ),
        }
    }
}

impl std::error::Error for NotFoundError {}

/// A formula or constructor received an input outside its physical domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// Value must lie within `[min, max]`.
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Value must be strictly greater than zero.
    NonPositive { name: String, value: f64 },
    /// Value must not be negative.
    Negative { name: String, value: f64 },
    /// NaN or infinite input.
    NotFinite { name: String },
    /// `evaluate_formula` was called without a required argument.
    MissingArgument { formula: String, argument: String },
    UnknownFormula(String),
    UnknownDeviceType(String),
    /// No tabulated row for this conductor size.
    UnsupportedSize { name: String, value: f64 },
    /// The unit supplied does not match the measurement kind.
    UnitMismatch { kind: String, unit: String },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} = {value} is outside [{min}, {max}]"),
            DomainError::NonPositive { name, value } => {
                write!(f, "{name} = {value} must be greater than zero")
            }
            DomainError::Negative { name, value } => {
                write!(f, "{name} = {value} must not be negative")
            }
            DomainError::NotFinite { name } => write!(f, "{name} is not a finite number"),
            DomainError::MissingArgument { formula, argument } => {
                write!(f, "Formula '{formula}' requires argument '{argument}'")
            }
            DomainError::UnknownFormula(name) => write!(f, "Unknown formula '{name}'"),
            DomainError::UnknownDeviceType(name) => write!(f, "Unknown device type '{name}'"),
            DomainError::UnsupportedSize { name, value } => {
                write!(f, "No tabulated data for {name} = {value} mm²")
            }
            DomainError::UnitMismatch { kind, unit } => {
                write!(f, "Unit {unit} cannot be used for a {kind} measurement")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Either failure an operation combining table lookups and formulas can hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComplianceError {
    NotFound(NotFoundError),
    Domain(DomainError),
}

impl fmt::Display for ComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceError::NotFound(e) => write!(f, "Lookup failed: {e}"),
            ComplianceError::Domain(e) => write!(f, "Invalid input: {e}"),
        }
    }
}

impl std::error::Error for ComplianceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComplianceError::NotFound(e) => Some(e),
            ComplianceError::Domain(e) => Some(e),
        }
    }
}

impl From<NotFoundError> for ComplianceError {
    fn from(e: NotFoundError) -> Self {
        ComplianceError::NotFound(e)
    }
}

impl From<DomainError> for ComplianceError {
    fn from(e: DomainError) -> Self {
        ComplianceError::Domain(e)
    }
}

/// Errors raised while loading a [`crate::config::ValidatorConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The document is not valid JSON for the config schema.
    Parse(String),
    /// A field parsed but holds an unusable value.
    Invalid { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
            ConfigError::Invalid { field, value } => {
                write!(f, "Config field '{field}' has invalid value {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Input guards shared by the formula evaluators
// ---------------------------------------------------------------------------

pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NotFinite {
            name: name.to_string(),
        })
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64, DomainError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::NonPositive {
            name: name.to_string(),
            value,
        })
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<f64, DomainError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::Negative {
            name: name.to_string(),
            value,
        })
    }
}

pub(crate) fn require_unit_interval(name: &str, value: f64) -> Result<f64, DomainError> {
    require_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::OutOfRange {
            name: name.to_string(),
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}
