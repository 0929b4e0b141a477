//! BS 7671 compliance rules engine.
//!
//! Constant tables and formula evaluators feed a stateless rule validator
//! whose results are formatted for certificates. A Bevy plugin wraps the
//! validator in a queue, system and result log for host applications.

pub mod config;
pub mod device;
pub mod error;
pub mod formulas;
pub mod measurement;
pub mod pipeline;
pub mod report;
pub mod schedule;
pub mod tables;
pub mod validator;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use config::ValidatorConfig;
pub use device::{DeviceCurve, DeviceSpec, DeviceType};
pub use error::{ComplianceError, ConfigError, DomainError, NotFoundError};
pub use formulas::{evaluate_formula, formula_args, FormulaArgs, FormulaKind};
pub use measurement::{Measurement, MeasurementKind, Unit};
pub use pipeline::{CompliancePlugin, ComplianceSet};
pub use report::{format_result, overall_assessment, summarize, Assessment, FormattedResult};
pub use schedule::{max_zs_for_circuit, validate_circuit, CircuitTestRecord};
pub use tables::{lookup_limit, lookup_limit_for, LimitEntry, LimitTables};
pub use validator::{validate, validate_with, ComplianceResult, ValidationContext, Verdict};
