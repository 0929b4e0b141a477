//! Schedule of test results: one row per circuit on a certificate.

use serde::{Deserialize, Serialize};

use crate::config::{ValidatorConfig, SITE_DERATING_FACTOR};
use crate::device::DeviceSpec;
use crate::error::NotFoundError;
use crate::measurement::{Measurement, MeasurementKind};
use crate::tables::{
    lookup_limit_for, CircuitClass, CircuitVoltage, EarthingSystem, TableRef, TestMultiple,
};
use crate::validator::{
    validate_with, ComplianceResult, LimitSource, StaticTables, ValidationContext,
};

/// Readings recorded against one circuit. Absent readings are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitTestRecord {
    pub designation: String,
    pub device: DeviceSpec,
    pub earthing: EarthingSystem,
    #[serde(default)]
    pub circuit_class: CircuitClass,
    pub circuit_voltage: CircuitVoltage,
    pub ze_ohms: Option<f64>,
    pub zs_ohms: Option<f64>,
    pub r1r2_ohms: Option<f64>,
    pub insulation_ln_megohms: Option<f64>,
    pub insulation_le_megohms: Option<f64>,
    /// Trip time at 1 × IΔn.
    pub rcd_trip_ms: Option<f64>,
    /// Trip time at 5 × IΔn.
    pub rcd_trip_5x_ms: Option<f64>,
}

impl CircuitTestRecord {
    pub fn new(designation: impl Into<String>, device: DeviceSpec) -> Self {
        Self {
            designation: designation.into(),
            device,
            earthing: EarthingSystem::default(),
            circuit_class: CircuitClass::default(),
            circuit_voltage: CircuitVoltage::default(),
            ze_ohms: None,
            zs_ohms: None,
            r1r2_ohms: None,
            insulation_ln_megohms: None,
            insulation_le_megohms: None,
            rcd_trip_ms: None,
            rcd_trip_5x_ms: None,
        }
    }

    fn context(&self) -> ValidationContext {
        let mut context = ValidationContext::for_device(self.device)
            .with_earthing(self.earthing)
            .with_circuit_class(self.circuit_class)
            .with_circuit_voltage(self.circuit_voltage);
        context.ze_ohms = self.ze_ohms;
        context
    }
}

/// Validate every reading on the record against the standard tables.
pub fn validate_circuit(record: &CircuitTestRecord) -> Vec<ComplianceResult> {
    validate_circuit_with(record, &StaticTables, &ValidatorConfig::default())
}

/// Validate every reading on the record, in certificate column order.
pub fn validate_circuit_with(
    record: &CircuitTestRecord,
    tables: &dyn LimitSource,
    config: &ValidatorConfig,
) -> Vec<ComplianceResult> {
    let context = record.context();
    let readings = [
        (MeasurementKind::R1R2, record.r1r2_ohms, TestMultiple::One),
        (MeasurementKind::Zs, record.zs_ohms, TestMultiple::One),
        (MeasurementKind::InsulationResistance, record.insulation_ln_megohms, TestMultiple::One),
        (MeasurementKind::InsulationResistance, record.insulation_le_megohms, TestMultiple::One),
        (MeasurementKind::RcdTripTime, record.rcd_trip_ms, TestMultiple::One),
        (MeasurementKind::RcdTripTime, record.rcd_trip_5x_ms, TestMultiple::Five),
    ];

    readings
        .into_iter()
        .filter_map(|(kind, value, multiple)| value.map(|v| (kind, v, multiple)))
        .map(|(kind, value, multiple)| {
            // Built directly so a bad value still yields an Indeterminate row.
            let measurement = Measurement {
                kind,
                value,
                unit: kind.unit(),
            };
            let context = context.with_test_multiple(multiple);
            validate_with(&measurement, &context, tables, config)
        })
        .collect()
}

/// Site Zs limit as printed on a certificate: tabulated value × 0.8, to 2 dp.
///
/// Table 41.5 (RCD) limits are printed as tabulated.
pub fn max_zs_for_circuit(device: &DeviceSpec) -> Result<f64, NotFoundError> {
    let entry = lookup_limit_for(device)?;
    let limit = match entry.table {
        TableRef::Table41_5 => entry.max_zs_ohms,
        TableRef::Table41_2 | TableRef::Table41_3 => entry.max_zs_ohms * SITE_DERATING_FACTOR,
    };
    Ok((limit * 100.0).round() / 100.0)
}
