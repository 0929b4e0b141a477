//! Test readings taken on site.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_non_negative, DomainError};

/// What was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    /// Earth fault loop impedance.
    Zs,
    /// Line plus circuit protective conductor resistance.
    R1R2,
    InsulationResistance,
    RcdTripTime,
    /// Off-coil air temperature downstream of a cooling coil.
    Temperature,
    /// Water mass flow through a coil or emitter circuit.
    Flow,
}

impl MeasurementKind {
    pub fn label(self) -> &'static str {
        match self {
            MeasurementKind::Zs => "Zs",
            MeasurementKind::R1R2 => "R1+R2",
            MeasurementKind::InsulationResistance => "Insulation resistance",
            MeasurementKind::RcdTripTime => "RCD trip time",
            MeasurementKind::Temperature => "Off-coil temperature",
            MeasurementKind::Flow => "Water flow",
        }
    }

    /// Only temperatures can legitimately read below zero.
    pub fn allows_negative(self) -> bool {
        self == MeasurementKind::Temperature
    }

    /// The unit readings of this kind are recorded in.
    pub fn unit(self) -> Unit {
        match self {
            MeasurementKind::Zs | MeasurementKind::R1R2 => Unit::Ohms,
            MeasurementKind::InsulationResistance => Unit::Megohms,
            MeasurementKind::RcdTripTime => Unit::Milliseconds,
            MeasurementKind::Temperature => Unit::Celsius,
            MeasurementKind::Flow => Unit::KgPerSecond,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Ohms,
    Megohms,
    Milliseconds,
    Celsius,
    KgPerSecond,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Ohms => "Ω",
            Unit::Megohms => "MΩ",
            Unit::Milliseconds => "ms",
            Unit::Celsius => "°C",
            Unit::KgPerSecond => "kg/s",
        }
    }
}

/// A single reading. Built once per test event and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub kind: MeasurementKind,
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    /// Build a reading, checking the value is finite, physically possible for
    /// its kind and recorded in the kind's unit.
    pub fn new(kind: MeasurementKind, value: f64, unit: Unit) -> Result<Self, DomainError> {
        if kind.allows_negative() {
            require_finite(kind.label(), value)?;
        } else {
            require_non_negative(kind.label(), value)?;
        }
        if kind.unit() != unit {
            return Err(DomainError::UnitMismatch {
                kind: kind.label().to_string(),
                unit: unit.symbol().to_string(),
            });
        }
        Ok(Self { kind, value, unit })
    }

    /// Build a reading in the kind's natural unit.
    pub fn of(kind: MeasurementKind, value: f64) -> Result<Self, DomainError> {
        Self::new(kind, value, kind.unit())
    }

    pub fn zs(ohms: f64) -> Result<Self, DomainError> {
        Self::of(MeasurementKind::Zs, ohms)
    }

    pub fn r1r2(ohms: f64) -> Result<Self, DomainError> {
        Self::of(MeasurementKind::R1R2, ohms)
    }

    pub fn insulation(megohms: f64) -> Result<Self, DomainError> {
        Self::of(MeasurementKind::InsulationResistance, megohms)
    }

    pub fn rcd_trip(ms: f64) -> Result<Self, DomainError> {
        Self::of(MeasurementKind::RcdTripTime, ms)
    }

    pub fn temperature(celsius: f64) -> Result<Self, DomainError> {
        Self::of(MeasurementKind::Temperature, celsius)
    }

    pub fn flow(kg_per_s: f64) -> Result<Self, DomainError> {
        Self::of(MeasurementKind::Flow, kg_per_s)
    }

    /// Value with its unit symbol, two decimal places.
    pub fn display_value(&self) -> String {
        format!("{:.2} {}", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_must_match_kind() {
        let err = Measurement::new(MeasurementKind::Zs, 0.5, Unit::Megohms).unwrap_err();
        assert!(matches!(err, DomainError::UnitMismatch { .. }));
        assert!(Measurement::new(MeasurementKind::Zs, 0.5, Unit::Ohms).is_ok());
    }

    #[test]
    fn test_rejects_nan() {
        assert!(Measurement::zs(f64::NAN).is_err());
        assert!(Measurement::flow(f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_negative_except_temperature() {
        for kind in [
            MeasurementKind::Zs,
            MeasurementKind::R1R2,
            MeasurementKind::InsulationResistance,
            MeasurementKind::RcdTripTime,
            MeasurementKind::Flow,
        ] {
            let err = Measurement::of(kind, -0.1).unwrap_err();
            assert!(matches!(err, DomainError::Negative { .. }), "{kind:?}: {err:?}");
            assert!(Measurement::of(kind, 0.0).is_ok(), "{kind:?}");
        }
        assert!(Measurement::temperature(-4.0).is_ok());
    }

    #[test]
    fn test_display_value() {
        let m = Measurement::zs(0.846).unwrap();
        assert_eq!(m.display_value(), "0.85 Ω");
        let m = Measurement::rcd_trip(23.0).unwrap();
        assert_eq!(m.display_value(), "23.00 ms");
    }

    #[test]
    fn test_measurement_serialization() {
        let m = Measurement::insulation(200.0).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let decoded: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(m, decoded);
    }
}
