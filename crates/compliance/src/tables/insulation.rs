//! Table 64: minimum insulation resistance.

use serde::{Deserialize, Serialize};

/// Nominal circuit voltage band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CircuitVoltage {
    /// SELV and PELV circuits.
    Selv,
    /// Up to and including 500 V (normal 230/400 V installations).
    #[default]
    UpTo500V,
    Above500V,
}

impl CircuitVoltage {
    /// Band for a nominal circuit voltage in volts.
    pub fn from_nominal(volts: f64) -> Self {
        if volts <= 50.0 {
            CircuitVoltage::Selv
        } else if volts <= 500.0 {
            CircuitVoltage::UpTo500V
        } else {
            CircuitVoltage::Above500V
        }
    }

    /// DC test voltage applied by the insulation tester.
    pub fn test_voltage(self) -> f64 {
        match self {
            CircuitVoltage::Selv => 250.0,
            CircuitVoltage::UpTo500V => 500.0,
            CircuitVoltage::Above500V => 1000.0,
        }
    }

    /// Minimum acceptable insulation resistance (MΩ).
    pub fn min_insulation_megohms(self) -> f64 {
        match self {
            CircuitVoltage::Selv => 0.5,
            CircuitVoltage::UpTo500V | CircuitVoltage::Above500V => 1.0,
        }
    }
}
