//! Design water temperature bands for heating and cooling circuits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterSystem {
    ChilledWater,
    /// Traditional low temperature hot water, 82/71 °C.
    LthwTraditional,
    /// Condensing boiler LTHW, 70/50 °C.
    LthwCondensing,
    /// Low-temperature heat pump circuit.
    HeatPump,
}

/// Flow and return temperatures (°C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    pub flow_c: f64,
    pub return_c: f64,
}

impl TemperatureBand {
    /// Temperature difference across the circuit, always positive.
    pub fn delta_t(&self) -> f64 {
        (self.return_c - self.flow_c).abs()
    }
}

impl WaterSystem {
    pub fn band(self) -> TemperatureBand {
        let (flow_c, return_c) = match self {
            WaterSystem::ChilledWater => (6.0, 12.0),
            WaterSystem::LthwTraditional => (82.0, 71.0),
            WaterSystem::LthwCondensing => (70.0, 50.0),
            WaterSystem::HeatPump => (45.0, 40.0),
        };
        TemperatureBand { flow_c, return_c }
    }

    pub fn is_cooling(self) -> bool {
        self == WaterSystem::ChilledWater
    }
}
