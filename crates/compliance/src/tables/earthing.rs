//! Earthing arrangements and Table 41.1 disconnection times.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EarthingSystem {
    TnS,
    /// PME supply.
    #[default]
    TnCS,
    Tt,
}

impl EarthingSystem {
    pub fn label(self) -> &'static str {
        match self {
            EarthingSystem::TnS => "TN-S",
            EarthingSystem::TnCS => "TN-C-S",
            EarthingSystem::Tt => "TT",
        }
    }

    /// Maximum Ze a DNO typically declares, used for design when no
    /// measurement exists. TT installations rely on the electrode and have
    /// no declared value.
    pub fn typical_ze(self) -> Option<f64> {
        match self {
            EarthingSystem::TnS => Some(0.8),
            EarthingSystem::TnCS => Some(0.35),
            EarthingSystem::Tt => None,
        }
    }

    /// Whether main bonding follows Table 54.8 (PME) sizing.
    pub fn is_pme(self) -> bool {
        self == EarthingSystem::TnCS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CircuitClass {
    /// Final circuit rated up to 63 A with sockets, or 32 A fixed equipment.
    #[default]
    Final,
    /// Distribution circuits and larger final circuits.
    Distribution,
}

impl CircuitClass {
    pub fn label(self) -> &'static str {
        match self {
            CircuitClass::Final => "final",
            CircuitClass::Distribution => "distribution",
        }
    }
}

/// Table 41.1 maximum disconnection time at U0 = 230 V (ms).
pub fn max_disconnection_time_ms(system: EarthingSystem, class: CircuitClass) -> u32 {
    match (system, class) {
        (EarthingSystem::Tt, CircuitClass::Final) => 200,
        (EarthingSystem::Tt, CircuitClass::Distribution) => 1000,
        (_, CircuitClass::Final) => 400,
        (_, CircuitClass::Distribution) => 5000,
    }
}
