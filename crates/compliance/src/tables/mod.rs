//! Constant tables (BS 7671 and building services reference data).
//!
//! Everything here is static, read-only data plus pure lookups. Unknown keys
//! return a typed error; no lookup ever falls back to a default limit.

pub mod conductors;
pub mod earthing;
pub mod hvac;
pub mod insulation;
pub mod rcd;
pub mod zs;


pub use conductors::{
    copper_resistance_mohm_per_m, k_value, main_bonding_csa, min_cpc_csa, next_standard_csa,
    pme_bonding_csa, supplementary_bonding_csa, twin_earth_mv_per_a_m, ConductorMaterial,
    CpcArrangement, Insulation,
};
pub use earthing::{max_disconnection_time_ms, CircuitClass, EarthingSystem};
pub use hvac::{TemperatureBand, WaterSystem};
pub use insulation::CircuitVoltage;
pub use rcd::{trip_requirement, TestMultiple, TripRequirement};
pub use zs::{
    all_entries, lookup_limit, lookup_limit_for, lookup_limit_str, LimitEntry, LimitTables,
    TableRef,
};
