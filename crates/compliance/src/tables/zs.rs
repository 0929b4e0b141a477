//! Maximum earth fault loop impedance tables.
//!
//! Values are the tabulated (conductor-at-operating-temperature) limits from
//! BS 7671 Tables 41.2, 41.3 and 41.5 at U0 = 230 V, Cmin = 0.95. The 0.8
//! on-site derating is NOT applied here; the validator applies it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::device::{DeviceCurve, DeviceSpec, DeviceType};
use crate::error::{ComplianceError, NotFoundError};

/// Two ratings closer than this are treated as the same table row.
const RATING_EPSILON: f64 = 1e-6;

// =============================================================================
// Table references
// =============================================================================

/// Which BS 7671 table a limit was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableRef {
    /// Fuses, 0.4 s disconnection.
    Table41_2,
    /// Circuit-breakers and RCBOs.
    Table41_3,
    /// RCD-protected circuits (50 V / IΔn).
    Table41_5,
}

impl TableRef {
    pub fn citation(self) -> &'static str {
        match self {
            TableRef::Table41_2 => "BS 7671 Table 41.2",
            TableRef::Table41_3 => "BS 7671 Table 41.3",
            TableRef::Table41_5 => "BS 7671 Table 41.5",
        }
    }
}

// =============================================================================
// LimitEntry
// =============================================================================

/// One row of a loop impedance table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitEntry {
    pub device_type: DeviceType,
    pub curve: DeviceCurve,
    pub rating_amps: f64,
    /// Tabulated maximum Zs before site derating.
    pub max_zs_ohms: f64,
    /// Disconnection time the tabulated Zs guarantees.
    pub max_disconnection_time_ms: u32,
    pub table: TableRef,
}

impl LimitEntry {
    pub fn citation(&self) -> &'static str {
        self.table.citation()
    }
}

// =============================================================================
// Static data
// =============================================================================

struct ZsTable {
    device_types: &'static [DeviceType],
    curve: DeviceCurve,
    table: TableRef,
    max_disconnection_time_ms: u32,
    /// `(rating, max_zs)` pairs.
    rows: &'static [(f64, f64)],
}

const TYPE_B_ROWS: [(f64, f64); 11] = [
    (6.0, 7.28),
    (10.0, 4.37),
    (16.0, 2.73),
    (20.0, 2.19),
    (25.0, 1.75),
    (32.0, 1.37),
    (40.0, 1.09),
    (50.0, 0.87),
    (63.0, 0.69),
    (80.0, 0.55),
    (100.0, 0.44),
];

const TYPE_C_ROWS: [(f64, f64); 11] = [
    (6.0, 3.64),
    (10.0, 2.19),
    (16.0, 1.37),
    (20.0, 1.09),
    (25.0, 0.87),
    (32.0, 0.68),
    (40.0, 0.55),
    (50.0, 0.44),
    (63.0, 0.35),
    (80.0, 0.27),
    (100.0, 0.22),
];

const TYPE_D_ROWS: [(f64, f64); 11] = [
    (6.0, 1.82),
    (10.0, 1.09),
    (16.0, 0.68),
    (20.0, 0.55),
    (25.0, 0.44),
    (32.0, 0.34),
    (40.0, 0.27),
    (50.0, 0.22),
    (63.0, 0.17),
    (80.0, 0.14),
    (100.0, 0.11),
];

const BS88_2_ROWS: [(f64, f64); 8] = [
    (2.0, 33.1),
    (4.0, 15.6),
    (6.0, 8.52),
    (10.0, 5.11),
    (16.0, 2.70),
    (20.0, 1.77),
    (25.0, 1.44),
    (32.0, 1.04),
];

const BS3036_ROWS: [(f64, f64); 4] = [(5.0, 9.10), (15.0, 2.43), (20.0, 1.68), (30.0, 1.04)];

/// Rated residual current (A) against 50 V / IΔn.
const RCD_ROWS: [(f64, f64); 4] = [(0.03, 1667.0), (0.1, 500.0), (0.3, 167.0), (0.5, 100.0)];

const BREAKERS: &[DeviceType] = &[DeviceType::Mcb, DeviceType::Rcbo];
const FUSES: &[DeviceType] = &[DeviceType::Fuse];
const RCDS: &[DeviceType] = &[DeviceType::Rcd];

static ZS_TABLES: &[ZsTable] = &[
    ZsTable {
        device_types: BREAKERS,
        curve: DeviceCurve::B,
        table: TableRef::Table41_3,
        max_disconnection_time_ms: 400,
        rows: &TYPE_B_ROWS,
    },
    ZsTable {
        device_types: BREAKERS,
        curve: DeviceCurve::C,
        table: TableRef::Table41_3,
        max_disconnection_time_ms: 400,
        rows: &TYPE_C_ROWS,
    },
    ZsTable {
        device_types: BREAKERS,
        curve: DeviceCurve::D,
        table: TableRef::Table41_3,
        max_disconnection_time_ms: 400,
        rows: &TYPE_D_ROWS,
    },
    ZsTable {
        device_types: FUSES,
        curve: DeviceCurve::Bs88_2,
        table: TableRef::Table41_2,
        max_disconnection_time_ms: 400,
        rows: &BS88_2_ROWS,
    },
    ZsTable {
        device_types: FUSES,
        curve: DeviceCurve::Bs3036,
        table: TableRef::Table41_2,
        max_disconnection_time_ms: 400,
        rows: &BS3036_ROWS,
    },
    ZsTable {
        device_types: RCDS,
        curve: DeviceCurve::TypeAc,
        table: TableRef::Table41_5,
        max_disconnection_time_ms: 300,
        rows: &RCD_ROWS,
    },
    ZsTable {
        device_types: RCDS,
        curve: DeviceCurve::TypeA,
        table: TableRef::Table41_5,
        max_disconnection_time_ms: 300,
        rows: &RCD_ROWS,
    },
    ZsTable {
        device_types: RCDS,
        curve: DeviceCurve::TypeF,
        table: TableRef::Table41_5,
        max_disconnection_time_ms: 300,
        rows: &RCD_ROWS,
    },
    ZsTable {
        device_types: RCDS,
        curve: DeviceCurve::TypeB,
        table: TableRef::Table41_5,
        max_disconnection_time_ms: 300,
        rows: &RCD_ROWS,
    },
    ZsTable {
        device_types: RCDS,
        curve: DeviceCurve::TypeS,
        table: TableRef::Table41_5,
        max_disconnection_time_ms: 500,
        rows: &RCD_ROWS,
    },
];

fn find_entry(
    device_type: DeviceType,
    curve: DeviceCurve,
    rating_amps: f64,
) -> Result<LimitEntry, NotFoundError> {
    let not_found = || NotFoundError {
        device_type,
        curve: Some(curve),
        rating_amps,
    };
    if !rating_amps.is_finite() {
        return Err(not_found());
    }
    let table = ZS_TABLES
        .iter()
        .find(|t| t.curve == curve && t.device_types.contains(&device_type))
        .ok_or_else(not_found)?;
    table
        .rows
        .iter()
        .find(|(rating, _)| (rating - rating_amps).abs() < RATING_EPSILON)
        .map(|&(rating, max_zs)| LimitEntry {
            device_type,
            curve,
            rating_amps: rating,
            max_zs_ohms: max_zs,
            max_disconnection_time_ms: table.max_disconnection_time_ms,
            table: table.table,
        })
        .ok_or_else(not_found)
}

// =============================================================================
// Lookup API
// =============================================================================

/// Look up the limit for a device family and rating, using the family's
/// default curve (Type B for breakers, BS 88-2 for fuses, general RCD).
pub fn lookup_limit(device_type: DeviceType, rating_amps: f64) -> Result<LimitEntry, NotFoundError> {
    find_entry(device_type, device_type.default_curve(), rating_amps)
}

/// Look up the limit for a fully specified device.
pub fn lookup_limit_for(spec: &DeviceSpec) -> Result<LimitEntry, NotFoundError> {
    find_entry(spec.device_type, spec.effective_curve(), spec.rating_amps)
}

/// String-keyed lookup, e.g. `lookup_limit_str("MCB", 32.0)`.
pub fn lookup_limit_str(device_type: &str, rating_amps: f64) -> Result<LimitEntry, ComplianceError> {
    let device_type: DeviceType = device_type.parse()?;
    Ok(lookup_limit(device_type, rating_amps)?)
}

/// Every tabulated row, flattened. RCBO rows are listed alongside MCB rows.
pub fn all_entries() -> Vec<LimitEntry> {
    let mut entries = Vec::new();
    for table in ZS_TABLES {
        for &device_type in table.device_types {
            for &(rating, max_zs) in table.rows {
                entries.push(LimitEntry {
                    device_type,
                    curve: table.curve,
                    rating_amps: rating,
                    max_zs_ohms: max_zs,
                    max_disconnection_time_ms: table.max_disconnection_time_ms,
                    table: table.table,
                });
            }
        }
    }
    entries
}

// =============================================================================
// LimitTables resource
// =============================================================================

/// Read-only copy of every loop impedance row, inserted once at startup.
///
/// Systems only ever take `Res<LimitTables>`, so any number of validation
/// systems may read it in parallel.
#[derive(Resource, Debug, Clone)]
pub struct LimitTables {
    entries: Vec<LimitEntry>,
}

impl Default for LimitTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl LimitTables {
    /// Tables seeded from the BS 7671 data above.
    pub fn standard() -> Self {
        Self {
            entries: all_entries(),
        }
    }

    pub fn lookup(&self, spec: &DeviceSpec) -> Result<LimitEntry, NotFoundError> {
        let curve = spec.effective_curve();
        self.entries
            .iter()
            .find(|e| {
                e.device_type == spec.device_type
                    && e.curve == curve
                    && (e.rating_amps - spec.rating_amps).abs() < RATING_EPSILON
            })
            .copied()
            .ok_or(NotFoundError {
                device_type: spec.device_type,
                curve: Some(curve),
                rating_amps: spec.rating_amps,
            })
    }

    pub fn entries(&self) -> &[LimitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
