//! Conductor sizing data: protective conductors, bonding, resistance and
//! voltage drop.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, DomainError};

/// Standard copper conductor cross-sectional areas (mm²).
pub const STANDARD_CSA: [f64; 17] = [
    1.0, 1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0, 150.0, 185.0,
    240.0, 300.0,
];

/// Main protective bonding limits for non-PME supplies (mm² copper).
pub const MAIN_BONDING_MIN_CSA: f64 = 6.0;
pub const MAIN_BONDING_MAX_CSA: f64 = 25.0;

/// Supplementary bonding minimums (mm² copper).
pub const SUPPLEMENTARY_BONDING_PROTECTED_CSA: f64 = 2.5;
pub const SUPPLEMENTARY_BONDING_UNPROTECTED_CSA: f64 = 4.0;

/// Copper conductor resistance at 20 °C, (csa mm², mΩ/m).
const COPPER_RESISTANCE: [(f64, f64); 10] = [
    (1.0, 18.10),
    (1.5, 12.10),
    (2.5, 7.41),
    (4.0, 4.61),
    (6.0, 3.08),
    (10.0, 1.83),
    (16.0, 1.15),
    (25.0, 0.727),
    (35.0, 0.524),
    (50.0, 0.387),
];

/// Flat twin & earth voltage drop at 70 °C, (csa mm², mV/A/m).
const TWIN_EARTH_VOLT_DROP: [(f64, f64); 7] = [
    (1.0, 44.0),
    (1.5, 29.0),
    (2.5, 18.0),
    (4.0, 11.0),
    (6.0, 7.3),
    (10.0, 4.4),
    (16.0, 2.8),
];

fn tabulated(table: &[(f64, f64)], name: &str, csa: f64) -> Result<f64, DomainError> {
    require_positive(name, csa)?;
    table
        .iter()
        .find(|(size, _)| (size - csa).abs() < 1e-6)
        .map(|&(_, value)| value)
        .ok_or(DomainError::UnsupportedSize {
            name: name.to_string(),
            value: csa,
        })
}

/// Smallest standard size at or above `csa`.
pub fn next_standard_csa(csa: f64) -> Result<f64, DomainError> {
    require_positive("csa", csa)?;
    STANDARD_CSA
        .iter()
        .copied()
        .find(|&size| size >= csa - 1e-9)
        .ok_or(DomainError::UnsupportedSize {
            name: "csa".to_string(),
            value: csa,
        })
}

/// Table 54.7: minimum protective conductor size for a line conductor of the
/// same material.
///
/// - S ≤ 16 mm²: S
/// - 16 < S ≤ 35 mm²: 16 mm²
/// - S > 35 mm²: S/2
pub fn min_cpc_csa(line_csa: f64) -> Result<f64, DomainError> {
    require_positive("line_csa", line_csa)?;
    if line_csa <= 16.0 {
        Ok(line_csa)
    } else if line_csa <= 35.0 {
        Ok(16.0)
    } else {
        next_standard_csa(line_csa / 2.0)
    }
}

/// Main protective bonding for TN-S/TT supplies: half the main earthing
/// conductor, rounded up to a standard size, at least 6 mm² and no more than
/// 25 mm² required.
pub fn main_bonding_csa(main_earthing_csa: f64) -> Result<f64, DomainError> {
    require_positive("main_earthing_csa", main_earthing_csa)?;
    let half = next_standard_csa(main_earthing_csa / 2.0)?;
    Ok(half.clamp(MAIN_BONDING_MIN_CSA, MAIN_BONDING_MAX_CSA))
}

/// Table 54.8: main protective bonding for PME supplies, chosen from the
/// supply neutral conductor size.
pub fn pme_bonding_csa(supply_neutral_csa: f64) -> Result<f64, DomainError> {
    require_positive("supply_neutral_csa", supply_neutral_csa)?;
    Ok(match supply_neutral_csa {
        s if s <= 35.0 => 10.0,
        s if s <= 50.0 => 16.0,
        s if s <= 95.0 => 25.0,
        s if s <= 150.0 => 35.0,
        _ => 50.0,
    })
}

/// Supplementary bonding minimum, depending on mechanical protection.
pub fn supplementary_bonding_csa(mechanically_protected: bool) -> f64 {
    if mechanically_protected {
        SUPPLEMENTARY_BONDING_PROTECTED_CSA
    } else {
        SUPPLEMENTARY_BONDING_UNPROTECTED_CSA
    }
}

/// Copper resistance per metre at 20 °C (mΩ/m).
pub fn copper_resistance_mohm_per_m(csa: f64) -> Result<f64, DomainError> {
    tabulated(&COPPER_RESISTANCE, "csa", csa)
}

/// Twin & earth voltage drop (mV/A/m).
pub fn twin_earth_mv_per_a_m(csa: f64) -> Result<f64, DomainError> {
    tabulated(&TWIN_EARTH_VOLT_DROP, "csa", csa)
}

// =============================================================================
// k values for the adiabatic equation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConductorMaterial {
    Copper,
    Aluminium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Insulation {
    /// 70 °C thermoplastic (PVC).
    Thermoplastic70,
    /// 90 °C thermosetting (XLPE).
    Thermosetting90,
}

/// Whether the protective conductor is a core of the cable or run separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpcArrangement {
    /// Table 54.4: core of a multicore cable.
    Incorporated,
    /// Table 54.3: separate insulated conductor.
    Separate,
}

/// k for `S = √(I²t) / k`.
pub fn k_value(material: ConductorMaterial, insulation: Insulation, arrangement: CpcArrangement) -> f64 {
    use ConductorMaterial::*;
    use CpcArrangement::*;
    use Insulation::*;
    match (arrangement, material, insulation) {
        (Incorporated, Copper, Thermoplastic70) => 115.0,
        (Incorporated, Copper, Thermosetting90) => 143.0,
        (Incorporated, Aluminium, Thermoplastic70) => 76.0,
        (Incorporated, Aluminium, Thermosetting90) => 94.0,
        (Separate, Copper, Thermoplastic70) => 143.0,
        (Separate, Copper, Thermosetting90) => 176.0,
        (Separate, Aluminium, Thermoplastic70) => 95.0,
        (Separate, Aluminium, Thermosetting90) => 116.0,
    }
}
