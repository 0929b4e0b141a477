//! Protective device descriptions.
//!
//! A [`DeviceSpec`] is what a certificate records for a circuit's protective
//! device: its family (MCB, RCBO, fuse, RCD), its rating and the curve or class
//! that selects the right limit table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Family of protective device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Miniature circuit breaker to BS EN 60898.
    Mcb,
    /// RCD with integral overcurrent protection to BS EN 61009.
    Rcbo,
    /// Cartridge or rewireable fuse.
    Fuse,
    /// Residual current device without overcurrent protection.
    Rcd,
}

impl DeviceType {
    pub fn label(self) -> &'static str {
        match self {
            DeviceType::Mcb => "MCB",
            DeviceType::Rcbo => "RCBO",
            DeviceType::Fuse => "Fuse",
            DeviceType::Rcd => "RCD",
        }
    }

    /// Curve/class used when the caller gives only a device type and rating.
    pub fn default_curve(self) -> DeviceCurve {
        match self {
            DeviceType::Mcb | DeviceType::Rcbo => DeviceCurve::B,
            DeviceType::Fuse => DeviceCurve::Bs88_2,
            DeviceType::Rcd => DeviceCurve::TypeAc,
        }
    }

    /// Whether `curve` is meaningful for this device family.
    pub fn accepts_curve(self, curve: DeviceCurve) -> bool {
        match self {
            DeviceType::Mcb => curve.is_breaker_curve(),
            // RCBO curve selects the overcurrent table; its RCD class is not recorded here.
            DeviceType::Rcbo => curve.is_breaker_curve(),
            DeviceType::Fuse => curve.is_fuse_class(),
            DeviceType::Rcd => curve.is_rcd_class(),
        }
    }
}

impl FromStr for DeviceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcb" => Ok(DeviceType::Mcb),
            "rcbo" => Ok(DeviceType::Rcbo),
            "fuse" => Ok(DeviceType::Fuse),
            "rcd" | "rccb" => Ok(DeviceType::Rcd),
            _ => Err(DomainError::UnknownDeviceType(s.to_string())),
        }
    }
}

/// Tripping curve (breakers), fuse standard, or RCD class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCurve {
    B,
    C,
    D,
    /// BS 88-2 general purpose (gG) fuse.
    Bs88_2,
    /// BS 88-3 domestic cartridge fuse (formerly BS 1361).
    Bs88_3,
    /// BS 3036 semi-enclosed rewireable fuse.
    Bs3036,
    TypeAc,
    TypeA,
    TypeF,
    TypeB,
    /// Time-delayed (selective) RCD.
    TypeS,
}

impl DeviceCurve {
    pub fn label(self) -> &'static str {
        match self {
            DeviceCurve::B => "Type B",
            DeviceCurve::C => "Type C",
            DeviceCurve::D => "Type D",
            DeviceCurve::Bs88_2 => "BS 88-2",
            DeviceCurve::Bs88_3 => "BS 88-3",
            DeviceCurve::Bs3036 => "BS 3036",
            DeviceCurve::TypeAc => "Type AC",
            DeviceCurve::TypeA => "Type A",
            DeviceCurve::TypeF => "Type F",
            DeviceCurve::TypeB => "Type B (RCD)",
            DeviceCurve::TypeS => "Type S",
        }
    }

    pub fn is_breaker_curve(self) -> bool {
        matches!(self, DeviceCurve::B | DeviceCurve::C | DeviceCurve::D)
    }

    pub fn is_fuse_class(self) -> bool {
        matches!(
            self,
            DeviceCurve::Bs88_2 | DeviceCurve::Bs88_3 | DeviceCurve::Bs3036
        )
    }

    pub fn is_rcd_class(self) -> bool {
        matches!(
            self,
            DeviceCurve::TypeAc
                | DeviceCurve::TypeA
                | DeviceCurve::TypeF
                | DeviceCurve::TypeB
                | DeviceCurve::TypeS
        )
    }

    /// Time-delayed RCDs have their own trip-time window.
    pub fn is_time_delayed(self) -> bool {
        self == DeviceCurve::TypeS
    }
}

/// The protective device a measurement is judged against.
///
/// `rating_amps` is the nominal current `In` for overcurrent devices and the
/// rated residual operating current `IΔn` for RCDs (0.03 for a 30 mA device).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub device_type: DeviceType,
    pub rating_amps: f64,
    pub curve: Option<DeviceCurve>,
}

impl DeviceSpec {
    /// Build a spec, rejecting non-positive ratings and curves that do not
    /// belong to the device family.
    pub fn new(
        device_type: DeviceType,
        rating_amps: f64,
        curve: Option<DeviceCurve>,
    ) -> Result<Self, DomainError> {
        crate::error::require_positive("rating_amps", rating_amps)?;
        if let Some(curve) = curve {
            if !device_type.accepts_curve(curve) {
                return Err(DomainError::UnknownDeviceType(format!(
                    "{} {}",
                    device_type.label(),
                    curve.label()
                )));
            }
        }
        Ok(Self {
            device_type,
            rating_amps,
            curve,
        })
    }

    pub fn mcb(curve: DeviceCurve, rating_amps: f64) -> Result<Self, DomainError> {
        Self::new(DeviceType::Mcb, rating_amps, Some(curve))
    }

    pub fn rcbo(curve: DeviceCurve, rating_amps: f64) -> Result<Self, DomainError> {
        Self::new(DeviceType::Rcbo, rating_amps, Some(curve))
    }

    pub fn fuse(class: DeviceCurve, rating_amps: f64) -> Result<Self, DomainError> {
        Self::new(DeviceType::Fuse, rating_amps, Some(class))
    }

    /// RCD rated in milliamps, as printed on the device.
    pub fn rcd(class: DeviceCurve, rating_ma: f64) -> Result<Self, DomainError> {
        Self::new(DeviceType::Rcd, rating_ma / 1000.0, Some(class))
    }

    /// The curve recorded on the spec, or the family default.
    pub fn effective_curve(&self) -> DeviceCurve {
        self.curve.unwrap_or_else(|| self.device_type.default_curve())
    }

    /// Whether the device provides residual current protection.
    pub fn has_rcd(&self) -> bool {
        matches!(self.device_type, DeviceType::Rcd | DeviceType::Rcbo)
    }

    /// Short human description, e.g. `"MCB Type B 32 A"` or `"RCD Type A 30 mA"`.
    pub fn describe(&self) -> String {
        let curve = self.effective_curve().label();
        match self.device_type {
            DeviceType::Rcd => format!(
                "{} {} {} mA",
                self.device_type.label(),
                curve,
                round_display(self.rating_amps * 1000.0)
            ),
            _ => format!(
                "{} {} {} A",
                self.device_type.label(),
                curve,
                round_display(self.rating_amps)
            ),
        }
    }
}

fn round_display(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_type_case_insensitive() {
        assert_eq!("MCB".parse::<DeviceType>().unwrap(), DeviceType::Mcb);
        assert_eq!(" rcbo ".parse::<DeviceType>().unwrap(), DeviceType::Rcbo);
        assert_eq!("Fuse".parse::<DeviceType>().unwrap(), DeviceType::Fuse);
        assert_eq!("rccb".parse::<DeviceType>().unwrap(), DeviceType::Rcd);
    }

    #[test]
    fn test_fuse_class_names_are_not_device_types() {
        // A class name would lose its curve and fall back to the BS 88-2 table.
        for name in ["BS3036", "bs 3036", "bs88"] {
            let err = name.parse::<DeviceType>().unwrap_err();
            assert_eq!(err, DomainError::UnknownDeviceType(name.to_string()));
        }
    }

    #[test]
    fn test_parse_unknown_device_type() {
        let err = "AFDD".parse::<DeviceType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownDeviceType("AFDD".to_string()));
    }

    #[test]
    fn test_default_curves() {
        assert_eq!(DeviceType::Mcb.default_curve(), DeviceCurve::B);
        assert_eq!(DeviceType::Fuse.default_curve(), DeviceCurve::Bs88_2);
        assert_eq!(DeviceType::Rcd.default_curve(), DeviceCurve::TypeAc);
    }

    #[test]
    fn test_spec_rejects_mismatched_curve() {
        assert!(DeviceSpec::mcb(DeviceCurve::Bs3036, 16.0).is_err());
        assert!(DeviceSpec::fuse(DeviceCurve::C, 16.0).is_err());
        assert!(DeviceSpec::rcd(DeviceCurve::B, 30.0).is_err());
    }

    #[test]
    fn test_spec_rejects_non_positive_rating() {
        assert!(DeviceSpec::mcb(DeviceCurve::B, 0.0).is_err());
        assert!(DeviceSpec::mcb(DeviceCurve::B, -6.0).is_err());
    }

    #[test]
    fn test_rcd_rating_is_stored_in_amps() {
        let spec = DeviceSpec::rcd(DeviceCurve::TypeA, 30.0).unwrap();
        assert!((spec.rating_amps - 0.03).abs() < 1e-12);
        assert_eq!(spec.describe(), "RCD Type A 30 mA");
    }

    #[test]
    fn test_describe_breaker() {
        let spec = DeviceSpec::mcb(DeviceCurve::C, 20.0).unwrap();
        assert_eq!(spec.describe(), "MCB Type C 20 A");
        assert!(!spec.has_rcd());
        assert!(DeviceSpec::rcbo(DeviceCurve::B, 32.0).unwrap().has_rcd());
    }
}
