//! RCD operating time requirements.

use serde::{Deserialize, Serialize};

use crate::device::DeviceCurve;

/// Test current as a multiple of the rated residual current IΔn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TestMultiple {
    /// ½ × IΔn: the device must not trip.
    Half,
    #[default]
    One,
    /// 5 × IΔn: additional protection check.
    Five,
}

impl TestMultiple {
    pub fn label(self) -> &'static str {
        match self {
            TestMultiple::Half => "½ × IΔn",
            TestMultiple::One => "1 × IΔn",
            TestMultiple::Five => "5 × IΔn",
        }
    }
}

/// What a trip-time reading must show for a given class and test current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TripRequirement {
    MustNotTrip,
    /// Trip no sooner than `min_ms` (time-delayed devices) and no later than `max_ms`.
    Within { min_ms: f64, max_ms: f64 },
}

/// Trip-time window for an RCD class at a test multiple.
///
/// General devices: 300 ms at IΔn, 40 ms at 5 IΔn.
/// Type S: 130–500 ms at IΔn, 50–150 ms at 5 IΔn.
pub fn trip_requirement(class: DeviceCurve, multiple: TestMultiple) -> TripRequirement {
    match (class.is_time_delayed(), multiple) {
        (_, TestMultiple::Half) => TripRequirement::MustNotTrip,
        (false, TestMultiple::One) => TripRequirement::Within {
            min_ms: 0.0,
            max_ms: 300.0,
        },
        (false, TestMultiple::Five) => TripRequirement::Within {
            min_ms: 0.0,
            max_ms: 40.0,
        },
        (true, TestMultiple::One) => TripRequirement::Within {
            min_ms: 130.0,
            max_ms: 500.0,
        },
        (true, TestMultiple::Five) => TripRequirement::Within {
            min_ms: 50.0,
            max_ms: 150.0,
        },
    }
}
