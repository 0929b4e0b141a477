use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::validator::ValidationContext;

/// Where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestSource {
    /// Entered by the inspector on site.
    Inspector,
    /// Downloaded from a multifunction tester.
    Import,
    /// Re-run of an earlier certificate.
    Replay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedMeasurement {
    /// Circuit designation as written on the schedule, e.g. `"3 Cooker"`.
    pub circuit: String,
    pub source: TestSource,
    pub measurement: Measurement,
    pub context: ValidationContext,
}

/// Readings waiting to be validated, in arrival order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementQueue {
    pending: Vec<QueuedMeasurement>,
}

impl MeasurementQueue {
    pub fn push(
        &mut self,
        circuit: impl Into<String>,
        source: TestSource,
        measurement: Measurement,
        context: ValidationContext,
    ) {
        self.pending.push(QueuedMeasurement {
            circuit: circuit.into(),
            source,
            measurement,
            context,
        });
    }

    pub fn push_queued(&mut self, queued: QueuedMeasurement) {
        self.pending.push(queued);
    }

    pub fn drain(&mut self) -> Vec<QueuedMeasurement> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
