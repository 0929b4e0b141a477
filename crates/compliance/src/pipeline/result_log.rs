//! Ring-buffer log of recently validated measurements.
//!
//! The [`ComplianceResultLog`] resource keeps the last 64 results so a host
//! (certificate editor, tester import screen) can show what was judged without
//! re-running validation. Running totals cover everything ever logged.

use bevy::prelude::*;

use crate::report::ReportSummary;
use crate::validator::ComplianceResult;

use super::TestSource;

/// Maximum number of entries retained in the ring buffer.
const MAX_ENTRIES: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedResult {
    pub circuit: String,
    pub source: TestSource,
    pub result: ComplianceResult,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ComplianceResultLog {
    entries: Vec<LoggedResult>,
    totals: ReportSummary,
}

impl ComplianceResultLog {
    /// Record a result. If the buffer is full the oldest entry is evicted.
    pub fn push(&mut self, circuit: String, source: TestSource, result: ComplianceResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.totals.record(&result.verdict);
        self.entries.push(LoggedResult {
            circuit,
            source,
            result,
        });
    }

    /// Return the last `n` entries (or fewer if the log is shorter).
    pub fn last_n(&self, n: usize) -> &[LoggedResult] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Retained entries for one circuit, oldest first.
    pub fn for_circuit(&self, circuit: &str) -> Vec<&LoggedResult> {
        self.entries.iter().filter(|e| e.circuit == circuit).collect()
    }

    /// Verdict counts over every result logged, including evicted ones.
    pub fn totals(&self) -> ReportSummary {
        self.totals
    }

    /// Clear entries and totals.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.totals = ReportSummary::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
