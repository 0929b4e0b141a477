//! Validation system: drains the [`MeasurementQueue`] each update, judges
//! every reading and records the results in the [`ComplianceResultLog`].

use bevy::prelude::*;

use crate::config::ValidatorConfig;
use crate::report::ReportSummary;
use crate::tables::LimitTables;
use crate::validator::{validate_with, Verdict};

use super::result_log::ComplianceResultLog;
use super::MeasurementQueue;

/// Validates every queued measurement in arrival order.
///
/// Tables and config are only read, so this may run alongside other readers.
pub fn validate_queued_measurements(
    mut queue: ResMut<MeasurementQueue>,
    mut log: ResMut<ComplianceResultLog>,
    tables: Res<LimitTables>,
    config: Res<ValidatorConfig>,
) {
    if queue.is_empty() {
        return;
    }

    let mut batch = ReportSummary::default();
    for queued in queue.drain() {
        let result = validate_with(&queued.measurement, &queued.context, &*tables, &config);
        batch.record(&result.verdict);

        match &result.verdict {
            Verdict::Fail => warn!(
                "Circuit {}: {} FAILED. {}",
                queued.circuit,
                result.measurement.kind.label(),
                result.explanation
            ),
            Verdict::Indeterminate(reason) => warn!(
                "Circuit {}: {} not assessed: {}",
                queued.circuit,
                result.measurement.kind.label(),
                reason.describe()
            ),
            Verdict::Pass | Verdict::Marginal => {}
        }

        log.push(queued.circuit, queued.source, result);
    }

    info!(
        "Validated {} measurements: {} pass, {} marginal, {} fail, {} indeterminate",
        batch.total, batch.pass, batch.marginal, batch.fail, batch.indeterminate
    );
}
