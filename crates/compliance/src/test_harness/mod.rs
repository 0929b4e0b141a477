//! # TestBench: headless harness for validation pipeline tests
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + [`CompliancePlugin`] so tests
//! and benches can queue readings, tick, and inspect the result log without a
//! host application.

use bevy::app::App;
use bevy::prelude::*;

use crate::config::ValidatorConfig;
use crate::measurement::Measurement;
use crate::pipeline::{
    CompliancePlugin, ComplianceResultLog, LoggedResult, MeasurementQueue, TestSource,
};
use crate::report::{Assessment, ReportSummary};
use crate::validator::{ComplianceResult, ValidationContext};

pub struct TestBench {
    app: App,
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBench {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Bench with the standard tables and default thresholds.
    pub fn new() -> Self {
        Self::with_plugin(CompliancePlugin::default())
    }

    /// Bench whose thresholds are loaded from a JSON document.
    pub fn with_config_json(json: &str) -> Self {
        Self::with_plugin(CompliancePlugin::with_config_json(json))
    }

    fn with_plugin(plugin: CompliancePlugin) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Queue a reading entered by the inspector.
    pub fn record(
        &mut self,
        circuit: &str,
        measurement: Measurement,
        context: ValidationContext,
    ) -> &mut Self {
        self.record_from(circuit, TestSource::Inspector, measurement, context)
    }

    pub fn record_from(
        &mut self,
        circuit: &str,
        source: TestSource,
        measurement: Measurement,
        context: ValidationContext,
    ) -> &mut Self {
        self.app
            .world_mut()
            .resource_mut::<MeasurementQueue>()
            .push(circuit, source, measurement, context);
        self
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Run `n` app updates.
    pub fn tick(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.app.update();
        }
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn pending(&self) -> usize {
        self.app.world().resource::<MeasurementQueue>().len()
    }

    pub fn log(&self) -> &ComplianceResultLog {
        self.app.world().resource::<ComplianceResultLog>()
    }

    pub fn config(&self) -> &ValidatorConfig {
        self.app.world().resource::<ValidatorConfig>()
    }

    /// Retained results, oldest first.
    pub fn results(&self) -> Vec<ComplianceResult> {
        let log = self.log();
        log.last_n(log.len())
            .iter()
            .map(|entry| entry.result.clone())
            .collect()
    }

    pub fn results_for(&self, circuit: &str) -> Vec<&LoggedResult> {
        self.log().for_circuit(circuit)
    }

    /// Verdict counts over everything logged, including results the ring
    /// buffer has since evicted.
    pub fn summary(&self) -> ReportSummary {
        self.log().totals()
    }

    pub fn assessment(&self) -> Assessment {
        Assessment::from_summary(&self.summary())
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
