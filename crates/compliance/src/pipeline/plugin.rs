//! Plugin that wires up validation: tables, config, queue, system and log.

use bevy::prelude::*;

use crate::config::ValidatorConfig;
use crate::tables::LimitTables;

use super::result_log::ComplianceResultLog;
use super::system::validate_queued_measurements;
use super::MeasurementQueue;

/// Ordering handle for hosts that need to run after validation.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComplianceSet {
    Validate,
}

/// Registers the limit tables, validator config, measurement queue, result
/// log and validation system.
///
/// `config_json` overrides the default thresholds; an unusable document logs
/// a warning and the defaults are used.
#[derive(Debug, Clone, Default)]
pub struct CompliancePlugin {
    pub config_json: Option<String>,
}

impl CompliancePlugin {
    pub fn with_config_json(json: impl Into<String>) -> Self {
        Self {
            config_json: Some(json.into()),
        }
    }
}

impl Plugin for CompliancePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LimitTables>();
        match &self.config_json {
            Some(json) => {
                app.insert_resource(ValidatorConfig::from_json_or_warn(json));
            }
            None => {
                app.init_resource::<ValidatorConfig>();
            }
        }
        app.init_resource::<MeasurementQueue>();
        app.init_resource::<ComplianceResultLog>();

        app.add_systems(
            Update,
            validate_queued_measurements.in_set(ComplianceSet::Validate),
        );
    }
}
