use bevy::prelude::*;

use super::*;
use crate::config::ValidatorConfig;
use crate::device::{DeviceCurve, DeviceSpec};
use crate::measurement::Measurement;
use crate::tables::LimitTables;
use crate::validator::{ValidationContext, Verdict};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(CompliancePlugin::default());
    app
}

fn b32() -> ValidationContext {
    ValidationContext::for_device(DeviceSpec::mcb(DeviceCurve::B, 32.0).unwrap())
}

#[test]
fn test_plugin_inserts_resources() {
    let app = app();
    let world = app.world();
    assert!(world.get_resource::<LimitTables>().is_some());
    assert!(world.get_resource::<MeasurementQueue>().is_some());
    assert!(world.get_resource::<ComplianceResultLog>().is_some());
    assert_eq!(
        world.resource::<ValidatorConfig>(),
        &ValidatorConfig::default()
    );
}

#[test]
fn test_update_drains_queue_into_log() {
    let mut app = app();
    {
        let mut queue = app.world_mut().resource_mut::<MeasurementQueue>();
        queue.push("1 Ring", TestSource::Inspector, Measurement::zs(0.85).unwrap(), b32());
        queue.push("1 Ring", TestSource::Inspector, Measurement::zs(1.2).unwrap(), b32());
    }
    app.update();

    assert!(app.world().resource::<MeasurementQueue>().is_empty());
    let log = app.world().resource::<ComplianceResultLog>();
    assert_eq!(log.len(), 2);
    let entries = log.last_n(2);
    assert_eq!(entries[0].result.verdict, Verdict::Pass);
    assert_eq!(entries[1].result.verdict, Verdict::Fail);
    assert_eq!(log.totals().fail, 1);
}

#[test]
fn test_config_json_changes_marginal_band() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(CompliancePlugin::with_config_json(r#"{"marginal_band": 0.25}"#));
    app.world_mut().resource_mut::<MeasurementQueue>().push(
        "1 Ring",
        TestSource::Import,
        Measurement::zs(0.85).unwrap(),
        b32(),
    );
    app.update();

    let log = app.world().resource::<ComplianceResultLog>();
    assert_eq!(log.last_n(1)[0].result.verdict, Verdict::Marginal);
}

#[test]
fn test_bad_config_json_falls_back_to_defaults() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(CompliancePlugin::with_config_json("{not json"));
    assert_eq!(
        app.world().resource::<ValidatorConfig>(),
        &ValidatorConfig::default()
    );
}

#[test]
fn test_empty_queue_logs_nothing() {
    let mut app = app();
    app.update();
    app.update();
    assert!(app.world().resource::<ComplianceResultLog>().is_empty());
}
