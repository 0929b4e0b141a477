//! Integration tests using the `TestBench` harness.
//!
//! These run the full pipeline (queue, validation system, result log) inside a
//! headless Bevy App and check certificate-level outcomes.

use crate::device::{DeviceCurve, DeviceSpec};
use crate::measurement::Measurement;
use crate::pipeline::TestSource;
use crate::report::{format_result, Assessment};
use crate::schedule::{validate_circuit, CircuitTestRecord};
use crate::tables::{EarthingSystem, TestMultiple};
use crate::test_harness::TestBench;
use crate::validator::{CoilDesign, ValidationContext, Verdict, WaterDesign};

fn b32() -> ValidationContext {
    ValidationContext::for_device(DeviceSpec::mcb(DeviceCurve::B, 32.0).unwrap())
}

// ===========================================================================
// 1. Harness bootstrap
// ===========================================================================

#[test]
fn empty_bench_has_no_results() {
    let mut bench = TestBench::new();
    bench.tick(1);
    assert!(bench.results().is_empty());
    assert_eq!(bench.assessment(), Assessment::Incomplete);
}

#[test]
fn readings_wait_until_tick() {
    let mut bench = TestBench::new();
    bench.record("1 Ring", Measurement::zs(0.85).unwrap(), b32());
    assert_eq!(bench.pending(), 1);
    assert!(bench.results().is_empty());

    bench.tick(1);
    assert_eq!(bench.pending(), 0);
    assert_eq!(bench.results().len(), 1);
}

// ===========================================================================
// 2. Certificate scenarios
// ===========================================================================

#[test]
fn domestic_board_is_satisfactory() {
    let mut bench = TestBench::new();
    let ring = b32().with_ze(0.35).with_earthing(EarthingSystem::TnCS);
    let lights = ValidationContext::for_device(DeviceSpec::mcb(DeviceCurve::B, 6.0).unwrap())
        .with_ze(0.35);
    let rcd = ValidationContext::for_device(DeviceSpec::rcd(DeviceCurve::TypeA, 30.0).unwrap());

    bench
        .record("1 Ring", Measurement::r1r2(0.52).unwrap(), ring)
        .record("1 Ring", Measurement::zs(0.87).unwrap(), ring)
        .record("1 Ring", Measurement::insulation(299.0).unwrap(), ring)
        .record("2 Lights", Measurement::r1r2(1.2).unwrap(), lights)
        .record("2 Lights", Measurement::zs(1.55).unwrap(), lights)
        .record("RCD", Measurement::rcd_trip(23.0).unwrap(), rcd)
        .record(
            "RCD",
            Measurement::rcd_trip(11.0).unwrap(),
            rcd.with_test_multiple(TestMultiple::Five),
        )
        .tick(1);

    let summary = bench.summary();
    assert_eq!(summary.total, 7);
    assert_eq!(summary.fail, 0);
    assert_eq!(summary.indeterminate, 0);
    assert_eq!(bench.assessment(), Assessment::Satisfactory);
    assert_eq!(bench.results_for("1 Ring").len(), 3);
}

#[test]
fn one_failure_makes_report_unsatisfactory() {
    let mut bench = TestBench::new();
    bench
        .record("1 Ring", Measurement::zs(0.85).unwrap(), b32())
        .record("3 Cooker", Measurement::zs(1.3).unwrap(), b32())
        .tick(1);

    assert_eq!(bench.assessment(), Assessment::Unsatisfactory);
    let cooker = bench.results_for("3 Cooker");
    assert_eq!(cooker[0].result.verdict, Verdict::Fail);
    let text = format_result(&cooker[0].result).text;
    assert!(text.starts_with("[FAIL]"), "{text}");
}

#[test]
fn unknown_rating_is_incomplete_not_pass() {
    let mut bench = TestBench::new();
    let odd = ValidationContext::for_device(DeviceSpec::mcb(DeviceCurve::B, 999.0).unwrap());
    bench
        .record("1 Ring", Measurement::zs(0.85).unwrap(), b32())
        .record("9 Spare", Measurement::zs(0.01).unwrap(), odd)
        .tick(1);

    assert_eq!(bench.summary().indeterminate, 1);
    assert_eq!(bench.assessment(), Assessment::Incomplete);
}

#[test]
fn evicted_failure_still_makes_report_unsatisfactory() {
    let mut bench = TestBench::new();
    bench
        .record("3 Cooker", Measurement::zs(1.3).unwrap(), b32())
        .tick(1);
    for i in 0..70 {
        bench.record(&format!("Socket {i}"), Measurement::zs(0.5).unwrap(), b32());
    }
    bench.tick(1);

    // The cooker result has left the ring buffer but still counts.
    assert!(bench.results_for("3 Cooker").is_empty());
    let summary = bench.summary();
    assert_eq!(summary.total, 71);
    assert_eq!(summary.fail, 1);
    assert_eq!(bench.assessment(), Assessment::Unsatisfactory);
}

#[test]
fn hvac_commissioning_readings() {
    let mut bench = TestBench::new();
    let ahu = ValidationContext::default()
        .with_coil(CoilDesign {
            t_in: 28.0,
            adp: 10.0,
            contact_factor: 0.82,
        })
        .with_water(WaterDesign {
            load_kw: 120.0,
            cp_w: 4.19,
            delta_t_w: 6.0,
        });
    bench
        .record_from("AHU-1", TestSource::Import, Measurement::temperature(12.0).unwrap(), ahu)
        .record_from("AHU-1", TestSource::Import, Measurement::flow(5.0).unwrap(), ahu)
        .tick(1);

    let results = bench.results();
    assert_eq!(results[0].verdict, Verdict::Pass);
    assert_eq!(results[1].verdict, Verdict::Marginal);
}

#[test]
fn config_json_tightens_band() {
    let mut bench = TestBench::with_config_json(r#"{"marginal_band": 0.3}"#);
    assert!((bench.config().marginal_band - 0.3).abs() < f64::EPSILON);
    bench.record("1 Ring", Measurement::zs(0.85).unwrap(), b32()).tick(1);
    assert_eq!(bench.results()[0].verdict, Verdict::Marginal);
}

#[test]
fn pipeline_agrees_with_schedule_validation() {
    let mut record =
        CircuitTestRecord::new("1 Ring", DeviceSpec::mcb(DeviceCurve::B, 32.0).unwrap());
    record.ze_ohms = Some(0.35);
    record.zs_ohms = Some(0.85);
    record.r1r2_ohms = Some(0.5);
    let direct = validate_circuit(&record);

    let context = b32().with_ze(0.35);
    let mut bench = TestBench::new();
    bench
        .record("1 Ring", Measurement::r1r2(0.5).unwrap(), context)
        .record("1 Ring", Measurement::zs(0.85).unwrap(), context)
        .tick(1);

    assert_eq!(bench.results(), direct);
}
