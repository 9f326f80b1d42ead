//! End-to-end tests: parse -> SCOAP -> full fault campaign -> reports.

use faultline_bench::parse_bench;
use faultline_cli::driver::FaultCampaign;
use faultline_cli::report;
use faultline_core::prelude::*;
use faultline_podem::TestOutcome;
use faultline_scoap::annotate;
use faultline_sim::PatternSimulator;

const C17: &str = include_str!("data/c17.bench");

fn c17_circuit() -> Circuit {
    let mut circuit = parse_bench(C17).unwrap();
    annotate(&mut circuit);
    circuit
}

#[test]
fn test_c17_full_campaign() {
    let circuit = c17_circuit();
    let config = FaultlineConfig {
        driver: DriverConfig {
            verify: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let coverage = FaultCampaign::with_config(config).run(&circuit).unwrap();

    // 11 fault sites (5 inputs + 6 gates), two polarities each, all testable
    assert_eq!(coverage.total, 22);
    assert_eq!(coverage.detected, 22);
    assert_eq!(coverage.untestable, 0);
    assert_eq!(coverage.aborted, 0);
    assert_eq!(coverage.verify_mismatches, Some(0));
}

#[test]
fn test_c17_every_vector_distinguishes_the_fault() {
    let circuit = c17_circuit();
    let coverage = FaultCampaign::new().run(&circuit).unwrap();
    let sim = PatternSimulator::new();
    let mut scratch = circuit.clone();

    for result in &coverage.results {
        let TestOutcome::Detected(vector) = &result.outcome else {
            panic!("{}: expected detection", result.fault);
        };
        assert_eq!(vector.len(), circuit.primary_inputs().len());
        assert!(vector.is_fully_specified());

        // faulty response differs from fault-free on at least one output
        let faulty = sim
            .run(&mut scratch, vector, Some(&result.fault))
            .unwrap();
        let clean = sim.run(&mut scratch, vector, None).unwrap();
        let differs = faulty
            .iter()
            .zip(&clean)
            .any(|(f, c)| f.is_fault_effect() && f.good() == c.good());
        assert!(differs, "{}: {} does not distinguish", result.fault, vector);
    }
}

#[test]
fn test_vectors_file_covers_every_fault() {
    let circuit = c17_circuit();
    let coverage = FaultCampaign::new().run(&circuit).unwrap();
    let text = report::render_vectors(&coverage);
    assert_eq!(text.lines().count(), 22);
    for fault in circuit.enumerate_faults() {
        assert!(
            text.contains(&fault.to_string()),
            "missing {fault} in vectors file"
        );
    }
}

#[test]
fn test_report_formats() {
    let circuit = c17_circuit();
    let coverage = FaultCampaign::new().run(&circuit).unwrap();

    let text = report::render_report(&coverage);
    assert!(text.contains("Coverage:   100.00 %"));

    let json = report::render_json(&coverage).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["detected"], serde_json::json!(22));
}

#[test]
fn test_partial_coverage_with_unobservable_logic() {
    let source = "INPUT(a)\nINPUT(b)\nOUTPUT(y)\ny = NAND(a, b)\ndead = XNOR(a, b)\n";
    let mut circuit = parse_bench(source).unwrap();
    annotate(&mut circuit);

    let coverage = FaultCampaign::new().run(&circuit).unwrap();
    assert_eq!(coverage.total, 8);
    assert_eq!(coverage.untestable, 2);
    assert_eq!(coverage.detected, 6);

    let text = report::render_vectors(&coverage);
    assert!(text.contains("dead/sa0 UNTESTABLE"));
    assert!(text.contains("dead/sa1 UNTESTABLE"));
}

#[test]
fn test_decision_limit_reports_aborts() {
    let circuit = c17_circuit();
    let config = FaultlineConfig {
        podem: PodemConfig {
            decision_limit: Some(0),
        },
        ..Default::default()
    };
    let coverage = FaultCampaign::with_config(config).run(&circuit).unwrap();
    assert_eq!(coverage.aborted, 22);
    let text = report::render_vectors(&coverage);
    assert!(text.contains("22/sa0 ABORTED"));
}
