use mc_pi::{
    estimate::{estimate, EstimationResult},
    job::SamplingJob,
    report::{format_report, RunReport},
    sampler::AggregateResult,
};
use std::f64::consts::PI;

#[test]
fn fixed_field_block_with_twelve_digits() {
    let est = EstimationResult {
        pi_estimate: 3.0,
        absolute_error: PI - 3.0,
        standard_error: 0.0,
        drawn_estimate: None,
    };
    let text = format_report(4, 4, 0.5, &est, PI, 12);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "----------------------------------");
    assert_eq!(lines[2], "Sample Size:        4");
    assert_eq!(lines[3], "Number of Threads:  4");
    assert_eq!(lines[4], "Estimated PI:       3.000000000000");
    assert_eq!(lines[5], "Actual PI:          3.141592653590");
    assert_eq!(lines[6], "Difference:         0.141592653590");
    assert_eq!(lines[7], "Run Time:           0.500000000000");
    assert_eq!(lines[8], "----------------------------------");
}

#[test]
fn precision_is_configurable() {
    let est = EstimationResult {
        pi_estimate: 3.25,
        absolute_error: PI - 3.25,
        standard_error: 0.0,
        drawn_estimate: None,
    };
    let text = format_report(8, 2, 1.0, &est, PI, 3);
    assert!(text.contains("Estimated PI:       3.250\n"));
    assert!(text.contains("Difference:         -0.108\n"));
}

#[test]
fn json_report_carries_seed_and_drawn_samples() {
    let job = SamplingJob::new(10, 3).unwrap();
    let agg = AggregateResult {
        requested_samples: 10,
        total_samples: 9,
        total_hits: 7,
    };
    let est = estimate(&agg, PI).unwrap();
    let report = RunReport::new(&job, &agg, est, PI, 77, 0.25);

    let v: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(v["sample_size"], 10);
    assert_eq!(v["samples_drawn"], 9);
    assert_eq!(v["threads"], 3);
    assert_eq!(v["seed"], 77);
    assert!((v["pi_estimate"].as_f64().unwrap() - 2.8).abs() < 1e-12);
    assert!((v["drawn_estimate"].as_f64().unwrap() - 28.0 / 9.0).abs() < 1e-12);
    assert!(v["absolute_error"].is_f64());
    assert!(v["standard_error"].is_f64());
    assert!(v["finished"].as_str().is_some_and(|s| !s.is_empty()));

    assert!(report.to_text(12).contains("Sample Size:        10\n"));
}
