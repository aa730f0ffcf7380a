use mc_pi::{error::PiError, estimate::estimate, sampler::AggregateResult};
use std::f64::consts::PI;

fn agg(samples: u64, hits: u64) -> AggregateResult {
    AggregateResult {
        requested_samples: samples,
        total_samples: samples,
        total_hits: hits,
    }
}

#[test]
fn zero_samples_is_division_by_zero() {
    let err = estimate(&agg(0, 0), PI).unwrap_err();
    assert!(matches!(err, PiError::DivisionByZero));
}

#[test]
fn hits_above_samples_are_rejected() {
    let err = estimate(&agg(10, 11), PI).unwrap_err();
    assert!(matches!(err, PiError::InvalidInput(_)));
}

#[test]
fn estimate_stays_within_zero_and_four() {
    for samples in [1u64, 2, 3, 17, 1_000] {
        for hits in 0..=samples {
            let est = estimate(&agg(samples, hits), PI).unwrap();
            assert!((0.0..=4.0).contains(&est.pi_estimate));
            assert!(est.standard_error >= 0.0);
        }
    }
}

#[test]
fn difference_is_reference_minus_estimate() {
    // 3 of 4 hits -> 3.0, which undershoots pi.
    let est = estimate(&agg(4, 3), PI).unwrap();
    assert_eq!(est.pi_estimate, 3.0);
    assert!(est.absolute_error > 0.0);
    assert!((est.absolute_error - (PI - 3.0)).abs() < 1e-15);

    let est = estimate(&agg(1, 1), PI).unwrap();
    assert!(est.absolute_error < 0.0);
}

#[test]
fn divides_by_requested_samples() {
    let a = AggregateResult {
        requested_samples: 10,
        total_samples: 9,
        total_hits: 9,
    };
    let est = estimate(&a, PI).unwrap();
    assert!((est.pi_estimate - 3.6).abs() < 1e-15);
    assert_eq!(est.drawn_estimate, Some(4.0));
}

#[test]
fn nothing_drawn_still_estimates_zero() {
    let a = AggregateResult {
        requested_samples: 2,
        total_samples: 0,
        total_hits: 0,
    };
    let est = estimate(&a, PI).unwrap();
    assert_eq!(est.pi_estimate, 0.0);
    assert_eq!(est.drawn_estimate, None);
    assert!((est.absolute_error - PI).abs() < 1e-15);
}

#[test]
fn drawn_above_requested_is_rejected() {
    let a = AggregateResult {
        requested_samples: 3,
        total_samples: 4,
        total_hits: 1,
    };
    assert!(matches!(estimate(&a, PI).unwrap_err(), PiError::InvalidInput(_)));
}

#[test]
fn standard_error_matches_binomial_formula() {
    let est = estimate(&agg(100, 50), PI).unwrap();
    assert!((est.standard_error - 4.0 * (0.25f64 / 100.0).sqrt()).abs() < 1e-12);

    let est = estimate(&agg(100, 100), PI).unwrap();
    assert_eq!(est.standard_error, 0.0);
}
