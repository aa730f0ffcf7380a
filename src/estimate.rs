use crate::error::{PiError, Result};
use crate::sampler::AggregateResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// `4 * hits / requested_samples`. Samples dropped by the remainder
    /// policy still count in the denominator.
    pub pi_estimate: f64,
    /// `reference - estimate`: positive when the estimate undershoots.
    pub absolute_error: f64,
    /// One standard deviation of the estimator at the requested sample size.
    pub standard_error: f64,
    /// `4 * hits / drawn_samples`, absent when no worker drew anything.
    pub drawn_estimate: Option<f64>,
}

/// Converts aggregated hits into an estimate of pi.
pub fn estimate(agg: &AggregateResult, reference_pi: f64) -> Result<EstimationResult> {
    if agg.requested_samples == 0 {
        return Err(PiError::DivisionByZero);
    }
    if agg.total_hits > agg.total_samples || agg.total_samples > agg.requested_samples {
        return Err(PiError::InvalidInput(format!(
            "inconsistent totals: {} hits, {} drawn, {} requested",
            agg.total_hits, agg.total_samples, agg.requested_samples
        )));
    }

    let n = agg.requested_samples as f64;
    let p = agg.total_hits as f64 / n;
    let pi_estimate = 4.0 * p;

    let drawn_estimate =
        (agg.total_samples > 0).then(|| 4.0 * agg.total_hits as f64 / agg.total_samples as f64);

    Ok(EstimationResult {
        pi_estimate,
        absolute_error: reference_pi - pi_estimate,
        standard_error: 4.0 * (p * (1.0 - p) / n).sqrt(),
        drawn_estimate,
    })
}
