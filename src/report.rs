use crate::{estimate::EstimationResult, job::SamplingJob, sampler::AggregateResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub sample_size: u64,
    pub samples_drawn: u64,
    pub threads: usize,
    pub seed: u64,
    #[serde(flatten)]
    pub estimate: EstimationResult,
    pub reference_pi: f64,
    pub elapsed_seconds: f64,
    pub finished: String,
}

impl RunReport {
    pub fn new(
        job: &SamplingJob,
        agg: &AggregateResult,
        estimate: EstimationResult,
        reference_pi: f64,
        seed: u64,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            sample_size: job.total_samples(),
            samples_drawn: agg.total_samples,
            threads: job.worker_count(),
            seed,
            estimate,
            reference_pi,
            elapsed_seconds,
            finished: crate::util::now_rfc3339(),
        }
    }

    pub fn to_text(&self, precision: usize) -> String {
        format_report(
            self.sample_size,
            self.threads,
            self.elapsed_seconds,
            &self.estimate,
            self.reference_pi,
            precision,
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

const RULE: &str = "----------------------------------";

/// Fixed-field results block; every decimal uses `precision` fractional digits.
pub fn format_report(
    samples: u64,
    worker_count: usize,
    elapsed_seconds: f64,
    est: &EstimationResult,
    reference_pi: f64,
    precision: usize,
) -> String {
    format!(
        "\n{RULE}\n\
         Sample Size:        {samples}\n\
         Number of Threads:  {worker_count}\n\
         Estimated PI:       {:.p$}\n\
         Actual PI:          {:.p$}\n\
         Difference:         {:.p$}\n\
         Run Time:           {:.p$}\n\
         {RULE}\n\n",
        est.pi_estimate,
        reference_pi,
        est.absolute_error,
        elapsed_seconds,
        p = precision,
    )
}
