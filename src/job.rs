use crate::error::{PiError, Result};
use serde::{Deserialize, Serialize};

/// How samples left over by `total_samples / worker_count` are handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Every worker draws `floor(total / workers)`; the remainder is never drawn.
    #[default]
    Drop,
    /// The final worker also draws the remainder.
    LastWorker,
}

/// Validated sampling input. Cannot be built with zero workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingJob {
    total_samples: u64,
    worker_count: usize,
    remainder: RemainderPolicy,
}

impl SamplingJob {
    pub fn new(total_samples: u64, worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(PiError::InvalidConfiguration(
                "worker count must be at least 1".into(),
            ));
        }
        Ok(Self {
            total_samples,
            worker_count,
            remainder: RemainderPolicy::Drop,
        })
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn remainder(&self) -> RemainderPolicy {
        self.remainder
    }

    /// Number of samples worker `worker_id` (0-based) draws.
    pub fn share(&self, worker_id: usize) -> u64 {
        let workers = self.worker_count as u64;
        let base = self.total_samples / workers;
        match self.remainder {
            RemainderPolicy::Drop => base,
            RemainderPolicy::LastWorker if worker_id + 1 == self.worker_count => {
                base + self.total_samples % workers
            }
            RemainderPolicy::LastWorker => base,
        }
    }

    /// Samples drawn across all workers.
    pub fn planned_samples(&self) -> u64 {
        (0..self.worker_count).map(|w| self.share(w)).sum()
    }

    pub fn dropped_samples(&self) -> u64 {
        self.total_samples - self.planned_samples()
    }
}
