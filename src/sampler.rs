//! Fork-join Monte Carlo sampling.
//!
//! Each worker owns its generator and a local hit counter. The only shared
//! mutable state is the [`HitAccumulator`], touched once per worker after its
//! loop finishes.

use crate::error::{PiError, Result};
use crate::job::SamplingJob;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info_span};

/// Per-worker seed derivation from a single root seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedScheme {
    root: u64,
}

impl SeedScheme {
    pub fn fixed(root: u64) -> Self {
        Self { root }
    }

    /// Root taken from the wall clock. Runs are not reproducible unless the
    /// root is recorded.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self { root: nanos }
    }

    pub fn root(&self) -> u64 {
        self.root
    }

    pub fn worker_seed(&self, worker_id: usize) -> u64 {
        self.root.wrapping_add(worker_id as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub samples_processed: u64,
    pub hits: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Sample count the job was created with.
    pub requested_samples: u64,
    /// Samples actually drawn by all workers.
    pub total_samples: u64,
    pub total_hits: u64,
}

/// Shared hit/sample totals. Addition is commutative, so the final value does
/// not depend on the order workers finish in.
#[derive(Debug, Default)]
pub struct HitAccumulator {
    hits: AtomicU64,
    samples: AtomicU64,
}

impl HitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, result: &WorkerResult) {
        self.hits.fetch_add(result.hits, Ordering::Relaxed);
        self.samples
            .fetch_add(result.samples_processed, Ordering::Relaxed);
    }

    /// Consumes the accumulator once every worker has been joined.
    pub fn finish(self, requested_samples: u64) -> AggregateResult {
        AggregateResult {
            requested_samples,
            total_samples: self.samples.into_inner(),
            total_hits: self.hits.into_inner(),
        }
    }
}

/// Observer notified as each worker completes. Calls arrive from worker
/// threads in no particular order.
pub trait Progress: Sync {
    fn worker_finished(&self, result: &WorkerResult, worker_count: usize);
}

/// Prints one line per worker to stdout.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn worker_finished(&self, result: &WorkerResult, worker_count: usize) {
        println!(
            "Thread {} of {} hits {} samples out of {}.",
            result.worker_id + 1,
            worker_count,
            result.hits,
            result.samples_processed
        );
    }
}

/// Discards progress notifications.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn worker_finished(&self, _result: &WorkerResult, _worker_count: usize) {}
}

/// Maps a raw draw onto [0, 1] by dividing by the generator's maximum output.
fn unit_draw<R: RngCore>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / u32::MAX as f64
}

/// Draws `samples` points and counts those inside the unit quarter-circle.
pub fn sample_worker(worker_id: usize, samples: u64, seed: u64) -> WorkerResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut hits = 0u64;

    for _ in 0..samples {
        let x = unit_draw(&mut rng);
        let y = unit_draw(&mut rng);
        if x * x + y * y <= 1.0 {
            hits += 1;
        }
    }

    WorkerResult {
        worker_id,
        samples_processed: samples,
        hits,
    }
}

/// Spawns exactly `job.worker_count()` threads, waits for all of them and
/// returns the combined totals.
pub fn run_sampling(
    job: &SamplingJob,
    seeds: SeedScheme,
    progress: &dyn Progress,
) -> Result<AggregateResult> {
    let worker_count = job.worker_count();
    let accumulator = HitAccumulator::new();

    debug!(
        workers = worker_count,
        samples = job.total_samples(),
        dropped = job.dropped_samples(),
        root_seed = seeds.root(),
        "starting sampling"
    );

    thread::scope(|s| -> Result<()> {
        let mut handles = Vec::with_capacity(worker_count);
        let mut failure = None;

        for worker_id in 0..worker_count {
            let samples = job.share(worker_id);
            let seed = seeds.worker_seed(worker_id);
            let accumulator = &accumulator;

            let spawned = thread::Builder::new()
                .name(format!("mc-pi-worker-{worker_id}"))
                .spawn_scoped(s, move || {
                    let _span = info_span!("worker", worker_id).entered();
                    let result = sample_worker(worker_id, samples, seed);
                    accumulator.add(&result);
                    debug!(hits = result.hits, samples = result.samples_processed, "worker done");
                    progress.worker_finished(&result, worker_count);
                });

            match spawned {
                Ok(handle) => handles.push((worker_id, handle)),
                Err(source) => {
                    failure = Some(PiError::WorkerSpawn { worker_id, source });
                    break;
                }
            }
        }

        // Every spawned handle is joined here; a handle left to the scope
        // would re-raise its panic.
        for (worker_id, handle) in handles {
            if handle.join().is_err() && failure.is_none() {
                failure = Some(PiError::WorkerPanicked { worker_id });
            }
        }
        failure.map_or(Ok(()), Err)
    })?;

    Ok(accumulator.finish(job.total_samples()))
}
