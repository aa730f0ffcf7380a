//! Error types for sampling, estimation and console input.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PiError>;

#[derive(Error, Debug)]
pub enum PiError {
    /// Rejected before any worker is spawned.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("cannot estimate from zero samples")]
    DivisionByZero,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to spawn worker {worker_id}")]
    WorkerSpawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
