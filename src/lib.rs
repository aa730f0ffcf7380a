pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod job;
pub mod prompt;
pub mod report;
pub mod sampler;
pub mod util;
