use crate::error::PiError;
use crate::job::RemainderPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;

/// Largest precision that still prints meaningful f64 digits.
pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sampling: Sampling,
    #[serde(default)]
    pub intro: Intro,
    #[serde(default)]
    pub input: Input,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub debug: Debug,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> std::result::Result<(), PiError> {
        if self.input.max_attempts == 0 {
            return Err(PiError::InvalidConfiguration(
                "input.max_attempts must be at least 1".into(),
            ));
        }
        if self.output.precision > MAX_PRECISION {
            return Err(PiError::InvalidConfiguration(format!(
                "output.precision must be at most {MAX_PRECISION}, got {}",
                self.output.precision
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sampling {
    /// Root seed; drawn from the wall clock when absent.
    pub seed: Option<u64>,
    pub remainder: RemainderPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Intro {
    pub show: bool,
    pub confirm: bool,
}
impl Default for Intro {
    fn default() -> Self {
        Self {
            show: true,
            confirm: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    pub max_attempts: u32,
}
impl Default for Input {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Stream that carries the introduction, prompts and input echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl ConsoleStream {
    pub fn writer(self) -> Box<dyn Write> {
        match self {
            ConsoleStream::Stdout => Box::new(io::stdout()),
            ConsoleStream::Stderr => Box::new(io::stderr()),
        }
    }
}

impl OutputFormat {
    /// JSON output reserves stdout for the report document.
    pub fn console_stream(self) -> ConsoleStream {
        match self {
            OutputFormat::Text => ConsoleStream::Stdout,
            OutputFormat::Json => ConsoleStream::Stderr,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub format: OutputFormat,
    pub precision: usize,
    pub reference_pi: f64,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 12,
            reference_pi: std::f64::consts::PI,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Debug {
    pub dump_effective_config: bool,
}
