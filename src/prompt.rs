//! Console interaction: the introduction and the interactive fallback used
//! when sample and thread counts are not given on the command line.

use crate::error::{PiError, Result};
use std::io::{BufRead, Write};
use tracing::warn;

pub const INTRODUCTION: &str = "\
This program creates and uses a number of threads specified by the user.
It uses the Monte Carlo method to estimate the value of PI. The estimation
becomes more accurate as the sample size is increased. Similarly, if more
threads are provided the program will complete the work faster.
If two input numbers are not provided on the command line, please
enter them when prompted below. (ex. 20000 4)
";

/// Prints the introduction and, if `confirm` is set, waits for a line of input.
pub fn introduce<R: BufRead, W: Write>(input: &mut R, out: &mut W, confirm: bool) -> Result<()> {
    writeln!(out, "{INTRODUCTION}")?;
    if confirm {
        write!(out, "Press Enter to continue...")?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Asks for a non-negative integer, re-prompting on bad input up to
/// `max_attempts` times.
pub fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    max_attempts: u32,
) -> Result<u64> {
    for attempt in 1..=max_attempts {
        write!(out, "{label}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PiError::InvalidInput("input closed".into()));
        }

        let trimmed = line.trim();
        match trimmed.parse::<u64>() {
            Ok(n) => return Ok(n),
            Err(_) => {
                warn!(attempt, value = trimmed, "rejected non-numeric input");
                writeln!(out, "'{trimmed}' is not a non-negative whole number.")?;
            }
        }
    }

    Err(PiError::InvalidInput(format!(
        "no valid number after {max_attempts} attempts"
    )))
}

/// Prompts for samples then threads, and echoes both back.
pub fn prompt_job_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    max_attempts: u32,
) -> Result<(u64, usize)> {
    let samples = prompt_number(input, out, "Enter Total Samples: ", max_attempts)?;
    let threads = prompt_number(input, out, "Enter Total Threads: ", max_attempts)?;
    let threads = usize::try_from(threads)
        .map_err(|_| PiError::InvalidInput(format!("thread count {threads} is too large")))?;
    writeln!(out)?;
    Ok((samples, threads))
}

/// Uses the command-line pair when given, otherwise prompts; echoes the
/// values either way.
pub fn acquire_job_input<R: BufRead, W: Write>(
    input: &mut R,
    console: &mut W,
    from_command_line: Option<(u64, usize)>,
    max_attempts: u32,
) -> Result<(u64, usize)> {
    let (samples, threads) = match from_command_line {
        Some(pair) => pair,
        None => prompt_job_input(input, console, max_attempts)?,
    };
    echo_input(console, samples, threads)?;
    Ok((samples, threads))
}

pub fn echo_input<W: Write>(out: &mut W, samples: u64, threads: usize) -> Result<()> {
    writeln!(out, "You input {samples} and {threads}.\n")?;
    Ok(())
}
