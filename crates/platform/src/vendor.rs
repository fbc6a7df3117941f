//! Vendor command-line tooling (currently `nvidia-smi`).

use std::process::Command;

use tracing::debug;

use crate::error::{PlatformError, Result};

const NVIDIA_SMI: &str = "nvidia-smi";

/// Runs a command and returns its stdout, failing on a non-zero exit.
pub(crate) fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program).args(args).output()?;
    if !output.status.success() {
        return Err(PlatformError::CommandFailed {
            command: program.to_string(),
            status: output.status.to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Handle on `nvidia-smi`. Presence is probed once; when the tool is missing
/// no further processes are spawned.
#[derive(Debug, Clone, Copy)]
pub struct NvidiaSmi {
    available: bool,
}

impl NvidiaSmi {
    pub fn detect() -> Self {
        let available = run_command(NVIDIA_SMI, &["-L"]).is_ok();
        debug!(available, "Probed nvidia-smi");
        Self { available }
    }

    pub fn unavailable() -> Self {
        Self { available: false }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// First GPU's value for a `--query-gpu` field.
    pub fn query(&self, field: &str) -> Result<String> {
        if !self.available {
            return Err(PlatformError::NoHardware("nvidia-smi not installed"));
        }
        let query = format!("--query-gpu={}", field);
        let stdout = run_command(NVIDIA_SMI, &[&query, "--format=csv,noheader,nounits"])?;
        first_line(&stdout).ok_or(PlatformError::Parse {
            source_name: "nvidia-smi",
            input: stdout.clone(),
        })
    }

    pub fn query_f32(&self, field: &str) -> Result<f32> {
        let line = self.query(field)?;
        parse_number(&line).ok_or(PlatformError::Parse {
            source_name: "nvidia-smi",
            input: line,
        })
    }
}

fn first_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Parses a numeric CSV cell; `[N/A]` and similar placeholders yield `None`.
pub(crate) fn parse_number(cell: &str) -> Option<f32> {
    cell.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_skips_blank_lines() {
        assert_eq!(
            first_line("\n  NVIDIA GeForce RTX 3080  \nsecond\n"),
            Some("NVIDIA GeForce RTX 3080".to_string())
        );
        assert_eq!(first_line("   \n"), None);
    }

    #[test]
    fn test_parse_number_handles_placeholders() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("87.35"), Some(87.35));
        assert_eq!(parse_number("[N/A]"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_unavailable_tool_is_not_spawned() {
        let smi = NvidiaSmi::unavailable();
        assert!(!smi.is_available());
        assert!(matches!(
            smi.query("name"),
            Err(PlatformError::NoHardware(_))
        ));
    }
}
