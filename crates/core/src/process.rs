//! Process execution utilities
//!
//! Runs external tools with:
//! - Output capture or streaming
//! - Directory context
//! - Extra environment variables, kept off the command line

use crate::error::{Error, ErrorCode, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from `std::process::Output`
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

fn build_command(program: &str, args: &[&str], dir: &Path, env: &[(String, String)]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd
}

fn spawn_error(program: &str, err: &std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::command_not_found(program)
    } else {
        Error::new(
            ErrorCode::ProcessError,
            format!("Failed to execute {program}: {err}"),
        )
    }
}

/// Run a command in a specific directory and capture output
pub fn run_command_in_dir(
    program: &str,
    args: &[&str],
    dir: &Path,
    env: &[(String, String)],
) -> Result<CommandResult> {
    tracing::debug!(program, ?args, dir = %dir.display(), "Running command");

    let output = build_command(program, args, dir, env)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, &e))?;

    Ok(CommandResult::from_output(output))
}

/// Run a command in a specific directory, streaming output to the terminal
pub fn run_command_streaming_in_dir(
    program: &str,
    args: &[&str],
    dir: &Path,
    env: &[(String, String)],
) -> Result<i32> {
    tracing::debug!(program, ?args, dir = %dir.display(), "Running command (streaming)");

    let status = build_command(program, args, dir, env)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, &e))?;

    Ok(status.code().unwrap_or(-1))
}
