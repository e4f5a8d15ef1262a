//! Running external programs with a time limit.

use std::ffi::{OsStr, OsString};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::ToolError;

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Shell-like rendering for log lines.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Captured result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run printing `stdout`.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and error output.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the program exited with code 0.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Standard output of a successful run, or `ToolError::Failed`.
    pub fn into_stdout(self, program: &str) -> Result<String, ToolError> {
        if self.is_success() {
            Ok(self.stdout)
        } else {
            Err(ToolError::Failed {
                program: program.to_string(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Capability to run external programs.
///
/// Production code uses [`SystemRunner`]; tests substitute scripted runners.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and capture its output.
    ///
    /// A program that cannot be found yields `ToolError::NotFound`; a
    /// non-zero exit status is *not* an error at this level.
    async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError>;
}

/// Runs programs as child processes, killing them after a timeout.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Create a runner with the given per-command time limit.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError> {
        debug!("Running: {}", command.display());

        let child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ToolError::NotFound(command.program().to_string()),
                _ => ToolError::Io(e),
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ToolError::Timeout {
                program: command.program().to_string(),
                secs: self.timeout.as_secs(),
            })??;

        trace!(
            "{} exited with {:?} ({} bytes stdout)",
            command.program(),
            output.status.code(),
            output.stdout.len()
        );

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
