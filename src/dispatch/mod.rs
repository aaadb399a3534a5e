pub mod cli;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{OdoError, SIGNALLED_EXIT_CODE};

/// A fully formed invocation: program plus ordered arguments.
/// Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Pass-through process options. The executor applies them, never interprets them.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Working directory for the subprocess (None = inherit).
    pub working_directory: Option<PathBuf>,
    /// Environment overrides layered on top of the inherited environment.
    pub env: HashMap<String, String>,
}

/// Captured outcome of one subprocess run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: Option<String>,
    /// Set when the process could not start or exited abnormally.
    pub error: Option<OdoError>,
    /// Exit code when the process ran to completion and was not signalled.
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    /// A successful run with the given stdout and nothing on stderr.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: None,
            error: None,
            exit_code: Some(0),
        }
    }

    /// A run that failed before producing any output.
    pub fn failed(error: OdoError) -> Self {
        let exit_code = match &error {
            OdoError::ProcessExit { code, .. } if *code != SIGNALLED_EXIT_CODE => Some(*code),
            _ => None,
        };
        Self {
            stdout: String::new(),
            stderr: None,
            error: Some(error),
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// stdout when the run succeeded, the recorded error otherwise.
    pub fn into_stdout(self) -> Result<String, OdoError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.stdout),
        }
    }
}

/// Runs a command line to completion and captures its streams.
///
/// Implementations must not fail: every problem is reported through
/// [`ExecutionResult::error`].
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &CommandLine, options: &ExecOptions) -> ExecutionResult;
}
