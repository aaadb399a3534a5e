use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::dispatch::{CommandExecutor, CommandLine, ExecOptions, ExecutionResult};
use crate::error::{OdoError, SIGNALLED_EXIT_CODE};

pub const MAX_OUTPUT_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Production executor backed by `tokio::process`.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    max_output_bytes: usize,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self {
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }

    /// Override the per-stream capture cap.
    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes.max(1);
        self
    }

    fn build(command: &CommandLine, options: &ExecOptions) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(&options.env)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        // Own process group so a cap breach can take down grandchildren too.
        #[cfg(unix)]
        cmd.process_group(0);

        if let Some(ref wd) = options.working_directory {
            cmd.current_dir(wd);
        }
        cmd
    }
}

#[cfg(unix)]
fn kill_group(pid: Option<u32>) {
    if let Some(pid) = pid {
        unsafe {
            libc::kill(-(pid as i32), libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: Option<u32>) {}

/// Readers pull one byte past the cap so output of exactly `cap` bytes is
/// not mistaken for overflow. Truncates and reports whether it overflowed.
fn clamp_to_cap(buf: &mut Vec<u8>, cap: usize) -> bool {
    if buf.len() > cap {
        buf.truncate(cap);
        true
    } else {
        false
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    /// Run the command to completion.
    ///
    /// - No shell interpolation (Command::new + args)
    /// - stdout/stderr drained concurrently, each capped at `max_output_bytes`
    /// - No timeout: a hung tool hangs the caller
    async fn execute(&self, command: &CommandLine, options: &ExecOptions) -> ExecutionResult {
        let program = command.program.as_str();
        tracing::debug!(command = %command, "spawning odo");

        let mut child = match Self::build(command, options).spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program, error = %e, "failed to spawn");
                return ExecutionResult::failed(OdoError::Spawn {
                    program: program.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let child_pid = child.id();
        let (Some(stdout_pipe), Some(stderr_pipe)) = (child.stdout.take(), child.stderr.take())
        else {
            kill_group(child_pid);
            return ExecutionResult::failed(OdoError::Io(format!(
                "{program}: output pipes unavailable"
            )));
        };

        let cap = self.max_output_bytes;
        let mut stdout_handle = tokio::spawn(async move {
            let mut buf = Vec::with_capacity(cap.min(64 * 1024));
            let mut capped = stdout_pipe.take(cap as u64 + 1);
            if let Err(e) = capped.read_to_end(&mut buf).await {
                tracing::warn!("stdout pipe read error: {e}");
            }
            buf
        });
        let mut stderr_handle = tokio::spawn(async move {
            let mut buf = Vec::with_capacity(cap.min(64 * 1024));
            let mut capped = stderr_pipe.take(cap as u64 + 1);
            if let Err(e) = capped.read_to_end(&mut buf).await {
                tracing::warn!("stderr pipe read error: {e}");
            }
            buf
        });

        // If either stream overflowed the child may block on a full pipe,
        // which keeps the other reader from ever seeing EOF.
        let (mut stdout_raw, mut stderr_raw) = tokio::select! {
            result = &mut stdout_handle => {
                let buf = result.unwrap_or_default();
                if buf.len() > cap {
                    tracing::warn!(program, cap, "stdout cap exceeded, killing process group");
                    kill_group(child_pid);
                }
                (buf, stderr_handle.await.unwrap_or_default())
            }
            result = &mut stderr_handle => {
                let buf = result.unwrap_or_default();
                if buf.len() > cap {
                    tracing::warn!(program, cap, "stderr cap exceeded, killing process group");
                    kill_group(child_pid);
                }
                (stdout_handle.await.unwrap_or_default(), buf)
            }
        };
        let stdout_overflow = clamp_to_cap(&mut stdout_raw, cap);
        let stderr_overflow = clamp_to_cap(&mut stderr_raw, cap);
        if stdout_overflow || stderr_overflow {
            kill_group(child_pid);
        }

        let stdout = String::from_utf8_lossy(&stdout_raw).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_raw).into_owned();

        let status = match child.wait().await {
            Ok(status) => status,
            Err(e) => {
                return ExecutionResult {
                    stdout,
                    stderr: Some(stderr),
                    error: Some(OdoError::Io(format!("failed to wait for {program}: {e}"))),
                    exit_code: None,
                };
            }
        };

        let exit_code = status.code();
        let error = if status.success() {
            if !stderr.is_empty() {
                tracing::debug!(program, stderr = %stderr, "odo stderr output");
            }
            None
        } else {
            // Signalled processes have no exit code.
            let code = exit_code.unwrap_or(SIGNALLED_EXIT_CODE);
            tracing::warn!(program, code, "odo process failed");
            Some(OdoError::ProcessExit {
                code,
                stderr: stderr.clone(),
            })
        };

        ExecutionResult {
            stdout,
            stderr: Some(stderr),
            error,
            exit_code,
        }
    }
}
