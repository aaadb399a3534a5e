use thiserror::Error;

/// `ProcessExit` code recorded for a process killed by a signal.
pub const SIGNALLED_EXIT_CODE: i32 = -1;

/// Failures surfaced by the executor or the config layer.
/// Malformed tool output is never one of these: parsers fall back instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OdoError {
    #[error("failed to spawn {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("process exited with code {code}: {stderr}")]
    ProcessExit { code: i32, stderr: String },

    #[error("io error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),
}

impl OdoError {
    /// Returns true when the tool itself could not be started,
    /// typically a missing binary or a bad `ODO_PATH`.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    /// Produce a short message suitable for showing in an editor notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Spawn { program, .. } => {
                format!("could not run {program}; is it installed and on PATH?")
            }
            Self::ProcessExit { code, stderr } => {
                if stderr.trim().is_empty() {
                    format!("odo exited with code {code}")
                } else {
                    // odo prints usage banners before the actual error line.
                    let preview: String = stderr
                        .trim_end()
                        .chars()
                        .rev()
                        .take(200)
                        .collect::<Vec<_>>()
                        .into_iter()
                        .rev()
                        .collect();
                    let prefix = if preview.len() < stderr.trim_end().len() {
                        "..."
                    } else {
                        ""
                    };
                    format!("odo exited with code {code}: {prefix}{preview}")
                }
            }
            Self::Io(msg) => format!("failed to read odo output: {msg}"),
            Self::Config(msg) => format!("invalid configuration: {msg}"),
        }
    }
}
