use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dispatch::ExecOptions;
use crate::error::OdoError;

pub const DEFAULT_ODO_PATH: &str = "odo";

/// Token odo prints at the start of its version banner, whatever the
/// installed binary is called.
pub const DEFAULT_BANNER_NAME: &str = "odo";

/// Env var naming an optional TOML config file.
pub const CONFIG_FILE_ENV: &str = "ODO_ADAPTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program to run: a bare name resolved via PATH, or a full path.
    pub odo_path: String,
    /// Leading token expected in the `version` banner.
    pub banner_name: String,
    /// Working directory for every odo invocation.
    pub working_directory: Option<PathBuf>,
    /// Extra environment passed to odo.
    pub env: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odo_path: DEFAULT_ODO_PATH.to_string(),
            banner_name: DEFAULT_BANNER_NAME.to_string(),
            working_directory: None,
            env: HashMap::new(),
        }
    }
}

impl Config {
    /// Defaults overridden by `ODO_PATH` and `ODO_WORKING_DIR`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, OdoError> {
        toml::from_str(text).map_err(|e| OdoError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, OdoError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| OdoError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// File named by `ODO_ADAPTER_CONFIG` (if any), then env overrides.
    /// An unreadable file is logged and ignored.
    pub fn load() -> Self {
        let base = match env::var_os(CONFIG_FILE_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        config
                    }
                    Err(e) => {
                        tracing::warn!("ignoring config file: {e}");
                        Self::default()
                    }
                }
            }
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(path) = env::var("ODO_PATH").ok().filter(|p| !p.trim().is_empty()) {
            self.odo_path = path;
        }
        if let Some(dir) = env::var_os("ODO_WORKING_DIR") {
            self.working_directory = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            working_directory: self.working_directory.clone(),
            env: self.env.clone(),
        }
    }
}
