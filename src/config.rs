//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/snailfish/snailfish.toml`
//! 3. Local config: `<input_dir>/.snailfish.toml`
//! 4. Environment variables: `SNAILFISH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Reducer;

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub step_limit: Option<usize>,
    pub show_sum: Option<bool>,
}

/// Unified configuration for snailfish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Abort a reduction after this many explode/split steps (default: unbounded)
    pub step_limit: Option<usize>,
    /// Print the reduced final sum next to its magnitude
    pub show_sum: bool,
}

/// Get the XDG config directory for snailfish.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "snailfish").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("snailfish.toml"))
}

/// Get the path to the local config file in an input directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".snailfish.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Reducer honouring the configured step limit.
    pub fn reducer(&self) -> Reducer {
        Reducer::new(self.step_limit)
    }

    /// Merge overlay config onto self (base).
    ///
    /// Scalar options: overlay wins if Some, otherwise keep base.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            step_limit: overlay.step_limit.or(self.step_limit),
            show_sum: overlay.show_sum.unwrap_or(self.show_sum),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.snailfish.toml`
    ///   (usually the directory of the input file)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply SNAILFISH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("SNAILFISH").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("step_limit") {
            settings.step_limit = Some(val);
        }
        if let Ok(val) = config.get_bool("show_sum") {
            settings.show_sum = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# snailfish configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/snailfish/snailfish.toml
#   Local:  <input_dir>/.snailfish.toml
#   Env:    SNAILFISH_* environment variables (explicit overrides)
#   CLI:    --step-limit

# Abort a reduction after this many explode/split steps (unbounded if unset)
# step_limit = 10000

# Print the reduced final sum next to its magnitude
# show_sum = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
