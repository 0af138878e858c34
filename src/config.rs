//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgunit-tree/orgunit-tree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `ORGUNIT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{KeyPolicy, DEFAULT_ROOT_NAME};

/// Unified configuration for orgunit-tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name of the root node (default: "Timetable")
    pub root_name: String,
    /// Spaces per depth level in the console outline
    pub outline_indent: usize,
    /// Spaces per nesting level in the written JSON
    pub json_indent: usize,
    /// Handling of rows with empty required keys
    pub key_policy: KeyPolicy,
    /// Trim surrounding whitespace from every CSV field
    pub trim: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            outline_indent: 3,
            json_indent: 4,
            key_policy: KeyPolicy::Permissive,
            trim: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_name: Option<String>,
    pub outline_indent: Option<usize>,
    pub json_indent: Option<usize>,
    pub key_policy: Option<KeyPolicy>,
    pub trim: Option<bool>,
}

/// Get the XDG config directory for orgunit-tree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgunit-tree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgunit-tree.toml"))
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_name: overlay
                .root_name
                .clone()
                .unwrap_or_else(|| self.root_name.clone()),
            outline_indent: overlay.outline_indent.unwrap_or(self.outline_indent),
            json_indent: overlay.json_indent.unwrap_or(self.json_indent),
            key_policy: overlay.key_policy.unwrap_or(self.key_policy),
            trim: overlay.trim.unwrap_or(self.trim),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply ORGUNIT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGUNIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("root_name") {
            settings.root_name = val;
        }
        if let Ok(val) = config.get::<usize>("outline_indent") {
            settings.outline_indent = val;
        }
        if let Ok(val) = config.get::<usize>("json_indent") {
            settings.json_indent = val;
        }
        if let Ok(val) = config.get_string("key_policy") {
            settings.key_policy = parse_key_policy(&val)?;
        }
        if let Ok(val) = config.get_bool("trim") {
            settings.trim = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.json_indent > 16 || self.outline_indent > 16 {
            return Err(ApplicationError::Config {
                message: format!(
                    "indent out of range (0..=16): outline_indent={}, json_indent={}",
                    self.outline_indent, self.json_indent
                ),
            });
        }
        Ok(())
    }
}

fn parse_key_policy(value: &str) -> Result<KeyPolicy, ApplicationError> {
    match value.to_ascii_lowercase().as_str() {
        "permissive" => Ok(KeyPolicy::Permissive),
        "strict" => Ok(KeyPolicy::Strict),
        other => Err(ApplicationError::Config {
            message: format!("unknown key_policy '{other}', expected permissive or strict"),
        }),
    }
}
