//! Dotfile support for tmac.
//!
//! A `.tmac.yml` in the working directory may record default input paths
//! so that repeated runs need no flags. Command-line flags always win.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = ".tmac.yml";

/// Dotfile schema. Relative paths are resolved against the dotfile's directory.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub resources_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub defaults_file: Option<PathBuf>,
    pub security_checks_file: Option<PathBuf>,
    pub swagger_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [
            &mut self.resources_file,
            &mut self.config_file,
            &mut self.defaults_file,
            &mut self.security_checks_file,
            &mut self.swagger_file,
            &mut self.output_dir,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Load a dotfile from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty dotfile parses as null
    let config: Option<ConfigFile> = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;
    let config = config.unwrap_or_default();

    validate_config(&config)?;
    warn_unknown_fields(&config);

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
}

/// Auto-discover the dotfile in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using dotfile");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let entries = [
        ("resources_file", &config.resources_file),
        ("config_file", &config.config_file),
        ("defaults_file", &config.defaults_file),
        ("security_checks_file", &config.security_checks_file),
        ("swagger_file", &config.swagger_file),
        ("output_dir", &config.output_dir),
    ];
    for (key, value) in entries {
        if value.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n\
                 💡 Hint: Remove the key or give it a path.",
                key
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the dotfile.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
