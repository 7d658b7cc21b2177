use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::BuildOptions;
use crate::error::{Result, TaxonError};

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# taxon configuration file
# Location: ~/.taxon/config.toml

[definitions]
# Definition files or directories used when no input is given on the command line
# Example: paths = ["data/categories", "mods/extra.toml"]
paths = []

[build]
# Fail when a category names a base category that does not exist
# Default: false (the relation is skipped and reported as a warning)
strict = false

# Log skipped base categories while building
warn_unresolved = true

[export]
# Pretty-print exported descriptor catalogs
pretty = true

# Embed a hash of the source definitions in exported catalogs
fingerprint = true
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub definitions: DefinitionsConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where definitions come from
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DefinitionsConfig {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

/// Hierarchy construction settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    #[serde(default)]
    pub strict: bool,

    #[serde(default = "default_true")]
    pub warn_unresolved: bool,
}

/// Catalog export settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default = "default_true")]
    pub fingerprint: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strict: false,
            warn_unresolved: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            fingerprint: true,
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| TaxonError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self).map_err(|e| TaxonError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "definitions.paths" => {
                self.definitions.paths = parse_string_list(value)
                    .into_iter()
                    .map(PathBuf::from)
                    .collect();
            }
            "build.strict" => self.build.strict = parse_bool(key, value)?,
            "build.warn_unresolved" => self.build.warn_unresolved = parse_bool(key, value)?,
            "export.pretty" => self.export.pretty = parse_bool(key, value)?,
            "export.fingerprint" => self.export.fingerprint = parse_bool(key, value)?,
            _ => {
                return Err(TaxonError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "definitions.paths".to_string(),
                format!("{:?}", self.definitions.paths),
            ),
            ("build.strict".to_string(), self.build.strict.to_string()),
            (
                "build.warn_unresolved".to_string(),
                self.build.warn_unresolved.to_string(),
            ),
            ("export.pretty".to_string(), self.export.pretty.to_string()),
            (
                "export.fingerprint".to_string(),
                self.export.fingerprint.to_string(),
            ),
        ]
    }

    /// Convert to BuildOptions for hierarchy construction
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            strict_references: self.build.strict,
            warn_unresolved: self.build.warn_unresolved,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TaxonError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
