//! Configuration for loading road files.
//!
//! Load order: `.townroute/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".townroute";
const CONFIG_FILE: &str = "config.toml";

/// Top-level townroute configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TownrouteConfig {
    pub loader: LoaderConfig,
    pub data: DataConfig,
}

/// Road record parsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Field separator within a record line.
    pub delimiter: char,
    /// Abort on the first malformed line instead of skipping it.
    pub strict: bool,
}

/// Where road data lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Road file used when none is given on the command line.
    /// Relative paths resolve against the project root.
    pub file: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            strict: false,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

/// Get the path to the config file for a given project root.
pub fn config_file(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

impl TownrouteConfig {
    /// Load config from `.townroute/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = config_file(project_root);

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("TOWNROUTE_DELIMITER", &mut config.loader.delimiter);
        env_override("TOWNROUTE_STRICT", &mut config.loader.strict);
        if let Ok(file) = std::env::var("TOWNROUTE_DATA_FILE")
            && !file.is_empty()
        {
            config.data.file = Some(PathBuf::from(file));
        }

        if let Some(file) = config.data.file.take() {
            config.data.file = Some(if file.is_relative() {
                project_root.join(file)
            } else {
                file
            });
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let d = self.loader.delimiter;
        if d.is_alphanumeric() || d.is_whitespace() {
            anyhow::bail!(
                "loader delimiter {:?} must not be alphanumeric or whitespace",
                d
            );
        }
        Ok(())
    }
}
