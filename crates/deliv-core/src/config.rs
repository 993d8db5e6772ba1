use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Applied to listings when the caller gives no explicit limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_status_file")]
    pub status_file: String,
    #[serde(default)]
    pub list: ListConfig,
}

fn default_version() -> u32 {
    1
}

fn default_status_file() -> String {
    paths::DEFAULT_STATUS_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            status_file: default_status_file(),
            list: ListConfig::default(),
        }
    }
}

impl Config {
    /// Load `.deliverables/config.yaml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn status_path(&self, root: &Path) -> PathBuf {
        paths::status_path(root, &self.status_file)
    }

    /// Explicit limit wins over the configured default.
    pub fn effective_limit(&self, explicit: Option<usize>) -> Option<usize> {
        explicit.or(self.list.default_limit)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        if self.status_file.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "status_file must not be empty".to_string(),
            });
        }

        if self.list.default_limit == Some(0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "list.default_limit is 0: listings will always be empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
