use crate::error::{PagesplitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PROJECT_FILE: &str = "pagesplit.json";

/// What a layout command does when the new layout type contradicts a page's params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Apply the layout type and drop the params.
    #[default]
    Resolve,
    /// Leave the page alone and report it.
    Reject,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Resolve => f.write_str("resolve"),
            ConflictPolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = PagesplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "resolve" => Ok(ConflictPolicy::Resolve),
            "reject" => Ok(ConflictPolicy::Reject),
            other => Err(PagesplitError::Config(format!(
                "on-conflict must be 'resolve' or 'reject', got '{}'",
                other
            ))),
        }
    }
}

/// Configuration for pagesplit, stored as config.json in the data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagesplitConfig {
    /// Project file used when `--file` is not given, relative to the data directory
    #[serde(default = "default_project_file")]
    pub project_file: String,

    #[serde(default)]
    pub on_conflict: ConflictPolicy,
}

fn default_project_file() -> String {
    DEFAULT_PROJECT_FILE.to_string()
}

impl Default for PagesplitConfig {
    fn default() -> Self {
        Self {
            project_file: default_project_file(),
            on_conflict: ConflictPolicy::default(),
        }
    }
}

impl PagesplitConfig {
    pub const KEYS: [&'static str; 2] = ["project-file", "on-conflict"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PagesplitConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "project-file" => Some(self.project_file.clone()),
            "on-conflict" => Some(self.on_conflict.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "project-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(PagesplitError::Config(
                        "project-file cannot be empty".to_string(),
                    ));
                }
                self.project_file = value.to_string();
            }
            "on-conflict" => self.on_conflict = value.parse()?,
            other => {
                return Err(PagesplitError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}
