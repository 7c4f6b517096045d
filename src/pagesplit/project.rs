//! # Project File
//!
//! [`Settings`] lives in memory only. This module saves it to and loads it from a
//! JSON project file:
//!
//! ```text
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-19T12:00:00Z",
//!   "default_layout_type": "two-pages",
//!   "pages": [
//!     { "image": { "file_path": "scans/001.tif", "page": 0 }, "layout_type": "single-page-uncut" },
//!     { "image": { "file_path": "scans/002.tif", "page": 0 }, "params": { ... } }
//!   ]
//! }
//! ```
//!
//! Pages are written in key order so saving the same state twice produces the
//! same `pages` array.

use crate::error::{PagesplitError, Result};
use crate::model::{ImageId, LayoutType, Params};
use crate::settings::{BaseRecord, Settings};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const PROJECT_FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    pub image: ImageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<LayoutType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub default_layout_type: LayoutType,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            version: PROJECT_FILE_VERSION,
            saved_at: None,
            default_layout_type: LayoutType::Auto,
            pages: Vec::new(),
        }
    }
}

impl ProjectFile {
    /// Snapshot of the store's current state.
    pub fn capture(settings: &Settings) -> Self {
        let (default_layout_type, records) = settings.snapshot();
        let pages = records
            .into_iter()
            .map(|(image, record)| PageEntry {
                image,
                layout_type: record.layout_type(),
                params: record.params().cloned(),
            })
            .collect();

        Self {
            version: PROJECT_FILE_VERSION,
            saved_at: Some(Utc::now()),
            default_layout_type,
            pages,
        }
    }

    /// Replaces the store's state with this project's.
    pub fn apply_to(&self, settings: &Settings) {
        let records = self.pages.iter().map(|entry| {
            (
                entry.image.clone(),
                BaseRecord::new(entry.params.clone(), entry.layout_type),
            )
        });
        settings.restore(self.default_layout_type, records);
    }

    /// Loads a project file, or returns an empty project if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no project file at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let project: ProjectFile = serde_json::from_str(&content)?;
        if project.version > PROJECT_FILE_VERSION {
            return Err(PagesplitError::Api(format!(
                "{} was written by a newer version (format {}, supported {})",
                path.display(),
                project.version,
                PROJECT_FILE_VERSION
            )));
        }
        debug!(
            "loaded {} page records from {}",
            project.pages.len(),
            path.display()
        );
        Ok(project)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("saved {} page records to {}", self.pages.len(), path.display());
        Ok(())
    }
}
