//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It parses user-facing page references, picks the conflict policy
//! from the configuration, and dispatches to `commands/*.rs`.
//!
//! The facade holds the [`Settings`] store behind an `Arc`, so a client can hand
//! the same store to pipeline workers via [`PagesplitApi::settings`] while it
//! keeps issuing commands.

use crate::commands;
use crate::config::PagesplitConfig;
use crate::error::{PagesplitError, Result};
use crate::model::{ImageId, LayoutType, Params};
use crate::project::ProjectFile;
use crate::relink::PathMapRelinker;
use crate::settings::Settings;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct PagesplitApi {
    settings: Arc<Settings>,
    config: PagesplitConfig,
    data_dir: PathBuf,
}

impl PagesplitApi {
    pub fn new(settings: Arc<Settings>, config: PagesplitConfig, data_dir: PathBuf) -> Self {
        Self {
            settings,
            config,
            data_dir,
        }
    }

    /// Loads the project at `project_path` into a fresh store.
    pub fn open(project_path: &Path, config: PagesplitConfig, data_dir: PathBuf) -> Result<Self> {
        let settings = Arc::new(Settings::new());
        ProjectFile::load(project_path)?.apply_to(&settings);
        Ok(Self::new(settings, config, data_dir))
    }

    pub fn save(&self, project_path: &Path) -> Result<()> {
        ProjectFile::capture(&self.settings).save(project_path)
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn config(&self) -> &PagesplitConfig {
        &self.config
    }

    pub fn show<I: AsRef<str>>(&self, pages: &[I]) -> Result<commands::CmdResult> {
        let pages = parse_pages(pages)?;
        Ok(commands::show::run(&self.settings, &pages))
    }

    pub fn set_layout<I: AsRef<str>>(
        &self,
        layout_type: &str,
        pages: &[I],
    ) -> Result<commands::CmdResult> {
        let layout_type: LayoutType = layout_type.parse()?;
        let pages = parse_required_pages(pages)?;
        Ok(commands::layout::set(
            &self.settings,
            self.config.on_conflict,
            &pages,
            layout_type,
        ))
    }

    pub fn clear_layout<I: AsRef<str>>(&self, pages: &[I]) -> Result<commands::CmdResult> {
        let pages = parse_required_pages(pages)?;
        Ok(commands::layout::clear(&self.settings, &pages))
    }

    pub fn set_params(&self, page: &str, params: Params) -> Result<commands::CmdResult> {
        let image: ImageId = page.parse()?;
        Ok(commands::params::set(
            &self.settings,
            self.config.on_conflict,
            &image,
            params,
        ))
    }

    pub fn set_params_from_file(&self, page: &str, path: &Path) -> Result<commands::CmdResult> {
        let params = commands::params::read_params_file(path)?;
        self.set_params(page, params)
    }

    pub fn clear_params<I: AsRef<str>>(&self, pages: &[I]) -> Result<commands::CmdResult> {
        let pages = parse_required_pages(pages)?;
        Ok(commands::params::clear(&self.settings, &pages))
    }

    pub fn set_default(&self, layout_type: &str) -> Result<commands::CmdResult> {
        let layout_type: LayoutType = layout_type.parse()?;
        Ok(commands::defaults::run(&self.settings, layout_type))
    }

    pub fn relink(&self, from: &Path, to: &Path) -> Result<commands::CmdResult> {
        let relinker = PathMapRelinker::new().with_mapping(from, to);
        Ok(commands::relink::run(&self.settings, &relinker))
    }

    pub fn reset(&self) -> Result<commands::CmdResult> {
        Ok(commands::reset::run(&self.settings))
    }

    pub fn config_action(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

fn parse_pages<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ImageId>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

fn parse_required_pages<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ImageId>> {
    if inputs.is_empty() {
        return Err(PagesplitError::Api("No pages given".to_string()));
    }
    parse_pages(inputs)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, PageRecord};
