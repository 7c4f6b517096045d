use crate::config::PagesplitConfig;
use crate::model::ImageId;
use crate::settings::Record;

pub mod config;
pub mod defaults;
pub mod helpers;
pub mod layout;
pub mod params;
pub mod relink;
pub mod reset;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A page's record as seen by a command.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub image: ImageId,
    pub record: Record,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub records: Vec<PageRecord>,
    pub config: Option<PagesplitConfig>,
    pub messages: Vec<CmdMessage>,
    /// Whether the command changed the store.
    pub modified: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<PageRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_config(mut self, config: PagesplitConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
