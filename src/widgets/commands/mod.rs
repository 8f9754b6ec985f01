//! # Command Layer
//!
//! One module per operation. Each `run` function takes a [`WidgetStore`]
//! plus plain Rust arguments and returns a [`CmdResult`]; none of them do
//! I/O or know how results will be shown.
//!
//! Commands own the input checks the store deliberately leaves out, such as
//! rejecting non-positive dimensions, and phrase the user-facing messages.
//!
//! [`WidgetStore`]: crate::store::WidgetStore

use crate::config::WidgetsConfig;
use crate::error::{Result, WidgetsError};
use crate::model::{Widget, WidgetChangeSet};

pub mod clear;
pub mod config;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

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

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_widgets: Vec<Widget>,
    pub listed_widgets: Vec<Widget>,
    pub config: Option<WidgetsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_widgets(mut self, widgets: Vec<Widget>) -> Self {
        self.affected_widgets = widgets;
        self
    }

    pub fn with_listed_widgets(mut self, widgets: Vec<Widget>) -> Self {
        self.listed_widgets = widgets;
        self
    }

    pub fn with_config(mut self, config: WidgetsConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Rejects dimensions no stored widget may have.
///
/// Absent fields pass, so the same check serves both create and update.
pub(crate) fn ensure_positive_dimensions(change_set: &WidgetChangeSet) -> Result<()> {
    for (name, value) in [("height", change_set.height), ("width", change_set.width)] {
        if let Some(v) = value {
            if v < 1 {
                return Err(WidgetsError::InvalidArgument(format!(
                    "{} must be at least 1, got {}",
                    name, v
                )));
            }
        }
    }
    Ok(())
}
