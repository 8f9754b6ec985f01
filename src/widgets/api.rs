//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for widget operations, whatever front end sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes paging input** (defaults, upper bound) via [`PageRequest`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Failures come back as [`WidgetsError`](crate::error::WidgetsError); front
//! ends classify them with [`outcome`](crate::error::WidgetsError::outcome)
//! into "not found" and "bad request".
//!
//! ## Generic Over WidgetStore
//!
//! `WidgetsApi<S: WidgetStore>` is generic over the storage backend, and all
//! methods take `&self`. Wrap the store in an `Arc` to share one store between
//! several facades or threads.

use crate::commands;
use crate::config::WidgetsConfig;
use crate::error::Result;
use crate::model::WidgetChangeSet;
use crate::store::WidgetStore;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// The main API facade for widget operations.
pub struct WidgetsApi<S: WidgetStore> {
    store: S,
    config: WidgetsConfig,
}

impl<S: WidgetStore> WidgetsApi<S> {
    pub fn new(store: S, config: WidgetsConfig) -> Self {
        Self { store, config }
    }

    pub fn get_widget(&self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn list_widgets(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<commands::CmdResult> {
        let page = PageRequest::resolve(limit, offset, &self.config);
        debug!(?limit, ?offset, ?page, "resolved page request");
        commands::list::run(&self.store, page)
    }

    pub fn create_widget(&self, change_set: &WidgetChangeSet) -> Result<commands::CmdResult> {
        commands::create::run(&self.store, change_set)
    }

    pub fn update_widget(
        &self,
        id: &Uuid,
        change_set: &WidgetChangeSet,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&self.store, id, change_set)
    }

    pub fn delete_widget(&self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::delete::run(&self.store, id)
    }

    pub fn clear_widgets(&self) -> Result<commands::CmdResult> {
        commands::clear::run(&self.store)
    }

    pub fn config(&self) -> &WidgetsConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Shows or changes the configuration stored in `dir`.
pub fn configure(dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::PageRequest;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
