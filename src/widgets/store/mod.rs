//! # Storage Layer
//!
//! This module defines the storage abstraction for widgets. The [`WidgetStore`]
//! trait is the full operation set the rest of the crate relies on; everything
//! above it (commands, API, CLI) only ever talks to a store through this trait.
//!
//! ## Contract
//!
//! - **Unique z-indices**: no two stored widgets share a `z`, before and after
//!   every call. Callers never observe a violated state.
//! - **Atomic calls**: each operation takes effect at a single point between
//!   invocation and return. A failing call changes nothing.
//! - **Snapshots out**: every returned [`Widget`] is an independent copy.
//!   Later store mutations are never visible through it.
//!
//! ## Failure Modes
//!
//! | Error | When |
//! |-------|------|
//! | `InvalidChangeSet` | `create` without `x`, `height` or `width` |
//! | `EntityNotFound` | `update`/`delete` of an unknown id |
//! | `InvalidArgument` | negative `limit`/`offset`, or z-index arithmetic leaving `i32` |
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the z-ordered table behind one fair
//!   reader-writer lock. Safe to share across threads.

use crate::error::Result;
use crate::model::{Widget, WidgetChangeSet};
use std::sync::Arc;
use uuid::Uuid;

pub mod memory;
pub mod ordered;

/// Abstract interface for widget storage.
///
/// All methods take `&self`: implementations synchronize internally so a
/// single store can serve many threads at once.
pub trait WidgetStore: Send + Sync {
    /// Get a widget by ID
    fn get(&self, id: &Uuid) -> Option<Widget>;

    /// Widgets ordered by ascending z, skipping `offset` and returning at most `limit`
    fn get_page(&self, limit: i64, offset: i64) -> Result<Vec<Widget>>;

    /// Create a widget, shifting any widgets that collide with its z-index
    fn create(&self, change_set: &WidgetChangeSet) -> Result<Widget>;

    /// Apply a change set to an existing widget
    fn update(&self, id: &Uuid, change_set: &WidgetChangeSet) -> Result<Widget>;

    /// Delete a widget permanently
    fn delete(&self, id: &Uuid) -> Result<()>;

    /// Remove every widget
    fn clear(&self);

    /// Number of stored widgets
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: WidgetStore + ?Sized> WidgetStore for Arc<S> {
    fn get(&self, id: &Uuid) -> Option<Widget> {
        (**self).get(id)
    }

    fn get_page(&self, limit: i64, offset: i64) -> Result<Vec<Widget>> {
        (**self).get_page(limit, offset)
    }

    fn create(&self, change_set: &WidgetChangeSet) -> Result<Widget> {
        (**self).create(change_set)
    }

    fn update(&self, id: &Uuid, change_set: &WidgetChangeSet) -> Result<Widget> {
        (**self).update(id, change_set)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        (**self).delete(id)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
