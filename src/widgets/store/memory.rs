use super::ordered::ZOrderedWidgets;
use super::WidgetStore;
use crate::error::{Result, WidgetsError};
use crate::model::{Widget, WidgetChangeSet};
use parking_lot::RwLock;
use tracing::trace;
use uuid::Uuid;

/// Thread-safe in-memory widget store.
///
/// The widget table and the z-order index live behind one `RwLock`, so a
/// writer always updates both together. Reads share the lock; `create`,
/// `update`, `delete` and `clear` take it exclusively. `parking_lot`'s lock is
/// task-fair: a queued writer holds off new readers, and readers are not
/// starved by a stream of writers either.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<ZOrderedWidgets>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WidgetStore for InMemoryStore {
    fn get(&self, id: &Uuid) -> Option<Widget> {
        trace!(%id, "get widget");
        self.inner.read().get(id).cloned()
    }

    fn get_page(&self, limit: i64, offset: i64) -> Result<Vec<Widget>> {
        if limit < 0 {
            return Err(WidgetsError::InvalidArgument(
                "page limit should not be negative".to_string(),
            ));
        }
        if offset < 0 {
            return Err(WidgetsError::InvalidArgument(
                "page offset should not be negative".to_string(),
            ));
        }

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        trace!(limit, offset, "get widget page");

        let inner = self.inner.read();
        let page = inner.page(limit, offset).cloned().collect();
        Ok(page)
    }

    fn create(&self, change_set: &WidgetChangeSet) -> Result<Widget> {
        self.inner.write().create(change_set)
    }

    fn update(&self, id: &Uuid, change_set: &WidgetChangeSet) -> Result<Widget> {
        self.inner.write().update(id, change_set)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        self.inner.write().delete(id).map(|_| ())
    }

    fn clear(&self) {
        self.inner.write().clear();
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// The change set most tests start from: fully populated, z left to the store.
    pub fn default_change_set() -> WidgetChangeSet {
        WidgetChangeSet::new()
            .with_x(10)
            .with_y(20)
            .with_height(100)
            .with_width(200)
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub created: Vec<Widget>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                created: Vec::new(),
            }
        }

        /// Adds `count` widgets stacked on top of whatever is there.
        pub fn with_widgets(mut self, count: usize) -> Self {
            for _ in 0..count {
                let widget = self.store.create(&default_change_set()).unwrap();
                self.created.push(widget);
            }
            self
        }

        pub fn with_widget_at(mut self, z: i32) -> Self {
            let widget = self.store.create(&default_change_set().with_z(z)).unwrap();
            self.created.push(widget);
            self
        }

        /// Ids of the stored widgets, lowest z first.
        pub fn z_order(&self) -> Vec<Uuid> {
            self.store
                .get_page(i64::MAX, 0)
                .unwrap()
                .into_iter()
                .map(|w| w.id)
                .collect()
        }

        /// Stored z-indices, ascending.
        pub fn z_values(&self) -> Vec<i32> {
            self.store
                .get_page(i64::MAX, 0)
                .unwrap()
                .into_iter()
                .map(|w| w.z)
                .collect()
        }
    }
}
