//! # Z-Ordered Widget Table
//!
//! The widget table and its z-order index, kept consistent with each other.
//! Nothing here locks; [`super::memory::InMemoryStore`] guards a
//! [`ZOrderedWidgets`] with a single reader-writer lock so both structures
//! always change together.
//!
//! ## Invariants
//!
//! - Every stored widget appears exactly once in `z_index`, under its own `z`.
//! - Every `z_index` entry names a stored widget.
//! - No two widgets share a `z`.
//!
//! ## Collision Resolution
//!
//! Inserting at an occupied z-index pushes the *contiguous run* of widgets
//! starting there up by one. The run ends at the first gap, so widgets past
//! the gap are never touched:
//!
//! ```text
//! before:  1:A  2:B  3:C  5:D        insert N at 2
//! after:   1:A  2:N  3:B  4:C  5:D   (D untouched, the gap at 4 absorbed C)
//! ```
//!
//! Every fallible step (validation, z-index overflow) runs before the first
//! mutation, so a failed operation leaves the table exactly as it was.

use crate::error::{Result, WidgetsError};
use crate::model::{Widget, WidgetChangeSet};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ZOrderedWidgets {
    widgets: HashMap<Uuid, Widget>,
    z_index: BTreeMap<i32, Uuid>,
}

/// A pending move of one widget from `from` to `from + 1`.
type ShiftPlan = Vec<(i32, Uuid)>;

impl ZOrderedWidgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets in ascending z order, skipping `offset` and yielding at most `limit`.
    pub fn page(&self, limit: usize, offset: usize) -> impl Iterator<Item = &Widget> {
        self.z_index
            .values()
            .skip(offset)
            .take(limit)
            .filter_map(move |id| self.widgets.get(id))
    }

    /// The z-index one above the current maximum, or 1 when empty.
    pub fn top_z(&self) -> Result<i32> {
        let max = self.z_index.keys().next_back().copied().unwrap_or(0);
        max.checked_add(1)
            .ok_or_else(|| WidgetsError::InvalidArgument("no z-index above the top".to_string()))
    }

    /// Inserts a new widget built from `change_set`, shifting colliders out of the way.
    pub fn create(&mut self, change_set: &WidgetChangeSet) -> Result<Widget> {
        change_set.validate_for_create()?;

        let z = match change_set.z {
            Some(z) => z,
            None => self.top_z()?,
        };
        let widget = change_set.build_widget(Uuid::new_v4(), z)?;
        let plan = self.plan_shift(z)?;

        self.apply_shift(z, plan);
        self.z_index.insert(z, widget.id);
        self.widgets.insert(widget.id, widget.clone());
        debug!(id = %widget.id, z, "created widget");

        Ok(widget)
    }

    /// Merges `change_set` into an existing widget, moving it in the z order if asked.
    pub fn update(&mut self, id: &Uuid, change_set: &WidgetChangeSet) -> Result<Widget> {
        let current_z = match self.widgets.get(id) {
            Some(widget) => widget.z,
            None => return Err(WidgetsError::EntityNotFound(*id)),
        };

        if let Some(new_z) = change_set.z.filter(|z| *z != current_z) {
            self.z_index.remove(&current_z);
            let plan = match self.plan_shift(new_z) {
                Ok(plan) => plan,
                Err(err) => {
                    self.z_index.insert(current_z, *id);
                    return Err(err);
                }
            };
            self.apply_shift(new_z, plan);
            self.z_index.insert(new_z, *id);
            debug!(%id, from = current_z, to = new_z, "moved widget");
        }

        let widget = self
            .widgets
            .get_mut(id)
            .ok_or(WidgetsError::EntityNotFound(*id))?;
        change_set.apply_to(widget);
        widget.touch();

        Ok(widget.clone())
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<Widget> {
        let widget = self
            .widgets
            .remove(id)
            .ok_or(WidgetsError::EntityNotFound(*id))?;
        self.z_index.remove(&widget.z);
        debug!(%id, z = widget.z, "deleted widget");
        Ok(widget)
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
        self.z_index.clear();
    }

    /// Collects the contiguous run of occupied z-indices starting at `shift_from`.
    ///
    /// Fails if the run reaches `i32::MAX`, since its last widget would have
    /// nowhere to go.
    fn plan_shift(&self, shift_from: i32) -> Result<ShiftPlan> {
        let mut plan = Vec::new();
        let mut expected = shift_from;

        for (&z, &id) in self.z_index.range(shift_from..) {
            if z > expected {
                break;
            }
            plan.push((z, id));
            expected = z.checked_add(1).ok_or_else(|| {
                WidgetsError::InvalidArgument(format!(
                    "cannot shift widgets past z-index {}",
                    i32::MAX
                ))
            })?;
        }

        Ok(plan)
    }

    /// Moves every widget in `plan` up by one, vacating `shift_from`.
    fn apply_shift(&mut self, shift_from: i32, plan: ShiftPlan) {
        if plan.is_empty() {
            return;
        }
        debug!(shift_from, moved = plan.len(), "shifting z-index run");

        // Top of the run first, so each move lands on a slot that is already free.
        for (z, id) in plan.into_iter().rev() {
            self.z_index.remove(&z);
            self.z_index.insert(z + 1, id);
            if let Some(widget) = self.widgets.get_mut(&id) {
                widget.z = z + 1;
            }
        }
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.widgets.len(), self.z_index.len());
        for (z, id) in &self.z_index {
            assert_eq!(self.widgets[id].z, *z, "index entry {} is stale", z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change_set() -> WidgetChangeSet {
        WidgetChangeSet::new()
            .with_x(10)
            .with_y(20)
            .with_height(100)
            .with_width(200)
    }

    fn at(z: i32) -> WidgetChangeSet {
        change_set().with_z(z)
    }

    fn z_order(table: &ZOrderedWidgets) -> Vec<(i32, Uuid)> {
        table.page(usize::MAX, 0).map(|w| (w.z, w.id)).collect()
    }

    #[test]
    fn top_z_starts_at_one() {
        let table = ZOrderedWidgets::new();
        assert_eq!(table.top_z().unwrap(), 1);
    }

    #[test]
    fn stacks_unplaced_widgets_on_top() {
        let mut table = ZOrderedWidgets::new();
        let zs: Vec<i32> = (0..4)
            .map(|_| table.create(&change_set()).unwrap().z)
            .collect();
        assert_eq!(zs, vec![1, 2, 3, 4]);
        table.assert_consistent();
    }

    #[test]
    fn top_is_relative_to_negative_maximum() {
        let mut table = ZOrderedWidgets::new();
        table.create(&at(-10)).unwrap();
        table.create(&at(-11)).unwrap();
        assert_eq!(table.create(&change_set()).unwrap().z, -9);
    }

    #[test]
    fn collision_shifts_contiguous_run() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&change_set()).unwrap();
        let b = table.create(&change_set()).unwrap();
        let c = table.create(&change_set()).unwrap();
        let n = table.create(&at(1)).unwrap();

        assert_eq!(
            z_order(&table),
            vec![(1, n.id), (2, a.id), (3, b.id), (4, c.id)]
        );
        table.assert_consistent();
    }

    #[test]
    fn shift_stops_at_first_gap() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&at(1)).unwrap();
        let b = table.create(&at(2)).unwrap();
        let c = table.create(&at(3)).unwrap();
        let d = table.create(&at(5)).unwrap();
        let n = table.create(&at(2)).unwrap();

        assert_eq!(
            z_order(&table),
            vec![(1, a.id), (2, n.id), (3, b.id), (4, c.id), (5, d.id)]
        );
        table.assert_consistent();
    }

    #[test]
    fn vacant_z_moves_nothing() {
        let mut table = ZOrderedWidgets::new();
        let first = table.create(&at(1)).unwrap();
        let third = table.create(&at(3)).unwrap();
        let second = table.create(&at(2)).unwrap();

        assert_eq!(
            z_order(&table),
            vec![(1, first.id), (2, second.id), (3, third.id)]
        );
    }

    #[test]
    fn update_into_occupied_slot_shifts() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&change_set()).unwrap();
        let b = table.create(&change_set()).unwrap();
        let c = table.create(&change_set()).unwrap();

        let moved = table
            .update(&c.id, &WidgetChangeSet::new().with_z(1))
            .unwrap();
        assert_eq!(moved.z, 1);
        assert_eq!(z_order(&table), vec![(1, c.id), (2, a.id), (3, b.id)]);
        table.assert_consistent();
    }

    #[test]
    fn update_into_vacant_slot_leaves_others() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&change_set()).unwrap();
        let b = table.create(&change_set()).unwrap();
        let c = table.create(&change_set()).unwrap();

        table
            .update(&c.id, &WidgetChangeSet::new().with_z(4))
            .unwrap();
        assert_eq!(z_order(&table), vec![(1, a.id), (2, b.id), (4, c.id)]);
    }

    #[test]
    fn update_to_same_z_keeps_position() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&change_set()).unwrap();
        let b = table.create(&change_set()).unwrap();

        table.update(&a.id, &at(1)).unwrap();
        assert_eq!(z_order(&table), vec![(1, a.id), (2, b.id)]);
    }

    #[test]
    fn update_refreshes_timestamp_even_without_changes() {
        let mut table = ZOrderedWidgets::new();
        let created = table.create(&change_set()).unwrap();
        let updated = table.update(&created.id, &WidgetChangeSet::new()).unwrap();
        assert!(updated.last_modification_date > created.last_modification_date);
        assert_eq!(updated.x, created.x);
    }

    #[test]
    fn update_unknown_widget_fails() {
        let mut table = ZOrderedWidgets::new();
        let id = Uuid::new_v4();
        match table.update(&id, &WidgetChangeSet::new()) {
            Err(WidgetsError::EntityNotFound(err_id)) => assert_eq!(err_id, id),
            other => panic!("Expected EntityNotFound, got {:?}", other),
        }
    }

    #[test]
    fn delete_frees_the_slot() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&at(1)).unwrap();
        let b = table.create(&at(2)).unwrap();
        table.delete(&a.id).unwrap();

        let n = table.create(&at(1)).unwrap();
        assert_eq!(z_order(&table), vec![(1, n.id), (2, b.id)]);
        assert!(matches!(
            table.delete(&a.id),
            Err(WidgetsError::EntityNotFound(_))
        ));
    }

    #[test]
    fn invalid_create_leaves_table_untouched() {
        let mut table = ZOrderedWidgets::new();
        table.create(&at(1)).unwrap();
        let mut incomplete = at(1);
        incomplete.width = None;

        assert!(matches!(
            table.create(&incomplete),
            Err(WidgetsError::InvalidChangeSet(_))
        ));
        assert_eq!(table.len(), 1);
        assert_eq!(table.page(10, 0).next().unwrap().z, 1);
    }

    #[test]
    fn overflowing_shift_is_rejected_atomically() {
        let mut table = ZOrderedWidgets::new();
        let a = table.create(&at(i32::MAX - 1)).unwrap();
        let b = table.create(&at(i32::MAX)).unwrap();

        assert!(matches!(
            table.create(&at(i32::MAX - 1)),
            Err(WidgetsError::InvalidArgument(_))
        ));
        assert!(matches!(
            table.create(&change_set()),
            Err(WidgetsError::InvalidArgument(_))
        ));
        assert_eq!(
            z_order(&table),
            vec![(i32::MAX - 1, a.id), (i32::MAX, b.id)]
        );
    }

    #[test]
    fn failed_move_restores_original_slot() {
        let mut table = ZOrderedWidgets::new();
        let low = table.create(&at(0)).unwrap();
        let high = table.create(&at(i32::MAX)).unwrap();

        assert!(table.update(&low.id, &at(i32::MAX)).is_err());
        assert_eq!(z_order(&table), vec![(0, low.id), (i32::MAX, high.id)]);
        assert_eq!(table.get(&low.id).unwrap().z, 0);
        table.assert_consistent();
    }

    #[test]
    fn clear_empties_everything() {
        let mut table = ZOrderedWidgets::new();
        table.create(&change_set()).unwrap();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.top_z().unwrap(), 1);
    }
}
