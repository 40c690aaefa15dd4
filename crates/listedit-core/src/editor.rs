//! The sequence editor: two co-indexed collections under structural mutation.
//!
//! # Overview
//!
//! [`ListEditor`] owns an ordered collection of [`ItemHandle`]s and an ordered
//! collection of [`InsertionPoint`]s, always exactly one more point than
//! items, with point `i` sitting immediately before item `i`. Every structural
//! operation (insert, delete, duplicate, move, reload) is an atomic
//! transaction: validate the indices first, splice both collections, renumber
//! the shifted tail, then fix move affordances at the touched positions. The
//! three invariants hold at every public-API boundary:
//!
//! - `insertion_points.len() == items.len() + 1`
//! - `items[i].index() == i` and `insertion_points[i].index() == i` for all `i`
//! - only the first item has "move up" disabled and only the last has
//!   "move down" disabled (both disabled for a sole item)
//!
//! Both collections are plain `Vec`s rather than a linked structure: every
//! operation needs O(1) random access by position, the two collections have
//! different cardinality so cannot merge into one array without a tag, and
//! renderer operations are keyed by the same positional index used for focus
//! and serialization ordering.

use crate::block::{ChildState, ChildValue, ListDefinition};
use crate::commands::CommandError;
use crate::insertion::InsertionPoint;
use crate::item::{ItemHandle, ItemId};
use crate::validation::ListValidationError;

/// Headless reorderable-list editor kernel.
///
/// `ListEditor` is the single writer of both collections: item and
/// insertion-point indices can only be mutated through its operations, and
/// index-validating operations fail fast with [`CommandError`] on contract
/// violations instead of clamping.
///
/// # Example
///
/// ```rust
/// use listedit_core::{ListDefinition, ListEditor, ValueBlockDef};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let definition = ListDefinition::new("tags", Arc::new(ValueBlockDef::new("tag")));
/// let mut editor = ListEditor::new(definition, &[json!("a"), json!("b")]);
///
/// editor.insert(json!("c"), 1).unwrap();
/// assert_eq!(editor.get_state(), vec![json!("a"), json!("c"), json!("b")]);
/// assert_eq!(editor.insertion_points().len(), 4);
/// ```
pub struct ListEditor {
    definition: ListDefinition,
    items: Vec<ItemHandle>,
    insertion_points: Vec<InsertionPoint>,
    /// Monotonic id counter. Never reused and never reset, including across
    /// [`set_state`](Self::set_state) reloads, so ids stay unique for the
    /// editor's whole lifetime.
    next_item_id: u64,
}

impl ListEditor {
    /// Create an editor seeded with `initial` child states.
    pub fn new(definition: ListDefinition, initial: &[ChildState]) -> Self {
        let mut editor = Self {
            definition,
            items: Vec::new(),
            insertion_points: vec![InsertionPoint::new(0)],
            next_item_id: 0,
        };
        editor.set_state(initial);
        editor
    }

    /// Create an empty editor (no items, one insertion point).
    pub fn empty(definition: ListDefinition) -> Self {
        Self::new(definition, &[])
    }

    /// The child-type descriptor this editor was constructed with.
    pub fn definition(&self) -> &ListDefinition {
        &self.definition
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item handles in index order.
    pub fn items(&self) -> &[ItemHandle] {
        &self.items
    }

    /// All insertion points in index order (always one more than items).
    pub fn insertion_points(&self) -> &[InsertionPoint] {
        &self.insertion_points
    }

    /// The item at `index`, if in bounds.
    pub fn item(&self, index: usize) -> Option<&ItemHandle> {
        self.items.get(index)
    }

    /// Mutable access to the item at `index`, for pushing child edits into
    /// the wrapped block. Structural state (index, affordances) stays
    /// crate-private, so the two-collection invariants cannot be broken from
    /// here.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut ItemHandle> {
        self.items.get_mut(index)
    }

    /// Look an item up by its stable identity.
    pub fn item_by_id(&self, id: ItemId) -> Option<&ItemHandle> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Position of the focused item, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.is_focused())
    }

    /// Replace the whole list: reset to empty, then append each value in order.
    ///
    /// Total replacement, no error. Every item receives a freshly minted id;
    /// identity never survives a reload.
    pub fn set_state(&mut self, values: &[ChildState]) {
        self.items.clear();
        self.insertion_points.clear();
        self.insertion_points.push(InsertionPoint::new(0));

        for value in values {
            let index = self.items.len();
            self.splice_in(value.clone(), index);
        }
    }

    /// Insert a new item with the given initial state at `index` (`0..=n`).
    ///
    /// The new item occupies `index` and a new insertion point is created
    /// immediately after it; the point that previously sat at `index` stays
    /// there, immediately before the new item. Returns the new handle so the
    /// caller can read its id or focus it.
    pub fn insert(&mut self, state: ChildState, index: usize) -> Result<&ItemHandle, CommandError> {
        if index > self.items.len() {
            return Err(CommandError::InvalidInsertIndex {
                index,
                len: self.items.len(),
            });
        }

        self.splice_in(state, index);
        Ok(&self.items[index])
    }

    /// Insert a default child at `index` (`0..=n`) and focus it.
    ///
    /// This is the operation an insertion point's
    /// [`insert_request`](InsertionPoint::insert_request) resolves to; the
    /// default state comes from the list definition.
    pub fn request_insert_at(&mut self, index: usize) -> Result<&ItemHandle, CommandError> {
        let state = self.definition.default_child_state();
        self.insert(state, index)?;
        self.focus_item(index)?;
        Ok(&self.items[index])
    }

    /// Duplicate the item at `index` (`0..n`), placing the copy immediately
    /// after it and focusing the copy.
    ///
    /// The copy receives a new id and an independent deep copy of the state;
    /// mutating one never affects the other.
    pub fn duplicate(&mut self, index: usize) -> Result<&ItemHandle, CommandError> {
        let state = self
            .item(index)
            .ok_or(CommandError::InvalidItemIndex {
                index,
                len: self.items.len(),
            })?
            .state();

        self.splice_in(state, index + 1);
        self.focus_item(index + 1)?;
        Ok(&self.items[index + 1])
    }

    /// Delete the item at `index` (`0..n`) and the insertion point preceding
    /// it.
    ///
    /// The removed handle is returned marked deleted so a renderer can drive
    /// (possibly animated) removal of its row; it is never reinserted.
    pub fn delete(&mut self, index: usize) -> Result<ItemHandle, CommandError> {
        if index >= self.items.len() {
            return Err(CommandError::InvalidItemIndex {
                index,
                len: self.items.len(),
            });
        }

        let mut removed = self.items.remove(index);
        removed.mark_deleted();
        self.insertion_points.remove(index);
        self.renumber_from(index);

        // If the removed item was first or last, the new occupant of that
        // boundary position loses the corresponding affordance. Interior
        // deletions leave every remaining status unchanged.
        if !self.items.is_empty() {
            if index < self.items.len() {
                self.fix_affordances_at(index);
            }
            if index > 0 {
                self.fix_affordances_at(index - 1);
            }
        }

        Ok(removed)
    }

    /// Relocate the item (and its insertion point) at `from` to sit at `to`
    /// (both `0..n`). No-op if equal.
    ///
    /// Every entry in the closed interval between the two positions shifts by
    /// one in the opposite direction and is renumbered.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), CommandError> {
        let len = self.items.len();
        if from >= len {
            return Err(CommandError::InvalidItemIndex { index: from, len });
        }
        if to >= len {
            return Err(CommandError::InvalidItemIndex { index: to, len });
        }
        if from == to {
            return Ok(());
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        let point = self.insertion_points.remove(from);
        self.insertion_points.insert(to, point);

        let (lo, hi) = (from.min(to), from.max(to));
        self.renumber_from(lo);

        // Only the extremal positions 0 and n-1 carry affordance state, so
        // recomputation stays at the interval's ends: the new occupants of
        // `lo` and `hi`, plus the one-slot-inside neighbors where the item
        // that vacated a boundary position landed.
        self.fix_affordances_at(lo);
        self.fix_affordances_at(hi);
        if lo + 1 < hi {
            self.fix_affordances_at(lo + 1);
            self.fix_affordances_at(hi - 1);
        }

        Ok(())
    }

    /// Every item's serializable state, in index order.
    pub fn get_state(&self) -> Vec<ChildState> {
        self.items.iter().map(ItemHandle::state).collect()
    }

    /// Every item's externally-facing value, in index order.
    pub fn get_value(&self) -> Vec<ChildValue> {
        self.items.iter().map(ItemHandle::value).collect()
    }

    /// Route validator output to items. Returns whether anything was applied.
    ///
    /// A slice whose length is not exactly 1 is ignored (`Ok(false)`): the
    /// list-level validator reports nothing or exactly one aggregate error.
    /// Application is atomic: every index is bounds-checked before any
    /// payload is routed, and an out-of-range index fails fast with
    /// [`CommandError::UnknownErrorIndex`] routing nothing.
    pub fn set_error(&mut self, errors: &[ListValidationError]) -> Result<bool, CommandError> {
        let [error] = errors else {
            return Ok(false);
        };

        let len = self.items.len();
        if let Some(index) = error.indices().find(|&index| index >= len) {
            return Err(CommandError::UnknownErrorIndex { index, len });
        }

        for (&index, payload) in error.iter() {
            self.items[index].set_error(Some(payload.clone()));
        }
        Ok(true)
    }

    /// Remove the error payload from every item. Returns how many were
    /// cleared.
    pub fn clear_errors(&mut self) -> usize {
        self.items
            .iter_mut()
            .filter_map(|item| item.take_error())
            .count()
    }

    /// Focus the first item; no-op on an empty list.
    pub fn focus(&mut self) {
        if !self.items.is_empty() {
            self.apply_focus(0);
        }
    }

    /// Move focus to the item at `index` (`0..n`), clearing it elsewhere.
    pub fn focus_item(&mut self, index: usize) -> Result<(), CommandError> {
        if index >= self.items.len() {
            return Err(CommandError::InvalidItemIndex {
                index,
                len: self.items.len(),
            });
        }

        self.apply_focus(index);
        Ok(())
    }

    /// Set the focus flag on the item at `index`, clearing it elsewhere.
    /// `index` must already be validated.
    fn apply_focus(&mut self, index: usize) {
        for (i, item) in self.items.iter_mut().enumerate() {
            item.set_focused(i == index);
        }
    }

    /// Splice a new item and its trailing insertion point in at `index`,
    /// renumber the shifted tail, and fix affordances around the seam.
    /// `index` must already be validated.
    fn splice_in(&mut self, state: ChildState, index: usize) {
        let id = self.mint_id();
        let block = self.definition.instantiate(state);
        self.items.insert(index, ItemHandle::new(id, index, block));
        self.insertion_points
            .insert(index + 1, InsertionPoint::new(index + 1));
        self.renumber_from(index);

        // The new item needs fresh affordances; if it became first or last,
        // its neighbor just lost a boundary position.
        self.fix_affordances_at(index);
        if index > 0 {
            self.fix_affordances_at(index - 1);
        }
        if index + 1 < self.items.len() {
            self.fix_affordances_at(index + 1);
        }
    }

    fn mint_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    /// Reassign positional indices from `from` to the end of both collections.
    fn renumber_from(&mut self, from: usize) {
        for i in from..self.items.len() {
            self.items[i].set_index(i);
        }
        for i in from..self.insertion_points.len() {
            self.insertion_points[i].set_index(i);
        }
    }

    /// Recompute the move affordances of the item at `index` from its
    /// position. `index` must be in bounds.
    fn fix_affordances_at(&mut self, index: usize) {
        let last = self.items.len() - 1;
        let item = &mut self.items[index];
        item.set_can_move_up(index > 0);
        item.set_can_move_down(index < last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ValueBlockDef;
    use serde_json::json;
    use std::sync::Arc;

    fn editor(states: &[serde_json::Value]) -> ListEditor {
        let definition = ListDefinition::new(
            "tags",
            Arc::new(ValueBlockDef::new("tag").with_default_state(json!(""))),
        );
        ListEditor::new(definition, states)
    }

    #[test]
    fn test_empty_editor_keeps_one_insertion_point() {
        let editor = editor(&[]);
        assert_eq!(editor.len(), 0);
        assert!(editor.is_empty());
        assert_eq!(editor.insertion_points().len(), 1);
        assert_eq!(editor.insertion_points()[0].index(), 0);
    }

    #[test]
    fn test_insertion_point_sits_after_new_item() {
        let mut editor = editor(&[json!("a"), json!("b")]);
        editor.insert(json!("x"), 1).unwrap();

        // Point 1 stayed put (now before the new item); a new point 2 follows it.
        assert_eq!(editor.insertion_points().len(), 4);
        for (i, point) in editor.insertion_points().iter().enumerate() {
            assert_eq!(point.index(), i);
        }
        assert_eq!(editor.get_state(), vec![json!("a"), json!("x"), json!("b")]);
    }

    #[test]
    fn test_ids_survive_moves_but_not_reloads() {
        let mut editor = editor(&[json!("a"), json!("b"), json!("c")]);
        let id_a = editor.item(0).unwrap().id();

        editor.move_item(0, 2).unwrap();
        assert_eq!(editor.item(2).unwrap().id(), id_a);
        assert_eq!(editor.item_by_id(id_a).unwrap().index(), 2);

        let before: Vec<_> = editor.items().iter().map(|i| i.id()).collect();
        editor.set_state(&[json!("a"), json!("b"), json!("c")]);
        let after: Vec<_> = editor.items().iter().map(|i| i.id()).collect();
        assert!(before.iter().all(|id| !after.contains(id)));
    }

    #[test]
    fn test_delete_returns_marked_handle() {
        let mut editor = editor(&[json!("a"), json!("b")]);
        let removed = editor.delete(0).unwrap();

        assert!(removed.is_deleted());
        assert_eq!(removed.state(), json!("a"));
        assert_eq!(editor.get_state(), vec![json!("b")]);
        assert_eq!(editor.insertion_points().len(), 2);
    }

    #[test]
    fn test_index_contract_violations_fail_fast() {
        let mut editor = editor(&[json!("a")]);

        assert_eq!(
            editor.insert(json!("x"), 2).unwrap_err(),
            CommandError::InvalidInsertIndex { index: 2, len: 1 }
        );
        assert_eq!(
            editor.delete(1).unwrap_err(),
            CommandError::InvalidItemIndex { index: 1, len: 1 }
        );
        assert_eq!(
            editor.duplicate(1).unwrap_err(),
            CommandError::InvalidItemIndex { index: 1, len: 1 }
        );
        assert_eq!(
            editor.move_item(0, 1),
            Err(CommandError::InvalidItemIndex { index: 1, len: 1 })
        );
        assert_eq!(
            editor.focus_item(1),
            Err(CommandError::InvalidItemIndex { index: 1, len: 1 })
        );

        // Nothing was applied.
        assert_eq!(editor.get_state(), vec![json!("a")]);
    }

    #[test]
    fn test_focus_moves_exclusively() {
        let mut editor = editor(&[json!("a"), json!("b"), json!("c")]);
        assert_eq!(editor.focused_index(), None);

        editor.focus();
        assert_eq!(editor.focused_index(), Some(0));

        editor.focus_item(2).unwrap();
        assert_eq!(editor.focused_index(), Some(2));
        assert!(!editor.item(0).unwrap().is_focused());
    }

    #[test]
    fn test_focus_on_empty_list_is_noop() {
        let mut editor = editor(&[]);
        editor.focus();
        assert_eq!(editor.focused_index(), None);
    }

    #[test]
    fn test_clear_errors_counts_only_items_that_carried_one() {
        let mut editor = editor(&[json!("a"), json!("b"), json!("c")]);
        let error = ListValidationError::new([(0, json!("E")), (2, json!("E"))]);
        editor.set_error(std::slice::from_ref(&error)).unwrap();

        assert_eq!(editor.clear_errors(), 2);
        assert!(editor.items().iter().all(|item| item.error().is_none()));
        assert_eq!(editor.clear_errors(), 0);
    }
}
