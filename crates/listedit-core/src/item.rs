//! Item handles: the editor-facing wrapper around one list element.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::{ChildState, ChildValue, EditableBlock};
use crate::commands::{Command, EditCommand};
use crate::validation::ErrorPayload;

/// Stable, session-unique identity of one item.
///
/// Minted from a monotonically increasing counter when the item is created and
/// never reused, so hosts can key rows (form field names, render nodes) by id
/// and the keys survive any number of reorderings. Identity is not preserved
/// across a full [`ListEditor::set_state`](crate::ListEditor::set_state)
/// reload; a reload re-mints ids for every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// One list element: the wrapped child plus its presentation state.
///
/// The handle carries everything position-dependent (index, move affordances)
/// and everything renderer-facing (focus, deletion mark, error payload); the
/// child's own editing state lives behind the [`EditableBlock`] boundary.
/// Every structural setter is crate-private; the owning
/// [`ListEditor`](crate::ListEditor) is the single writer, so a handle can
/// never carry an index or affordance inconsistent with its position.
pub struct ItemHandle {
    id: ItemId,
    index: usize,
    can_move_up: bool,
    can_move_down: bool,
    focused: bool,
    deleted: bool,
    error: Option<ErrorPayload>,
    block: Box<dyn EditableBlock>,
}

impl ItemHandle {
    pub(crate) fn new(id: ItemId, index: usize, block: Box<dyn EditableBlock>) -> Self {
        Self {
            id,
            index,
            can_move_up: false,
            can_move_down: false,
            focused: false,
            deleted: false,
            error: None,
            block,
        }
    }

    /// Stable identity of this item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Current position in the list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Whether the "move up" action is currently permitted.
    pub fn can_move_up(&self) -> bool {
        self.can_move_up
    }

    /// Whether the "move down" action is currently permitted.
    pub fn can_move_down(&self) -> bool {
        self.can_move_down
    }

    pub(crate) fn set_can_move_up(&mut self, enabled: bool) {
        self.can_move_up = enabled;
    }

    pub(crate) fn set_can_move_down(&mut self, enabled: bool) {
        self.can_move_down = enabled;
    }

    /// The child's serializable state.
    pub fn state(&self) -> ChildState {
        self.block.state()
    }

    /// Replace the child's state wholesale.
    pub fn set_state(&mut self, state: ChildState) {
        self.block.set_state(state);
    }

    /// The child's externally-facing value.
    pub fn value(&self) -> ChildValue {
        self.block.value()
    }

    /// Whether this handle has been removed from the list.
    ///
    /// A deleted handle is handed back to the caller by value; renderers use
    /// the mark to drive (possibly animated) removal of the visual row.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Current error payload, if any.
    pub fn error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref()
    }

    pub(crate) fn set_error(&mut self, error: Option<ErrorPayload>) {
        self.error = error;
        self.block.set_error(self.error.as_ref());
    }

    pub(crate) fn take_error(&mut self) -> Option<ErrorPayload> {
        let error = self.error.take();
        if error.is_some() {
            self.block.set_error(None);
        }
        error
    }

    /// Whether this item currently holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.block.focus();
        }
        self.focused = focused;
    }

    /// Mint the command a host dispatches when the user deletes this item.
    pub fn delete_request(&self) -> Command {
        Command::Edit(EditCommand::Delete { index: self.index })
    }

    /// Mint the command a host dispatches when the user duplicates this item.
    pub fn duplicate_request(&self) -> Command {
        Command::Edit(EditCommand::Duplicate { index: self.index })
    }

    /// Mint the "move up" command, or `None` while the affordance is disabled.
    pub fn move_up_request(&self) -> Option<Command> {
        self.can_move_up
            .then(|| Command::Edit(EditCommand::MoveUp { index: self.index }))
    }

    /// Mint the "move down" command, or `None` while the affordance is disabled.
    pub fn move_down_request(&self) -> Option<Command> {
        self.can_move_down
            .then(|| Command::Edit(EditCommand::MoveDown { index: self.index }))
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("can_move_up", &self.can_move_up)
            .field("can_move_down", &self.can_move_down)
            .field("focused", &self.focused)
            .field("deleted", &self.deleted)
            .field("error", &self.error)
            .field("state", &self.block.state())
            .finish()
    }
}
