//! List State Interface
//!
//! Provides a complete state query interface for the list editor, used for
//! frontend rendering and state synchronization.
//!
//! # Overview
//!
//! The state interface layer exposes the kernel's state to the frontend in a
//! structured, immutable manner. It supports:
//!
//! - **State Queries**: Retrieve list, item, and validation state snapshots
//! - **Version Tracking**: Track state changes through version numbers
//! - **Change Notifications**: Subscribe to state change events
//! - **Modification Tracking**: Track whether the list has been edited
//!
//! # Architecture Notes
//!
//! The state manager adopts a "unidirectional data flow" pattern:
//!
//! 1. Frontend dispatches intents via [`execute()`](ListStateManager::execute)
//!    (commands minted by item handles and insertion points, or built
//!    directly)
//! 2. The manager applies them to the owned [`ListEditor`], increments the
//!    version number on real changes, and triggers all subscribed callbacks
//! 3. Frontend retrieves the latest state via the `get_*_state()` methods or
//!    a [`HeadlessList`] snapshot
//!
//! Commands that succeed without changing anything (an equal-index move, a
//! malformed error report, clearing errors when none are set) do not bump the
//! version and report [`CommandResult::Ignored`].
//!
//! # Example
//!
//! ```rust
//! use listedit_core::{Command, EditCommand, ListDefinition, ListStateManager, ValueBlockDef};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let definition = ListDefinition::new("tags", Arc::new(ValueBlockDef::new("tag")));
//! let mut manager = ListStateManager::empty(definition);
//!
//! // Subscribe to state changes
//! manager.subscribe(|change| {
//!     println!("Version {} -> {}: {:?}",
//!         change.old_version, change.new_version, change.change_type);
//! });
//!
//! // Edit the list (automatically triggers state notifications)
//! manager.execute(Command::Edit(EditCommand::Insert {
//!     index: 0,
//!     state: json!("first"),
//! })).unwrap();
//!
//! let state = manager.get_list_state();
//! assert!(state.is_modified);
//! assert_eq!(state.version, 1);
//! ```

use std::ops::Range;

use crate::block::{ChildState, ListDefinition};
use crate::commands::{
    Command, CommandError, CommandResult, EditCommand, FocusCommand, QueryCommand, ValidateCommand,
};
use crate::editor::ListEditor;
use crate::item::{ItemHandle, ItemId};
use crate::snapshot::HeadlessList;
use crate::validation::ListValidationError;

/// List state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// Number of items
    pub len: usize,
    /// State version number (incremented after each real change)
    pub version: u64,
    /// Whether the list has been structurally edited since the last
    /// [`mark_clean`](ListStateManager::mark_clean)
    pub is_modified: bool,
    /// Position of the focused item, if any
    pub focused_index: Option<usize>,
}

/// Per-item state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemState {
    /// Stable identity
    pub id: ItemId,
    /// Current position
    pub index: usize,
    /// Whether the "move up" action is permitted
    pub can_move_up: bool,
    /// Whether the "move down" action is permitted
    pub can_move_down: bool,
    /// Whether this item holds focus
    pub focused: bool,
    /// Whether this item carries an error payload
    pub has_error: bool,
}

impl ItemState {
    fn from_item(item: &ItemHandle) -> Self {
        Self {
            id: item.id(),
            index: item.index(),
            can_move_up: item.can_move_up(),
            can_move_down: item.can_move_down(),
            focused: item.is_focused(),
            has_error: item.error().is_some(),
        }
    }
}

/// Validation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    /// Number of items currently carrying an error payload
    pub error_count: usize,
}

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChangeType {
    /// An item was inserted
    Inserted,
    /// An item was removed
    Removed,
    /// An item was relocated
    Moved,
    /// The whole list was replaced
    Reloaded,
    /// Error payloads were applied or cleared
    ErrorsChanged,
    /// Focus moved to a different item
    FocusChanged,
}

impl ListChangeType {
    /// Whether this change edits the list structurally (and so marks the
    /// list modified).
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            ListChangeType::Inserted
                | ListChangeType::Removed
                | ListChangeType::Moved
                | ListChangeType::Reloaded
        )
    }
}

/// State change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChange {
    /// Change type
    pub change_type: ListChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Range of item indices that were renumbered, if any
    pub affected: Option<Range<usize>>,
    /// The item the change is about (the inserted or removed item)
    pub item: Option<ItemId>,
    /// Hint that a renderer may animate this change (row appearing or
    /// disappearing)
    pub animate: bool,
}

impl ListChange {
    /// Create a new state change record without an affected range.
    pub fn new(change_type: ListChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            affected: None,
            item: None,
            animate: false,
        }
    }

    /// Attach the renumbered index range to this change record.
    pub fn with_affected(mut self, affected: Range<usize>) -> Self {
        self.affected = Some(affected);
        self
    }

    /// Attach the subject item's identity to this change record.
    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    /// Mark this change as one a renderer may animate.
    pub fn animated(mut self) -> Self {
        self.animate = true;
        self
    }
}

/// State change callback function type
pub type ListChangeCallback = Box<dyn FnMut(&ListChange) + Send>;

/// List state manager
///
/// `ListStateManager` wraps the [`ListEditor`] kernel and provides the
/// following features:
///
/// - **Command Dispatch**: The single handler for every minted intent,
///   preserving single-writer discipline over both collections
/// - **Version Tracking**: Automatically increment the version number after
///   each real change, supporting incremental updates
/// - **Change Notifications**: Notify subscribers of state changes via
///   callback mechanism
/// - **Modification Tracking**: Track whether the list has been edited (for
///   save prompts)
pub struct ListStateManager {
    /// The owned kernel
    editor: ListEditor,
    /// State version number
    state_version: u64,
    /// Whether the list has been structurally edited
    is_modified: bool,
    /// State change callback list
    callbacks: Vec<ListChangeCallback>,
}

impl ListStateManager {
    /// Create a manager seeded with `initial` child states and, optionally,
    /// a validation error to apply immediately.
    ///
    /// Fails if the initial error references an index outside the initial
    /// list, the same contract as
    /// [`ValidateCommand::SetErrors`](crate::ValidateCommand::SetErrors).
    pub fn new(
        definition: ListDefinition,
        initial: &[ChildState],
        initial_error: Option<ListValidationError>,
    ) -> Result<Self, CommandError> {
        let mut editor = ListEditor::new(definition, initial);
        if let Some(error) = initial_error {
            editor.set_error(std::slice::from_ref(&error))?;
        }

        Ok(Self {
            editor,
            state_version: 0,
            is_modified: false,
            callbacks: Vec::new(),
        })
    }

    /// Create an empty manager.
    pub fn empty(definition: ListDefinition) -> Self {
        Self {
            editor: ListEditor::empty(definition),
            state_version: 0,
            is_modified: false,
            callbacks: Vec::new(),
        }
    }

    /// Get a reference to the list editor kernel.
    pub fn editor(&self) -> &ListEditor {
        &self.editor
    }

    /// Get a mutable reference to the list editor kernel.
    ///
    /// Advanced usage: changes made directly on the kernel bypass version
    /// tracking; call [`mark_modified`](Self::mark_modified) afterwards.
    pub fn editor_mut(&mut self) -> &mut ListEditor {
        &mut self.editor
    }

    /// Execute a command and automatically trigger state change notifications.
    ///
    /// - Structural edits and error/focus changes increment the version and
    ///   notify subscribers.
    /// - Pure query commands and no-ops never increment the version.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        match command {
            Command::Edit(edit) => self.execute_edit(edit),
            Command::Focus(focus) => self.execute_focus(focus),
            Command::Validate(validate) => self.execute_validate(validate),
            Command::Query(query) => Ok(self.execute_query(query)),
        }
    }

    /// Batch execute commands, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::new();

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult, CommandError> {
        match command {
            EditCommand::Insert { index, state } => {
                let id = self.editor.insert(state, index)?.id();
                self.record_insert(index, id)
            }
            EditCommand::InsertDefault { index } => {
                let id = self.editor.request_insert_at(index)?.id();
                self.record_insert(index, id)
            }
            EditCommand::Duplicate { index } => {
                let id = self.editor.duplicate(index)?.id();
                self.record_insert(index + 1, id)
            }
            EditCommand::Delete { index } => {
                let removed = self.editor.delete(index)?;
                let affected = index..self.editor.len();
                self.mark_modified_internal(
                    ListChangeType::Removed,
                    Some(affected),
                    Some(removed.id()),
                    true,
                );
                Ok(CommandResult::Removed { id: removed.id() })
            }
            EditCommand::MoveUp { index } => {
                let len = self.editor.len();
                if index >= len {
                    return Err(CommandError::InvalidItemIndex { index, len });
                }
                if index == 0 {
                    // First item: the affordance is disabled, not a fault.
                    return Ok(CommandResult::Ignored);
                }
                self.apply_move(index, index - 1)
            }
            EditCommand::MoveDown { index } => {
                let len = self.editor.len();
                if index >= len {
                    return Err(CommandError::InvalidItemIndex { index, len });
                }
                if index + 1 == len {
                    return Ok(CommandResult::Ignored);
                }
                self.apply_move(index, index + 1)
            }
            EditCommand::Move { from, to } => {
                if from == to {
                    // Bounds are still enforced before the no-op is detected.
                    self.editor.move_item(from, to)?;
                    return Ok(CommandResult::Ignored);
                }
                self.apply_move(from, to)
            }
            EditCommand::SetState { values } => {
                self.editor.set_state(&values);
                let affected = 0..self.editor.len();
                self.mark_modified_internal(ListChangeType::Reloaded, Some(affected), None, false);
                Ok(CommandResult::Success)
            }
        }
    }

    fn record_insert(&mut self, index: usize, id: ItemId) -> Result<CommandResult, CommandError> {
        let affected = index..self.editor.len();
        self.mark_modified_internal(ListChangeType::Inserted, Some(affected), Some(id), true);
        Ok(CommandResult::Inserted { index, id })
    }

    fn apply_move(&mut self, from: usize, to: usize) -> Result<CommandResult, CommandError> {
        self.editor.move_item(from, to)?;
        let (lo, hi) = (from.min(to), from.max(to));
        self.mark_modified_internal(ListChangeType::Moved, Some(lo..hi + 1), None, false);
        Ok(CommandResult::Success)
    }

    fn execute_focus(&mut self, command: FocusCommand) -> Result<CommandResult, CommandError> {
        let before = self.editor.focused_index();
        match command {
            FocusCommand::FocusFirst => {
                if self.editor.is_empty() {
                    return Ok(CommandResult::Ignored);
                }
                self.editor.focus();
            }
            FocusCommand::FocusItem { index } => {
                self.editor.focus_item(index)?;
            }
        }

        if self.editor.focused_index() == before {
            return Ok(CommandResult::Ignored);
        }
        self.mark_modified_internal(ListChangeType::FocusChanged, None, None, false);
        Ok(CommandResult::Success)
    }

    fn execute_validate(&mut self, command: ValidateCommand) -> Result<CommandResult, CommandError> {
        match command {
            ValidateCommand::SetErrors { errors } => {
                if !self.editor.set_error(&errors)? {
                    return Ok(CommandResult::Ignored);
                }
            }
            ValidateCommand::ClearErrors => {
                if self.editor.clear_errors() == 0 {
                    return Ok(CommandResult::Ignored);
                }
            }
        }

        self.mark_modified_internal(ListChangeType::ErrorsChanged, None, None, false);
        Ok(CommandResult::Success)
    }

    fn execute_query(&self, query: QueryCommand) -> CommandResult {
        match query {
            QueryCommand::GetState => CommandResult::States(self.editor.get_state()),
            QueryCommand::GetValue => CommandResult::Values(self.editor.get_value()),
            QueryCommand::GetSnapshot => CommandResult::Snapshot(self.get_snapshot()),
        }
    }

    /// Get current version number.
    pub fn version(&self) -> u64 {
        self.state_version
    }

    /// Check if state has changed since a version.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.state_version > version
    }

    /// Whether the list has been structurally edited since the last
    /// [`mark_clean`](Self::mark_clean).
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Mark the list as unmodified (e.g. after persisting
    /// [`get_state`](ListEditor::get_state) output).
    pub fn mark_clean(&mut self) {
        self.is_modified = false;
    }

    /// Get list state.
    pub fn get_list_state(&self) -> ListState {
        ListState {
            len: self.editor.len(),
            version: self.state_version,
            is_modified: self.is_modified,
            focused_index: self.editor.focused_index(),
        }
    }

    /// Get the state of the item at `index`, if in bounds.
    pub fn get_item_state(&self, index: usize) -> Option<ItemState> {
        self.editor.item(index).map(ItemState::from_item)
    }

    /// Get every item's state in index order.
    pub fn get_item_states(&self) -> Vec<ItemState> {
        self.editor.items().iter().map(ItemState::from_item).collect()
    }

    /// Get validation state.
    pub fn get_validation_state(&self) -> ValidationState {
        ValidationState {
            error_count: self
                .editor
                .items()
                .iter()
                .filter(|item| item.error().is_some())
                .count(),
        }
    }

    /// Get a renderer-facing snapshot of the whole list.
    pub fn get_snapshot(&self) -> HeadlessList {
        HeadlessList::capture(&self.editor, self.state_version)
    }

    /// Subscribe to state change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ListChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Mark the state as changed and increment the version number.
    ///
    /// Only needed after direct kernel mutation via
    /// [`editor_mut`](Self::editor_mut); [`execute`](Self::execute) records
    /// changes automatically.
    pub fn mark_modified(&mut self, change_type: ListChangeType) {
        self.mark_modified_internal(change_type, None, None, false);
    }

    fn mark_modified_internal(
        &mut self,
        change_type: ListChangeType,
        affected: Option<Range<usize>>,
        item: Option<ItemId>,
        animate: bool,
    ) {
        let old_version = self.state_version;
        self.state_version += 1;

        if change_type.is_structural() {
            self.is_modified = true;
        }

        let mut change = ListChange::new(change_type, old_version, self.state_version);
        if let Some(affected) = affected {
            change = change.with_affected(affected);
        }
        if let Some(item) = item {
            change = change.with_item(item);
        }
        if animate {
            change = change.animated();
        }
        self.notify_callbacks(&change);
    }

    fn notify_callbacks(&mut self, change: &ListChange) {
        for callback in &mut self.callbacks {
            callback(change);
        }
    }
}
