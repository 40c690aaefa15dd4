//! Command Interface Layer
//!
//! Provides a unified command interface for convenient frontend integration.
//!
//! # Overview
//!
//! Every user-triggered intent (a "+" button on an insertion point, the
//! delete/duplicate/move buttons on a row) is expressed as a [`Command`] and
//! dispatched to a single handler
//! ([`ListStateManager::execute`](crate::ListStateManager::execute)), which
//! keeps one writer in charge of both the item and insertion-point
//! collections. It supports the following types of operations:
//!
//! - **Structural Editing**: Insert, delete, duplicate, move, and reload items
//! - **Focus Operations**: Focus the first item or a specific item
//! - **Validation**: Apply or clear externally produced error payloads
//! - **Queries**: Read states, values, and renderer snapshots
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
//! // Insert an item at the front
//! manager.execute(Command::Edit(EditCommand::Insert {
//!     index: 0,
//!     state: json!("first"),
//! })).unwrap();
//!
//! // Batch execute commands
//! let commands = vec![
//!     Command::Edit(EditCommand::InsertDefault { index: 1 }),
//!     Command::Edit(EditCommand::Duplicate { index: 0 }),
//! ];
//! manager.execute_batch(commands).unwrap();
//! ```

use thiserror::Error;

use crate::block::{ChildState, ChildValue};
use crate::item::ItemId;
use crate::snapshot::HeadlessList;
use crate::validation::ListValidationError;

/// Structural editing commands
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Insert a new item with an explicit initial state
    Insert {
        /// Position the new item occupies (`0..=n`).
        index: usize,
        /// Initial child state of the new item.
        state: ChildState,
    },
    /// Insert a new item with the list definition's default state, then focus it
    ///
    /// This is the command an insertion point's
    /// [`insert_request`](crate::InsertionPoint::insert_request) mints.
    InsertDefault {
        /// Position the new item occupies (`0..=n`).
        index: usize,
    },
    /// Duplicate an existing item, placing the copy immediately after it
    Duplicate {
        /// Position of the item to duplicate (`0..n`).
        index: usize,
    },
    /// Delete an item and the insertion point preceding it
    Delete {
        /// Position of the item to delete (`0..n`).
        index: usize,
    },
    /// Move an item one position towards the front
    MoveUp {
        /// Position of the item to move (`0..n`).
        index: usize,
    },
    /// Move an item one position towards the back
    MoveDown {
        /// Position of the item to move (`0..n`).
        index: usize,
    },
    /// Move an item to an arbitrary position
    Move {
        /// Current position of the item (`0..n`).
        from: usize,
        /// Position the item ends up at (`0..n`).
        to: usize,
    },
    /// Replace the whole list, re-minting identities for every item
    SetState {
        /// Child states in index order.
        values: Vec<ChildState>,
    },
}

/// Focus commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusCommand {
    /// Focus the first item (no-op on an empty list)
    FocusFirst,
    /// Focus a specific item
    FocusItem {
        /// Position of the item to focus (`0..n`).
        index: usize,
    },
}

/// Validation commands
#[derive(Debug, Clone, PartialEq)]
pub enum ValidateCommand {
    /// Route validator output to items
    ///
    /// Anything other than exactly one aggregate error is ignored
    /// ([`CommandResult::Ignored`]).
    SetErrors {
        /// Validator output for the whole list.
        errors: Vec<ListValidationError>,
    },
    /// Remove the error payload from every item
    ClearErrors,
}

/// Read-only query commands (never bump the state version)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCommand {
    /// Get every item's serializable state in index order
    GetState,
    /// Get every item's externally-facing value in index order
    GetValue,
    /// Get a renderer-facing snapshot of the whole list
    GetSnapshot,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Structural editing commands
    Edit(EditCommand),
    /// Focus commands
    Focus(FocusCommand),
    /// Validation commands
    Validate(ValidateCommand),
    /// Query commands
    Query(QueryCommand),
}

/// Command execution result
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Success, no return value
    Success,
    /// The command was valid but not applicable, and no state changed
    ///
    /// Covers the non-error outcomes: a malformed error report (length ≠ 1),
    /// an equal-index move, a move against a disabled affordance, focusing an
    /// empty list, and clearing errors when none were set.
    Ignored,
    /// An item was inserted
    Inserted {
        /// Position the new item occupies.
        index: usize,
        /// Identity minted for the new item.
        id: ItemId,
    },
    /// An item was removed
    Removed {
        /// Identity of the removed item.
        id: ItemId,
    },
    /// Serializable states in index order
    States(Vec<ChildState>),
    /// Externally-facing values in index order
    Values(Vec<ChildValue>),
    /// Renderer-facing snapshot
    Snapshot(HeadlessList),
}

/// Command error type
///
/// Every variant is a programmer-contract violation at the boundary, not a
/// recoverable runtime fault: the kernel fails fast instead of clamping so
/// caller bugs surface early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// An item index outside `0..n`
    #[error("invalid item index {index} for a list of {len} item(s)")]
    InvalidItemIndex {
        /// The offending index.
        index: usize,
        /// Item count at the time of the call.
        len: usize,
    },
    /// An insertion index outside `0..=n`
    #[error("invalid insertion index {index} for a list of {len} item(s)")]
    InvalidInsertIndex {
        /// The offending index.
        index: usize,
        /// Item count at the time of the call.
        len: usize,
    },
    /// A validation error referenced an index with no corresponding item
    ///
    /// Indicates the list was mutated after validation ran. Nothing is
    /// applied: the whole mapping is bounds-checked before any payload is
    /// routed.
    #[error("validation error references index {index} outside a list of {len} item(s)")]
    UnknownErrorIndex {
        /// The offending index.
        index: usize,
        /// Item count at the time of the call.
        len: usize,
    },
}
