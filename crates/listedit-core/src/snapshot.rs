//! Headless Output Snapshot (Headless Snapshot API)
//!
//! Provides data structures needed by UI renderers, simulating a "row list"
//! output: one row per item plus the gap markers between them. Snapshots are
//! immutable copies, detached from the editor, and serializable so FFI or web
//! hosts can move them across boundaries as JSON.

use serde::{Deserialize, Serialize};

use crate::block::ChildState;
use crate::editor::ListEditor;
use crate::item::{ItemHandle, ItemId};
use crate::validation::ErrorPayload;

/// Renderer-facing copy of one item's presentation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessRow {
    /// Stable identity, for row keying across reorderings
    pub id: ItemId,
    /// Current position
    pub index: usize,
    /// Whether the "move up" action is permitted
    pub can_move_up: bool,
    /// Whether the "move down" action is permitted
    pub can_move_down: bool,
    /// Whether this row holds focus
    pub focused: bool,
    /// Error payload to highlight, if any
    pub error: Option<ErrorPayload>,
    /// The child's serializable state
    pub state: ChildState,
}

impl HeadlessRow {
    /// Copy a row out of an item handle.
    pub fn from_item(item: &ItemHandle) -> Self {
        Self {
            id: item.id(),
            index: item.index(),
            can_move_up: item.can_move_up(),
            can_move_down: item.can_move_down(),
            focused: item.is_focused(),
            error: item.error().cloned(),
            state: item.state(),
        }
    }
}

/// Renderer-facing copy of one insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlessInsertionPoint {
    /// Position in the gap sequence
    pub index: usize,
}

/// Headless list snapshot
///
/// A complete, immutable copy of the list's presentation state: `rows.len()`
/// items and `rows.len() + 1` insertion points, stamped with the state
/// version it was captured at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessList {
    /// One row per item, in index order
    pub rows: Vec<HeadlessRow>,
    /// One marker per gap, in index order
    pub insertion_points: Vec<HeadlessInsertionPoint>,
    /// State version at capture time
    pub version: u64,
}

impl HeadlessList {
    /// Capture a snapshot of `editor` at state version `version`.
    pub fn capture(editor: &ListEditor, version: u64) -> Self {
        Self {
            rows: editor.items().iter().map(HeadlessRow::from_item).collect(),
            insertion_points: editor
                .insertion_points()
                .iter()
                .map(|point| HeadlessInsertionPoint {
                    index: point.index(),
                })
                .collect(),
            version,
        }
    }

    /// Number of rows captured.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
