#![warn(missing_docs)]
//! Listedit Core - Headless Reorderable-List Editor Kernel
//!
//! # Overview
//!
//! `listedit-core` is the state-management core of a dynamic, reorderable
//! list editor: a UI component that lets a user insert, delete, duplicate,
//! and reorder an arbitrary number of homogeneous child items, each an
//! editable unit with its own internal state. It does not render anything;
//! the hard part it owns is keeping two interleaved, index-addressed
//! collections (items and the insertion points between them) consistent under
//! structural mutation, keeping per-item move affordances synchronized with
//! position, and preserving stable per-item identity across reorderings.
//!
//! # Core Features
//!
//! - **Co-Indexed Collections**: `n` items and `n + 1` insertion points,
//!   renumbered atomically on every mutation
//! - **Move Affordances**: "can move up / down" derived from position and
//!   recomputed only at the boundary positions that carry it
//! - **Stable Identity**: Monotonic ids that survive any reordering within a
//!   session, for row keying and focus
//! - **Error Routing**: External validator output routed atomically to the
//!   right items
//! - **State Tracking**: Version number mechanism and change notifications
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface & State Management       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Snapshot API (HeadlessList)                │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Sequence Editor (ListEditor)               │  ← Structural Mutation
//! ├─────────────────────────────────────────────┤
//! │  Item Handles & Insertion Points            │  ← Per-Row State
//! ├─────────────────────────────────────────────┤
//! │  Block Traits (EditableBlock, Definition)   │  ← Child Seam
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using the Command Interface
//!
//! ```rust
//! use listedit_core::{ListDefinition, ListStateManager, ValueBlockDef};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let definition = ListDefinition::new(
//!     "tags",
//!     Arc::new(ValueBlockDef::new("tag").with_default_state(json!(""))),
//! );
//! let mut manager = ListStateManager::empty(definition);
//!
//! // The "+" button between rows mints the insert command
//! let request = manager.editor().insertion_points()[0].insert_request();
//! manager.execute(request).unwrap();
//!
//! assert_eq!(manager.editor().len(), 1);
//! assert_eq!(manager.editor().get_state(), vec![json!("")]);
//! ```
//!
//! ## Using the Kernel Directly
//!
//! ```rust
//! use listedit_core::{ListDefinition, ListEditor, ValueBlockDef};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let definition = ListDefinition::new("steps", Arc::new(ValueBlockDef::new("step")));
//! let mut editor = ListEditor::new(definition, &[json!("A"), json!("B"), json!("C"), json!("D")]);
//!
//! editor.move_item(0, 2).unwrap();
//! assert_eq!(
//!     editor.get_state(),
//!     vec![json!("B"), json!("C"), json!("A"), json!("D")]
//! );
//! ```
//!
//! # Module Description
//!
//! - [`block`] - Child seam: [`EditableBlock`], the injected [`BlockDefinition`] factory
//! - [`item`] - [`ItemHandle`] and stable [`ItemId`] identity
//! - [`insertion`] - [`InsertionPoint`] gap markers
//! - [`editor`] - [`ListEditor`], the sequence editor kernel
//! - [`commands`] - [`Command`] envelope, [`CommandResult`], [`CommandError`]
//! - [`state`] - [`ListStateManager`]: versioning, notifications, state queries
//! - [`snapshot`] - [`HeadlessList`], the renderer-facing snapshot
//! - [`validation`] - [`ListValidationError`] carrier and [`ListValidator`] seam

pub mod block;
pub mod commands;
pub mod editor;
pub mod insertion;
pub mod item;
pub mod snapshot;
pub mod state;
pub mod validation;

pub use block::{
    BlockDefinition, ChildState, ChildValue, EditableBlock, ListDefinition, ValueBlock,
    ValueBlockDef,
};
pub use commands::{
    Command, CommandError, CommandResult, EditCommand, FocusCommand, QueryCommand, ValidateCommand,
};
pub use editor::ListEditor;
pub use insertion::InsertionPoint;
pub use item::{ItemHandle, ItemId};
pub use snapshot::{HeadlessInsertionPoint, HeadlessList, HeadlessRow};
pub use state::{
    ItemState, ListChange, ListChangeCallback, ListChangeType, ListState, ListStateManager,
    ValidationState,
};
pub use validation::{ErrorPayload, ListValidationError, ListValidator};
