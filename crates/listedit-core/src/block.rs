//! Child block seam: the editable unit wrapped by each list item.
//!
//! The kernel never interprets child state. A child is reached only through
//! the [`EditableBlock`] trait, and new children are produced through the
//! [`BlockDefinition`] factory injected at construction time via
//! [`ListDefinition`]. Hosts plug in their own implementations for real child
//! editors; [`ValueBlock`] is the built-in minimal implementation for plain
//! JSON values.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::validation::ErrorPayload;

/// Opaque serializable state of one child, round-tripped by
/// [`ListEditor::get_state`](crate::ListEditor::get_state) /
/// [`ListEditor::set_state`](crate::ListEditor::set_state).
pub type ChildState = Value;

/// Opaque externally-facing value of one child.
///
/// May differ from [`ChildState`] when the child performs a state → value
/// transform before the value is consumed externally.
pub type ChildValue = Value;

/// The editable unit wrapped by one list item.
///
/// Implementations own the child's internal editing behavior; the kernel only
/// moves state across this boundary as opaque JSON. All methods are
/// synchronous and infallible; the kernel never hands an implementation an
/// invalid input, and implementations must not assume anything about their
/// position in the list (position lives on the owning
/// [`ItemHandle`](crate::ItemHandle)).
pub trait EditableBlock {
    /// Current serializable state, used for round-tripping.
    fn state(&self) -> ChildState;

    /// Replace the child's state wholesale.
    fn set_state(&mut self, state: ChildState);

    /// Externally-facing value. Defaults to the serializable state.
    fn value(&self) -> ChildValue {
        self.state()
    }

    /// Notification hook: the owning item's error payload changed.
    ///
    /// Real child editors surface or clear their error UI here. The default
    /// does nothing; the owning item keeps the authoritative copy either way.
    fn set_error(&mut self, _error: Option<&ErrorPayload>) {}

    /// Notification hook: the owning item received focus.
    fn focus(&mut self) {}
}

/// Factory for one child type, injected into the editor.
///
/// The editor only ever creates children through this trait, so list-like
/// variants (e.g. lists with typed insertion menus) can supply different
/// factories without altering the core algorithm.
pub trait BlockDefinition {
    /// Identifier of the child type (hosts use it for form-field naming).
    fn name(&self) -> &str;

    /// The state a freshly created child starts with.
    fn default_state(&self) -> ChildState;

    /// Build a child carrying `state`.
    fn instantiate(&self, state: ChildState) -> Box<dyn EditableBlock>;
}

/// Child-type descriptor for one list: the list's name, the shared child
/// factory, and an optional initial child state overriding the factory
/// default.
///
/// This is the configuration object a [`ListEditor`](crate::ListEditor) is
/// constructed with. Definitions are plain data plus a shared factory handle,
/// so one definition can configure any number of editors.
#[derive(Clone)]
pub struct ListDefinition {
    name: String,
    child: Arc<dyn BlockDefinition>,
    initial_child_state: Option<ChildState>,
}

impl ListDefinition {
    /// Create a definition for a list whose children come from `child`.
    pub fn new(name: impl Into<String>, child: Arc<dyn BlockDefinition>) -> Self {
        Self {
            name: name.into(),
            child,
            initial_child_state: None,
        }
    }

    /// Override the state newly inserted children start with.
    ///
    /// Without an override, [`BlockDefinition::default_state`] is used.
    pub fn with_initial_child_state(mut self, state: ChildState) -> Self {
        self.initial_child_state = Some(state);
        self
    }

    /// The list's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the child type produced by the factory.
    pub fn child_name(&self) -> &str {
        self.child.name()
    }

    /// The state a child created by a user-triggered insertion starts with.
    pub fn default_child_state(&self) -> ChildState {
        match &self.initial_child_state {
            Some(state) => state.clone(),
            None => self.child.default_state(),
        }
    }

    /// Build a child carrying `state` via the injected factory.
    pub fn instantiate(&self, state: ChildState) -> Box<dyn EditableBlock> {
        self.child.instantiate(state)
    }
}

impl fmt::Debug for ListDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDefinition")
            .field("name", &self.name)
            .field("child", &self.child.name())
            .field("initial_child_state", &self.initial_child_state)
            .finish()
    }
}

/// Minimal built-in child: a bare JSON value with no internal editing
/// behavior (state and value coincide).
///
/// Useful as the out-of-the-box child type for hosts whose children are plain
/// data, and as a lightweight stand-in in tests and examples.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBlock {
    state: ChildState,
}

impl ValueBlock {
    /// Create a value block carrying `state`.
    pub fn new(state: ChildState) -> Self {
        Self { state }
    }
}

impl EditableBlock for ValueBlock {
    fn state(&self) -> ChildState {
        self.state.clone()
    }

    fn set_state(&mut self, state: ChildState) {
        self.state = state;
    }
}

/// Factory producing [`ValueBlock`] children.
#[derive(Debug, Clone)]
pub struct ValueBlockDef {
    name: String,
    default_state: ChildState,
}

impl ValueBlockDef {
    /// Create a factory for value blocks named `name`, defaulting to `null`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_state: Value::Null,
        }
    }

    /// Set the state freshly created blocks start with.
    pub fn with_default_state(mut self, state: ChildState) -> Self {
        self.default_state = state;
        self
    }
}

impl BlockDefinition for ValueBlockDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_state(&self) -> ChildState {
        self.default_state.clone()
    }

    fn instantiate(&self, state: ChildState) -> Box<dyn EditableBlock> {
        Box::new(ValueBlock::new(state))
    }
}
