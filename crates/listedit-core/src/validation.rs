//! Validation error routing.
//!
//! Validation itself is an external concern: a validator runs over the output
//! of [`ListEditor::get_value`](crate::ListEditor::get_value) and produces
//! [`ListValidationError`] values, which the kernel only routes to the right
//! items. Error payloads are opaque JSON; the kernel never interprets them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::ChildValue;

/// Opaque per-item error payload produced by an external validator.
pub type ErrorPayload = Value;

/// Immutable mapping from item indices to per-item error payloads.
///
/// A list-level validator reports at most one aggregate error object for the
/// whole list; the indices it carries are a subset of the item indices that
/// were current when validation ran. Serializable so hosts can transport
/// validator output across process or FFI boundaries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListValidationError {
    item_errors: BTreeMap<usize, ErrorPayload>,
}

impl ListValidationError {
    /// Build an error from `(item index, payload)` pairs.
    pub fn new<I>(item_errors: I) -> Self
    where
        I: IntoIterator<Item = (usize, ErrorPayload)>,
    {
        Self {
            item_errors: item_errors.into_iter().collect(),
        }
    }

    /// The payload recorded for `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ErrorPayload> {
        self.item_errors.get(&index)
    }

    /// Iterate over `(index, payload)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&usize, &ErrorPayload)> {
        self.item_errors.iter()
    }

    /// Iterate over the item indices carrying an error, in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.item_errors.keys().copied()
    }

    /// Number of items carrying an error.
    pub fn len(&self) -> usize {
        self.item_errors.len()
    }

    /// Whether no item carries an error.
    pub fn is_empty(&self) -> bool {
        self.item_errors.is_empty()
    }
}

impl FromIterator<(usize, ErrorPayload)> for ListValidationError {
    fn from_iter<I: IntoIterator<Item = (usize, ErrorPayload)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A validator that checks a list's external values.
///
/// Implementations should not mutate list state; they return errors that the
/// host feeds back through
/// [`ValidateCommand::SetErrors`](crate::ValidateCommand::SetErrors). An empty
/// result vector means the list validated cleanly; more than one element is
/// ignored by the kernel (the aggregate-error contract).
pub trait ListValidator {
    /// The error type returned by [`ListValidator::validate`].
    type Error;

    /// Validate the externally-facing values of every item, in index order.
    fn validate(&mut self, values: &[ChildValue]) -> Result<Vec<ListValidationError>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_construction_and_lookup() {
        let error = ListValidationError::new([(1, json!("too short")), (3, json!("required"))]);

        assert_eq!(error.len(), 2);
        assert!(!error.is_empty());
        assert_eq!(error.get(1), Some(&json!("too short")));
        assert_eq!(error.get(3), Some(&json!("required")));
        assert_eq!(error.get(0), None);
        assert_eq!(error.indices().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_serde_round_trip() {
        let error = ListValidationError::new([(0, json!({"code": "E1"}))]);
        let text = serde_json::to_string(&error).unwrap();
        let back: ListValidationError = serde_json::from_str(&text).unwrap();
        assert_eq!(back, error);
    }

    #[test]
    fn test_empty_error() {
        let error = ListValidationError::default();
        assert!(error.is_empty());
        assert_eq!(error.iter().count(), 0);
    }
}
