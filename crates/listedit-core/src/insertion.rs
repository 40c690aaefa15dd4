//! Insertion points: the gaps between items where a new item may be created.

use crate::commands::{Command, EditCommand};

/// A gap marker between (or at the ends of) items.
///
/// A list with `n` items always carries `n + 1` insertion points; point `i`
/// sits immediately before item `i`, and the final point sits after the last
/// item. The owning [`ListEditor`](crate::ListEditor) is the single writer of
/// the index; a point is dropped when the item it precedes is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    index: usize,
}

impl InsertionPoint {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// Current position in the gap sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Mint the command a host dispatches when the user requests an insertion
    /// at this gap.
    ///
    /// The routing never changes: the command always resolves to a default
    /// child being inserted at this point's current index.
    pub fn insert_request(&self) -> Command {
        Command::Edit(EditCommand::InsertDefault { index: self.index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_request_carries_current_index() {
        let mut point = InsertionPoint::new(0);
        assert_eq!(
            point.insert_request(),
            Command::Edit(EditCommand::InsertDefault { index: 0 })
        );

        point.set_index(4);
        assert_eq!(
            point.insert_request(),
            Command::Edit(EditCommand::InsertDefault { index: 4 })
        );
    }
}
