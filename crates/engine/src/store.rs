//! Storage backends for group ledgers.
//!
//! The engine talks to storage only through [`ExpenseStore`]. The in-memory
//! [`MemoryStore`] is the default backend; nothing survives a restart.

use std::collections::HashMap;

use crate::{Expense, GroupId, ResultEngine};

/// Backend holding the expense sequence of every group.
///
/// A group the store has never seen behaves as an empty sequence. Writes
/// must be all-or-nothing: a failed `append` leaves the sequence untouched.
pub trait ExpenseStore: Send + Sync {
    /// Expenses of `group` in insertion order.
    fn expenses(&self, group: GroupId) -> ResultEngine<Vec<Expense>>;

    /// Append `expense` at the end of the sequence of `group`.
    fn append(&mut self, group: GroupId, expense: Expense) -> ResultEngine<()>;

    /// Replace the sequence of `group` with an empty one.
    fn clear(&mut self, group: GroupId) -> ResultEngine<()>;
}

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: HashMap<GroupId, Vec<Expense>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.groups.len()
    }
}

impl ExpenseStore for MemoryStore {
    fn expenses(&self, group: GroupId) -> ResultEngine<Vec<Expense>> {
        Ok(self.groups.get(&group).cloned().unwrap_or_default())
    }

    fn append(&mut self, group: GroupId, expense: Expense) -> ResultEngine<()> {
        self.groups.entry(group).or_default().push(expense);
        Ok(())
    }

    fn clear(&mut self, group: GroupId) -> ResultEngine<()> {
        self.groups.insert(group, Vec::new());
        Ok(())
    }
}
