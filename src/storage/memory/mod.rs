//! Shared in-memory database used by the in-memory repositories.

use crate::{
    change_log::domain::ChangeLogEntry,
    comment::domain::Comment,
    identity::UserId,
    task::domain::{Task, TaskId},
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// A previous writer panicked while holding the store lock.
#[derive(Debug, Error)]
#[error("in-memory store lock poisoned: {0}")]
pub struct PoisonedStoreError(String);

/// Rows held by the in-memory database, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<UserId, String>,
    pub(crate) tasks: Vec<Task>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) change_logs: Vec<ChangeLogEntry>,
}

impl Tables {
    pub(crate) fn user_name(&self, id: UserId) -> Option<String> {
        self.users.get(&id).cloned()
    }

    /// Clones `task` with its owner's display name attached.
    pub(crate) fn named_task(&self, task: &Task) -> Task {
        task.clone()
            .with_creator_name(self.user_name(task.creator_id()))
    }

    pub(crate) fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Removes a task and every comment and change-log entry that
    /// references it. Returns `false` when the task does not exist.
    pub(crate) fn delete_task_cascade(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        if self.tasks.len() == before {
            return false;
        }
        self.comments.retain(|comment| comment.task_id() != id);
        self.change_logs.retain(|entry| entry.task_id() != id);
        true
    }
}

/// Thread-safe in-memory database shared between repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, PoisonedStoreError> {
        self.state
            .read()
            .map_err(|err| PoisonedStoreError(err.to_string()))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, PoisonedStoreError> {
        self.state
            .write()
            .map_err(|err| PoisonedStoreError(err.to_string()))
    }

    /// Records a display name for every user that has none yet.
    ///
    /// Existing names are left untouched. Returns the number of users added.
    ///
    /// # Errors
    ///
    /// Returns [`PoisonedStoreError`] when the store lock is poisoned.
    pub fn register_users(&self, users: &[(UserId, String)]) -> Result<usize, PoisonedStoreError> {
        let mut tables = self.write()?;
        let before = tables.users.len();
        for (id, name) in users {
            tables.users.entry(*id).or_insert_with(|| name.clone());
        }
        Ok(tables.users.len() - before)
    }
}

/// Sorts rows newest-first by `key`, keeping later insertions ahead of
/// earlier ones when timestamps tie.
pub(crate) fn newest_first<T, K, F>(rows: impl DoubleEndedIterator<Item = T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut sorted: Vec<T> = rows.rev().collect();
    sorted.sort_by(|left, right| key(right).cmp(&key(left)));
    sorted
}
