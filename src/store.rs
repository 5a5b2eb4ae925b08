// File: ./src/store.rs
use crate::context::AppContext;
use crate::model::{RenameOutcome, Task};
use crate::storage::LocalStorage;
use anyhow::Result;
use std::sync::Arc;

/// Authoritative in-memory task list.
///
/// Order is meaningful (display and persistence order, newest first). Every
/// mutation leaves the list internally consistent and durably persisted
/// before returning; persistence failures propagate as errors rather than
/// being swallowed, so callers can surface them.
#[derive(Debug, Clone)]
pub struct TaskStore {
    ctx: Arc<dyn AppContext>,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates a store from the persisted slot.
    ///
    /// A corrupt slot loads as empty (already logged by the storage layer);
    /// an unreadable data directory also degrades to empty rather than
    /// failing startup.
    pub fn load(ctx: Arc<dyn AppContext>) -> Self {
        let tasks = LocalStorage::load(ctx.as_ref()).unwrap_or_else(|e| {
            log::warn!("Could not read task list: {}", e);
            vec![]
        });
        Self { ctx, tasks }
    }

    fn persist(&self) -> Result<()> {
        LocalStorage::save(self.ctx.as_ref(), &self.tasks)
    }

    /// Adds a task at the front of the list (most recent first).
    ///
    /// Whitespace-only input is a no-op returning `Ok(None)`; otherwise the
    /// new task's id is returned.
    pub fn add(&mut self, text: &str) -> Result<Option<String>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let task = Task::new(trimmed);
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.persist()?;
        Ok(Some(id))
    }

    /// Removes the task with matching id, preserving the relative order of
    /// the remainder. Persists regardless of whether a match was found, so
    /// a repeated delete is an idempotent no-op returning `Ok(false)`.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let removed = if let Some(idx) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(idx);
            true
        } else {
            false
        };
        self.persist()?;
        Ok(removed)
    }

    /// Sets the completion flag. Missing id: no-op, nothing persisted.
    pub fn set_completed(&mut self, id: &str, completed: bool) -> Result<bool> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = completed;
            self.persist()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Replaces a task's text, or deletes the task when the trimmed
    /// replacement is empty. `NotFound` persists nothing.
    pub fn rename(&mut self, id: &str, new_text: &str) -> Result<RenameOutcome> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            // NotFound must not persist, so check before delegating to delete
            if !self.tasks.iter().any(|t| t.id == id) {
                return Ok(RenameOutcome::NotFound);
            }
            self.delete(id)?;
            return Ok(RenameOutcome::Deleted);
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = trimmed.to_string();
            self.persist()?;
            return Ok(RenameOutcome::Renamed);
        }
        Ok(RenameOutcome::NotFound)
    }

    /// Rebuilds the list to contain exactly the tasks named in
    /// `ordered_ids`, in that order.
    ///
    /// Ids with no matching task are skipped silently, tolerating a stale
    /// external ordering. Tasks omitted from `ordered_ids` are not retained.
    /// Returns false only when a non-empty input produced an empty list.
    pub fn reorder(&mut self, ordered_ids: &[String]) -> Result<bool> {
        let mut reordered = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            if let Some(idx) = self.tasks.iter().position(|t| t.id == *id) {
                reordered.push(self.tasks.remove(idx));
            }
        }
        self.tasks = reordered;
        self.persist()?;
        Ok(ordered_ids.is_empty() || !self.tasks.is_empty())
    }

    /// Empties the list unconditionally and persists the empty slot.
    pub fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        self.persist()
    }

    /// Read-only copy of current order and contents. Mutating the returned
    /// vector has no effect on the store.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
