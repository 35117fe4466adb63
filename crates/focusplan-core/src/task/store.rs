//! The authoritative in-memory task collection.
//!
//! Order is insertion order except after `reorder_by_priority`, which is
//! user-triggered (on a manual priority edit) and never run automatically.
//! All mutation and iteration happens with the store behind the session's
//! mutex; the store itself is single-threaded.

use std::time::Duration;

use super::{Task, TaskId, TaskStatus};

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return it for immediate focus/editing by the
    /// caller.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        status: TaskStatus,
        expected_minutes: u64,
        actual_minutes: u64,
        notes: impl Into<String>,
    ) -> &Task {
        self.tasks.push(Task::new(
            description,
            status,
            expected_minutes,
            actual_minutes,
            notes,
        ));
        self.tasks.last().expect("just pushed")
    }

    /// Remove unconditionally. No error if absent.
    pub fn remove(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) {
        if let Some(task) = self.get_mut(id) {
            task.status = status;
        }
    }

    /// Stable sort ascending by priority; ties keep prior relative order.
    pub fn reorder_by_priority(&mut self) {
        self.tasks.sort_by_key(|t| t.priority);
    }

    pub fn for_each_in_process(&mut self, mut f: impl FnMut(&mut Task)) {
        for task in &mut self.tasks {
            if task.status == TaskStatus::InProcess {
                f(task);
            }
        }
    }

    pub fn for_each_complete(&self, mut f: impl FnMut(&Task)) {
        for task in &self.tasks {
            if task.status == TaskStatus::Complete {
                f(task);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a period of focused work to every in-process task.
    ///
    /// The gate (cycle running and in Working mode) is the caller's
    /// responsibility; the store only applies the increment.
    pub fn accrue_in_process(&mut self, period: Duration) {
        self.for_each_in_process(|task| {
            task.actual += period;
        });
    }
}
