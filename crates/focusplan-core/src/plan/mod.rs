//! The day plan: the full persisted daily state.
//!
//! A plan bundles the fixed project board (3 projects of 5 task lines),
//! the two free-text people notes, and snapshots of the priority tasks.
//! It is rewritten in full on every save; there is no incremental diffing.

mod codec;
mod store;

pub use codec::{decode, encode};
pub use store::{PlanStore, LOOKBACK_DAYS};

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus, TaskStore, DEFAULT_EXPECTED_MINUTES};

/// Number of project slots on the board.
pub const PROJECT_COUNT: usize = 3;
/// Task lines under each project.
pub const PROJECT_TASK_LINES: usize = 5;

/// One project slot: a name plus a fixed-size list of task lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub task_lines: Vec<String>,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            task_lines: vec![String::new(); PROJECT_TASK_LINES],
        }
    }
}

/// Persisted view of a task. Minute granularity on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub status: TaskStatus,
    pub description: String,
    pub expected_minutes: u64,
    pub actual_minutes: u64,
    pub notes: String,
}

impl TaskSnapshot {
    pub fn of(task: &Task) -> Self {
        Self {
            status: task.status,
            description: task.description.clone(),
            expected_minutes: task.expected_minutes(),
            actual_minutes: task.actual_minutes(),
            notes: task.notes.clone(),
        }
    }

    pub(crate) fn with_defaults(status: TaskStatus, description: String) -> Self {
        Self {
            status,
            description,
            expected_minutes: DEFAULT_EXPECTED_MINUTES,
            actual_minutes: 0,
            notes: String::new(),
        }
    }
}

/// The full persisted daily state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub projects: Vec<Project>,
    pub people_to_reach_out: String,
    pub people_waiting_on: String,
    pub tasks: Vec<TaskSnapshot>,
}

impl Plan {
    pub fn empty() -> Self {
        Self {
            projects: (0..PROJECT_COUNT).map(|_| Project::empty()).collect(),
            people_to_reach_out: String::new(),
            people_waiting_on: String::new(),
            tasks: Vec::new(),
        }
    }

    /// Materialize the task snapshots into a store.
    pub fn load_into(&self, store: &mut TaskStore) {
        for snap in &self.tasks {
            store.add(
                snap.description.clone(),
                snap.status,
                snap.expected_minutes,
                snap.actual_minutes,
                snap.notes.clone(),
            );
        }
    }

    /// Snapshot the store's tasks into this plan, replacing the old list.
    pub fn capture_tasks(&mut self, store: &TaskStore) {
        self.tasks = store.iter().map(TaskSnapshot::of).collect();
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::empty()
    }
}
