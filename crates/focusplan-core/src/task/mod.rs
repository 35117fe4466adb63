//! Task types.

mod store;

pub use store::TaskStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::error::PlanFileError;

pub const DEFAULT_EXPECTED_MINUTES: u64 = 30;
pub const DEFAULT_PRIORITY: u8 = 5;

/// Task status. Exactly one at any time; no other states exist.
///
/// The wire form (`INCOMPLETE | IN_PROCESS | COMPLETE`) is what the day
/// file stores, so `Display`/`FromStr` are part of the persistence format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Incomplete,
    InProcess,
    Complete,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Incomplete => "INCOMPLETE",
            TaskStatus::InProcess => "IN_PROCESS",
            TaskStatus::Complete => "COMPLETE",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskStatus {
    type Err = PlanFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOMPLETE" => Ok(TaskStatus::Incomplete),
            "IN_PROCESS" => Ok(TaskStatus::InProcess),
            "COMPLETE" => Ok(TaskStatus::Complete),
            other => Err(PlanFileError::UnknownStatus(other.to_string())),
        }
    }
}

/// Opaque task identity, stable for the task's lifetime in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single priority task on the day's plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub status: TaskStatus,
    /// Minute granularity on input, second granularity while accruing.
    pub expected: Duration,
    pub actual: Duration,
    /// 1..=10, lower sorts first. Used only for ordering.
    pub priority: u8,
    pub notes: String,
}

impl Task {
    pub(crate) fn new(
        description: impl Into<String>,
        status: TaskStatus,
        expected_minutes: u64,
        actual_minutes: u64,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            description: description.into(),
            status,
            expected: Duration::from_secs(expected_minutes.saturating_mul(60)),
            actual: Duration::from_secs(actual_minutes.saturating_mul(60)),
            priority: DEFAULT_PRIORITY,
            notes: notes.into(),
        }
    }

    pub fn expected_minutes(&self) -> u64 {
        self.expected.as_secs() / 60
    }

    pub fn actual_minutes(&self) -> u64 {
        self.actual.as_secs() / 60
    }
}
