//! Deferred removal and logging of completed tasks.
//!
//! The sweeper runs two phases per sweep, repeating indefinitely:
//!
//! 1. **Removal**: every task captured in the previous scheduling phase
//!    that is *still* complete produces one completion log record and is
//!    removed from the store. A short settle delay follows so observers
//!    can react to the removal before the list is read again.
//! 2. **Scheduling**: every currently-complete task is captured for the
//!    next removal phase, then the sweeper sleeps for the sweep interval.
//!
//! The one-cycle grace window keeps a freshly completed task visible for
//! at least one full sweep and yields exactly one log record per
//! completion event. A task un-completed during the settle window is
//! neither removed nor logged; if it is completed again later it is simply
//! scheduled again.
//!
//! Phase timing lives in the session loop; this type only holds the
//! scheduled set and the phase logic, which keeps it testable without a
//! clock.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::task::{TaskId, TaskStatus, TaskStore};

/// One line-set of the day's completion log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub at: DateTime<Local>,
    pub description: String,
    pub actual: Duration,
    pub notes: String,
}

impl CompletionRecord {
    /// Render the append-only log form:
    /// `<timestamp> : Completed '<description>' in HH:MM:SS`, followed by
    /// an indented notes block when notes are non-empty.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} : Completed '{}' in {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.description,
            format_hms(self.actual),
        );
        if !self.notes.trim().is_empty() {
            out.push_str("\n  Notes:");
            for line in self.notes.lines() {
                out.push_str("\n    ");
                out.push_str(line);
            }
        }
        out
    }
}

fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// The two-phase completed-task sweeper.
#[derive(Debug, Default)]
pub struct CompletionSweeper {
    scheduled: Vec<TaskId>,
}

impl CompletionSweeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removal phase: drop every scheduled task that is still complete,
    /// returning one record per removed task for the caller to log.
    ///
    /// The caller appends the records to the completion log best-effort;
    /// a log write failure must not resurrect the task.
    pub fn removal_phase(
        &mut self,
        store: &mut TaskStore,
        at: DateTime<Local>,
    ) -> Vec<CompletionRecord> {
        let mut records = Vec::new();
        for id in self.scheduled.drain(..) {
            let Some(task) = store.get(id) else {
                continue; // already removed by the user
            };
            if task.status != TaskStatus::Complete {
                continue; // un-completed during the settle window
            }
            records.push(CompletionRecord {
                at,
                description: task.description.clone(),
                actual: task.actual,
                notes: task.notes.clone(),
            });
            store.remove(id);
        }
        records
    }

    /// Scheduling phase: capture all currently-complete tasks for the next
    /// removal phase.
    pub fn schedule_phase(&mut self, store: &TaskStore) {
        self.scheduled.clear();
        store.for_each_complete(|task| self.scheduled.push(task.id));
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }
}
