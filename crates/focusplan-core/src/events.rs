use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::CycleMode;

/// State changes observable from outside the core produce an Event.
/// Consumers (CLI, a future widget) subscribe to the session's broadcast
/// channel; the core never blocks on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new Working / ShortBreak / LongBreak interval began.
    IntervalBegan {
        mode: CycleMode,
        duration_secs: u64,
        cycle_index: u64,
        at: DateTime<Utc>,
    },
    CycleStarted {
        at: DateTime<Utc>,
    },
    CycleStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The sweeper logged and removed a completed task.
    TaskSwept {
        description: String,
        actual_secs: u64,
        at: DateTime<Utc>,
    },
}
