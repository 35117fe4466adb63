//! Focus cycle: the recurring Working / Break timer.

mod engine;

pub use engine::{CycleSettings, CycleSnapshot, FocusCycleEngine};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode of the focus cycle.
///
/// The sequence is deterministic: Working always alternates with a break,
/// and the break after the `i`-th completed pair is Long iff
/// `(i + 1) % long_break_interval == 0`, else Short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleMode {
    Working,
    ShortBreak,
    LongBreak,
}

impl CycleMode {
    pub fn is_break(self) -> bool {
        matches!(self, CycleMode::ShortBreak | CycleMode::LongBreak)
    }
}

impl fmt::Display for CycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleMode::Working => "Working",
            CycleMode::ShortBreak => "Short Break",
            CycleMode::LongBreak => "Long Break",
        };
        f.write_str(s)
    }
}
