//! Focus cycle engine implementation.
//!
//! The engine is a pure state machine. It does not use internal threads -
//! the caller (the session's cycle loop) is responsible for calling
//! `tick()` periodically with the elapsed duration.
//!
//! ## Mode sequence
//!
//! ```text
//! Working -> ShortBreak -> Working -> ShortBreak -> ... -> Working -> LongBreak -> (repeat)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = FocusCycleEngine::new(CycleSettings::default());
//! engine.start();
//! // In a loop:
//! engine.tick(elapsed); // Returns Some(Event::IntervalBegan) on mode change
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CycleMode;
use crate::events::Event;

/// Mutable cycle configuration.
///
/// Replaced atomically by `configure`; a change made while an interval is
/// in flight never truncates it - new durations apply on the next mode
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSettings {
    pub working: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    /// Every Nth break is a long break.
    pub long_break_interval: u32,
}

impl CycleSettings {
    pub fn duration_for(&self, mode: CycleMode) -> Duration {
        match mode {
            CycleMode::Working => self.working,
            CycleMode::ShortBreak => self.short_break,
            CycleMode::LongBreak => self.long_break,
        }
    }
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            working: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(10 * 60),
            long_break_interval: 4,
        }
    }
}

/// Point-in-time view of the engine for external consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub mode: CycleMode,
    pub remaining_secs: u64,
    pub running: bool,
    pub cycle_index: u64,
}

/// The focus cycle state machine.
///
/// Produces an infinite alternating sequence of Working and Break
/// intervals. Stopping freezes `remaining`; restarting resumes exactly
/// where it left off.
#[derive(Debug, Clone)]
pub struct FocusCycleEngine {
    settings: CycleSettings,
    mode: CycleMode,
    /// Completed Working -> Break pairs since construction.
    cycle_index: u64,
    remaining: Duration,
    running: bool,
}

impl FocusCycleEngine {
    pub fn new(settings: CycleSettings) -> Self {
        let remaining = settings.working;
        Self {
            settings,
            mode: CycleMode::Working,
            cycle_index: 0,
            remaining,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> CycleMode {
        self.mode
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cycle_index(&self) -> u64 {
        self.cycle_index
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// True only while focused work time should accrue.
    pub fn accruing(&self) -> bool {
        self.running && self.mode == CycleMode::Working
    }

    pub fn snapshot(&self) -> CycleSnapshot {
        CycleSnapshot {
            mode: self.mode,
            remaining_secs: self.remaining.as_secs(),
            running: self.running,
            cycle_index: self.cycle_index,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::CycleStarted { at: Utc::now() })
    }

    /// Freeze the remaining time. Idempotent.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::CycleStopped {
            remaining_secs: self.remaining.as_secs(),
            at: Utc::now(),
        })
    }

    /// Replace the settings. Effective on the next mode entry.
    pub fn configure(&mut self, settings: CycleSettings) {
        let mut settings = settings;
        if settings.long_break_interval == 0 {
            settings.long_break_interval = 1;
        }
        self.settings = settings;
    }

    /// Advance the clock. Call periodically with the elapsed duration.
    ///
    /// Returns `Some(Event::IntervalBegan)` when the current interval ends
    /// and the next mode begins. Does nothing while stopped.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return None;
        }
        self.advance();
        Some(Event::IntervalBegan {
            mode: self.mode,
            duration_secs: self.remaining.as_secs(),
            cycle_index: self.cycle_index,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) {
        self.mode = match self.mode {
            CycleMode::Working => {
                let interval = u64::from(self.settings.long_break_interval.max(1));
                if (self.cycle_index + 1) % interval == 0 {
                    CycleMode::LongBreak
                } else {
                    CycleMode::ShortBreak
                }
            }
            CycleMode::ShortBreak | CycleMode::LongBreak => {
                self.cycle_index += 1;
                CycleMode::Working
            }
        };
        self.remaining = self.settings.duration_for(self.mode);
    }
}
