//! # Focusplan Core Library
//!
//! Core scheduling and state-tracking engine for the Focusplan daily
//! planner. All behavior lives here; the CLI binary is a thin consumer of
//! the session's observable state.
//!
//! ## Architecture
//!
//! - **Cycle engine**: a caller-ticked state machine producing the
//!   infinite Working / ShortBreak / LongBreak sequence
//! - **Task store**: the authoritative ordered task collection, guarded by
//!   the session's mutex
//! - **Loops**: three independent sleep-between-polls background tasks --
//!   cycle driver, time accrual (gated on the engine), and the two-phase
//!   completion sweeper
//! - **Persistence**: line-oriented day-stamped plan files with lookback
//!   and tolerant parsing of older generations, plus an append-only
//!   completion log
//!
//! ## Key Components
//!
//! - [`FocusCycleEngine`]: the work/break state machine
//! - [`TaskStore`]: task collection and mutation entry points
//! - [`PlanSession`]: owns the engine, the store, and the loops
//! - [`PlanStore`]: day plan files and the completion log
//! - [`Config`]: application configuration

pub mod cycle;
pub mod error;
pub mod events;
pub mod plan;
pub mod session;
pub mod storage;
pub mod sweeper;
pub mod task;

pub use cycle::{CycleMode, CycleSettings, CycleSnapshot, FocusCycleEngine};
pub use error::{ConfigError, CoreError, PlanFileError, Result};
pub use events::Event;
pub use plan::{Plan, PlanStore, Project, TaskSnapshot};
pub use session::{PlanBoard, PlanSession, SessionTiming};
pub use storage::Config;
pub use sweeper::{CompletionRecord, CompletionSweeper};
pub use task::{Task, TaskId, TaskStatus, TaskStore};
