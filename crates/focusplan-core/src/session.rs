//! The plan session: single owner of the engine, the task store, and the
//! three background loops.
//!
//! Each loop is an independent long-lived tokio task using a
//! sleep-between-polls model; there is no shared run loop and no
//! event-driven wakeup. Worst-case reaction latency equals the poll
//! interval, which is acceptable for a human-facing planner.
//!
//! Locking discipline: every mutation of and iteration over the task list
//! happens under the single `Mutex<TaskStore>`, and no lock is ever held
//! across a sleep. Consumers read snapshots or call mutation entry points
//! through the shared handles; they never run scheduling logic themselves.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cycle::{CycleSettings, FocusCycleEngine};
use crate::error::Result;
use crate::events::Event;
use crate::plan::{Plan, PlanStore, Project, PROJECT_COUNT};
use crate::sweeper::CompletionSweeper;
use crate::task::TaskStore;

/// Poll intervals for the three loops. Defaults are the reference values;
/// tests shrink them.
#[derive(Debug, Clone)]
pub struct SessionTiming {
    /// Cycle engine tick period.
    pub cycle_tick: Duration,
    /// Task time accrual period.
    pub accrual_period: Duration,
    /// Pause after the sweeper's removal phase, before re-scanning.
    pub settle_delay: Duration,
    /// Pause after the sweeper's scheduling phase.
    pub sweep_interval: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            cycle_tick: Duration::from_secs(1),
            accrual_period: Duration::from_secs(5),
            settle_delay: Duration::from_secs(1),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// The non-task parts of the plan: project board and people notes.
#[derive(Debug, Clone)]
pub struct PlanBoard {
    pub projects: Vec<Project>,
    pub people_to_reach_out: String,
    pub people_waiting_on: String,
}

impl Default for PlanBoard {
    fn default() -> Self {
        Self {
            projects: (0..PROJECT_COUNT).map(|_| Project::empty()).collect(),
            people_to_reach_out: String::new(),
            people_waiting_on: String::new(),
        }
    }
}

/// One day-planning session.
///
/// Constructed once and passed explicitly to any consumer; nothing here is
/// reachable through statics.
pub struct PlanSession {
    engine: Arc<Mutex<FocusCycleEngine>>,
    tasks: Arc<Mutex<TaskStore>>,
    board: Arc<Mutex<PlanBoard>>,
    plans: Arc<PlanStore>,
    timing: SessionTiming,
    events: broadcast::Sender<Event>,
    shutdown: watch::Sender<bool>,
    loops: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl PlanSession {
    pub fn new(settings: CycleSettings, plans: PlanStore) -> Self {
        Self::with_timing(settings, plans, SessionTiming::default())
    }

    pub fn with_timing(settings: CycleSettings, plans: PlanStore, timing: SessionTiming) -> Self {
        let (events, _) = broadcast::channel(64);
        let (shutdown, _) = watch::channel(false);
        Self {
            engine: Arc::new(Mutex::new(FocusCycleEngine::new(settings))),
            tasks: Arc::new(Mutex::new(TaskStore::new())),
            board: Arc::new(Mutex::new(PlanBoard::default())),
            plans: Arc::new(plans),
            timing,
            events,
            shutdown,
            loops: std::sync::Mutex::new(Vec::new()),
        }
    }

    // ── Shared handles ───────────────────────────────────────────────

    pub fn engine(&self) -> Arc<Mutex<FocusCycleEngine>> {
        Arc::clone(&self.engine)
    }

    pub fn tasks(&self) -> Arc<Mutex<TaskStore>> {
        Arc::clone(&self.tasks)
    }

    pub fn board(&self) -> Arc<Mutex<PlanBoard>> {
        Arc::clone(&self.board)
    }

    pub fn plan_store(&self) -> &PlanStore {
        &self.plans
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Start the focus cycle, broadcasting the transition. No-op while
    /// already running.
    pub async fn start_cycle(&self) {
        let event = self.engine.lock().await.start();
        if let Some(event) = event {
            let _ = self.events.send(event);
        }
    }

    /// Stop the focus cycle, freezing the remaining time. No-op while
    /// already stopped.
    pub async fn stop_cycle(&self) {
        let event = self.engine.lock().await.stop();
        if let Some(event) = event {
            let _ = self.events.send(event);
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Load the most recent plan within the lookback window into the
    /// session. Returns the date it came from, if any.
    pub async fn load_plan(&self, today: NaiveDate) -> Result<Option<NaiveDate>> {
        let Some((date, plan)) = self.plans.load_latest(today)? else {
            return Ok(None);
        };
        {
            let mut board = self.board.lock().await;
            board.projects = plan.projects.clone();
            board.people_to_reach_out = plan.people_to_reach_out.clone();
            board.people_waiting_on = plan.people_waiting_on.clone();
        }
        {
            let mut tasks = self.tasks.lock().await;
            plan.load_into(&mut tasks);
        }
        debug!(%date, "loaded plan");
        Ok(Some(date))
    }

    /// Snapshot the current state as a plan. Consistent: both locks are
    /// taken before either structure is read.
    pub async fn snapshot_plan(&self) -> Plan {
        let board = self.board.lock().await;
        let tasks = self.tasks.lock().await;
        let mut plan = Plan {
            projects: board.projects.clone(),
            people_to_reach_out: board.people_to_reach_out.clone(),
            people_waiting_on: board.people_waiting_on.clone(),
            tasks: Vec::new(),
        };
        plan.capture_tasks(&tasks);
        plan
    }

    /// Rewrite the day's plan file from the current state.
    pub async fn save_plan(&self, date: NaiveDate) -> Result<()> {
        let plan = self.snapshot_plan().await;
        self.plans.save(date, &plan)
    }

    // ── Loops ────────────────────────────────────────────────────────

    /// Spawn the cycle driver, accrual loop, and completion sweeper.
    /// A second call while the loops are running is ignored; doubled
    /// loops would double the accrual rate and the sweep log.
    pub fn spawn_loops(&self) {
        let mut loops = self
            .loops
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !loops.is_empty() {
            return;
        }
        loops.extend([
            tokio::spawn(cycle_loop(
                Arc::clone(&self.engine),
                self.events.clone(),
                self.timing.cycle_tick,
                self.shutdown.subscribe(),
            )),
            tokio::spawn(accrual_loop(
                Arc::clone(&self.engine),
                Arc::clone(&self.tasks),
                self.timing.accrual_period,
                self.shutdown.subscribe(),
            )),
            tokio::spawn(sweep_loop(
                Arc::clone(&self.tasks),
                Arc::clone(&self.plans),
                self.events.clone(),
                self.timing.clone(),
                self.shutdown.subscribe(),
            )),
        ]);
    }

    /// Stop all loops and wait for them to finish.
    pub async fn shutdown(&self) {
        let _ = self.shutdown.send(true);
        let handles: Vec<_> = {
            let mut loops = self
                .loops
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            loops.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}

/// Sleep for `period`, returning false if shutdown was signalled first.
async fn sleep_or_shutdown(period: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(period) => true,
        _ = shutdown.changed() => false,
    }
}

/// Drives the focus cycle engine with fixed-period ticks.
async fn cycle_loop(
    engine: Arc<Mutex<FocusCycleEngine>>,
    events: broadcast::Sender<Event>,
    tick: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!("cycle loop started");
    loop {
        if !sleep_or_shutdown(tick, &mut shutdown).await {
            break;
        }
        let event = engine.lock().await.tick(tick);
        if let Some(event) = event {
            if let Event::IntervalBegan { mode, .. } = &event {
                debug!(%mode, "interval began");
            }
            let _ = events.send(event);
        }
    }
    debug!("cycle loop stopped");
}

/// Adds focused work time to in-process tasks while the cycle is running
/// in Working mode. A task that turns in-process mid-period starts
/// accruing at the next boundary, never retroactively.
async fn accrual_loop(
    engine: Arc<Mutex<FocusCycleEngine>>,
    tasks: Arc<Mutex<TaskStore>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!("accrual loop started");
    loop {
        if !sleep_or_shutdown(period, &mut shutdown).await {
            break;
        }
        let gate_open = engine.lock().await.accruing();
        if gate_open {
            tasks.lock().await.accrue_in_process(period);
        }
    }
    debug!("accrual loop stopped");
}

/// Two-phase completed-task sweeper.
async fn sweep_loop(
    tasks: Arc<Mutex<TaskStore>>,
    plans: Arc<PlanStore>,
    events: broadcast::Sender<Event>,
    timing: SessionTiming,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!("sweep loop started");
    let mut sweeper = CompletionSweeper::new();
    loop {
        let records = {
            let mut store = tasks.lock().await;
            sweeper.removal_phase(&mut store, Local::now())
        };
        for record in records {
            let date = record.at.date_naive();
            if let Err(err) = plans.append_completion(date, &record.render()) {
                // Best effort: the task stays removed, only the log line
                // is lost.
                warn!(error = %err, task = %record.description, "completion log write failed");
            }
            let _ = events.send(Event::TaskSwept {
                description: record.description,
                actual_secs: record.actual.as_secs(),
                at: Utc::now(),
            });
        }

        // Let observers react to the removal before re-reading the list.
        if !sleep_or_shutdown(timing.settle_delay, &mut shutdown).await {
            break;
        }

        {
            let store = tasks.lock().await;
            sweeper.schedule_phase(&store);
        }

        if !sleep_or_shutdown(timing.sweep_interval, &mut shutdown).await {
            break;
        }
    }
    debug!("sweep loop stopped");
}
