//! Integration tests for the session loops.
//!
//! These run the real cycle/accrual/sweep loops on tokio's paused test
//! clock, so the reference poll intervals (1 s tick, 5 s accrual,
//! 1 s settle, 60 s sweep) execute deterministically and instantly.

use std::time::Duration;

use chrono::Local;
use focusplan_core::{
    CycleMode, CycleSettings, Event, PlanSession, PlanStore, TaskStatus,
};

async fn advance_secs(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

fn new_session(dir: &std::path::Path) -> PlanSession {
    PlanSession::new(CycleSettings::default(), PlanStore::new(dir).unwrap())
}

#[tokio::test(start_paused = true)]
async fn accrual_is_gated_on_running_working() {
    let tmp = tempfile::tempdir().unwrap();
    let session = new_session(tmp.path());

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("deep work", TaskStatus::InProcess, 30, 0, "").id
    };
    session.start_cycle().await;
    session.spawn_loops();

    // Five accrual periods elapse by t=26s.
    advance_secs(26).await;
    {
        let tasks = session.tasks();
        let tasks = tasks.lock().await;
        assert_eq!(tasks.get(id).unwrap().actual, Duration::from_secs(25));
    }

    // Stopped: accrual suspends entirely.
    session.stop_cycle().await;
    advance_secs(30).await;
    {
        let tasks = session.tasks();
        let tasks = tasks.lock().await;
        assert_eq!(tasks.get(id).unwrap().actual, Duration::from_secs(25));
    }

    // Resumed: accrual picks up at the next boundaries (t=60s, t=65s).
    session.start_cycle().await;
    advance_secs(10).await;
    {
        let tasks = session.tasks();
        let tasks = tasks.lock().await;
        assert_eq!(tasks.get(id).unwrap().actual, Duration::from_secs(35));
    }

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn no_accrual_during_breaks() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = CycleSettings {
        working: Duration::from_secs(12),
        short_break: Duration::from_secs(600),
        long_break: Duration::from_secs(600),
        long_break_interval: 4,
    };
    let session = PlanSession::new(settings, PlanStore::new(tmp.path()).unwrap());

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("deep work", TaskStatus::InProcess, 30, 0, "").id
    };
    session.engine().lock().await.start();
    session.spawn_loops();

    // Well into the (long) short break now.
    advance_secs(20).await;
    assert_eq!(session.engine().lock().await.mode(), CycleMode::ShortBreak);
    let during_break = session.tasks().lock().await.get(id).unwrap().actual;

    // Still on break a minute later: nothing further accrued.
    advance_secs(60).await;
    let later = session.tasks().lock().await.get(id).unwrap().actual;
    assert_eq!(later, during_break);
    assert!(during_break <= Duration::from_secs(12));

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn incomplete_tasks_do_not_accrue() {
    let tmp = tempfile::tempdir().unwrap();
    let session = new_session(tmp.path());

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("someday", TaskStatus::Incomplete, 30, 0, "").id
    };
    session.engine().lock().await.start();
    session.spawn_loops();

    advance_secs(31).await;
    assert_eq!(
        session.tasks().lock().await.get(id).unwrap().actual,
        Duration::ZERO
    );

    // Becomes in-process mid-period: accrues from the next boundary only.
    session
        .tasks()
        .lock()
        .await
        .set_status(id, TaskStatus::InProcess);
    advance_secs(11).await;
    assert_eq!(
        session.tasks().lock().await.get(id).unwrap().actual,
        Duration::from_secs(10)
    );

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn completed_task_swept_within_two_cycles_with_one_log_line() {
    let tmp = tempfile::tempdir().unwrap();
    let session = new_session(tmp.path());
    let mut events = session.subscribe();

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks
            .add("ship release", TaskStatus::Complete, 30, 45, "notes here")
            .id
    };
    session.spawn_loops();

    // Sweep schedule at t=1s, removal at t=61s.
    advance_secs(62).await;
    assert!(session.tasks().lock().await.get(id).is_none());

    let today = Local::now().date_naive();
    let log = std::fs::read_to_string(session.plan_store().log_path(today)).unwrap();
    assert_eq!(log.matches("Completed 'ship release'").count(), 1);
    assert!(log.contains("in 00:45:00"));
    assert!(log.contains("    notes here"));

    // Never logged twice.
    advance_secs(180).await;
    let log = std::fs::read_to_string(session.plan_store().log_path(today)).unwrap();
    assert_eq!(log.matches("Completed 'ship release'").count(), 1);

    let mut swept = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, Event::TaskSwept { .. }) {
            swept += 1;
        }
    }
    assert_eq!(swept, 1);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn uncompleting_during_settle_window_prevents_removal() {
    let tmp = tempfile::tempdir().unwrap();
    let session = new_session(tmp.path());

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("flaky", TaskStatus::Complete, 30, 5, "").id
    };
    session.spawn_loops();

    // Scheduled at t=1s; flip it back before the t=61s removal phase.
    advance_secs(2).await;
    session
        .tasks()
        .lock()
        .await
        .set_status(id, TaskStatus::Incomplete);

    advance_secs(120).await;
    assert!(session.tasks().lock().await.get(id).is_some());
    let today = Local::now().date_naive();
    assert!(!session.plan_store().log_path(today).exists());

    // Completing it again schedules it again, independently.
    session
        .tasks()
        .lock()
        .await
        .set_status(id, TaskStatus::Complete);
    advance_secs(200).await;
    assert!(session.tasks().lock().await.get(id).is_none());
    let log = std::fs::read_to_string(session.plan_store().log_path(today)).unwrap();
    assert_eq!(log.matches("Completed 'flaky'").count(), 1);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn cycle_loop_transitions_and_broadcasts() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = CycleSettings {
        working: Duration::from_secs(3),
        short_break: Duration::from_secs(2),
        long_break: Duration::from_secs(4),
        long_break_interval: 2,
    };
    let session = PlanSession::new(settings, PlanStore::new(tmp.path()).unwrap());
    let mut events = session.subscribe();

    session.engine().lock().await.start();
    session.spawn_loops();

    // Working(3) -> Short(2) -> Working(3) -> Long(4) with interval 2.
    advance_secs(13).await;

    let mut began = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let Event::IntervalBegan { mode, .. } = event {
            began.push(mode);
        }
    }
    assert_eq!(
        began,
        vec![
            CycleMode::ShortBreak,
            CycleMode::Working,
            CycleMode::LongBreak,
            CycleMode::Working,
        ]
    );
    assert_eq!(session.engine().lock().await.cycle_index(), 2);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn repeated_spawn_loops_does_not_double_the_loops() {
    let tmp = tempfile::tempdir().unwrap();
    let session = new_session(tmp.path());

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("deep work", TaskStatus::InProcess, 30, 0, "").id
    };
    session.start_cycle().await;
    session.spawn_loops();
    session.spawn_loops();

    // A doubled accrual loop would show 20s here instead of 10s.
    advance_secs(11).await;
    assert_eq!(
        session.tasks().lock().await.get(id).unwrap().actual,
        Duration::from_secs(10)
    );

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_all_loops() {
    let tmp = tempfile::tempdir().unwrap();
    let session = new_session(tmp.path());

    let id = {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("late", TaskStatus::InProcess, 30, 0, "").id
    };
    session.engine().lock().await.start();
    session.spawn_loops();
    session.shutdown().await;

    advance_secs(120).await;
    assert_eq!(
        session.tasks().lock().await.get(id).unwrap().actual,
        Duration::ZERO
    );
}
