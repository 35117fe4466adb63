//! End-to-end persistence tests against real files.

use chrono::{Local, NaiveDate};
use focusplan_core::{
    CycleSettings, Plan, PlanSession, PlanStore, TaskSnapshot, TaskStatus,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// The canonical example: 3 empty projects, empty people notes, two tasks.
fn example_plan() -> Plan {
    let mut plan = Plan::empty();
    plan.tasks.push(TaskSnapshot {
        status: TaskStatus::Complete,
        description: "Write report".into(),
        expected_minutes: 30,
        actual_minutes: 45,
        notes: "draft v2".into(),
    });
    plan.tasks.push(TaskSnapshot {
        status: TaskStatus::Incomplete,
        description: "Call Bob".into(),
        expected_minutes: 30,
        actual_minutes: 0,
        notes: String::new(),
    });
    plan
}

#[test]
fn example_plan_roundtrips_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PlanStore::new(tmp.path()).unwrap();
    let plan = example_plan();
    let day = date("2024-03-08");

    store.save(day, &plan).unwrap();
    let loaded = store.load(day).unwrap().unwrap();

    assert_eq!(loaded, plan);
    assert_eq!(loaded.tasks[0].description, "Write report");
    assert_eq!(loaded.tasks[0].status, TaskStatus::Complete);
    assert_eq!(loaded.tasks[0].expected_minutes, 30);
    assert_eq!(loaded.tasks[0].actual_minutes, 45);
    assert_eq!(loaded.tasks[0].notes, "draft v2");
    assert_eq!(loaded.tasks[1].description, "Call Bob");
    assert_eq!(loaded.tasks[1].notes, "");
}

#[test]
fn notes_with_embedded_newlines_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PlanStore::new(tmp.path()).unwrap();
    let mut plan = example_plan();
    plan.people_to_reach_out = "Ana\nBob\nCarol".into();
    plan.people_waiting_on = "\nleading and trailing\n".into();
    plan.tasks[0].notes = "line one\n\nline three".into();
    let day = date("2024-03-08");

    store.save(day, &plan).unwrap();
    assert_eq!(store.load(day).unwrap().unwrap(), plan);
}

#[test]
fn all_three_statuses_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PlanStore::new(tmp.path()).unwrap();
    let mut plan = Plan::empty();
    for (i, status) in [
        TaskStatus::Incomplete,
        TaskStatus::InProcess,
        TaskStatus::Complete,
    ]
    .into_iter()
    .enumerate()
    {
        plan.tasks.push(TaskSnapshot {
            status,
            description: format!("task {i}"),
            expected_minutes: 30 + i as u64,
            actual_minutes: i as u64,
            notes: String::new(),
        });
    }
    let day = date("2024-03-08");
    store.save(day, &plan).unwrap();
    assert_eq!(store.load(day).unwrap().unwrap(), plan);
}

#[test]
fn old_format_file_loads_with_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PlanStore::new(tmp.path()).unwrap();
    let day = date("2024-03-08");

    // A file from the oldest generation: no duration or notes lines.
    let mut text = String::from("3\n");
    for n in 1..=3 {
        text.push_str(&format!("Project {n}\n5\n\n\n\n\n\n"));
    }
    text.push_str("Ana\nBob\n");
    text.push_str("2\nINCOMPLETE\nCall Bob\nCOMPLETE\nWrite report\n");
    std::fs::write(store.data_path(day), text).unwrap();

    let plan = store.load(day).unwrap().unwrap();
    assert_eq!(plan.projects[0].name, "Project 1");
    assert_eq!(plan.people_to_reach_out, "Ana");
    assert_eq!(plan.tasks.len(), 2);
    for task in &plan.tasks {
        assert_eq!(task.expected_minutes, 30);
        assert_eq!(task.actual_minutes, 0);
        assert_eq!(task.notes, "");
    }
    assert_eq!(plan.tasks[1].status, TaskStatus::Complete);
}

#[test]
fn corrupted_file_fails_the_load() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PlanStore::new(tmp.path()).unwrap();
    let day = date("2024-03-08");
    std::fs::write(store.data_path(day), "7\nnot a plan\n").unwrap();
    assert!(store.load(day).is_err());
}

#[tokio::test]
async fn session_roundtrip_restores_board_and_tasks() {
    let tmp = tempfile::tempdir().unwrap();
    let today = Local::now().date_naive();

    let session = PlanSession::new(
        CycleSettings::default(),
        PlanStore::new(tmp.path()).unwrap(),
    );
    assert_eq!(session.load_plan(today).await.unwrap(), None);

    {
        let board = session.board();
        let mut board = board.lock().await;
        board.projects[0].name = "Compiler".into();
        board.projects[0].task_lines[2] = "finish parser".into();
        board.people_waiting_on = "Bob (review)".into();
    }
    {
        let tasks = session.tasks();
        let mut tasks = tasks.lock().await;
        tasks.add("Write report", TaskStatus::InProcess, 30, 12, "draft v2");
    }
    session.save_plan(today).await.unwrap();

    let restored = PlanSession::new(
        CycleSettings::default(),
        PlanStore::new(tmp.path()).unwrap(),
    );
    let from = restored.load_plan(today).await.unwrap();
    assert_eq!(from, Some(today));

    let restored_board = restored.board();
    let board = restored_board.lock().await;
    assert_eq!(board.projects[0].name, "Compiler");
    assert_eq!(board.projects[0].task_lines[2], "finish parser");
    assert_eq!(board.people_waiting_on, "Bob (review)");
    drop(board);

    let restored_tasks = restored.tasks();
    let tasks = restored_tasks.lock().await;
    assert_eq!(tasks.len(), 1);
    let task = tasks.iter().next().unwrap();
    assert_eq!(task.description, "Write report");
    assert_eq!(task.status, TaskStatus::InProcess);
    assert_eq!(task.actual_minutes(), 12);
    assert_eq!(task.notes, "draft v2");
}
