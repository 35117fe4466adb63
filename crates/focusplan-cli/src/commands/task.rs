//! Task edits via load-mutate-save of the day file.
//!
//! Edits always land in today's file, carrying forward the most recent
//! plan if today's does not exist yet. Tasks are addressed by their
//! 1-based list position.

use clap::Subcommand;
use focusplan_core::{TaskSnapshot, TaskStatus};

use super::{load_or_empty, open_plan_store, today, CommandResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to today's plan
    Add {
        description: String,
        /// Expected duration in minutes
        #[arg(long, default_value_t = 30)]
        expected: u64,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List tasks
    List {
        #[arg(long)]
        json: bool,
    },
    /// Mark a task in-process
    Start { index: usize },
    /// Mark a task complete
    Done { index: usize },
    /// Edit a task's expected duration or notes
    Edit {
        index: usize,
        /// Expected duration in minutes
        #[arg(long)]
        expected: Option<u64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a task outright (no completion log entry)
    Remove { index: usize },
}

pub fn run(action: TaskAction) -> CommandResult {
    match action {
        TaskAction::Add {
            description,
            expected,
            notes,
        } => add(description, expected, notes),
        TaskAction::List { json } => list(json),
        TaskAction::Start { index } => set_status(index, TaskStatus::InProcess),
        TaskAction::Done { index } => set_status(index, TaskStatus::Complete),
        TaskAction::Edit {
            index,
            expected,
            notes,
        } => edit(index, expected, notes),
        TaskAction::Remove { index } => remove(index),
    }
}

fn add(description: String, expected: u64, notes: String) -> CommandResult {
    let store = open_plan_store()?;
    let mut plan = load_or_empty(&store)?;
    plan.tasks.push(TaskSnapshot {
        status: TaskStatus::Incomplete,
        description: description.clone(),
        expected_minutes: expected,
        actual_minutes: 0,
        notes,
    });
    store.save(today(), &plan)?;
    println!("Added '{description}' ({} tasks)", plan.tasks.len());
    Ok(())
}

fn list(json: bool) -> CommandResult {
    let store = open_plan_store()?;
    let plan = load_or_empty(&store)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&plan.tasks)?);
        return Ok(());
    }
    if plan.tasks.is_empty() {
        println!("No tasks");
    }
    for (i, task) in plan.tasks.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, task.status, task.description);
    }
    Ok(())
}

fn set_status(index: usize, status: TaskStatus) -> CommandResult {
    let store = open_plan_store()?;
    let mut plan = load_or_empty(&store)?;
    let task = nth_task_mut(&mut plan.tasks, index)?;
    task.status = status;
    let description = task.description.clone();
    store.save(today(), &plan)?;
    println!("{status}: '{description}'");
    Ok(())
}

fn edit(index: usize, expected: Option<u64>, notes: Option<String>) -> CommandResult {
    let store = open_plan_store()?;
    let mut plan = load_or_empty(&store)?;
    let task = nth_task_mut(&mut plan.tasks, index)?;
    if let Some(expected) = expected {
        task.expected_minutes = expected;
    }
    if let Some(notes) = notes {
        task.notes = notes;
    }
    let description = task.description.clone();
    store.save(today(), &plan)?;
    println!("Edited '{description}'");
    Ok(())
}

fn remove(index: usize) -> CommandResult {
    let store = open_plan_store()?;
    let mut plan = load_or_empty(&store)?;
    nth_task_mut(&mut plan.tasks, index)?;
    let removed = plan.tasks.remove(index - 1);
    store.save(today(), &plan)?;
    println!("Removed '{}'", removed.description);
    Ok(())
}

fn nth_task_mut(
    tasks: &mut [TaskSnapshot],
    index: usize,
) -> Result<&mut TaskSnapshot, Box<dyn std::error::Error>> {
    if index == 0 || index > tasks.len() {
        return Err(format!("no task #{index} (have {})", tasks.len()).into());
    }
    Ok(&mut tasks[index - 1])
}
