use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_plan_store, today, CommandResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Print a day's plan (default: the most recent within the lookback window)
    Show {
        /// Exact day to show, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> CommandResult {
    match action {
        PlanAction::Show { date, json } => show(date, json),
    }
}

fn show(date: Option<NaiveDate>, json: bool) -> CommandResult {
    let store = open_plan_store()?;
    let found = match date {
        Some(date) => store.load(date)?.map(|plan| (date, plan)),
        None => store.load_latest(today())?,
    };
    let Some((date, plan)) = found else {
        println!("No plan found");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Plan for {date}");
    for (n, project) in plan.projects.iter().enumerate() {
        println!("\n#{}: {}", n + 1, project.name);
        for (i, line) in project.task_lines.iter().enumerate() {
            if !line.is_empty() {
                println!("  {}. {line}", i + 1);
            }
        }
    }
    if !plan.people_to_reach_out.is_empty() {
        println!("\nReach out to:\n{}", plan.people_to_reach_out);
    }
    if !plan.people_waiting_on.is_empty() {
        println!("\nWaiting on:\n{}", plan.people_waiting_on);
    }
    println!("\nPriorities:");
    if plan.tasks.is_empty() {
        println!("  (none)");
    }
    for (i, task) in plan.tasks.iter().enumerate() {
        println!(
            "  {}. [{}] {} ({}m expected, {}m actual)",
            i + 1,
            task.status,
            task.description,
            task.expected_minutes,
            task.actual_minutes,
        );
    }
    Ok(())
}
