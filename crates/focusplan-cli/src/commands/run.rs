//! The long-running planning session.

use chrono::Local;
use focusplan_core::{Config, Event, PlanSession, PlanStore};
use tracing_subscriber::EnvFilter;

use super::CommandResult;

pub fn run() -> CommandResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load_or_default();
    let plans = PlanStore::new(config.plans_dir()?)?;
    let session = PlanSession::new(config.cycle_settings(), plans);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let today = Local::now().date_naive();
        match session.load_plan(today).await? {
            Some(date) if date == today => println!("Loaded today's plan"),
            Some(date) => println!("Loaded plan from {date}"),
            None => println!("No recent plan found; starting empty"),
        }

        session.start_cycle().await;
        session.spawn_loops();
        println!("Focus cycle started. Ctrl-C saves the plan and exits.");

        let mut events = session.subscribe();
        let printer = tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                match event {
                    Event::IntervalBegan {
                        mode,
                        duration_secs,
                        ..
                    } => {
                        println!("== {mode} for {} min ==", duration_secs / 60);
                    }
                    Event::TaskSwept { description, .. } => {
                        println!("Archived completed task '{description}'");
                    }
                    _ => {}
                }
            }
        });

        tokio::signal::ctrl_c().await?;
        session.shutdown().await;
        printer.abort();

        session.save_plan(today).await?;
        println!("Plan saved for {today}");
        Ok(())
    })
}
