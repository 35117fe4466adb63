pub mod config;
pub mod plan;
pub mod run;
pub mod task;

use chrono::{Local, NaiveDate};
use focusplan_core::{Config, Plan, PlanStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn open_plan_store() -> Result<PlanStore, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    Ok(PlanStore::new(config.plans_dir()?)?)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The most recent plan within the lookback window, or an empty one.
pub fn load_or_empty(store: &PlanStore) -> Result<Plan, Box<dyn std::error::Error>> {
    Ok(store
        .load_latest(today())?
        .map(|(_, plan)| plan)
        .unwrap_or_default())
}
