//! Day-stamped plan files.
//!
//! One `.dat` file per calendar day holds the full plan; a sibling `.log`
//! file accumulates one record per completed task, append-only, never
//! rewritten.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};

use super::{codec, Plan};
use crate::error::Result;

/// On startup the most recent plan within this many days (including today)
/// is loaded; multiple days are never merged.
pub const LOOKBACK_DAYS: u64 = 4;

/// Plan file storage rooted at a fixed output directory.
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    /// Open (creating if needed) the plans directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn data_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.dat", date.format("%Y-%m-%d")))
    }

    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.log", date.format("%Y-%m-%d")))
    }

    /// Rewrite the day's plan file in full.
    pub fn save(&self, date: NaiveDate, plan: &Plan) -> Result<()> {
        fs::write(self.data_path(date), codec::encode(plan))?;
        Ok(())
    }

    /// Load one day's plan. A missing file is benign (`None`); a malformed
    /// file is an error.
    pub fn load(&self, date: NaiveDate) -> Result<Option<Plan>> {
        match fs::read_to_string(self.data_path(date)) {
            Ok(text) => Ok(Some(codec::decode(&text)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Search backward from `today` and load the most recent existing plan.
    pub fn load_latest(&self, today: NaiveDate) -> Result<Option<(NaiveDate, Plan)>> {
        for back in 0..LOOKBACK_DAYS {
            let date = match today.checked_sub_days(Days::new(back)) {
                Some(date) => date,
                None => break,
            };
            if let Some(plan) = self.load(date)? {
                return Ok(Some((date, plan)));
            }
        }
        Ok(None)
    }

    /// Append one record to the day's completion log.
    pub fn append_completion(&self, date: NaiveDate, record: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path(date))?;
        writeln!(file, "{record}")?;
        Ok(())
    }
}
