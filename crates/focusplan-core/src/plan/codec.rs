//! Line-oriented plan file codec.
//!
//! The format is one record field per line, UTF-8:
//!
//! ```text
//! <projectCount>
//! repeat projectCount times:
//!   <projectName>
//!   <taskLineCount>
//!   repeat taskLineCount times: <taskLine>
//! <peopleToReachOut>
//! <peopleWaitingOn>
//! <taskCount>
//! repeat taskCount times:
//!   <status>
//!   <description>
//!   <expectedMinutes>           (absent in oldest files)
//!   <actualMinutes>             (absent in oldest files)
//!   <notes>                     (absent in older files)
//! ```
//!
//! Every free-text field (project names and lines, people fields,
//! descriptions, notes) has embedded newlines escaped; a field can never
//! span lines or shift the fields after it.
//!
//! Three generations of the task section are tolerated: 2, 4, or 5 lines
//! per record. The generation is derived from the remaining line count;
//! missing fields fall back to defaults rather than failing the load.
//! Fixed-size sections (project count, per-project line count) are strict:
//! a mismatch means a corrupted or incompatible file and fails the load.

use std::fmt::Write as _;

use super::{Plan, Project, TaskSnapshot, PROJECT_COUNT, PROJECT_TASK_LINES};
use crate::error::PlanFileError;
use crate::task::{TaskStatus, DEFAULT_EXPECTED_MINUTES};

/// Literal token standing in for newlines inside free-text fields.
const NEWLINE_TOKEN: &str = "{newline}";

fn escape(input: &str) -> String {
    input.replace('\n', NEWLINE_TOKEN)
}

fn unescape(input: &str) -> String {
    input.replace(NEWLINE_TOKEN, "\n")
}

/// Serialize a plan to its on-disk text form.
pub fn encode(plan: &Plan) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", plan.projects.len());
    for project in &plan.projects {
        let _ = writeln!(out, "{}", escape(&project.name));
        let _ = writeln!(out, "{}", project.task_lines.len());
        for line in &project.task_lines {
            let _ = writeln!(out, "{}", escape(line));
        }
    }
    let _ = writeln!(out, "{}", escape(&plan.people_to_reach_out));
    let _ = writeln!(out, "{}", escape(&plan.people_waiting_on));
    let _ = writeln!(out, "{}", plan.tasks.len());
    for task in &plan.tasks {
        let _ = writeln!(out, "{}", task.status);
        let _ = writeln!(out, "{}", escape(&task.description));
        let _ = writeln!(out, "{}", task.expected_minutes);
        let _ = writeln!(out, "{}", task.actual_minutes);
        let _ = writeln!(out, "{}", escape(&task.notes));
    }
    out
}

struct Lines<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    fn next(&mut self, section: &'static str) -> Result<&'a str, PlanFileError> {
        let line = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or(PlanFileError::Truncated(section))?;
        self.pos += 1;
        Ok(line)
    }

    fn next_count(&mut self, section: &'static str) -> Result<usize, PlanFileError> {
        let line = self.next(section)?;
        line.trim()
            .parse()
            .map_err(|_| PlanFileError::BadCount {
                section,
                value: line.to_string(),
            })
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }
}

/// Parse a plan from its on-disk text form.
pub fn decode(text: &str) -> Result<Plan, PlanFileError> {
    let mut lines = Lines::new(text);

    let project_count = lines.next_count("projects")?;
    if project_count != PROJECT_COUNT {
        return Err(PlanFileError::SchemaMismatch {
            section: "projects",
            expected: PROJECT_COUNT,
            found: project_count,
        });
    }

    let mut projects = Vec::with_capacity(project_count);
    for _ in 0..project_count {
        let name = unescape(lines.next("project name")?);
        let line_count = lines.next_count("project task lines")?;
        if line_count != PROJECT_TASK_LINES {
            return Err(PlanFileError::SchemaMismatch {
                section: "project task lines",
                expected: PROJECT_TASK_LINES,
                found: line_count,
            });
        }
        let mut task_lines = Vec::with_capacity(line_count);
        for _ in 0..line_count {
            task_lines.push(unescape(lines.next("project task line")?));
        }
        projects.push(Project { name, task_lines });
    }

    let people_to_reach_out = unescape(lines.next("people to reach out")?);
    let people_waiting_on = unescape(lines.next("people waiting on")?);

    let task_count = lines.next_count("tasks")?;
    let fields = record_width(lines.remaining(), task_count)?;

    let mut tasks = Vec::with_capacity(task_count);
    for _ in 0..task_count {
        let status: TaskStatus = lines.next("task status")?.parse()?;
        let description = unescape(lines.next("task description")?);
        let mut task = TaskSnapshot::with_defaults(status, description);
        if fields >= 4 {
            // A failed numeric parse recovers locally with the default.
            task.expected_minutes = lines
                .next("expected minutes")?
                .trim()
                .parse()
                .unwrap_or(DEFAULT_EXPECTED_MINUTES);
            task.actual_minutes = lines.next("actual minutes")?.trim().parse().unwrap_or(0);
        }
        if fields >= 5 {
            task.notes = unescape(lines.next("task notes")?);
        }
        tasks.push(task);
    }

    Ok(Plan {
        projects,
        people_to_reach_out,
        people_waiting_on,
        tasks,
    })
}

/// Lines per task record, derived from what is left in the file.
///
/// Old files carry status + description only; a later generation added the
/// two duration lines; the current one adds notes. Files are uniform, so
/// the width follows from the remaining line count.
fn record_width(remaining: usize, task_count: usize) -> Result<usize, PlanFileError> {
    if task_count == 0 {
        return Ok(5);
    }
    for width in [5usize, 4, 2] {
        if remaining >= task_count * width {
            return Ok(width);
        }
    }
    Err(PlanFileError::Truncated("tasks"))
}
