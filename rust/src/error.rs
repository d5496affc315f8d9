//! Errors that stop a schedule computation.

use chrono::NaiveDate;
use thiserror::Error;

/// Fatal input problems. Dangling dependencies are not errors; see
/// [`crate::graph::GraphWarning`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Task list is empty")]
    EmptyTaskList,
    #[error("Task '{task}' has invalid duration {duration} (must be a finite number >= 0)")]
    InvalidDuration { task: String, duration: f64 },
    #[error("Slack tolerance {epsilon} is invalid (must be a finite number >= 0)")]
    InvalidSlackEpsilon { epsilon: f64 },
    #[error("Tasks '{first_id}' and '{second_id}' share the name '{name}' after normalization")]
    DuplicateTaskName {
        name: String,
        first_id: String,
        second_id: String,
    },
    #[error("Circular dependency detected: {}", format_cycle(.tasks))]
    CyclicDependency {
        /// Task names along the cycle, each depending on the one before it.
        tasks: Vec<String>,
    },
    #[error("Offset of {offset_days} days from {start} is outside the supported date range")]
    DateOutOfRange { start: NaiveDate, offset_days: f64 },
}

fn format_cycle(tasks: &[String]) -> String {
    match tasks.first() {
        Some(first) => format!("{} -> {}", tasks.join(" -> "), first),
        None => String::new(),
    }
}
