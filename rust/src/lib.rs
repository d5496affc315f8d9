//! Critical Path Method (CPM) schedule calculator.
//!
//! Given tasks with durations and named predecessors, computes earliest and
//! latest start/finish times, slack, and the critical path. Usable as a Rust
//! library, as the `cpm.rust` Python module, or through the `cpm-schedule`
//! command-line tool.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod backward_pass;
pub mod calendar;
mod config;
pub mod critical_path;
mod error;
pub mod forward_pass;
pub mod graph;
pub mod interner;
pub mod logging;
mod models;
pub mod normalize;
mod schedule;

pub use calendar::{anchor_schedule, AnchoredSchedule, DatedTask};
pub use config::{ScheduleConfig, DEFAULT_SLACK_EPSILON};
pub use error::ScheduleError;
pub use graph::{DependencyGraph, GraphWarning};
pub use models::{ScheduleOutcome, ScheduleResult, ScheduledTask, Task};
pub use normalize::normalize_name;
pub use schedule::{compute_schedule, compute_schedule_with_config};

fn to_py_err(err: ScheduleError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Compute the CPM schedule for a list of tasks.
///
/// # Arguments
/// * `tasks` - Tasks in display order; names and dependency names are normalized
/// * `config` - Optional ScheduleConfig (slack epsilon, verbosity)
///
/// # Returns
/// * ScheduleOutcome with the annotated tasks, critical path, total duration
///   and dependency warnings
///
/// # Raises
/// * ValueError for empty input, invalid durations, duplicate names or a dependency cycle
#[pyfunction]
#[pyo3(name = "compute_schedule", signature = (tasks, config=None))]
fn py_compute_schedule(
    tasks: Vec<Task>,
    config: Option<ScheduleConfig>,
) -> PyResult<ScheduleOutcome> {
    let config = config.unwrap_or_default();
    compute_schedule_with_config(&tasks, &config).map_err(to_py_err)
}

/// Pin a computed schedule to calendar dates counted from `start`.
///
/// # Raises
/// * ValueError if a date falls outside the supported range
#[pyfunction]
#[pyo3(name = "anchor_schedule", signature = (result, start, planned_end=None))]
fn py_anchor_schedule(
    result: ScheduleResult,
    start: NaiveDate,
    planned_end: Option<NaiveDate>,
) -> PyResult<AnchoredSchedule> {
    anchor_schedule(&result, start, planned_end).map_err(to_py_err)
}

/// Canonical form of a task name.
#[pyfunction]
#[pyo3(name = "normalize_name")]
fn py_normalize_name(name: &str) -> String {
    normalize_name(name)
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<ScheduledTask>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<ScheduleOutcome>()?;
    m.add_class::<DatedTask>()?;
    m.add_class::<AnchoredSchedule>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_anchor_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_normalize_name, m)?)?;

    Ok(())
}
