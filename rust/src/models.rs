//! Core data types for the schedule calculator.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// A task as entered by the caller.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque caller identifier, passed through untouched.
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    /// Duration in days.
    #[pyo3(get, set)]
    pub duration: f64,
    /// Names of the tasks this one waits for.
    #[pyo3(get, set)]
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration: f64,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            dependencies,
        }
    }
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (id, name, duration, dependencies=None))]
    fn py_new(id: String, name: String, duration: f64, dependencies: Option<Vec<String>>) -> Self {
        Self::new(id, name, duration, dependencies.unwrap_or_default())
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, name={:?}, duration={}, deps={})",
            self.id,
            self.name,
            self.duration,
            self.dependencies.len()
        )
    }
}

/// A task annotated with its CPM timings.
///
/// `name` and `dependencies` are the normalized forms used by the graph.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub dependencies: Vec<String>,
    /// Earliest start.
    #[pyo3(get)]
    pub es: f64,
    /// Earliest finish.
    #[pyo3(get)]
    pub ef: f64,
    /// Latest start.
    #[pyo3(get)]
    pub ls: f64,
    /// Latest finish.
    #[pyo3(get)]
    pub lf: f64,
    /// `ls - es`.
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ScheduledTask {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(id={:?}, name={:?}, es={}, ef={}, ls={}, lf={}, slack={}, critical={})",
            self.id, self.name, self.es, self.ef, self.ls, self.lf, self.slack, self.critical
        )
    }
}

/// Full CPM schedule for a project.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// One entry per input task, in input order.
    #[pyo3(get)]
    pub tasks: Vec<ScheduledTask>,
    /// Normalized names along one zero-slack chain from project start to finish.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Project horizon: the maximum earliest finish.
    #[pyo3(get)]
    pub total_duration: f64,
}

impl ScheduleResult {
    /// Look up a scheduled task by its normalized name.
    pub fn task(&self, name: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Normalized names of every zero-slack task, in input order.
    pub fn critical_tasks(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.critical)
            .map(|t| t.name.as_str())
            .collect()
    }
}

#[pymethods]
impl ScheduleResult {
    #[pyo3(name = "critical_tasks")]
    fn py_critical_tasks(&self) -> Vec<String> {
        self.critical_tasks().into_iter().map(String::from).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, critical_path={:?}, total_duration={})",
            self.tasks.len(),
            self.critical_path,
            self.total_duration
        )
    }
}

/// Schedule plus the non-fatal warnings raised while building it.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    #[pyo3(get)]
    #[serde(flatten)]
    pub result: ScheduleResult,
    #[pyo3(get)]
    pub warnings: Vec<String>,
}

#[pymethods]
impl ScheduleOutcome {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleOutcome(tasks={}, total_duration={}, warnings={})",
            self.result.tasks.len(),
            self.result.total_duration,
            self.warnings.len()
        )
    }
}
