//! Anchoring day offsets to calendar dates.
//!
//! Plain day arithmetic from the project start: every calendar day counts,
//! fractional offsets round up to the next whole day.

use chrono::{Days, NaiveDate};
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::ScheduleResult;

/// Calendar dates for one scheduled task. Finish dates are exclusive: a
/// 5-day task starting on the 1st finishes on the 6th.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatedTask {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub earliest_start: NaiveDate,
    #[pyo3(get)]
    pub earliest_finish: NaiveDate,
    #[pyo3(get)]
    pub latest_start: NaiveDate,
    #[pyo3(get)]
    pub latest_finish: NaiveDate,
}

/// A schedule pinned to a project start date.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchoredSchedule {
    #[pyo3(get)]
    pub project_start: NaiveDate,
    #[pyo3(get)]
    pub projected_finish: NaiveDate,
    #[pyo3(get)]
    pub planned_end: Option<NaiveDate>,
    /// Days the projected finish falls after `planned_end` (0 when on time).
    #[pyo3(get)]
    pub overrun_days: i64,
    #[pyo3(get)]
    pub tasks: Vec<DatedTask>,
}

#[pymethods]
impl AnchoredSchedule {
    fn __repr__(&self) -> String {
        format!(
            "AnchoredSchedule(start={}, projected_finish={}, overrun_days={})",
            self.project_start, self.projected_finish, self.overrun_days
        )
    }
}

fn offset_date(start: NaiveDate, offset_days: f64) -> Result<NaiveDate, ScheduleError> {
    start
        .checked_add_days(Days::new(offset_days.max(0.0).ceil() as u64))
        .ok_or(ScheduleError::DateOutOfRange {
            start,
            offset_days,
        })
}

/// Convert the day offsets of `result` into dates counted from `start`.
pub fn anchor_schedule(
    result: &ScheduleResult,
    start: NaiveDate,
    planned_end: Option<NaiveDate>,
) -> Result<AnchoredSchedule, ScheduleError> {
    let tasks = result
        .tasks
        .iter()
        .map(|task| {
            Ok(DatedTask {
                id: task.id.clone(),
                name: task.name.clone(),
                earliest_start: offset_date(start, task.es)?,
                earliest_finish: offset_date(start, task.ef)?,
                latest_start: offset_date(start, task.ls)?,
                latest_finish: offset_date(start, task.lf)?,
            })
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;

    let projected_finish = offset_date(start, result.total_duration)?;
    let overrun_days = planned_end
        .map(|end| (projected_finish - end).num_days().max(0))
        .unwrap_or(0);

    Ok(AnchoredSchedule {
        project_start: start,
        projected_finish,
        planned_end,
        overrun_days,
        tasks,
    })
}
