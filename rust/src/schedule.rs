//! Schedule computation pipeline.
//!
//! Normalize -> build graph -> topological order -> forward pass ->
//! backward pass -> critical path. Every call builds its own graph and
//! buffers, so independent calls can run on any number of threads.

use crate::backward_pass::backward_pass;
use crate::config::ScheduleConfig;
use crate::critical_path::extract_critical_path;
use crate::error::ScheduleError;
use crate::forward_pass::forward_pass;
use crate::graph::DependencyGraph;
use crate::models::{ScheduleOutcome, ScheduleResult, ScheduledTask, Task};
use crate::normalize::normalize_name;
use crate::{log_changes, log_checks, log_debug};

/// Compute the CPM schedule with the default configuration.
pub fn compute_schedule(tasks: &[Task]) -> Result<ScheduleOutcome, ScheduleError> {
    compute_schedule_with_config(tasks, &ScheduleConfig::default())
}

/// Compute the CPM schedule for `tasks`.
///
/// # Returns
/// * `Ok(ScheduleOutcome)` with one scheduled task per input task (same
///   order) and a warning for every dependency name that matched no task
/// * `Err(ScheduleError)` for an empty task list, a negative or non-finite
///   duration, two tasks sharing a normalized name, a dependency cycle, or
///   an invalid `slack_epsilon`
pub fn compute_schedule_with_config(
    tasks: &[Task],
    config: &ScheduleConfig,
) -> Result<ScheduleOutcome, ScheduleError> {
    let verbosity = config.verbosity;
    config.validate()?;

    if tasks.is_empty() {
        return Err(ScheduleError::EmptyTaskList);
    }

    let normalized: Vec<Task> = tasks.iter().map(normalize_task).collect();

    if let Some(task) = normalized
        .iter()
        .find(|t| !t.duration.is_finite() || t.duration < 0.0)
    {
        return Err(ScheduleError::InvalidDuration {
            task: task.name.clone(),
            duration: task.duration,
        });
    }

    let (graph, graph_warnings) = DependencyGraph::build(&normalized)?;
    for task in &normalized {
        for dep in &task.dependencies {
            if dep.is_empty() {
                log_checks!(verbosity, "  Skipping empty dependency of '{}'", task.name);
            } else if *dep == task.name {
                log_checks!(verbosity, "  Skipping self dependency of '{}'", task.name);
            }
        }
    }
    for warning in &graph_warnings {
        log_checks!(verbosity, "  Warning: {}", warning);
    }

    let topo_order = graph.topological_order()?;
    let forward = forward_pass(&graph, &topo_order);
    let backward = backward_pass(&graph, &topo_order, forward.horizon);
    let critical = extract_critical_path(&graph, &forward, &backward, config);

    // Node ids are input positions: the graph inserts tasks in order and
    // rejects duplicate names.
    let scheduled: Vec<ScheduledTask> = normalized
        .into_iter()
        .enumerate()
        .map(|(idx, task)| {
            let scheduled = ScheduledTask {
                id: task.id,
                name: task.name,
                duration: task.duration,
                dependencies: task.dependencies,
                es: forward.earliest_start[idx],
                ef: forward.earliest_finish[idx],
                ls: backward.latest_start[idx],
                lf: backward.latest_finish[idx],
                slack: critical.slack[idx],
                critical: critical.critical[idx],
            };
            log_debug!(
                verbosity,
                "  {}: ES={} EF={} LS={} LF={} slack={}{}",
                scheduled.name,
                scheduled.es,
                scheduled.ef,
                scheduled.ls,
                scheduled.lf,
                scheduled.slack,
                if scheduled.critical { " (critical)" } else { "" }
            );
            scheduled
        })
        .collect();

    let critical_path: Vec<String> = critical
        .path
        .iter()
        .map(|&id| graph.name_of(id).to_string())
        .collect();

    log_changes!(
        verbosity,
        "Total duration: {} days, critical path: {}",
        forward.horizon,
        critical_path.join(" -> ")
    );

    Ok(ScheduleOutcome {
        result: ScheduleResult {
            tasks: scheduled,
            critical_path,
            total_duration: forward.horizon,
        },
        warnings: graph_warnings.iter().map(|w| w.to_string()).collect(),
    })
}

fn normalize_task(task: &Task) -> Task {
    Task {
        id: task.id.clone(),
        name: normalize_name(&task.name),
        duration: task.duration,
        dependencies: task
            .dependencies
            .iter()
            .map(|dep| normalize_name(dep))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, name: &str, duration: f64, deps: Vec<&str>) -> Task {
        Task::new(
            id,
            name,
            duration,
            deps.into_iter().map(String::from).collect(),
        )
    }

    fn sample_project() -> Vec<Task> {
        vec![
            make_task("1", "A=Site preparation", 5.0, vec![]),
            make_task("2", "B=Foundation", 10.0, vec!["A=Site preparation"]),
            make_task("3", "C=Structure", 20.0, vec!["B=Foundation"]),
            make_task("4", "D=MEP", 15.0, vec!["C=Structure"]),
            make_task("5", "E=Finishing", 12.0, vec!["D=MEP"]),
            make_task("6", "F=Handover", 5.0, vec!["E=Finishing"]),
        ]
    }

    #[test]
    fn test_linear_chain_all_critical() {
        let outcome = compute_schedule(&sample_project()).unwrap();
        let result = &outcome.result;

        assert!(outcome.warnings.is_empty());
        assert_eq!(result.total_duration, 67.0);

        let es: Vec<f64> = result.tasks.iter().map(|t| t.es).collect();
        let ef: Vec<f64> = result.tasks.iter().map(|t| t.ef).collect();
        assert_eq!(es, vec![0.0, 5.0, 15.0, 35.0, 50.0, 62.0]);
        assert_eq!(ef, vec![5.0, 15.0, 35.0, 50.0, 62.0, 67.0]);

        for task in &result.tasks {
            assert_eq!(task.slack, 0.0);
            assert!(task.critical);
            assert_eq!(task.ls, task.es);
            assert_eq!(task.lf, task.ef);
        }
        assert_eq!(
            result.critical_path,
            [
                "A-Site preparation",
                "B-Foundation",
                "C-Structure",
                "D-MEP",
                "E-Finishing",
                "F-Handover"
            ]
        );
    }

    #[test]
    fn test_two_independent_tasks() {
        let tasks = vec![
            make_task("1", "short", 3.0, vec![]),
            make_task("2", "long", 7.0, vec![]),
        ];
        let result = compute_schedule(&tasks).unwrap().result;

        assert_eq!(result.total_duration, 7.0);
        let short = result.task("short").unwrap();
        let long = result.task("long").unwrap();
        assert_eq!(short.slack, 4.0);
        assert!(!short.critical);
        assert_eq!(long.slack, 0.0);
        assert!(long.critical);
        assert_eq!(result.critical_path, ["long"]);
    }

    #[test]
    fn test_dangling_dependency_warns_per_reference() {
        let tasks = vec![
            make_task("1", "a", 4.0, vec![]),
            make_task("2", "b", 2.0, vec!["a", "Ghost  task"]),
            make_task("3", "c", 1.0, vec!["Ghost task"]),
        ];
        let outcome = compute_schedule(&tasks).unwrap();

        assert_eq!(
            outcome.warnings,
            vec![
                "dependency 'Ghost task' for task 'b' not found".to_string(),
                "dependency 'Ghost task' for task 'c' not found".to_string(),
            ]
        );
        let result = &outcome.result;
        assert_eq!(result.task("b").unwrap().es, 4.0);
        assert_eq!(result.task("c").unwrap().es, 0.0);
    }

    #[test]
    fn test_single_dangling_dependency() {
        let tasks = vec![
            make_task("1", "a", 4.0, vec![]),
            make_task("2", "b", 2.0, vec!["nope"]),
        ];
        let outcome = compute_schedule(&tasks).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("'nope'"));
        assert_eq!(outcome.result.task("b").unwrap().es, 0.0);
    }

    #[test]
    fn test_self_dependency_ignored() {
        let tasks = vec![
            make_task("1", "a", 3.0, vec![]),
            make_task("2", "b", 2.0, vec!["b", "a"]),
        ];
        let outcome = compute_schedule(&tasks).unwrap();

        assert!(outcome.warnings.is_empty());
        let b = outcome.result.task("b").unwrap();
        assert_eq!(b.es, 3.0);
        assert_eq!(b.ef, 5.0);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let tasks = sample_project();
        let first = compute_schedule(&tasks).unwrap();
        let second = compute_schedule(&tasks).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_durations() {
        let tasks = vec![
            make_task("1", "a", 0.0, vec![]),
            make_task("2", "b", 0.0, vec!["a"]),
            make_task("3", "c", 0.0, vec![]),
        ];
        let result = compute_schedule(&tasks).unwrap().result;

        assert_eq!(result.total_duration, 0.0);
        for task in &result.tasks {
            assert_eq!((task.es, task.ef, task.ls, task.lf, task.slack), (0.0, 0.0, 0.0, 0.0, 0.0));
            assert!(task.critical);
        }
        assert_eq!(result.critical_path, ["a", "b"]);
    }

    #[test]
    fn test_names_match_after_normalization() {
        let tasks = vec![
            make_task("1", "A=Site  prep", 5.0, vec![]),
            make_task("2", "B", 2.0, vec!["A =  Site prep"]),
        ];
        let outcome = compute_schedule(&tasks).unwrap();

        assert!(outcome.warnings.is_empty());
        let b = outcome.result.task("B").unwrap();
        assert_eq!(b.es, 5.0);
        assert_eq!(b.dependencies, ["A-Site prep"]);
        assert_eq!(outcome.result.tasks[0].name, "A-Site prep");
    }

    #[test]
    fn test_output_keeps_input_order_and_ids() {
        let tasks = vec![
            make_task("x9", "last", 1.0, vec!["first"]),
            make_task("x1", "first", 2.0, vec![]),
        ];
        let result = compute_schedule(&tasks).unwrap().result;

        let ids: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["x9", "x1"]);
        assert_eq!(result.tasks[0].es, 2.0);
        assert_eq!(result.critical_path, ["first", "last"]);
    }

    #[test]
    fn test_multi_branch_project() {
        // Design -> Excavation -> Foundation -> {Main Structure, Utilities} -> Finishing
        let tasks = vec![
            make_task("1", "Design Approval", 10.0, vec![]),
            make_task("2", "Excavation", 7.0, vec!["Design Approval"]),
            make_task("3", "Foundation", 12.0, vec!["Excavation"]),
            make_task("4", "Main Structure", 25.0, vec!["Foundation"]),
            make_task("5", "Utilities", 10.0, vec!["Foundation"]),
            make_task("6", "Finishing", 15.0, vec!["Main Structure", "Utilities"]),
        ];
        let result = compute_schedule(&tasks).unwrap().result;

        assert_eq!(result.total_duration, 69.0);
        let utilities = result.task("Utilities").unwrap();
        assert_eq!(utilities.slack, 15.0);
        assert!(!utilities.critical);
        assert_eq!(
            result.critical_path,
            [
                "Design Approval",
                "Excavation",
                "Foundation",
                "Main Structure",
                "Finishing"
            ]
        );
    }

    #[test]
    fn test_disjoint_critical_chains() {
        let tasks = vec![
            make_task("1", "p1", 4.0, vec![]),
            make_task("2", "q1", 2.0, vec![]),
            make_task("3", "p2", 1.0, vec!["p1"]),
            make_task("4", "q2", 3.0, vec!["q1"]),
        ];
        let result = compute_schedule(&tasks).unwrap().result;

        assert_eq!(result.critical_tasks(), ["p1", "q1", "p2", "q2"]);
        assert_eq!(result.critical_path, ["p1", "p2"]);
    }

    #[test]
    fn test_invariants_hold() {
        let tasks = vec![
            make_task("1", "a", 3.0, vec![]),
            make_task("2", "b", 4.0, vec!["a"]),
            make_task("3", "c", 2.0, vec!["a"]),
            make_task("4", "d", 6.0, vec![]),
            make_task("5", "e", 1.0, vec!["b", "c"]),
        ];
        let result = compute_schedule(&tasks).unwrap().result;

        let max_ef = result.tasks.iter().map(|t| t.ef).fold(0.0, f64::max);
        assert_eq!(result.total_duration, max_ef);
        for task in &result.tasks {
            assert!((task.ef - (task.es + task.duration)).abs() < 1e-9);
            assert!((task.lf - (task.ls + task.duration)).abs() < 1e-9);
            assert!(task.slack >= 0.0);
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(compute_schedule(&[]), Err(ScheduleError::EmptyTaskList));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let tasks = vec![make_task("1", "a", -1.0, vec![])];
        assert_eq!(
            compute_schedule(&tasks),
            Err(ScheduleError::InvalidDuration {
                task: "a".to_string(),
                duration: -1.0,
            })
        );
    }

    #[test]
    fn test_nan_duration_rejected() {
        let tasks = vec![make_task("1", "a", f64::NAN, vec![])];
        assert!(matches!(
            compute_schedule(&tasks),
            Err(ScheduleError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_duplicate_normalized_name_rejected() {
        let tasks = vec![
            make_task("1", "A=Site", 1.0, vec![]),
            make_task("2", " A-Site ", 1.0, vec![]),
        ];
        assert_eq!(
            compute_schedule(&tasks),
            Err(ScheduleError::DuplicateTaskName {
                name: "A-Site".to_string(),
                first_id: "1".to_string(),
                second_id: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let tasks = vec![
            make_task("1", "a", 1.0, vec![]),
            make_task("2", "b", 1.0, vec!["a", "c"]),
            make_task("3", "c", 1.0, vec!["b"]),
        ];
        assert_eq!(
            compute_schedule(&tasks),
            Err(ScheduleError::CyclicDependency {
                tasks: vec!["b".to_string(), "c".to_string()],
            })
        );
    }

    #[test]
    fn test_concurrent_calls_independent() {
        let handles: Vec<_> = (1..=8)
            .map(|n| {
                std::thread::spawn(move || {
                    let tasks = vec![
                        make_task("1", "a", n as f64, vec![]),
                        make_task("2", "b", 1.0, vec!["a"]),
                    ];
                    compute_schedule(&tasks).unwrap().result.total_duration
                })
            })
            .collect();

        for (n, handle) in (1..=8).zip(handles) {
            assert_eq!(handle.join().unwrap(), n as f64 + 1.0);
        }
    }

    #[test]
    fn test_verbose_config_same_result() {
        let tasks = sample_project();
        let config = ScheduleConfig {
            verbosity: 3,
            ..Default::default()
        };
        assert_eq!(
            compute_schedule_with_config(&tasks, &config),
            compute_schedule(&tasks)
        );
    }

    #[test]
    fn test_exact_slack_comparison() {
        let tasks = vec![
            make_task("1", "a", 5.0, vec![]),
            make_task("2", "b", 3.0, vec!["a"]),
            make_task("3", "side", 1.0, vec![]),
        ];
        let config = ScheduleConfig {
            slack_epsilon: 0.0,
            ..Default::default()
        };
        let result = compute_schedule_with_config(&tasks, &config)
            .unwrap()
            .result;

        let critical: Vec<bool> = result.tasks.iter().map(|t| t.critical).collect();
        assert_eq!(critical, vec![true, true, false]);
        assert_eq!(result.critical_path, ["a", "b"]);
    }

    #[test]
    fn test_invalid_slack_epsilon_rejected() {
        let tasks = sample_project();
        let config = ScheduleConfig {
            slack_epsilon: -0.5,
            ..Default::default()
        };
        assert_eq!(
            compute_schedule_with_config(&tasks, &config),
            Err(ScheduleError::InvalidSlackEpsilon { epsilon: -0.5 })
        );
    }

    #[test]
    fn test_skipped_edges_logged_without_changing_result() {
        let tasks = vec![
            make_task("1", "a", 2.0, vec!["", "a"]),
            make_task("2", "b", 1.0, vec!["a"]),
        ];
        let config = ScheduleConfig {
            verbosity: 2,
            ..Default::default()
        };
        let outcome = compute_schedule_with_config(&tasks, &config).unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.result.total_duration, 3.0);
        assert_eq!(outcome.result.critical_path, ["a", "b"]);
    }
}
