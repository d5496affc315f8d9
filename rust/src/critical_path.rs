//! Slack, critical flags and critical path reconstruction.

use crate::backward_pass::BackwardPassResult;
use crate::config::ScheduleConfig;
use crate::forward_pass::ForwardPassResult;
use crate::graph::DependencyGraph;
use crate::interner::NodeId;

/// Per-node slack and criticality plus one start-to-finish critical chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriticalPathResult {
    /// `LS - ES`, indexed by node id.
    pub slack: Vec<f64>,
    /// `|slack| <= config.slack_epsilon`, indexed by node id.
    pub critical: Vec<bool>,
    /// Node ids from a zero-slack source to a zero-slack sink.
    pub path: Vec<NodeId>,
}

/// Derive slack for every node and walk one critical chain.
///
/// The chain starts at the first critical task (input order) without
/// predecessors and repeatedly moves to the first critical successor
/// (declaration order) that starts exactly when the current task finishes.
/// A critical task with successors always has such a successor, so the walk
/// ends at a task finishing on the project horizon. Critical tasks on other,
/// equally long chains keep their flag but are not part of `path`.
pub fn extract_critical_path(
    graph: &DependencyGraph,
    forward: &ForwardPassResult,
    backward: &BackwardPassResult,
    config: &ScheduleConfig,
) -> CriticalPathResult {
    let slack: Vec<f64> = backward
        .latest_start
        .iter()
        .zip(&forward.earliest_start)
        .map(|(ls, es)| ls - es)
        .collect();
    let critical: Vec<bool> = slack.iter().map(|&s| config.is_zero_slack(s)).collect();

    let start = graph
        .nodes()
        .iter()
        .enumerate()
        .find(|(idx, node)| critical[*idx] && node.predecessors.is_empty())
        .map(|(idx, _)| idx as NodeId);

    let mut path = Vec::new();
    let mut current = start;
    while let Some(id) = current {
        path.push(id);
        let finish = forward.earliest_finish[id as usize];
        current = graph.node(id).successors.iter().copied().find(|&s| {
            critical[s as usize]
                && config.is_zero_slack(forward.earliest_start[s as usize] - finish)
        });
    }

    CriticalPathResult {
        slack,
        critical,
        path,
    }
}
