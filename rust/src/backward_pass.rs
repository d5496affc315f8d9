//! Backward pass: latest start and finish for every task.

use crate::graph::DependencyGraph;
use crate::interner::NodeId;

/// Latest times indexed by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackwardPassResult {
    pub latest_start: Vec<f64>,
    pub latest_finish: Vec<f64>,
}

/// Compute LF/LS in reverse topological order.
///
/// Every task without successors finishes at `horizon`, even when its own
/// chain is shorter; otherwise `LF(n) = min(LS(s))` over successors.
/// `LS(n) = LF(n) - duration(n)`.
pub fn backward_pass(
    graph: &DependencyGraph,
    topo_order: &[NodeId],
    horizon: f64,
) -> BackwardPassResult {
    let n = graph.len();
    let mut latest_start = vec![0.0; n];
    let mut latest_finish = vec![0.0; n];

    for &id in topo_order.iter().rev() {
        let idx = id as usize;
        let node = graph.node(id);

        let lf = node
            .successors
            .iter()
            .map(|&s| latest_start[s as usize])
            .fold(horizon, f64::min);

        latest_finish[idx] = lf;
        latest_start[idx] = lf - node.duration;
    }

    BackwardPassResult {
        latest_start,
        latest_finish,
    }
}
