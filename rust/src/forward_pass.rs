//! Forward pass: earliest start and finish for every task.

use crate::graph::DependencyGraph;
use crate::interner::NodeId;

/// Earliest times indexed by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardPassResult {
    pub earliest_start: Vec<f64>,
    pub earliest_finish: Vec<f64>,
    /// Project horizon: the maximum earliest finish (0 for an empty graph).
    pub horizon: f64,
}

/// Compute ES/EF in topological order.
///
/// `ES(n) = max(EF(p))` over predecessors, or 0 for a task with none;
/// `EF(n) = ES(n) + duration(n)`. Every predecessor precedes `n` in
/// `topo_order`, so each value is final when first written.
pub fn forward_pass(graph: &DependencyGraph, topo_order: &[NodeId]) -> ForwardPassResult {
    let n = graph.len();
    let mut earliest_start = vec![0.0; n];
    let mut earliest_finish = vec![0.0; n];

    for &id in topo_order {
        let idx = id as usize;
        let node = graph.node(id);

        let es = node
            .predecessors
            .iter()
            .map(|&p| earliest_finish[p as usize])
            .fold(0.0, f64::max);

        earliest_start[idx] = es;
        earliest_finish[idx] = es + node.duration;
    }

    let horizon = earliest_finish.iter().copied().fold(0.0, f64::max);

    ForwardPassResult {
        earliest_start,
        earliest_finish,
        horizon,
    }
}
