//! Dependency graph construction and topological ordering.

use std::collections::VecDeque;
use std::fmt;

use crate::error::ScheduleError;
use crate::interner::{NameIndex, NodeId};
use crate::models::Task;

/// Non-fatal problem found while wiring dependency edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphWarning {
    /// A task names a dependency that matches no task; the edge is dropped.
    MissingDependency { dependency: String, task: String },
}

impl fmt::Display for GraphWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphWarning::MissingDependency { dependency, task } => {
                write!(f, "dependency '{}' for task '{}' not found", dependency, task)
            }
        }
    }
}

/// One task in the graph. Edge lists hold each neighbour once, in the order
/// the edge was first declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub duration: f64,
    pub predecessors: Vec<NodeId>,
    pub successors: Vec<NodeId>,
}

/// Directed task graph keyed by normalized name. Node ids follow input order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    index: NameIndex,
    nodes: Vec<Node>,
}

impl DependencyGraph {
    /// Build the graph from tasks whose names and dependencies are already normalized.
    ///
    /// Unknown dependencies produce a [`GraphWarning`] and no edge. Self
    /// dependencies and empty dependency names are skipped without a warning.
    /// Only a duplicate task name is fatal.
    pub fn build(tasks: &[Task]) -> Result<(Self, Vec<GraphWarning>), ScheduleError> {
        let mut index = NameIndex::with_capacity(tasks.len());
        let mut nodes = Vec::with_capacity(tasks.len());

        for task in tasks {
            if let Err(existing) = index.insert(&task.name) {
                return Err(ScheduleError::DuplicateTaskName {
                    name: task.name.clone(),
                    first_id: tasks[existing as usize].id.clone(),
                    second_id: task.id.clone(),
                });
            }
            nodes.push(Node {
                duration: task.duration,
                ..Default::default()
            });
        }

        let mut graph = Self { index, nodes };
        let mut warnings = Vec::new();

        for (task_idx, task) in tasks.iter().enumerate() {
            let task_id = task_idx as NodeId;
            for dep in &task.dependencies {
                if dep.is_empty() || *dep == task.name {
                    continue;
                }
                match graph.index.get(dep) {
                    Some(dep_id) => graph.add_edge(dep_id, task_id),
                    None => warnings.push(GraphWarning::MissingDependency {
                        dependency: dep.clone(),
                        task: task.name.clone(),
                    }),
                }
            }
        }

        Ok((graph, warnings))
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        let successors = &mut self.nodes[from as usize].successors;
        if successors.contains(&to) {
            return;
        }
        successors.push(to);
        self.nodes[to as usize].predecessors.push(from);
    }

    /// Number of tasks in the graph.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name)
    }

    /// Name of a node. Ids handed out by this graph always resolve.
    pub fn name_of(&self, id: NodeId) -> &str {
        self.index.resolve(id).unwrap_or_default()
    }

    /// Order nodes so every task comes after all of its predecessors (Kahn's algorithm).
    ///
    /// Ready nodes are processed first-in first-out, seeded in input order,
    /// so the result is deterministic. Fails with the tasks of one cycle if
    /// the graph is not acyclic.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, ScheduleError> {
        let mut in_degree: Vec<usize> = self.nodes.iter().map(|n| n.predecessors.len()).collect();

        let mut queue: VecDeque<NodeId> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| idx as NodeId)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &succ in &self.nodes[id as usize].successors {
                let degree = &mut in_degree[succ as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if order.len() != self.nodes.len() {
            let unresolved: Vec<bool> = in_degree.iter().map(|&d| d > 0).collect();
            return Err(ScheduleError::CyclicDependency {
                tasks: self.find_cycle(&unresolved),
            });
        }

        Ok(order)
    }

    /// Extract one cycle from the nodes Kahn's algorithm could not release.
    ///
    /// Every unresolved node has an unresolved predecessor, so walking
    /// predecessor edges inside that set must revisit a node.
    fn find_cycle(&self, unresolved: &[bool]) -> Vec<String> {
        let Some(start) = unresolved.iter().position(|&u| u) else {
            return Vec::new();
        };

        let mut position_on_walk: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut walk: Vec<NodeId> = Vec::new();
        let mut current = start as NodeId;

        let cycle_start = loop {
            if let Some(pos) = position_on_walk[current as usize] {
                break pos;
            }
            position_on_walk[current as usize] = Some(walk.len());
            walk.push(current);

            let next = self.nodes[current as usize]
                .predecessors
                .iter()
                .copied()
                .find(|&p| unresolved[p as usize]);
            match next {
                Some(p) => current = p,
                None => return Vec::new(),
            }
        };

        // The walk follows edges backwards; flip it into dependency order and
        // start from the earliest task in input order.
        let mut cycle: Vec<NodeId> = walk[cycle_start..].iter().rev().copied().collect();
        if let Some(min_pos) = cycle
            .iter()
            .enumerate()
            .min_by_key(|(_, &id)| id)
            .map(|(pos, _)| pos)
        {
            cycle.rotate_left(min_pos);
        }

        cycle
            .into_iter()
            .map(|id| self.name_of(id).to_string())
            .collect()
    }
}
