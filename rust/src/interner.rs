//! Insertion-ordered index of normalized task names.
//!
//! Maps each name to a dense node id so the graph passes can use plain
//! `Vec` indexing, and keeps ids in first-insertion order so every derived
//! ordering is stable across runs.

use rustc_hash::FxHashMap;

/// Dense node id (u32 for compact adjacency lists).
pub type NodeId = u32;

/// Bidirectional name <-> id map; ids are assigned 0, 1, 2, ... in insertion order.
#[derive(Debug, Clone)]
pub struct NameIndex {
    to_id: FxHashMap<String, NodeId>,
    names: Vec<String>,
}

impl NameIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Insert a new name.
    ///
    /// Returns `Err(existing_id)` if the name is already present; the index
    /// is left unchanged in that case.
    pub fn insert(&mut self, name: &str) -> Result<NodeId, NodeId> {
        if let Some(&id) = self.to_id.get(name) {
            return Err(id);
        }
        let id = self.names.len() as NodeId;
        self.names.push(name.to_string());
        self.to_id.insert(name.to_string(), id);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.to_id.get(name).copied()
    }

    #[inline]
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
