//! Activity id interning.
//!
//! Converts string activity ids to dense node indices so the precedence graph
//! can live in plain vectors. The interner is the graph's only id table.

use rustc_hash::FxHashMap;

/// Index of an activity in the graph arena.
pub type NodeId = u32;

/// Outcome of interning one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interned {
    /// First occurrence; the caller must append a node at this index.
    New(NodeId),
    /// The id already has a node; the caller decides whether to overwrite it.
    Existing(NodeId),
}

/// Maps activity ids to node indices and back.
#[derive(Debug, Clone)]
pub struct ActivityIdInterner {
    to_node: FxHashMap<String, NodeId>,
    from_node: Vec<String>,
}

impl ActivityIdInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_node: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_node: Vec::with_capacity(capacity),
        }
    }

    /// Intern an id, reporting whether it was seen before.
    pub fn intern(&mut self, id: &str) -> Interned {
        if let Some(&node) = self.to_node.get(id) {
            return Interned::Existing(node);
        }
        let node = self.from_node.len() as NodeId;
        self.from_node.push(id.to_string());
        self.to_node.insert(id.to_string(), node);
        Interned::New(node)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.to_node.get(id).copied()
    }

    #[inline]
    pub fn resolve(&self, node: NodeId) -> Option<&str> {
        self.from_node.get(node as usize).map(|s| s.as_str())
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.from_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_node.is_empty()
    }
}
