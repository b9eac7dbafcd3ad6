//! Per-node record of the listeners currently bound on each element.
//!
//! The table lives next to the node arena rather than inside the nodes so
//! that the reconciler can diff bindings without inspecting the live
//! binding lists. Entries are dropped together with their node.

use crate::document::NodeId;
use crate::events::Listener;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

pub type ListenerMap = IndexMap<String, Listener>;

#[derive(Debug, Default)]
pub struct ListenerTable {
    entries: FxHashMap<NodeId, ListenerMap>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&ListenerMap> {
        self.entries.get(&node)
    }

    /// Records `listener` for `kind`, returning the listener it displaced.
    pub fn insert(&mut self, node: NodeId, kind: &str, listener: Listener) -> Option<Listener> {
        self.entries
            .entry(node)
            .or_default()
            .insert(kind.to_owned(), listener)
    }

    pub fn remove(&mut self, node: NodeId, kind: &str) -> Option<Listener> {
        let map = self.entries.get_mut(&node)?;
        let removed = map.shift_remove(kind);
        if map.is_empty() {
            self.entries.remove(&node);
        }
        removed
    }

    pub fn drop_node(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }

    /// Number of nodes with at least one recorded binding.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
