//! In-memory render target.
//!
//! The [`Document`] is an arena of concrete nodes addressed by generational
//! [`NodeId`]s. A destroyed node's id never resolves again, even after its
//! slot is reused, so callers holding stale ids get [`NodeError::Missing`]
//! instead of silently observing another node.

use crate::error::NodeError;
use crate::events::Listener;
use crate::listeners::{ListenerMap, ListenerTable};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Borrowed view of what a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind<'a> {
    Text(&'a str),
    Fragment,
    Element(&'a str),
}

#[derive(Debug)]
struct Binding {
    kind: String,
    listener: Listener,
}

#[derive(Debug)]
struct ElementData {
    tag: String,
    attributes: IndexMap<String, String>,
    bindings: SmallVec<[Binding; 2]>,
    value: Option<String>,
    checked: bool,
}

#[derive(Debug)]
enum Content {
    Text(String),
    Fragment,
    Element(ElementData),
}

#[derive(Debug)]
struct NodeData {
    content: Content,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

#[derive(Debug, Default)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    listeners: ListenerTable,
    roots: FxHashSet<NodeId>,
    focused: Option<NodeId>,
    live: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ── creation ────────────────────────────────────────────────────────

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Content::Text(text.into()))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(Content::Fragment)
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(Content::Element(ElementData {
            tag: tag.into(),
            attributes: IndexMap::new(),
            bindings: SmallVec::new(),
            value: None,
            checked: false,
        }))
    }

    /// Creates a container element that counts as connected to the document.
    /// Render targets are roots.
    pub fn create_root(&mut self, tag: impl Into<String>) -> NodeId {
        let id = self.create_element(tag);
        self.roots.insert(id);
        id
    }

    fn alloc(&mut self, content: Content) -> NodeId {
        let node = NodeData {
            content,
            parent: None,
            children: Vec::new(),
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    // ── queries ─────────────────────────────────────────────────────────

    fn node(&self, id: NodeId) -> Result<&NodeData, NodeError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(NodeError::Missing { id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, NodeError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(NodeError::Missing { id })
    }

    fn element(&self, id: NodeId) -> Result<&ElementData, NodeError> {
        match &self.node(id)?.content {
            Content::Element(element) => Ok(element),
            _ => Err(NodeError::NotAnElement { id }),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, NodeError> {
        match &mut self.node_mut(id)?.content {
            Content::Element(element) => Ok(element),
            _ => Err(NodeError::NotAnElement { id }),
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind<'_>, NodeError> {
        Ok(match &self.node(id)?.content {
            Content::Text(text) => NodeKind::Text(text.as_str()),
            Content::Fragment => NodeKind::Fragment,
            Content::Element(element) => NodeKind::Element(element.tag.as_str()),
        })
    }

    pub fn tag(&self, id: NodeId) -> Result<&str, NodeError> {
        Ok(self.element(id)?.tag.as_str())
    }

    pub fn text(&self, id: NodeId) -> Result<&str, NodeError> {
        match &self.node(id)?.content {
            Content::Text(text) => Ok(text.as_str()),
            _ => Err(NodeError::NotAText { id }),
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, NodeError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], NodeError> {
        Ok(self.node(id)?.children.as_slice())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>, NodeError> {
        Ok(self.element(id)?.attributes.get(name).map(String::as_str))
    }

    pub fn attributes(&self, id: NodeId) -> Result<&IndexMap<String, String>, NodeError> {
        Ok(&self.element(id)?.attributes)
    }

    pub fn value(&self, id: NodeId) -> Result<Option<&str>, NodeError> {
        Ok(self.element(id)?.value.as_deref())
    }

    pub fn checked(&self, id: NodeId) -> Result<bool, NodeError> {
        Ok(self.element(id)?.checked)
    }

    /// The listener side-table entry for `id`: one listener per event kind.
    pub fn listeners(&self, id: NodeId) -> Option<&ListenerMap> {
        self.listeners.get(id)
    }

    /// Listeners currently attached to `id` for `kind`, in attachment order.
    pub fn bound_listeners(&self, id: NodeId, kind: &str) -> Result<Vec<Listener>, NodeError> {
        Ok(self
            .element(id)?
            .bindings
            .iter()
            .filter(|binding| binding.kind == kind)
            .map(|binding| binding.listener.clone())
            .collect())
    }

    /// Total number of live bindings on `id`, all kinds.
    pub fn binding_count(&self, id: NodeId) -> Result<usize, NodeError> {
        Ok(self.element(id)?.bindings.len())
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.roots.contains(&id)
    }

    /// Whether `id` is a root or hangs below one.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.roots.contains(&node) {
                return true;
            }
            current = self.node(node).ok().and_then(|data| data.parent);
        }
        false
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = self.node(of).ok().and_then(|data| data.parent);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.node(node).ok().and_then(|data| data.parent);
        }
        false
    }

    /// Pre-order list of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, NodeError> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Concatenated text of every text node below `id`.
    pub fn text_content(&self, id: NodeId) -> Result<String, NodeError> {
        let mut out = String::new();
        for node in self.descendants(id)? {
            if let Content::Text(text) = &self.node(node)?.content {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    // ── focus ───────────────────────────────────────────────────────────

    pub fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus(&mut self, id: NodeId) -> Result<(), NodeError> {
        self.element(id)?;
        self.focused = Some(id);
        Ok(())
    }

    /// Drops focus, returning the element that held it.
    pub fn blur(&mut self) -> Option<NodeId> {
        self.focused.take()
    }

    // ── content mutation ────────────────────────────────────────────────

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), NodeError> {
        match &mut self.node_mut(id)?.content {
            Content::Text(current) => {
                *current = text.into();
                Ok(())
            }
            _ => Err(NodeError::NotAText { id }),
        }
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), NodeError> {
        self.element_mut(id)?
            .attributes
            .insert(name.into(), value.into());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, NodeError> {
        Ok(self.element_mut(id)?.attributes.shift_remove(name))
    }

    pub fn set_value(&mut self, id: NodeId, value: Option<String>) -> Result<(), NodeError> {
        self.element_mut(id)?.value = value;
        Ok(())
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), NodeError> {
        self.element_mut(id)?.checked = checked;
        Ok(())
    }

    /// Attaches `listener` for `kind` and records it in the side-table.
    ///
    /// An element holds at most one listener per kind: a previous binding for
    /// `kind` is detached and returned.
    pub fn bind_listener(
        &mut self,
        id: NodeId,
        kind: &str,
        listener: Listener,
    ) -> Result<Option<Listener>, NodeError> {
        self.element(id)?;
        let displaced = self.listeners.insert(id, kind, listener.clone());
        let element = self.element_mut(id)?;
        if let Some(old) = &displaced {
            element
                .bindings
                .retain(|binding| !(binding.kind == kind && binding.listener.ptr_eq(old)));
        }
        element.bindings.push(Binding {
            kind: kind.to_owned(),
            listener,
        });
        Ok(displaced)
    }

    /// Detaches the listener bound for `kind`, if any.
    pub fn unbind_listener(&mut self, id: NodeId, kind: &str) -> Result<Option<Listener>, NodeError> {
        self.element(id)?;
        let removed = self.listeners.remove(id, kind);
        if let Some(old) = &removed {
            self.element_mut(id)?
                .bindings
                .retain(|binding| !(binding.kind == kind && binding.listener.ptr_eq(old)));
        }
        Ok(removed)
    }

    // ── structure mutation ──────────────────────────────────────────────

    /// Appends `child` to `parent`, moving it out of its current parent.
    ///
    /// A fragment child is consumed: its children move into `parent` in order
    /// and the fragment node itself is destroyed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.insert_at(parent, child, None)
    }

    /// Inserts `child` before the node currently at `index` under `parent`,
    /// or at the end when `index` is past the last child.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<(), NodeError> {
        self.insert_at(parent, child, Some(index))
    }

    /// Puts `new` where `old` sits under `parent` and destroys the `old` subtree.
    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<(), NodeError> {
        self.ensure_container(parent)?;
        self.node(new)?;
        if self.node(old)?.parent != Some(parent) {
            return Err(NodeError::NotAChild { parent, child: old });
        }
        if new == old {
            return Ok(());
        }
        if new == parent || self.is_ancestor(new, parent) {
            return Err(NodeError::HierarchyRequest { parent, child: new });
        }
        if !matches!(self.node(new)?.content, Content::Fragment) {
            self.detach(new)?;
        }
        let index = self
            .node(parent)?
            .children
            .iter()
            .position(|&sibling| sibling == old)
            .ok_or(NodeError::NotAChild { parent, child: old })?;
        self.destroy(old)?;
        self.insert_at(parent, new, Some(index))
    }

    /// Detaches `child` from `parent` and destroys its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        if self.node(child)?.parent != Some(parent) {
            return Err(NodeError::NotAChild { parent, child });
        }
        self.destroy(child)
    }

    /// Destroys every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) -> Result<(), NodeError> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            self.node_mut(child)?.parent = None;
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Detaches `id` from its parent, if any, and destroys its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), NodeError> {
        self.destroy(id)
    }

    fn ensure_container(&self, id: NodeId) -> Result<(), NodeError> {
        match self.node(id)?.content {
            Content::Text(_) => Err(NodeError::NotAContainer { id }),
            _ => Ok(()),
        }
    }

    fn insert_at(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> Result<(), NodeError> {
        self.ensure_container(parent)?;
        self.node(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(NodeError::HierarchyRequest { parent, child });
        }
        if matches!(self.node(child)?.content, Content::Fragment) {
            let moved = std::mem::take(&mut self.node_mut(child)?.children);
            let mut at = index;
            for grandchild in moved {
                self.node_mut(grandchild)?.parent = None;
                self.link(parent, grandchild, at)?;
                if let Some(position) = at.as_mut() {
                    *position += 1;
                }
            }
            return self.destroy(child);
        }
        self.detach(child)?;
        self.link(parent, child, index)
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> Result<(), NodeError> {
        self.node_mut(child)?.parent = Some(parent);
        let children = &mut self.node_mut(parent)?.children;
        match index {
            Some(position) => children.insert(position.min(children.len()), child),
            None => children.push(child),
        }
        Ok(())
    }

    /// Unlinks `id` from its parent without destroying it.
    pub fn detach(&mut self, id: NodeId) -> Result<(), NodeError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        let siblings = &mut self.node_mut(parent)?.children;
        if let Some(position) = siblings.iter().position(|&sibling| sibling == id) {
            siblings.remove(position);
        }
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    fn destroy(&mut self, id: NodeId) -> Result<(), NodeError> {
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            self.live -= 1;
            self.listeners.drop_node(current);
            self.roots.remove(&current);
            if self.focused == Some(current) {
                self.focused = None;
            }
            stack.extend(node.children);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
