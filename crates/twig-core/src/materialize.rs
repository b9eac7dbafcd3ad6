//! Virtual node → concrete node conversion.

use crate::document::{Document, NodeId};
use crate::error::RenderError;
use crate::settings::RenderSettings;
use crate::vnode::{flatten, Thunk, VNode};

/// Turns virtual nodes into detached concrete nodes inside a [`Document`].
///
/// Nothing here diffs or touches a render target; the result is a fresh
/// subtree the caller attaches or hands to the [`Reconciler`](crate::Reconciler).
pub struct Materializer<'a> {
    pub(crate) document: &'a mut Document,
    pub(crate) settings: &'a RenderSettings,
    /// Passed-through nodes and where they sat before being moved, oldest first.
    passthrough: Vec<(NodeId, Option<(NodeId, usize)>)>,
}

impl<'a> Materializer<'a> {
    pub fn new(document: &'a mut Document, settings: &'a RenderSettings) -> Self {
        Self {
            document,
            settings,
            passthrough: Vec::new(),
        }
    }

    pub fn materialize(&mut self, vnode: &VNode) -> Result<NodeId, RenderError> {
        self.materialize_at(vnode, 0)
    }

    pub(crate) fn materialize_at(&mut self, vnode: &VNode, depth: usize) -> Result<NodeId, RenderError> {
        if depth > self.settings.max_depth {
            return Err(RenderError::DepthLimit {
                limit: self.settings.max_depth,
            });
        }
        match vnode {
            VNode::Empty => Ok(self.document.create_text("")),
            VNode::Text(text) => Ok(self.document.create_text(text.as_str())),
            VNode::Thunk(thunk) => {
                let resolved = self.resolve(thunk)?;
                self.materialize_at(&resolved, depth + 1)
            }
            VNode::Fragment(children) => {
                let fragment = self.document.create_fragment();
                for child in flatten(children) {
                    if let Err(err) = self.append_materialized(fragment, child, depth + 1) {
                        self.discard(fragment);
                        return Err(err);
                    }
                }
                Ok(fragment)
            }
            VNode::Materialized(id) => {
                let id = *id;
                let origin = match self.document.parent(id)? {
                    Some(parent) => {
                        let index = self.document.children(parent)?.iter().position(|&child| child == id);
                        index.map(|index| (parent, index))
                    }
                    None => None,
                };
                self.passthrough.push((id, origin));
                Ok(id)
            }
            VNode::Element(element) => self.build_element(element, depth),
        }
    }

    pub(crate) fn append_materialized(
        &mut self,
        parent: NodeId,
        child: &VNode,
        depth: usize,
    ) -> Result<(), RenderError> {
        let node = self.materialize_at(child, depth)?;
        if let Err(err) = self.document.append_child(parent, node) {
            if !self.is_passthrough(node) {
                self.discard(node);
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn is_passthrough(&self, node: NodeId) -> bool {
        self.passthrough.iter().any(|&(id, _)| id == node)
    }

    /// Frees a half-built subtree after a failure.
    ///
    /// Passed-through nodes are first put back where they were taken from,
    /// so they outlive the partial subtree and the live tree keeps its shape.
    pub(crate) fn discard(&mut self, node: NodeId) {
        let keep = self.is_passthrough(node);
        self.restore_passthrough();
        if keep || !self.document.contains(node) {
            return;
        }
        if let Err(err) = self.document.remove(node) {
            log::debug!("could not discard partial subtree {node}: {err}");
        }
    }

    /// Moves passed-through nodes back to their original position, newest first.
    fn restore_passthrough(&mut self) {
        while let Some((id, origin)) = self.passthrough.pop() {
            if !self.document.contains(id) {
                continue;
            }
            let restored = match origin {
                Some((parent, index)) if self.document.contains(parent) => {
                    self.document.insert_child(parent, id, index)
                }
                _ => self.document.detach(id),
            };
            if let Err(err) = restored {
                log::debug!("could not restore passed-through node {id}: {err}");
            }
        }
    }

    /// Invokes `thunk` until it yields something other than a thunk.
    fn resolve(&self, thunk: &Thunk) -> Result<VNode, RenderError> {
        let limit = self.settings.max_thunk_depth;
        let mut resolved = thunk.invoke();
        let mut invocations = 1;
        loop {
            match resolved {
                VNode::Thunk(next) => {
                    if invocations >= limit {
                        log::error!("thunk chain still unresolved after {invocations} invocations");
                        return Err(RenderError::ThunkRecursion { limit });
                    }
                    resolved = next.invoke();
                    invocations += 1;
                }
                other => return Ok(other),
            }
        }
    }
}

/// Materializes `vnode` with default settings.
pub fn materialize(document: &mut Document, vnode: &VNode) -> Result<NodeId, RenderError> {
    let settings = RenderSettings::default();
    Materializer::new(document, &settings).materialize(vnode)
}

#[cfg(test)]
#[path = "tests/materialize_tests.rs"]
mod tests;
