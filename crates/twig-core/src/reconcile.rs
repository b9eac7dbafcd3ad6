//! In-place merging of a freshly materialized tree onto the live one.
//!
//! The reconciler walks `next` and `prev` top-down. It keeps `prev` whenever
//! the node kind and tag match, mutating only what differs, and swaps in the
//! whole `next` subtree otherwise. `next` is always consumed: its nodes are
//! either moved into the live tree or destroyed.

use crate::document::{Document, NodeId, NodeKind};
use crate::error::{NodeError, RenderError};
use crate::settings::RenderSettings;
use std::ops::AddAssign;
use std::rc::Rc;

/// Mutation counters for one or more reconciliations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub attributes_set: usize,
    pub attributes_removed: usize,
    pub listeners_attached: usize,
    pub listeners_detached: usize,
    pub properties_written: usize,
    pub texts_updated: usize,
    pub nodes_appended: usize,
    pub nodes_removed: usize,
    pub nodes_replaced: usize,
    /// `value` writes withheld because the element had focus.
    pub focus_skips: usize,
}

impl ReconcileStats {
    /// Attribute, listener, property and text writes.
    pub fn mutations(&self) -> usize {
        self.attributes_set
            + self.attributes_removed
            + self.listeners_attached
            + self.listeners_detached
            + self.properties_written
            + self.texts_updated
    }

    pub fn structural_changes(&self) -> usize {
        self.nodes_appended + self.nodes_removed + self.nodes_replaced
    }

    pub fn is_noop(&self) -> bool {
        self.mutations() == 0 && self.structural_changes() == 0
    }
}

impl AddAssign for ReconcileStats {
    fn add_assign(&mut self, rhs: Self) {
        self.attributes_set += rhs.attributes_set;
        self.attributes_removed += rhs.attributes_removed;
        self.listeners_attached += rhs.listeners_attached;
        self.listeners_detached += rhs.listeners_detached;
        self.properties_written += rhs.properties_written;
        self.texts_updated += rhs.texts_updated;
        self.nodes_appended += rhs.nodes_appended;
        self.nodes_removed += rhs.nodes_removed;
        self.nodes_replaced += rhs.nodes_replaced;
        self.focus_skips += rhs.focus_skips;
    }
}

/// Strategy for matching the children of two same-tag elements.
///
/// Implementations pair up children of `next` with children of `prev` and
/// must leave `prev` with exactly the children `next` describes, using
/// [`Reconciler::reconcile`], [`Reconciler::append_child`] and
/// [`Reconciler::remove_child`] so that statistics stay accurate.
pub trait ChildReconciler {
    fn reconcile_children(
        &self,
        reconciler: &mut Reconciler,
        document: &mut Document,
        next: NodeId,
        prev: NodeId,
    ) -> Result<(), RenderError>;
}

/// Matches children strictly by index. Supplied keys are ignored, so an
/// insertion anywhere but the tail rewrites every following sibling in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalChildren;

impl ChildReconciler for PositionalChildren {
    fn reconcile_children(
        &self,
        reconciler: &mut Reconciler,
        document: &mut Document,
        next: NodeId,
        prev: NodeId,
    ) -> Result<(), RenderError> {
        let next_children = document.children(next)?.to_vec();
        for (index, &next_child) in next_children.iter().enumerate() {
            match document.children(prev)?.get(index).copied() {
                Some(prev_child) => reconciler.reconcile(document, next_child, prev_child)?,
                None => reconciler.append_child(document, prev, next_child)?,
            }
        }
        loop {
            let children = document.children(prev)?;
            if children.len() <= next_children.len() {
                break;
            }
            let last = children[children.len() - 1];
            reconciler.remove_child(document, prev, last)?;
        }
        Ok(())
    }
}

enum Pairing {
    Text { update: Option<String> },
    Element,
    Mismatch,
}

pub struct Reconciler {
    settings: RenderSettings,
    children: Rc<dyn ChildReconciler>,
    stats: ReconcileStats,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl Reconciler {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            children: Rc::new(PositionalChildren),
            stats: ReconcileStats::default(),
        }
    }

    /// Replaces the child-list strategy.
    pub fn with_child_reconciler(mut self, strategy: impl ChildReconciler + 'static) -> Self {
        self.children = Rc::new(strategy);
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn stats(&self) -> ReconcileStats {
        self.stats
    }

    pub fn take_stats(&mut self) -> ReconcileStats {
        std::mem::take(&mut self.stats)
    }

    /// Makes `prev` match `next`, consuming `next`.
    pub fn reconcile(&mut self, document: &mut Document, next: NodeId, prev: NodeId) -> Result<(), RenderError> {
        if next == prev {
            return Ok(());
        }
        let pairing = match (document.kind(next)?, document.kind(prev)?) {
            (NodeKind::Text(new), NodeKind::Text(old)) => Pairing::Text {
                update: (new != old).then(|| new.to_owned()),
            },
            (NodeKind::Element(new), NodeKind::Element(old)) if new == old => Pairing::Element,
            _ => Pairing::Mismatch,
        };
        match pairing {
            Pairing::Text { update } => {
                if let Some(text) = update {
                    log::trace!("text {prev}: {text:?}");
                    document.set_text(prev, text)?;
                    self.stats.texts_updated += 1;
                }
                document.remove(next)?;
            }
            Pairing::Element => {
                self.merge_attributes(document, next, prev)?;
                self.merge_listeners(document, next, prev)?;
                self.merge_properties(document, next, prev)?;
                self.reconcile_children(document, next, prev)?;
                document.remove(next)?;
            }
            Pairing::Mismatch => self.replace(document, next, prev)?,
        }
        Ok(())
    }

    /// Runs the configured [`ChildReconciler`] for `next` and `prev`.
    pub fn reconcile_children(
        &mut self,
        document: &mut Document,
        next: NodeId,
        prev: NodeId,
    ) -> Result<(), RenderError> {
        let strategy = Rc::clone(&self.children);
        strategy.reconcile_children(self, document, next, prev)
    }

    pub fn append_child(&mut self, document: &mut Document, parent: NodeId, child: NodeId) -> Result<(), RenderError> {
        log::trace!("append {child} to {parent}");
        document.append_child(parent, child)?;
        self.stats.nodes_appended += 1;
        Ok(())
    }

    pub fn remove_child(&mut self, document: &mut Document, parent: NodeId, child: NodeId) -> Result<(), RenderError> {
        log::trace!("remove {child} from {parent}");
        document.remove_child(parent, child)?;
        self.stats.nodes_removed += 1;
        Ok(())
    }

    fn replace(&mut self, document: &mut Document, next: NodeId, prev: NodeId) -> Result<(), RenderError> {
        let parent = document.parent(prev)?.ok_or(NodeError::Detached { id: prev })?;
        log::trace!("replace {prev} with {next} under {parent}");
        document.replace_child(parent, next, prev)?;
        self.stats.nodes_replaced += 1;
        Ok(())
    }

    fn merge_attributes(&mut self, document: &mut Document, next: NodeId, prev: NodeId) -> Result<(), RenderError> {
        let wanted = document.attributes(next)?.clone();
        let stale: Vec<String> = document
            .attributes(prev)?
            .keys()
            .filter(|name| !wanted.contains_key(*name))
            .cloned()
            .collect();
        for name in stale {
            log::trace!("remove attribute {prev} {name}");
            document.remove_attribute(prev, &name)?;
            self.stats.attributes_removed += 1;
        }
        for (name, value) in wanted {
            if document.attribute(prev, &name)? == Some(value.as_str()) {
                continue;
            }
            log::trace!("set attribute {prev} {name}={value:?}");
            document.set_attribute(prev, name, value)?;
            self.stats.attributes_set += 1;
        }
        Ok(())
    }

    fn merge_listeners(&mut self, document: &mut Document, next: NodeId, prev: NodeId) -> Result<(), RenderError> {
        let wanted = document.listeners(next).cloned().unwrap_or_default();
        let current = document.listeners(prev).cloned().unwrap_or_default();
        for kind in current.keys() {
            if !wanted.contains_key(kind) {
                log::trace!("unbind {prev} {kind}");
                document.unbind_listener(prev, kind)?;
                self.stats.listeners_detached += 1;
            }
        }
        for (kind, listener) in wanted {
            match current.get(&kind) {
                Some(bound) if bound.ptr_eq(&listener) => {}
                bound => {
                    if bound.is_some() {
                        self.stats.listeners_detached += 1;
                    }
                    log::trace!("bind {prev} {kind}");
                    document.bind_listener(prev, &kind, listener)?;
                    self.stats.listeners_attached += 1;
                }
            }
        }
        Ok(())
    }

    /// `checked` and `value` mirror interactive state, so they are copied
    /// directly instead of going through the attribute diff.
    fn merge_properties(&mut self, document: &mut Document, next: NodeId, prev: NodeId) -> Result<(), RenderError> {
        let checked = document.checked(next)?;
        if document.checked(prev)? != checked {
            document.set_checked(prev, checked)?;
            self.stats.properties_written += 1;
        }

        let value = document.value(next)?.map(str::to_owned);
        if document.value(prev)? == value.as_deref() {
            return Ok(());
        }
        if self.settings.protect_focused_value && document.active_element() == Some(prev) {
            log::trace!("keep value of focused {prev}");
            self.stats.focus_skips += 1;
            return Ok(());
        }
        document.set_value(prev, value)?;
        self.stats.properties_written += 1;
        Ok(())
    }
}

/// Reconciles `next` onto `prev` with default settings and positional child matching.
pub fn reconcile(document: &mut Document, next: NodeId, prev: NodeId) -> Result<ReconcileStats, RenderError> {
    let mut reconciler = Reconciler::default();
    reconciler.reconcile(document, next, prev)?;
    Ok(reconciler.take_stats())
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
