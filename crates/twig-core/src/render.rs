use crate::document::{Document, NodeId, NodeKind};
use crate::error::RenderError;
use crate::materialize::Materializer;
use crate::reconcile::{ReconcileStats, Reconciler};
use crate::settings::RenderSettings;
use crate::vnode::VNode;

/// Owns the single root node inside a render target and drives render passes into it.
pub struct RenderRoot {
    target: NodeId,
    reconciler: Reconciler,
    passes: u64,
}

impl RenderRoot {
    pub fn new(target: NodeId) -> Self {
        Self::with_reconciler(target, Reconciler::default())
    }

    pub fn with_settings(target: NodeId, settings: RenderSettings) -> Self {
        Self::with_reconciler(target, Reconciler::new(settings))
    }

    pub fn with_reconciler(target: NodeId, reconciler: Reconciler) -> Self {
        Self {
            target,
            reconciler,
            passes: 0,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Number of render passes that completed successfully.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Materializes `vtree` and merges it into the target.
    ///
    /// The first pass into an empty target attaches the new tree as its only
    /// child. Later passes reconcile against that child. A fragment root owns
    /// several top-level nodes; its children are reconciled against the
    /// target's child list instead.
    pub fn render(&mut self, document: &mut Document, vtree: &VNode) -> Result<ReconcileStats, RenderError> {
        let target = self.target;
        let next = Materializer::new(document, self.reconciler.settings()).materialize(vtree)?;
        self.reconciler.take_stats();

        if let Err(err) = self.merge(document, next) {
            // Whatever of `next` was not moved into the live tree is unreachable now.
            let owned = !matches!(vtree, VNode::Materialized(_));
            if owned && document.parent(next) == Ok(None) {
                if let Err(cleanup) = document.remove(next) {
                    log::debug!("could not free unmerged tree {next}: {cleanup}");
                }
            }
            return Err(err);
        }

        self.passes += 1;
        let stats = self.reconciler.take_stats();
        log::debug!(
            "render pass {} into {target}: {} mutations, {} structural changes, {} focus skips",
            self.passes,
            stats.mutations(),
            stats.structural_changes(),
            stats.focus_skips
        );
        Ok(stats)
    }

    fn merge(&mut self, document: &mut Document, next: NodeId) -> Result<(), RenderError> {
        let target = self.target;
        if matches!(document.kind(next)?, NodeKind::Fragment) {
            self.reconciler.reconcile_children(document, next, target)?;
            document.remove(next)?;
            return Ok(());
        }
        match document.children(target)?.first().copied() {
            None => self.reconciler.append_child(document, target, next),
            Some(prev) => {
                self.reconciler.reconcile(document, next, prev)?;
                self.trim_surplus(document)
            }
        }
    }

    /// Removes top-level nodes left behind by an earlier fragment root.
    fn trim_surplus(&mut self, document: &mut Document) -> Result<(), RenderError> {
        loop {
            let children = document.children(self.target)?;
            if children.len() <= 1 {
                return Ok(());
            }
            let last = children[children.len() - 1];
            self.reconciler.remove_child(document, self.target, last)?;
        }
    }
}

/// One-shot render of `vtree` into `target` with default settings.
pub fn render(document: &mut Document, vtree: &VNode, target: NodeId) -> Result<ReconcileStats, RenderError> {
    RenderRoot::new(target).render(document, vtree)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
