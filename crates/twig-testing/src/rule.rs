use crate::query;
use crate::shape::NodeShape;
use std::rc::Rc;
use twig_core::{
    format_tree, Document, Host, Mount, NodeError, NodeId, ReconcileStats, RenderError, RenderSettings, VNode,
};

type Content = Rc<dyn Fn() -> VNode>;

/// Headless harness that owns a host and a render target.
///
/// `set_content` installs a view function and renders it once;
/// `recompose` calls it again and diffs the result onto the live tree.
/// Interactions dispatch straight to the document and do not re-render.
pub struct RenderTestRule {
    host: Host,
    mount: Mount,
    content: Option<Content>,
    last_stats: ReconcileStats,
}

impl Default for RenderTestRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTestRule {
    pub fn new() -> Self {
        Self::with_settings(RenderSettings::default())
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        let host = Host::new();
        let mount = host
            .mount_with_settings("main", settings)
            .expect("fresh host is not borrowed");
        Self {
            host,
            mount,
            content: None,
            last_stats: ReconcileStats::default(),
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn target(&self) -> NodeId {
        self.mount.target()
    }

    pub fn set_content(&mut self, content: impl Fn() -> VNode + 'static) -> Result<ReconcileStats, RenderError> {
        self.content = Some(Rc::new(content));
        self.recompose()
    }

    /// Renders the installed content again. Without content this is a no-op.
    pub fn recompose(&mut self) -> Result<ReconcileStats, RenderError> {
        let Some(content) = self.content.clone() else {
            return Ok(ReconcileStats::default());
        };
        let stats = self.mount.render(&content())?;
        log::debug!("recompose #{}: {stats:?}", self.mount.passes());
        self.last_stats = stats;
        Ok(stats)
    }

    /// Renders an arbitrary tree, bypassing the installed content.
    pub fn render(&mut self, vtree: &VNode) -> Result<ReconcileStats, RenderError> {
        let stats = self.mount.render(vtree)?;
        self.last_stats = stats;
        Ok(stats)
    }

    pub fn last_stats(&self) -> ReconcileStats {
        self.last_stats
    }

    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&*self.host.document())
    }

    /// Single top-level node of the target.
    pub fn root_node(&self) -> Option<NodeId> {
        self.with_document(|document| {
            document
                .children(self.target())
                .ok()
                .and_then(|children| children.first().copied())
        })
    }

    pub fn shape(&self) -> Result<NodeShape, NodeError> {
        self.with_document(|document| NodeShape::capture(document, self.target()))
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.with_document(|document| query::find_by_tag(document, self.target(), tag))
    }

    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.with_document(|document| query::find_by_class(document, self.target(), class))
    }

    pub fn find_by_text(&self, text: &str) -> Option<NodeId> {
        self.with_document(|document| query::find_by_text(document, self.target(), text))
    }

    pub fn texts(&self) -> Vec<String> {
        self.with_document(|document| query::texts(document, self.target()))
    }

    pub fn text_content(&self) -> String {
        self.with_document(|document| document.text_content(self.target()).unwrap_or_default())
    }

    pub fn dump(&self) -> String {
        self.with_document(|document| format_tree(document, self.target()))
    }

    pub fn click(&self, id: NodeId) -> Result<usize, RenderError> {
        self.host.click(id)
    }

    pub fn double_click(&self, id: NodeId) -> Result<usize, RenderError> {
        self.host.double_click(id)
    }

    /// Focuses `id` and replaces its value with `text`, firing `input`.
    pub fn type_text(&self, id: NodeId, text: &str) -> Result<usize, RenderError> {
        self.host.focus(id)?;
        self.host.input(id, text)
    }

    pub fn press_key(&self, id: NodeId, key: &str) -> Result<usize, RenderError> {
        self.host.key_down(id, key)
    }

    pub fn toggle(&self, id: NodeId) -> Result<usize, RenderError> {
        self.host.toggle(id)
    }

    pub fn focus(&self, id: NodeId) -> Result<(), RenderError> {
        self.host.focus(id)
    }

    pub fn blur(&self) -> Result<(), RenderError> {
        self.host.blur()
    }
}

#[cfg(test)]
#[path = "tests/rule_tests.rs"]
mod tests;
