//! Shared access to a [`Document`] from application code.
//!
//! Application glue (store subscribers, router callbacks, event handlers)
//! needs to reach the document from closures. [`Host`] wraps it in
//! `Rc<RefCell<_>>` and turns a second, overlapping mutable borrow into
//! [`RenderError::Reentrant`] rather than a panic.

use crate::document::{Document, NodeId, NodeKind};
use crate::error::RenderError;
use crate::events::Event;
use crate::reconcile::ReconcileStats;
use crate::render::RenderRoot;
use crate::settings::RenderSettings;
use crate::vnode::VNode;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct Host {
    document: Rc<RefCell<Document>>,
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.document.try_borrow() {
            Ok(document) => f.debug_struct("Host").field("nodes", &document.len()).finish(),
            Err(_) => f.write_str("Host { <rendering> }"),
        }
    }
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the document for reading. Panics if a render pass is running.
    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> Result<R, RenderError> {
        let document = self.document.try_borrow().map_err(|_| RenderError::Reentrant)?;
        Ok(f(&document))
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> Result<R, RenderError> {
        let mut document = self
            .document
            .try_borrow_mut()
            .map_err(|_| RenderError::Reentrant)?;
        Ok(f(&mut document))
    }

    /// Creates a fresh root container and binds a [`Mount`] to it.
    pub fn mount(&self, tag: &str) -> Result<Mount, RenderError> {
        self.mount_with_settings(tag, RenderSettings::default())
    }

    pub fn mount_with_settings(&self, tag: &str, settings: RenderSettings) -> Result<Mount, RenderError> {
        let target = self.update(|document| document.create_root(tag))?;
        Ok(Mount {
            host: self.clone(),
            root: Rc::new(RefCell::new(RenderRoot::with_settings(target, settings))),
        })
    }

    /// Delivers `event` to the listeners bound on its target.
    ///
    /// Events do not bubble. The document borrow is released before any
    /// listener runs, so listeners are free to trigger render passes.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &Event) -> Result<usize, RenderError> {
        let listeners = self.read(|document| document.bound_listeners(event.target, &event.kind))??;
        log::trace!("dispatch {} to {} ({} listeners)", event.kind, event.target, listeners.len());
        for listener in &listeners {
            listener.call(event);
        }
        Ok(listeners.len())
    }

    fn event(&self, kind: &str, target: NodeId) -> Result<Event, RenderError> {
        self.read(|document| {
            let mut event = Event::new(kind, target);
            if let Ok(NodeKind::Element(_)) = document.kind(target) {
                event.value = document.value(target).ok().flatten().map(str::to_owned);
                event.checked = document.checked(target).unwrap_or_default();
            }
            event
        })
    }

    pub fn click(&self, target: NodeId) -> Result<usize, RenderError> {
        let event = self.event("click", target)?;
        self.dispatch(&event)
    }

    pub fn double_click(&self, target: NodeId) -> Result<usize, RenderError> {
        let event = self.event("dblclick", target)?;
        self.dispatch(&event)
    }

    /// Replaces the live value of `target` as typing would, then fires `input`.
    pub fn input(&self, target: NodeId, text: &str) -> Result<usize, RenderError> {
        self.update(|document| document.set_value(target, Some(text.to_owned())))??;
        let event = self.event("input", target)?;
        self.dispatch(&event)
    }

    pub fn key_down(&self, target: NodeId, key: &str) -> Result<usize, RenderError> {
        let event = self.event("keydown", target)?.with_key(key);
        self.dispatch(&event)
    }

    /// Flips the live `checked` property, then fires `change`.
    pub fn toggle(&self, target: NodeId) -> Result<usize, RenderError> {
        self.update(|document| {
            let checked = document.checked(target)?;
            document.set_checked(target, !checked)
        })??;
        let event = self.event("change", target)?;
        self.dispatch(&event)
    }

    /// Moves focus to `target`, firing `blur` on the element that loses it.
    pub fn focus(&self, target: NodeId) -> Result<(), RenderError> {
        let previous = self.update(|document| {
            let previous = document.active_element();
            document.focus(target).map(|()| previous)
        })??;
        if let Some(previous) = previous.filter(|&previous| previous != target) {
            let event = self.event("blur", previous)?;
            self.dispatch(&event)?;
        }
        let event = self.event("focus", target)?;
        self.dispatch(&event)?;
        Ok(())
    }

    pub fn blur(&self) -> Result<(), RenderError> {
        if let Some(previous) = self.update(Document::blur)? {
            let event = self.event("blur", previous)?;
            self.dispatch(&event)?;
        }
        Ok(())
    }
}

/// A [`RenderRoot`] bound to a [`Host`]. Cheap to clone; clones share the root.
#[derive(Clone)]
pub struct Mount {
    host: Host,
    root: Rc<RefCell<RenderRoot>>,
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("target", &self.target())
            .field("host", &self.host)
            .finish()
    }
}

impl Mount {
    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn target(&self) -> NodeId {
        self.root.borrow().target()
    }

    pub fn passes(&self) -> u64 {
        self.root.borrow().passes()
    }

    /// Runs one render pass. Fails with [`RenderError::Reentrant`] when called
    /// from inside another pass on the same host.
    pub fn render(&self, vtree: &VNode) -> Result<ReconcileStats, RenderError> {
        let mut root = self.root.try_borrow_mut().map_err(|_| RenderError::Reentrant)?;
        let mut document = self
            .host
            .document
            .try_borrow_mut()
            .map_err(|_| RenderError::Reentrant)?;
        root.render(&mut document, vtree)
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
