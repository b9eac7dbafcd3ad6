//! Hash-based routing.
//!
//! The router maps normalized paths to view producers and renders the
//! matching view through a [`Mount`], so switching routes diffs against the
//! previous page instead of rebuilding it.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use twig_core::{Mount, ReconcileStats, RenderError, VNode};

/// Text shown when no route matches and no fallback was configured.
pub const NOT_FOUND_TEXT: &str = "Not found";

pub type View = Rc<dyn Fn() -> VNode>;
type RouteListener = Rc<dyn Fn(&str)>;

/// Turns a location hash into a route path: one leading `#` is dropped and
/// an empty remainder becomes `/`.
pub fn normalize_path(hash: &str) -> String {
    let path = hash.strip_prefix('#').unwrap_or(hash);
    if path.is_empty() {
        "/".to_owned()
    } else {
        path.to_owned()
    }
}

/// Link target for `path`, suitable for an `href` attribute.
pub fn href(path: &str) -> String {
    format!("#{path}")
}

struct RouterInner {
    routes: RefCell<IndexMap<String, View>>,
    not_found: RefCell<View>,
    hash: RefCell<String>,
    mount: RefCell<Option<Mount>>,
    listeners: RefCell<Vec<RouteListener>>,
}

#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.inner.routes.borrow().keys().collect::<Vec<_>>())
            .field("hash", &self.inner.hash.borrow())
            .field("started", &self.inner.mount.borrow().is_some())
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        let not_found: View = Rc::new(|| VNode::text(NOT_FOUND_TEXT));
        Self {
            inner: Rc::new(RouterInner {
                routes: RefCell::new(IndexMap::new()),
                not_found: RefCell::new(not_found),
                hash: RefCell::new(String::new()),
                mount: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Registers `view` for `path`. Paths are normalized, so `"#/a"` and `"/a"` are the same route.
    pub fn route(self, path: &str, view: impl Fn() -> VNode + 'static) -> Self {
        self.inner
            .routes
            .borrow_mut()
            .insert(normalize_path(path), Rc::new(view));
        self
    }

    pub fn not_found(self, view: impl Fn() -> VNode + 'static) -> Self {
        *self.inner.not_found.borrow_mut() = Rc::new(view);
        self
    }

    /// Registers a callback that runs with the new path whenever the hash
    /// changes, before the matching view is rendered.
    pub fn on_change(&self, listener: impl Fn(&str) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn current_path(&self) -> String {
        normalize_path(&self.inner.hash.borrow())
    }

    pub fn is_started(&self) -> bool {
        self.inner.mount.borrow().is_some()
    }

    /// Binds the router to `mount` and renders the current route.
    pub fn start(&self, mount: Mount) -> Result<ReconcileStats, RenderError> {
        *self.inner.mount.borrow_mut() = Some(mount);
        self.render_current()
    }

    /// Sets the location hash to `path` and handles the resulting change.
    pub fn navigate(&self, path: &str) -> Result<ReconcileStats, RenderError> {
        self.handle_hash_change(&href(&normalize_path(path)))
    }

    /// Records a new location hash, notifies route listeners and renders.
    ///
    /// Render failures are logged and returned; the hash change itself is kept.
    pub fn handle_hash_change(&self, hash: &str) -> Result<ReconcileStats, RenderError> {
        *self.inner.hash.borrow_mut() = hash.to_owned();
        let path = self.current_path();
        log::debug!("route changed to {path}");
        let listeners: Vec<RouteListener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&path);
        }
        self.render_current().inspect_err(|err| {
            log::error!("failed to render route {path}: {err}");
        })
    }

    /// Renders the view for the current path. Before `start` this does nothing.
    pub fn render_current(&self) -> Result<ReconcileStats, RenderError> {
        let Some(mount) = self.inner.mount.borrow().clone() else {
            return Ok(ReconcileStats::default());
        };
        let view = self.view_for(&self.current_path());
        mount.render(&view())
    }

    fn view_for(&self, path: &str) -> View {
        match self.inner.routes.borrow().get(path) {
            Some(view) => Rc::clone(view),
            None => {
                log::debug!("no route for {path}");
                self.inner.not_found.borrow().clone()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
