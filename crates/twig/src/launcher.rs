//! Wires a store and a router to a render target.
//!
//! `AppLauncher` creates the host and root, starts the router on it and
//! subscribes to the store so every state change re-renders the current
//! route through the reconciler.

use twig_core::{format_tree, Host, Mount, ReconcileStats, RenderError, RenderSettings};
use twig_runtime::{Router, Store, Subscription};

/// Configuration for application settings.
#[derive(Clone, Debug)]
pub struct AppSettings {
    /// Tag of the root container the application renders into.
    pub root_tag: String,
    /// Limits and policies applied to every render pass.
    pub render: RenderSettings,
    /// Print the rendered tree to stdout after every store-driven render.
    pub log_tree: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            root_tag: "main".into(),
            render: RenderSettings::default(),
            log_tree: false,
        }
    }
}

/// Application launcher.
///
/// ```no_run
/// use twig::prelude::*;
///
/// let store = Store::new(0);
/// let view_store = store.clone();
/// let router = Router::new().route("/", move || el("p").child(view_store.state()).into());
/// let app = AppLauncher::new().launch(&store, router).expect("first render");
/// store.set_state(1);
/// app.shutdown();
/// ```
pub struct AppLauncher {
    settings: AppSettings,
}

impl Default for AppLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl AppLauncher {
    /// Create a new application launcher with default settings.
    pub fn new() -> Self {
        Self {
            settings: AppSettings::default(),
        }
    }

    /// Replace all settings at once.
    pub fn with_settings(mut self, settings: AppSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the tag of the root container.
    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.settings.root_tag = tag.into();
        self
    }

    /// Set the render limits and policies.
    pub fn with_render_settings(mut self, render: RenderSettings) -> Self {
        self.settings.render = render;
        self
    }

    /// Print the tree after every store-driven render.
    pub fn with_log_tree(mut self, enabled: bool) -> Self {
        self.settings.log_tree = enabled;
        self
    }

    /// Mount `router` into a fresh host and re-render it on every change of `store`.
    ///
    /// The first render's error is returned. Later render failures are logged.
    pub fn launch<S: Clone + 'static>(self, store: &Store<S>, router: Router) -> Result<App, RenderError> {
        self.launch_in(&Host::new(), store, router)
    }

    /// Like [`launch`](Self::launch), but renders into a new root inside an existing `host`.
    pub fn launch_in<S: Clone + 'static>(
        self,
        host: &Host,
        store: &Store<S>,
        router: Router,
    ) -> Result<App, RenderError> {
        let host = host.clone();
        let mount = host.mount_with_settings(&self.settings.root_tag, self.settings.render.clone())?;
        router.start(mount.clone())?;

        let subscription = {
            let router = router.clone();
            let mount = mount.clone();
            let log_tree = self.settings.log_tree;
            store.subscribe(move |_| match router.render_current() {
                Ok(stats) => {
                    log::debug!("state change rendered with {} mutations", stats.mutations());
                    if log_tree {
                        let target = mount.target();
                        if let Ok(tree) = mount.host().read(|document| format_tree(document, target)) {
                            print!("{tree}");
                        }
                    }
                }
                Err(err) => log::error!("render after state change failed: {err}"),
            })
        };

        Ok(App {
            host,
            mount,
            router,
            subscription: Some(subscription),
        })
    }
}

/// A running application: host, mounted root and router.
pub struct App {
    host: Host,
    mount: Mount,
    router: Router,
    subscription: Option<Subscription>,
}

impl App {
    /// The host owning the application's document.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The mounted root the router renders into.
    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// The application's router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Render the current route immediately.
    pub fn render(&self) -> Result<ReconcileStats, RenderError> {
        self.router.render_current()
    }

    /// Stop re-rendering on store changes.
    pub fn shutdown(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

#[cfg(test)]
#[path = "tests/launcher_tests.rs"]
mod tests;
