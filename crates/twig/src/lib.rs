#![deny(missing_docs)]

//! High level utilities for running Twig applications with minimal boilerplate.

mod launcher;
pub use launcher::{App, AppLauncher, AppSettings};

/// Re-export the core crate so applications can depend on a single crate.
pub use twig_core::*;

/// State store, event bus and router.
pub use twig_runtime::{href, normalize_path, EventBus, HandlerId, Router, Store, Subscription, View};

/// Convenience imports for Twig applications.
pub mod prelude {
    pub use crate::{App, AppLauncher, AppSettings};
    pub use twig_core::{el, AttrValue, ElementNode, Event, Host, Listener, Mount, RenderError, VNode};
    pub use twig_runtime::{href, EventBus, Router, Store};
}
