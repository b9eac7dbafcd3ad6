//! Core of Twig: virtual nodes, the in-memory document they render into,
//! and the reconciler that keeps the two in sync.

mod builder;
pub mod debug;
mod document;
mod error;
mod events;
mod host;
mod listeners;
mod materialize;
mod reconcile;
mod render;
mod settings;
mod vnode;

pub use builder::{CHECKED_PROPERTY, VALUE_PROPERTY};
pub use debug::{format_tree, log_tree};
pub use document::{Document, NodeId, NodeKind};
pub use error::{NodeError, RenderError};
pub use events::{event_kind, Event, Listener, EVENT_PREFIX};
pub use host::{Host, Mount};
pub use listeners::{ListenerMap, ListenerTable};
pub use materialize::{materialize, Materializer};
pub use reconcile::{reconcile, ChildReconciler, PositionalChildren, ReconcileStats, Reconciler};
pub use render::{render, RenderRoot};
pub use settings::RenderSettings;
pub use vnode::{el, flatten, format_number, AttrValue, ElementNode, Thunk, VNode};
