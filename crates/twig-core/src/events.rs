use crate::document::NodeId;
use std::fmt;
use std::rc::Rc;

/// Prefix that marks an attribute key as an event binding (`onClick`, `onkeydown`, ...).
pub const EVENT_PREFIX: &str = "on";

/// Returns the event kind bound by `key`, or `None` when `key` is a plain attribute name.
///
/// The prefix is stripped and the remainder lowercased, so `onKeyDown` binds `keydown`.
pub fn event_kind(key: &str) -> Option<String> {
    let rest = key.strip_prefix(EVENT_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_ascii_lowercase())
}

/// A platform event delivered to the listeners bound on its target.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub kind: String,
    pub target: NodeId,
    /// Key name for keyboard events (`"Enter"`, `"Escape"`, ...).
    pub key: Option<String>,
    /// Snapshot of the target's `value` property at dispatch time.
    pub value: Option<String>,
    /// Snapshot of the target's `checked` property at dispatch time.
    pub checked: bool,
}

impl Event {
    pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: kind.into(),
            target,
            key: None,
            value: None,
            checked: false,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The target's value with surrounding whitespace removed, or `""` when it has none.
    pub fn trimmed_value(&self) -> &str {
        self.value.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// Shared handle to an event callback.
///
/// Equality is allocation identity: two listeners built from identical closures
/// are different listeners, while clones of one listener are the same.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
    pub fn new(callback: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

impl<F> From<F> for Listener
where
    F: Fn(&Event) + 'static,
{
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
