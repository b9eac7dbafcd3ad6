use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one registration on an [`EventBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<T> = Rc<dyn Fn(&T)>;
type Handlers<T> = SmallVec<[(HandlerId, Handler<T>); 2]>;

struct BusInner<T> {
    channels: RefCell<FxHashMap<String, Handlers<T>>>,
    next_id: Cell<u64>,
}

/// Named publish/subscribe channels carrying payloads of type `T`.
///
/// Handlers for a name run in registration order. The handler list is
/// copied before delivery, so handlers may register or remove handlers
/// (including themselves) without affecting the emit in progress.
pub struct EventBus<T> {
    inner: Rc<BusInner<T>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(BusInner {
                channels: RefCell::new(FxHashMap::default()),
                next_id: Cell::new(0),
            }),
        }
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self.inner.channels.borrow();
        let mut names: Vec<&str> = channels.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EventBus").field("channels", &names).finish()
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, name: &str, handler: impl Fn(&T) + 'static) -> HandlerId {
        let id = HandlerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .channels
            .borrow_mut()
            .entry(name.to_owned())
            .or_default()
            .push((id, Rc::new(handler)));
        id
    }

    /// Removes one registration. Unknown names and ids are ignored.
    pub fn off(&self, name: &str, id: HandlerId) -> bool {
        let mut channels = self.inner.channels.borrow_mut();
        let Some(handlers) = channels.get_mut(name) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            channels.remove(name);
        }
        removed
    }

    /// Delivers `payload` to every handler registered for `name` and
    /// returns how many ran. Emitting a name nobody listens to is a no-op.
    pub fn emit(&self, name: &str, payload: &T) -> usize {
        let handlers: Handlers<T> = match self.inner.channels.borrow().get(name) {
            Some(handlers) => handlers.clone(),
            None => return 0,
        };
        log::trace!("emit {name} to {} handlers", handlers.len());
        for (_, handler) in &handlers {
            handler(payload);
        }
        handlers.len()
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.inner
            .channels
            .borrow()
            .get(name)
            .map_or(0, SmallVec::len)
    }

    pub fn clear(&self) {
        self.inner.channels.borrow_mut().clear();
    }
}

#[cfg(test)]
#[path = "tests/bus_tests.rs"]
mod tests;
