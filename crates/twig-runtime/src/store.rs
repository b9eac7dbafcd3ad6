use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type StateListener<S> = Rc<dyn Fn(&S)>;

trait Detach {
    fn detach(&self, id: u64) -> bool;
}

struct StoreInner<S> {
    state: RefCell<S>,
    listeners: RefCell<IndexMap<u64, StateListener<S>>>,
    next_id: Cell<u64>,
}

impl<S> Detach for StoreInner<S> {
    fn detach(&self, id: u64) -> bool {
        self.listeners.borrow_mut().shift_remove(&id).is_some()
    }
}

/// Shared application state with synchronous change notification.
///
/// Cloning a `Store` yields another handle to the same state. Listeners run
/// in subscription order, after the state borrow has been released, so they
/// may read the store, update it again, subscribe or unsubscribe.
pub struct Store<S> {
    inner: Rc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<S: Default + Clone + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Clone + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                listeners: RefCell::new(IndexMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.inner.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.inner.state.borrow())
    }

    /// Replaces the state and notifies every listener.
    pub fn set_state(&self, state: S) {
        *self.inner.state.borrow_mut() = state;
        self.notify();
    }

    /// Mutates the state in place and notifies every listener.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut *self.inner.state.borrow_mut());
        self.notify();
    }

    pub fn subscribe(&self, listener: impl Fn(&S) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().insert(id, Rc::new(listener));
        let registry: Rc<dyn Detach> = self.inner.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&registry),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Drops every listener. The state itself is kept.
    pub fn clear(&self) {
        self.inner.listeners.borrow_mut().clear();
    }

    fn notify(&self) {
        let snapshot = self.state();
        let listeners: Vec<StateListener<S>> = self.inner.listeners.borrow().values().cloned().collect();
        log::trace!("store changed, notifying {} listeners", listeners.len());
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Handle returned by [`Store::subscribe`]. Dropping it keeps the listener registered.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Detach>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Subscription {
    /// Removes the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.detach(self.id))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
