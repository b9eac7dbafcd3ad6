//! State transitions triggered from the UI.

use crate::model::{Filter, Todo, TodoState};
use twig::{Host, NodeId, RenderError, Router, Store};

/// Handle shared by every listener in the view.
#[derive(Clone)]
pub struct Actions {
    store: Store<TodoState>,
    router: Router,
    host: Host,
}

impl Actions {
    pub fn new(store: Store<TodoState>, router: Router, host: Host) -> Self {
        Self { store, router, host }
    }

    pub fn store(&self) -> &Store<TodoState> {
        &self.store
    }

    /// Adds a todo with `text` trimmed. Blank text is ignored, and so is
    /// any addition once the id space is used up.
    pub fn add(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(following) = self.store.with_state(|state| state.next_id.checked_add(1)) else {
            log::warn!("no todo ids left, ignoring {text:?}");
            return false;
        };
        self.store.update(|state| {
            let id = state.next_id;
            state.next_id = following;
            state.todos.push(Todo {
                id,
                text: text.to_owned(),
                completed: false,
            });
        });
        true
    }

    pub fn toggle(&self, id: u64) {
        self.store.update(|state| {
            if let Some(todo) = state.todo_mut(id) {
                todo.completed = !todo.completed;
            }
        });
    }

    pub fn delete(&self, id: u64) {
        self.store.update(|state| {
            state.todos.retain(|todo| todo.id != id);
            if state.editing == Some(id) {
                state.editing = None;
            }
        });
    }

    pub fn start_edit(&self, id: u64) {
        self.store.update(|state| state.editing = Some(id));
    }

    /// Commits an edit. Blank text keeps the previous text.
    pub fn finish_edit(&self, id: u64, text: &str) {
        let text = text.trim();
        self.store.update(|state| {
            if let Some(todo) = state.todo_mut(id) {
                if !text.is_empty() {
                    todo.text = text.to_owned();
                }
            }
            state.editing = None;
        });
    }

    pub fn cancel_edit(&self) {
        self.store.update(|state| state.editing = None);
    }

    pub fn mark_all_completed(&self) {
        self.store.update(|state| {
            for todo in &mut state.todos {
                todo.completed = true;
            }
        });
    }

    pub fn clear_completed(&self) {
        self.store.update(|state| state.todos.retain(|todo| !todo.completed));
    }

    /// Navigates to the filter's route. The route change updates the store.
    pub fn set_filter(&self, filter: Filter) {
        if let Err(err) = self.router.navigate(filter.path()) {
            log::error!("failed to switch to {filter:?}: {err}");
        }
    }

    /// Records the filter selected by a route change, if it differs.
    pub fn sync_filter(&self, path: &str) {
        let Some(filter) = Filter::from_path(path) else {
            return;
        };
        if self.store.with_state(|state| state.filter) != filter {
            self.store.update(|state| state.filter = filter);
        }
    }

    /// Empties an input the user is typing into. Focus protection would
    /// otherwise keep the typed text across the next render.
    pub fn clear_input(&self, input: NodeId) {
        let result = self
            .host
            .update(|document| document.set_value(input, Some(String::new())));
        if let Err(err) = result.and_then(|cleared| cleared.map_err(RenderError::from)) {
            log::warn!("could not clear input {input}: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
