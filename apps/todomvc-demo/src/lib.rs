//! TodoMVC on Twig: a task list with filters bound to hash routes and
//! JSON persistence.

pub mod actions;
pub mod driver;
pub mod model;
pub mod persist;
pub mod view;

use crate::actions::Actions;
use crate::model::{Filter, TodoState};
use crate::persist::Storage;
use twig::{App, AppLauncher, Host, RenderError, Router, Store};

/// A launched task list: store, actions and the running [`App`].
pub struct TodoApp {
    store: Store<TodoState>,
    actions: Actions,
    app: App,
}

impl TodoApp {
    /// Builds the routes, mounts them in `host` and starts on `initial`'s filter.
    pub fn launch(host: &Host, initial: TodoState) -> Result<Self, RenderError> {
        let store = Store::new(initial);
        let router = Router::new();
        let actions = Actions::new(store.clone(), router.clone(), host.clone());

        let router = Filter::ALL.into_iter().fold(router, |router, filter| {
            let store = store.clone();
            let actions = actions.clone();
            router.route(filter.path(), move || view::app(&store.state(), filter, &actions))
        });
        let router = {
            let store = store.clone();
            let actions = actions.clone();
            router.not_found(move || {
                let state = store.state();
                view::app(&state, state.filter, &actions)
            })
        };
        {
            let actions = actions.clone();
            router.on_change(move |path| actions.sync_filter(path));
        }

        let start = store.with_state(|state| state.filter);
        router.handle_hash_change(&twig::href(start.path()))?;
        let app = AppLauncher::new()
            .with_root_tag("section")
            .launch_in(host, &store, router)?;
        Ok(Self { store, actions, app })
    }

    /// Saves the todos and filter to `storage` after every change.
    pub fn persist_to(&self, storage: Storage) {
        self.store.subscribe(move |state| {
            if let Err(err) = storage.save(state) {
                log::error!("failed to save todos to {}: {err:#}", storage.path().display());
            }
        });
    }

    pub fn store(&self) -> &Store<TodoState> {
        &self.store
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    pub fn host(&self) -> &Host {
        self.app.host()
    }

    pub fn app(&self) -> &App {
        &self.app
    }
}

/// Loads saved state and launches the app in a fresh host.
pub fn launch_with_storage(storage: Storage) -> anyhow::Result<TodoApp> {
    let initial = storage.load()?;
    let app = TodoApp::launch(&Host::new(), initial)?;
    app.persist_to(storage);
    Ok(app)
}
