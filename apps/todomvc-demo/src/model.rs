use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Route path that selects this filter.
    pub fn path(self) -> &'static str {
        match self {
            Filter::All => "/",
            Filter::Active => "/active",
            Filter::Completed => "/completed",
        }
    }

    /// Inverse of [`Filter::path`]. `/all` is accepted as an alias of `/`.
    pub fn from_path(path: &str) -> Option<Filter> {
        match path {
            "/" | "/all" => Some(Filter::All),
            "/active" => Some(Filter::Active),
            "/completed" => Some(Filter::Completed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

/// Everything the task list renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub filter: Filter,
    /// Id of the todo whose label is currently swapped for an edit field.
    pub editing: Option<u64>,
    pub next_id: u64,
}

impl TodoState {
    /// Starts after the highest id in `todos`. Returns `None` when that id
    /// is `u64::MAX` and no fresh id is left.
    pub fn new(todos: Vec<Todo>, filter: Filter) -> Option<Self> {
        let next_id = match todos.iter().map(|todo| todo.id).max() {
            Some(highest) => highest.checked_add(1)?,
            None => 0,
        };
        Some(Self {
            todos,
            filter,
            editing: None,
            next_id,
        })
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    pub fn visible(&self, filter: Filter) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(move |todo| filter.matches(todo))
    }

    pub fn todo_mut(&mut self, id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }
}

/// "1 item left", "3 items left".
pub fn items_left(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{count} {noun} left")
}
