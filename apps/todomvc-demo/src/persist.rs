//! JSON persistence of the todo list and the selected filter.

use crate::model::{Filter, Todo, TodoState};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    todos: Vec<Todo>,
    #[serde(default)]
    filter: Filter,
}

/// File-backed storage. A missing file reads as an empty list.
#[derive(Clone, Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<TodoState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no saved todos at {}, starting empty", self.path.display());
                return Ok(TodoState::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        TodoState::new(snapshot.todos, snapshot.filter)
            .with_context(|| format!("{} holds a todo id with no successor", self.path.display()))
    }

    pub fn save(&self, state: &TodoState) -> anyhow::Result<()> {
        let snapshot = Snapshot {
            todos: state.todos.clone(),
            filter: state.filter,
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json).with_context(|| format!("failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
#[path = "tests/persist_tests.rs"]
mod tests;
