//! Line-oriented console driver.
//!
//! Every command goes through the same interactions a user would perform
//! (focus, typing, key presses, clicks) so the whole stack is exercised.

use crate::model::Filter;
use crate::view::ENTER;
use crate::TodoApp;
use anyhow::{anyhow, bail, Context};
use twig::{format_tree, Document, NodeId};

pub const HELP: &str = "\
commands:
  add <text>          add a todo
  toggle <n>          toggle the n-th visible todo
  delete <n>          delete the n-th visible todo
  edit <n> <text>     rename the n-th visible todo
  all                 mark all todos as completed
  clear               clear completed todos
  filter <name>       show all | active | completed
  show                print the list
  tree                print the rendered tree
  help                print this help
  quit                exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

fn has_class(document: &Document, id: NodeId, class: &str) -> bool {
    document
        .attribute(id, "class")
        .ok()
        .flatten()
        .is_some_and(|classes| classes.split_whitespace().any(|name| name == class))
}

pub struct Driver {
    app: TodoApp,
}

impl Driver {
    pub fn new(app: TodoApp) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &TodoApp {
        &self.app
    }

    fn root(&self) -> NodeId {
        self.app.app().mount().target()
    }

    fn by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let document = self.app.host().document();
        document
            .descendants(scope)
            .unwrap_or_default()
            .into_iter()
            .filter(|&id| has_class(&document, id, class))
            .collect()
    }

    fn first_by_class(&self, scope: NodeId, class: &str) -> anyhow::Result<NodeId> {
        self.by_class(scope, class)
            .first()
            .copied()
            .ok_or_else(|| anyhow!("no element with class `{class}`"))
    }

    fn first_by_tag(&self, scope: NodeId, tag: &str) -> anyhow::Result<NodeId> {
        let document = self.app.host().document();
        document
            .descendants(scope)?
            .into_iter()
            .find(|&id| document.tag(id) == Ok(tag))
            .ok_or_else(|| anyhow!("no <{tag}> element"))
    }

    /// The `n`-th visible list item, counting from 1.
    fn item(&self, n: &str) -> anyhow::Result<NodeId> {
        let index: usize = n.parse().with_context(|| format!("`{n}` is not a position"))?;
        let list = self.first_by_class(self.root(), "todo-list")?;
        let items = self.app.host().document().children(list)?.to_vec();
        index
            .checked_sub(1)
            .and_then(|index| items.get(index).copied())
            .ok_or_else(|| anyhow!("there is no todo #{index} ({} visible)", items.len()))
    }

    fn type_and_enter(&self, input: NodeId, text: &str) -> anyhow::Result<()> {
        let host = self.app.host();
        host.focus(input)?;
        host.input(input, text)?;
        host.key_down(input, ENTER)?;
        Ok(())
    }

    pub fn execute(&self, line: &str) -> anyhow::Result<Outcome> {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let host = self.app.host();
        match command {
            "" => return Ok(Outcome::Continue(String::new())),
            "add" => {
                let input = self.first_by_class(self.root(), "new-todo")?;
                self.type_and_enter(input, rest)?;
            }
            "toggle" => {
                let checkbox = self.first_by_class(self.item(rest)?, "toggle")?;
                host.toggle(checkbox)?;
            }
            "delete" => {
                let button = self.first_by_class(self.item(rest)?, "destroy")?;
                host.click(button)?;
            }
            "edit" => {
                let (n, text) = rest.split_once(' ').unwrap_or((rest, ""));
                let item = self.item(n)?;
                host.double_click(self.first_by_tag(item, "label")?)?;
                let field = self.first_by_class(self.item(n)?, "edit")?;
                self.type_and_enter(field, text)?;
            }
            "all" => {
                host.click(self.first_by_class(self.root(), "mark-all-completed")?)?;
            }
            "clear" => {
                let button = self
                    .first_by_class(self.root(), "clear-completed")
                    .context("nothing to clear")?;
                host.click(button)?;
            }
            "filter" => {
                let position = Filter::ALL
                    .iter()
                    .position(|filter| filter.label().eq_ignore_ascii_case(rest))
                    .ok_or_else(|| anyhow!("unknown filter `{rest}`"))?;
                let filters = self.first_by_class(self.root(), "filters")?;
                let link = host
                    .document()
                    .children(filters)?
                    .get(position)
                    .copied()
                    .ok_or_else(|| anyhow!("filter links are missing"))?;
                host.click(link)?;
            }
            "show" => {}
            "tree" => {
                let tree = format_tree(&host.document(), self.root());
                return Ok(Outcome::Continue(tree));
            }
            "help" => return Ok(Outcome::Continue(HELP.to_owned())),
            "quit" | "exit" => return Ok(Outcome::Quit),
            other => bail!("unknown command `{other}`, try `help`"),
        }
        Ok(Outcome::Continue(self.summary()))
    }

    /// Visible todos with their state, followed by the counter and filter.
    pub fn summary(&self) -> String {
        let root = self.root();
        let document = self.app.host().document();
        let mut lines = Vec::new();
        let items = self
            .by_class(root, "todo-list")
            .first()
            .and_then(|&list| document.children(list).ok())
            .map(<[NodeId]>::to_vec)
            .unwrap_or_default();
        for (position, item) in items.into_iter().enumerate() {
            let mark = if has_class(&document, item, "completed") { "x" } else { " " };
            let text = document.text_content(item).unwrap_or_default();
            let text = text.trim_end_matches('×');
            lines.push(format!("{:>2}. [{mark}] {text}", position + 1));
        }
        let count = self
            .by_class(root, "todo-count")
            .first()
            .and_then(|&span| document.text_content(span).ok())
            .unwrap_or_default();
        let filter = self.app.store().with_state(|state| state.filter.label());
        lines.push(format!("{count} · showing {filter}"));
        lines.join("\n")
    }
}
