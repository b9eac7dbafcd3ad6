//! The task list, described as virtual nodes.

use crate::actions::Actions;
use crate::model::{items_left, Filter, Todo, TodoState};
use twig::{el, href, ElementNode, Event, VNode};

pub const ENTER: &str = "Enter";
pub const ESCAPE: &str = "Escape";

pub fn app(state: &TodoState, filter: Filter, actions: &Actions) -> VNode {
    el("div")
        .class("todoapp")
        .child(el("h1").child("todos"))
        .child(el("div").class("todo-create-form").child(new_todo(actions)))
        .child(top_actions(state, actions))
        .child(
            el("ul")
                .class("todo-list")
                .children(state.visible(filter).map(|todo| item(todo, state.editing, actions))),
        )
        .child(footer(state, filter, actions))
        .into()
}

fn new_todo(actions: &Actions) -> ElementNode {
    let actions = actions.clone();
    el("input")
        .class("new-todo")
        .attr("type", "text")
        .attr("placeholder", "What needs to be done?")
        .attr("autofocus", true)
        .on("keydown", move |event: &Event| {
            if event.key.as_deref() != Some(ENTER) || event.trimmed_value().is_empty() {
                return;
            }
            actions.clear_input(event.target);
            actions.add(event.trimmed_value());
        })
}

fn top_actions(state: &TodoState, actions: &Actions) -> ElementNode {
    let actions = actions.clone();
    el("div")
        .class("top-actions")
        .child(
            el("button")
                .class("mark-all-completed")
                .attr("title", "Mark all todos as completed")
                .on("click", move |_: &Event| actions.mark_all_completed())
                .child("Mark all as completed"),
        )
        .child(el("span").class("todo-count").child(items_left(state.active_count())))
}

fn item(todo: &Todo, editing: Option<u64>, actions: &Actions) -> ElementNode {
    let id = todo.id;
    let toggle = actions.clone();
    let destroy = actions.clone();
    let body = if editing == Some(id) {
        edit_field(todo, actions)
    } else {
        let edit = actions.clone();
        el("label")
            .on("dblclick", move |_: &Event| edit.start_edit(id))
            .child(todo.text.as_str())
    };
    el("li")
        .class(if todo.completed { "completed" } else { "" })
        .child(
            el("input")
                .class("toggle")
                .attr("type", "checkbox")
                .attr("checked", todo.completed)
                .on("change", move |_: &Event| toggle.toggle(id)),
        )
        .child(body)
        .child(
            el("button")
                .class("destroy")
                .on("click", move |_: &Event| destroy.delete(id))
                .child("×"),
        )
}

fn edit_field(todo: &Todo, actions: &Actions) -> ElementNode {
    let id = todo.id;
    let commit = actions.clone();
    let keys = actions.clone();
    el("input")
        .class("edit")
        .attr("type", "text")
        .attr("value", todo.text.as_str())
        .attr("autofocus", true)
        .on("blur", move |event: &Event| commit.finish_edit(id, event.trimmed_value()))
        .on("keydown", move |event: &Event| match event.key.as_deref() {
            Some(ENTER) => keys.finish_edit(id, event.trimmed_value()),
            Some(ESCAPE) => keys.cancel_edit(),
            _ => {}
        })
}

fn footer(state: &TodoState, filter: Filter, actions: &Actions) -> ElementNode {
    let filters = Filter::ALL.into_iter().map(|option| {
        let actions = actions.clone();
        el("a")
            .class(if option == filter { "selected" } else { "" })
            .attr("href", href(option.path()))
            .on("click", move |_: &Event| actions.set_filter(option))
            .child(option.label())
    });
    let clear = (state.completed_count() > 0).then(|| {
        let actions = actions.clone();
        el("button")
            .class("clear-completed")
            .on("click", move |_: &Event| actions.clear_completed())
            .child("Clear completed")
    });
    el("div")
        .class("footer")
        .child(el("div").class("filters").children(filters))
        .child(clear)
}
