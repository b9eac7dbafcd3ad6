use super::*;

fn actions() -> Actions {
    Actions::new(Store::new(TodoState::default()), Router::new(), Host::new())
}

fn texts(actions: &Actions) -> Vec<String> {
    actions
        .store()
        .with_state(|state| state.todos.iter().map(|todo| todo.text.clone()).collect())
}

#[test]
fn add_trims_and_ignores_blank_text() {
    let actions = actions();
    assert!(actions.add("  milk "));
    assert!(!actions.add("   "));
    assert_eq!(texts(&actions), ["milk"]);
}

#[test]
fn ids_keep_increasing_after_delete() {
    let actions = actions();
    actions.add("a");
    actions.add("b");
    actions.delete(1);
    actions.add("c");
    let ids: Vec<u64> = actions
        .store()
        .with_state(|state| state.todos.iter().map(|todo| todo.id).collect());
    assert_eq!(ids, [0, 2]);
}

#[test]
fn add_refuses_once_ids_run_out() {
    let state = TodoState {
        next_id: u64::MAX,
        ..TodoState::default()
    };
    let actions = Actions::new(Store::new(state), Router::new(), Host::new());

    assert!(!actions.add("overflow"));
    assert!(texts(&actions).is_empty());
    assert_eq!(actions.store().with_state(|state| state.next_id), u64::MAX);
}

#[test]
fn toggle_and_bulk_updates() {
    let actions = actions();
    for text in ["a", "b", "c"] {
        actions.add(text);
    }
    actions.toggle(1);
    assert_eq!(actions.store().with_state(TodoState::active_count), 2);

    actions.clear_completed();
    assert_eq!(texts(&actions), ["a", "c"]);

    actions.mark_all_completed();
    assert_eq!(actions.store().with_state(TodoState::completed_count), 2);
}

#[test]
fn finish_edit_keeps_old_text_when_blank() {
    let actions = actions();
    actions.add("milk");
    actions.start_edit(0);
    assert_eq!(actions.store().with_state(|state| state.editing), Some(0));

    actions.finish_edit(0, "   ");
    assert_eq!(texts(&actions), ["milk"]);
    assert_eq!(actions.store().with_state(|state| state.editing), None);

    actions.start_edit(0);
    actions.finish_edit(0, " oat milk ");
    assert_eq!(texts(&actions), ["oat milk"]);
}

#[test]
fn cancel_edit_leaves_text_alone() {
    let actions = actions();
    actions.add("milk");
    actions.start_edit(0);
    actions.cancel_edit();
    assert_eq!(texts(&actions), ["milk"]);
    assert_eq!(actions.store().with_state(|state| state.editing), None);
}

#[test]
fn deleting_the_edited_todo_ends_editing() {
    let actions = actions();
    actions.add("milk");
    actions.start_edit(0);
    actions.delete(0);
    assert_eq!(actions.store().with_state(|state| state.editing), None);
}

#[test]
fn sync_filter_only_notifies_on_change() {
    let actions = actions();
    let notified = std::rc::Rc::new(std::cell::Cell::new(0));
    let sink = notified.clone();
    actions.store().subscribe(move |_| sink.set(sink.get() + 1));

    actions.sync_filter("/");
    actions.sync_filter("/unknown");
    actions.sync_filter("/completed");

    assert_eq!(notified.get(), 1);
    assert_eq!(actions.store().with_state(|state| state.filter), Filter::Completed);
}

#[test]
fn set_filter_navigates_the_router() {
    let actions = actions();
    actions.set_filter(Filter::Active);
    assert_eq!(actions.router.current_path(), "/active");
}
