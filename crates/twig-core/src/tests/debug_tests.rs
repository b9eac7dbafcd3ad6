use super::*;
use crate::events::Event;
use crate::materialize::materialize;
use crate::vnode::el;

#[test]
fn format_tree_prints_nested_structure() {
    let mut document = Document::new();
    let root = document.create_root("main");
    let tree = el("ul")
        .class("todo-list")
        .child(el("li").on("dblclick", |_: &Event| {}).child("milk"));
    let id = materialize(&mut document, &tree.into()).expect("materialize");
    document.append_child(root, id).expect("attach");

    let output = format_tree(&document, root);

    assert_eq!(
        output,
        "<main>\n  <ul class=\"todo-list\">\n    <li> on[dblclick]\n      \"milk\"\n"
    );
}
