use super::*;
use crate::document::NodeKind;
use crate::error::NodeError;
use crate::vnode::el;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn empty_and_text_become_text_nodes() {
    let mut document = Document::new();
    let empty = materialize(&mut document, &VNode::Empty).expect("empty");
    let text = materialize(&mut document, &VNode::from("hi")).expect("text");

    assert_eq!(document.kind(empty), Ok(NodeKind::Text("")));
    assert_eq!(document.kind(text), Ok(NodeKind::Text("hi")));
    assert_eq!(document.parent(text), Ok(None));
}

#[test]
fn fragment_holds_flattened_children() {
    let mut document = Document::new();
    let vnode = VNode::fragment([
        VNode::from("a"),
        VNode::fragment([VNode::from("b"), VNode::from("c")]),
    ]);
    let fragment = materialize(&mut document, &vnode).expect("fragment");

    assert_eq!(document.kind(fragment), Ok(NodeKind::Fragment));
    let texts: Vec<&str> = document
        .children(fragment)
        .expect("children")
        .iter()
        .map(|&child| document.text(child).expect("text"))
        .collect();
    assert_eq!(texts, ["a", "b", "c"]);
}

#[test]
fn materialized_ids_pass_through() {
    let mut document = Document::new();
    let existing = document.create_element("canvas");
    let id = materialize(&mut document, &VNode::from(existing)).expect("pass through");
    assert_eq!(id, existing);
}

#[test]
fn stale_materialized_ids_are_rejected() {
    let mut document = Document::new();
    let gone = document.create_text("gone");
    document.remove(gone).expect("remove");

    assert_eq!(
        materialize(&mut document, &VNode::from(gone)),
        Err(RenderError::Node(NodeError::Missing { id: gone }))
    );
}

#[test]
fn thunks_are_invoked_on_every_materialization() {
    let mut document = Document::new();
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let vnode = VNode::thunk(move || {
        sink.set(sink.get() + 1);
        VNode::thunk(|| VNode::from("deferred"))
    });

    let first = materialize(&mut document, &vnode).expect("first");
    let second = materialize(&mut document, &vnode).expect("second");

    assert_eq!(calls.get(), 2);
    assert_ne!(first, second);
    assert_eq!(document.text(second), Ok("deferred"));
}

fn endless() -> VNode {
    VNode::thunk(endless)
}

#[test]
fn self_returning_thunk_is_an_error_not_a_hang() {
    let mut document = Document::new();
    let settings = RenderSettings::default().with_max_thunk_depth(8);

    let result = Materializer::new(&mut document, &settings).materialize(&endless());

    assert_eq!(result, Err(RenderError::ThunkRecursion { limit: 8 }));
    assert!(document.is_empty());
}

fn nested_forever() -> VNode {
    el("div").child(VNode::thunk(nested_forever)).into()
}

#[test]
fn self_embedding_thunk_hits_the_depth_limit() {
    let mut document = Document::new();
    let settings = RenderSettings::default().with_max_depth(32);

    let result = Materializer::new(&mut document, &settings).materialize(&nested_forever());

    assert_eq!(result, Err(RenderError::DepthLimit { limit: 32 }));
    assert!(document.is_empty(), "partial subtrees are discarded");
}

#[test]
fn thunk_chain_within_limit_resolves() {
    let mut document = Document::new();
    let settings = RenderSettings::default().with_max_thunk_depth(3);
    let vnode = VNode::thunk(|| VNode::thunk(|| VNode::thunk(|| VNode::from("ok"))));

    let id = Materializer::new(&mut document, &settings)
        .materialize(&vnode)
        .expect("three invocations fit");
    assert_eq!(document.text(id), Ok("ok"));
}

#[test]
fn failure_puts_passed_through_siblings_back_in_order() {
    let mut document = Document::new();
    let list = document.create_element("ul");
    let [a, b, c] = ["a", "b", "c"].map(|text| {
        let item = document.create_element("li");
        let label = document.create_text(text);
        document.append_child(item, label).expect("label");
        document.append_child(list, item).expect("item");
        item
    });

    let broken = VNode::fragment([VNode::Materialized(b), VNode::Materialized(a), el("").into()]);
    let result = materialize(&mut document, &broken);

    assert!(matches!(result, Err(RenderError::Malformed(_))));
    assert_eq!(document.children(list), Ok(&[a, b, c][..]));
    assert_eq!(document.text_content(list), Ok("abc".to_owned()));
}

#[test]
fn failure_detaches_passed_through_orphans_instead_of_destroying_them() {
    let mut document = Document::new();
    let loose = document.create_text("loose");

    let broken: VNode = el("div").child(VNode::Materialized(loose)).child(el("")).into();
    let result = materialize(&mut document, &broken);

    assert!(result.is_err());
    assert_eq!(document.parent(loose), Ok(None));
    assert_eq!(document.text(loose), Ok("loose"));
    assert_eq!(document.len(), 1);
}
