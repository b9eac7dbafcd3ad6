use crate::document::{Document, NodeKind};
use crate::error::RenderError;
use crate::events::{Event, Listener};
use crate::materialize::materialize;
use crate::vnode::{el, AttrValue, VNode};

#[test]
fn element_carries_attributes_in_order() {
    let mut document = Document::new();
    let vnode = el("a").attr("href", "#/active").class("selected").attr("tabindex", 2);
    let id = materialize(&mut document, &vnode.into()).expect("build");

    assert_eq!(document.kind(id), Ok(NodeKind::Element("a")));
    let attributes: Vec<(&str, &str)> = document
        .attributes(id)
        .expect("attributes")
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    assert_eq!(
        attributes,
        [("href", "#/active"), ("class", "selected"), ("tabindex", "2")]
    );
}

#[test]
fn boolean_attributes_follow_presence_semantics() {
    let mut document = Document::new();
    let vnode = el("input").attr("hidden", true).attr("disabled", false);
    let id = materialize(&mut document, &vnode.into()).expect("build");

    assert_eq!(document.attribute(id, "hidden"), Ok(Some("")));
    assert_eq!(document.attribute(id, "disabled"), Ok(None));
}

#[test]
fn listeners_are_bound_not_written_as_attributes() {
    let mut document = Document::new();
    let listener = Listener::new(|_| {});
    let vnode = el("button").attr("onClick", listener.clone());
    let id = materialize(&mut document, &vnode.into()).expect("build");

    assert!(document.attributes(id).expect("attributes").is_empty());
    assert_eq!(document.bound_listeners(id, "click"), Ok(vec![listener.clone()]));
    assert_eq!(
        document.listeners(id).and_then(|map| map.get("click")),
        Some(&listener)
    );
}

#[test]
fn later_listener_for_same_kind_wins() {
    let mut document = Document::new();
    let first = Listener::new(|_| {});
    let second = Listener::new(|_| {});
    let vnode = el("button").attr("onclick", first).attr("onClick", second.clone());
    let id = materialize(&mut document, &vnode.into()).expect("build");

    assert_eq!(document.binding_count(id), Ok(1));
    assert_eq!(document.bound_listeners(id, "click"), Ok(vec![second]));
}

#[test]
fn listener_under_plain_key_is_malformed() {
    let mut document = Document::new();
    let vnode = el("button").attr("handler", VNode::listener(|_: &Event| {}));
    let result = materialize(&mut document, &vnode.into());

    assert!(matches!(result, Err(RenderError::Malformed(_))));
    assert!(document.is_empty());
}

#[test]
fn empty_tag_is_malformed() {
    let mut document = Document::new();
    let vnode = VNode::element("", Vec::<(String, AttrValue)>::new(), Vec::new());
    assert!(matches!(
        materialize(&mut document, &vnode),
        Err(RenderError::Malformed(_))
    ));
}

#[test]
fn value_and_checked_initialize_properties() {
    let mut document = Document::new();
    let edit = el("input").attr("value", "draft");
    let toggle = el("input").attr("type", "checkbox").attr("checked", true);
    let edit = materialize(&mut document, &edit.into()).expect("edit");
    let toggle = materialize(&mut document, &toggle.into()).expect("toggle");

    assert_eq!(document.value(edit), Ok(Some("draft")));
    assert_eq!(document.attribute(edit, "value"), Ok(Some("draft")));
    assert_eq!(document.checked(toggle), Ok(true));
    assert_eq!(document.checked(edit), Ok(false));
}

#[test]
fn children_are_flattened_and_empty_keeps_its_slot() {
    let mut document = Document::new();
    let vnode = el("ul").children([
        VNode::from(el("li").child("a")),
        VNode::Empty,
        VNode::fragment([el("li").child("b"), el("li").child("c")]),
    ]);
    let id = materialize(&mut document, &vnode.into()).expect("build");

    let children = document.children(id).expect("children").to_vec();
    assert_eq!(children.len(), 4);
    assert_eq!(document.kind(children[1]), Ok(NodeKind::Text("")));
    assert_eq!(document.text_content(id), Ok("abc".to_owned()));
    assert!(children.iter().all(|&child| document.parent(child) == Ok(Some(id))));
}
