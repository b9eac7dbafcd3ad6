use super::*;
use crate::error::NodeError;
use crate::events::Listener;
use crate::vnode::el;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn first_child(host: &Host, parent: NodeId) -> NodeId {
    host.document().children(parent).expect("children")[0]
}

#[test]
fn mount_renders_into_its_own_root() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");

    mount.render(&el("p").child("hi").into()).expect("render");

    assert!(host.document().is_root(mount.target()));
    assert_eq!(host.document().text_content(mount.target()), Ok("hi".to_owned()));
    assert_eq!(mount.passes(), 1);
}

#[test]
fn click_reaches_bound_listener() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let clicks = Rc::new(Cell::new(0));
    let sink = clicks.clone();
    mount
        .render(&el("button").on("click", move |_: &Event| sink.set(sink.get() + 1)).into())
        .expect("render");
    let button = first_child(&host, mount.target());

    assert_eq!(host.click(button), Ok(1));
    assert_eq!(host.click(button), Ok(1));
    assert_eq!(clicks.get(), 2);
}

#[test]
fn events_do_not_bubble() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let clicks = Rc::new(Cell::new(0));
    let sink = clicks.clone();
    mount
        .render(
            &el("div")
                .on("click", move |_: &Event| sink.set(sink.get() + 1))
                .child(el("span").child("inner"))
                .into(),
        )
        .expect("render");
    let div = first_child(&host, mount.target());
    let span = first_child(&host, div);

    assert_eq!(host.click(span), Ok(0));
    assert_eq!(clicks.get(), 0);
}

#[test]
fn input_updates_value_before_dispatch() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    mount
        .render(
            &el("input")
                .on("input", move |event: &Event| sink.borrow_mut().push(event.value.clone()))
                .into(),
        )
        .expect("render");
    let input = first_child(&host, mount.target());

    host.input(input, "milk").expect("input");

    assert_eq!(seen.borrow().as_slice(), &[Some("milk".to_owned())]);
    assert_eq!(host.document().value(input), Ok(Some("milk")));
}

#[test]
fn key_down_carries_key_and_value() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    mount
        .render(
            &el("input")
                .attr("value", " eggs ")
                .on("keydown", move |event: &Event| {
                    *sink.borrow_mut() = Some((event.key.clone(), event.trimmed_value().to_owned()));
                })
                .into(),
        )
        .expect("render");
    let input = first_child(&host, mount.target());

    host.key_down(input, "Enter").expect("keydown");

    assert_eq!(
        seen.borrow().clone(),
        Some((Some("Enter".to_owned()), "eggs".to_owned()))
    );
}

#[test]
fn toggle_flips_checked_and_fires_change() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let seen = Rc::new(Cell::new(None));
    let sink = seen.clone();
    mount
        .render(
            &el("input")
                .attr("type", "checkbox")
                .on("change", move |event: &Event| sink.set(Some(event.checked)))
                .into(),
        )
        .expect("render");
    let checkbox = first_child(&host, mount.target());

    host.toggle(checkbox).expect("toggle");

    assert_eq!(seen.get(), Some(true));
    assert_eq!(host.document().checked(checkbox), Ok(true));
}

#[test]
fn moving_focus_blurs_previous_element() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let blurred = Rc::new(Cell::new(0));
    let sink = blurred.clone();
    mount
        .render(
            &el("div")
                .child(el("input").on("blur", move |_: &Event| sink.set(sink.get() + 1)))
                .child(el("input"))
                .into(),
        )
        .expect("render");
    let form = first_child(&host, mount.target());
    let (first, second) = {
        let document = host.document();
        let children = document.children(form).expect("children");
        (children[0], children[1])
    };

    host.focus(first).expect("focus first");
    host.focus(first).expect("refocus is not a blur");
    assert_eq!(blurred.get(), 0);

    host.focus(second).expect("focus second");
    assert_eq!(blurred.get(), 1);
    assert_eq!(host.document().active_element(), Some(second));

    host.blur().expect("blur");
    assert_eq!(host.document().active_element(), None);
}

#[test]
fn listeners_may_render_during_dispatch() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let count = Rc::new(Cell::new(0));

    fn view(mount: &Mount, count: &Rc<Cell<i32>>) -> VNode {
        let mount = mount.clone();
        let state = count.clone();
        el("button")
            .on("click", move |_: &Event| {
                state.set(state.get() + 1);
                let next = view(&mount, &state);
                mount.render(&next).expect("nested render after dispatch");
            })
            .child(count.get())
            .into()
    }

    mount.render(&view(&mount, &count)).expect("render");
    let button = first_child(&host, mount.target());
    host.click(button).expect("click");

    assert_eq!(count.get(), 1);
    assert_eq!(host.document().text_content(mount.target()), Ok("1".to_owned()));
    assert_eq!(first_child(&host, mount.target()), button);
}

#[test]
fn render_from_inside_a_render_pass_is_reentrant() {
    let host = Host::new();
    let mount = host.mount("main").expect("mount");
    let outcome = Rc::new(RefCell::new(None));
    let sink = outcome.clone();
    let inner = mount.clone();

    let view = VNode::thunk(move || {
        *sink.borrow_mut() = Some(inner.render(&VNode::from("nested")));
        VNode::from("outer")
    });
    mount.render(&view).expect("outer render");

    assert_eq!(
        outcome.borrow().clone(),
        Some(Err(RenderError::Reentrant))
    );
    assert_eq!(host.document().text_content(mount.target()), Ok("outer".to_owned()));
}

#[test]
fn update_reports_reentrancy_instead_of_panicking() {
    let host = Host::new();
    let nested = host.clone();
    let result = host.update(move |_| nested.update(|_| ()));
    assert_eq!(result, Ok(Err(RenderError::Reentrant)));
}

#[test]
fn dispatch_to_removed_node_fails() {
    let host = Host::new();
    let stale = host
        .update(|document| {
            let node = document.create_element("button");
            document.bind_listener(node, "click", Listener::new(|_| {})).map(|_| node)
        })
        .expect("borrow")
        .expect("bind");
    host.update(|document| document.remove(stale)).expect("borrow").expect("remove");

    assert!(matches!(
        host.click(stale),
        Err(RenderError::Node(NodeError::Missing { .. }))
    ));
}
