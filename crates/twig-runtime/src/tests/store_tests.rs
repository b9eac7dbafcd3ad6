use super::*;

#[derive(Clone, Debug, Default, PartialEq)]
struct Counter {
    count: i32,
    label: String,
}

#[test]
fn state_returns_a_snapshot() {
    let store = Store::new(Counter::default());
    let mut snapshot = store.state();
    snapshot.count = 99;
    assert_eq!(store.state().count, 0);
}

#[test]
fn update_merges_and_notifies_in_subscription_order() {
    let store = Store::new(Counter::default());
    let log = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second"] {
        let log = log.clone();
        store.subscribe(move |state: &Counter| log.borrow_mut().push(format!("{name}:{}", state.count)));
    }

    store.update(|state| state.count = 2);
    store.update(|state| state.label = "x".into());

    assert_eq!(*log.borrow(), ["first:2", "second:2", "first:2", "second:2"]);
    assert_eq!(
        store.state(),
        Counter {
            count: 2,
            label: "x".into()
        }
    );
}

#[test]
fn set_state_replaces_whole_state() {
    let store = Store::new(Counter {
        count: 1,
        label: "a".into(),
    });
    store.set_state(Counter::default());
    assert_eq!(store.state(), Counter::default());
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = Store::new(0);
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let subscription = store.subscribe(move |_| sink.set(sink.get() + 1));

    store.set_state(1);
    assert!(subscription.unsubscribe());
    store.set_state(2);

    assert_eq!(calls.get(), 1);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn listener_may_unsubscribe_itself_during_notification() {
    let store = Store::new(0);
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let calls = Rc::new(Cell::new(0));
    let (sink, handle) = (calls.clone(), slot.clone());
    let subscription = store.subscribe(move |_| {
        sink.set(sink.get() + 1);
        if let Some(subscription) = handle.borrow_mut().take() {
            subscription.unsubscribe();
        }
    });
    *slot.borrow_mut() = Some(subscription);

    store.set_state(1);
    store.set_state(2);

    assert_eq!(calls.get(), 1);
}

#[test]
fn listener_may_update_the_store() {
    let store = Store::new(0);
    let inner = store.clone();
    store.subscribe(move |&value| {
        if value < 3 {
            inner.set_state(value + 1);
        }
    });

    store.set_state(0);

    assert_eq!(store.state(), 3);
}

#[test]
fn clear_drops_listeners_and_keeps_state() {
    let store = Store::new(5);
    store.subscribe(|_| panic!("cleared listeners never run"));
    store.clear();
    store.set_state(6);
    assert_eq!(store.state(), 6);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn unsubscribe_after_store_is_gone_is_harmless() {
    let store = Store::new(0);
    let subscription = store.subscribe(|_| {});
    drop(store);
    assert!(!subscription.unsubscribe());
}

#[test]
fn with_state_borrows_without_cloning() {
    let store = Store::new(vec![1, 2, 3]);
    assert_eq!(store.with_state(|items| items.iter().sum::<i32>()), 6);
}
