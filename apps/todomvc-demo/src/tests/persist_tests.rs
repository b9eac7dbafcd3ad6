use super::*;

fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("twig-todomvc-{}-{name}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn missing_file_loads_defaults() {
    let storage = Storage::new(scratch("missing"));
    assert_eq!(storage.load().expect("load"), TodoState::default());
}

#[test]
fn save_then_load_restores_todos_and_filter() {
    let path = scratch("round-trip");
    let storage = Storage::new(&path);
    let mut state = TodoState::new(
        vec![
            Todo {
                id: 3,
                text: "milk".into(),
                completed: true,
            },
            Todo {
                id: 7,
                text: "eggs".into(),
                completed: false,
            },
        ],
        Filter::Active,
    )
    .expect("free ids");
    state.editing = Some(3);

    storage.save(&state).expect("save");
    let loaded = storage.load().expect("load");

    assert_eq!(loaded.todos, state.todos);
    assert_eq!(loaded.filter, Filter::Active);
    assert_eq!(loaded.editing, None, "edit mode is not persisted");
    assert_eq!(loaded.next_id, 8);
    let _ = fs::remove_file(path);
}

#[test]
fn filter_is_stored_lowercase() {
    let path = scratch("format");
    let storage = Storage::new(&path);
    storage
        .save(&TodoState::new(Vec::new(), Filter::Completed).expect("free ids"))
        .expect("save");

    let raw = fs::read_to_string(&path).expect("read");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["filter"], "completed");
    assert_eq!(json["todos"], serde_json::json!([]));
    let _ = fs::remove_file(path);
}

#[test]
fn missing_filter_defaults_to_all() {
    let path = scratch("legacy");
    fs::write(&path, r#"{"todos":[{"id":1,"text":"a","completed":false}]}"#).expect("write");

    let loaded = Storage::new(&path).load().expect("load");

    assert_eq!(loaded.filter, Filter::All);
    assert_eq!(loaded.todos.len(), 1);
    let _ = fs::remove_file(path);
}

#[test]
fn corrupt_file_is_an_error() {
    let path = scratch("corrupt");
    fs::write(&path, "not json").expect("write");

    let err = Storage::new(&path).load().expect_err("corrupt data");

    assert!(format!("{err:#}").contains("failed to parse"));
    let _ = fs::remove_file(path);
}

#[test]
fn exhausted_id_space_is_a_load_error() {
    let path = scratch("max-id");
    fs::write(
        &path,
        format!(r#"{{"todos":[{{"id":{},"text":"last","completed":false}}]}}"#, u64::MAX),
    )
    .expect("write");

    let err = Storage::new(&path).load().expect_err("id overflow");

    assert!(err.to_string().contains("no successor"), "{err:#}");
    let _ = fs::remove_file(path);
}

#[test]
fn highest_possible_id_leaves_one_more() {
    let path = scratch("near-max-id");
    fs::write(
        &path,
        format!(r#"{{"todos":[{{"id":{},"text":"almost","completed":false}}]}}"#, u64::MAX - 1),
    )
    .expect("write");

    let loaded = Storage::new(&path).load().expect("load");

    assert_eq!(loaded.next_id, u64::MAX);
    let _ = fs::remove_file(path);
}
