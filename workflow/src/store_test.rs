use super::*;

#[test]
fn grading_key_is_scoped_by_entity() {
    assert_eq!(grading_draft_key("42"), "grading_state_42");
}

#[test]
fn json_round_trip_through_memory_store() {
    let store = MemoryStore::new();
    save_json(&store, "k", &vec![1, 2, 3]);
    assert_eq!(load_json::<Vec<i32>, _>(&store, "k"), Some(vec![1, 2, 3]));
    store.remove("k");
    assert!(store.is_empty());
}

#[test]
fn corrupt_json_reads_as_absent() {
    let store = MemoryStore::new();
    store.set("k", "{not json");
    assert_eq!(load_json::<Vec<i32>, _>(&store, "k"), None);
}

#[test]
fn bearer_token_ignores_blank_values() {
    let store = MemoryStore::new();
    assert_eq!(bearer_token(&store, TOKEN_KEY), None);
    store.set(TOKEN_KEY, "  ");
    assert_eq!(bearer_token(&store, TOKEN_KEY), None);
    store.set(TOKEN_KEY, "abc");
    assert_eq!(bearer_token(&store, TOKEN_KEY).as_deref(), Some("abc"));
}

#[test]
fn bearer_token_reads_the_configured_key() {
    let store = MemoryStore::new();
    store.set("review_token", "xyz");
    assert_eq!(bearer_token(&store, TOKEN_KEY), None);
    assert_eq!(bearer_token(&store, "review_token").as_deref(), Some("xyz"));
}
