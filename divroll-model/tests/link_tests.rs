use divroll_model::{EntityStub, Link};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn entities_as_list_decode() {
    let link = Link::decode(&json!({
        "linkName": "friends",
        "entities": [{"entityId": "u2", "entityType": "users"}, {"entityId": "u3"}]
    }))
    .unwrap();
    assert_eq!(link.name, "friends");
    assert_eq!(
        link.targets,
        vec![EntityStub::typed("users", "u2"), EntityStub::new("u3")]
    );
}

#[test]
fn entities_as_single_object_decode() {
    let link = Link::decode(&json!({
        "linkName": "owner",
        "entities": {"entityId": "u1"}
    }))
    .unwrap();
    assert_eq!(link.targets.len(), 1);
    assert!(link.contains("u1"));
}

#[test]
fn both_shapes_decode_to_same_link() {
    let bare = Link::decode(&json!({"linkName": "l", "entities": {"entityId": "e"}}));
    let list = Link::decode(&json!({"linkName": "l", "entities": [{"entityId": "e"}]}));
    assert_eq!(bare, list);
}

#[test]
fn unparseable_entities_yield_none() {
    assert_eq!(Link::decode(&json!({"linkName": "l", "entities": 5})), None);
    assert_eq!(Link::decode(&json!({"linkName": "l"})), None);
    assert_eq!(Link::decode(&json!("l")), None);
}

#[test]
fn links_field_accepts_bare_link_object() {
    let links = Link::decode_all(&json!({"linkName": "pet", "entities": {"entityId": "p1"}}));
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].target_ids().collect::<Vec<_>>(), vec!["p1"]);
}

#[test]
fn links_field_accepts_list_and_drops_bad_entries() {
    let links = Link::decode_all(&json!([
        {"linkName": "a", "entities": [{"entityId": "1"}]},
        {"entities": []},
        {"linkName": "b", "entities": []}
    ]));
    let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(links[1].targets.is_empty());
}

#[test]
fn links_field_of_wrong_type_is_empty() {
    assert!(Link::decode_all(&json!("nope")).is_empty());
}
