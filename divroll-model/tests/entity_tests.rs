use divroll_model::{Acl, Entity, ModelError, PropertyValue};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test payload must be an object")
}

// ── Construction & properties ────────────────────────────────────

#[test]
fn new_entity_is_unsaved() {
    let e = Entity::new("notes");
    assert_eq!(e.store(), "notes");
    assert_eq!(e.entity_id(), None);
    assert_eq!(e.acl(), None);
    assert!(e.properties().is_empty());
}

#[test]
fn null_is_stored_explicitly() {
    let mut e = Entity::new("notes");
    e.set_property("title", PropertyValue::Null).unwrap();
    assert_eq!(e.get_property("title"), Some(&PropertyValue::Null));
    assert_eq!(e.get_property("missing"), None);
    assert_eq!(e.to_payload().unwrap()["title"], Value::Null);
}

#[test]
fn every_reserved_key_is_refused_as_property() {
    let mut e = Entity::new("notes");
    for key in divroll_model::wire::RESERVED_KEYS {
        assert!(matches!(
            e.set_property(key, 1),
            Err(ModelError::ReservedProperty(_))
        ));
    }
}

#[test]
fn set_property_from_serializable() {
    let mut e = Entity::new("notes");
    e.set_property_from("tags", &["a", "b"]).unwrap();
    assert_eq!(
        e.get_property("tags").and_then(|v| v.at(1)).and_then(PropertyValue::as_str),
        Some("b")
    );
}

#[test]
fn remove_property_returns_old_value() {
    let mut e = Entity::new("notes");
    e.set_property("n", 1).unwrap();
    assert_eq!(e.remove_property("n"), Some(PropertyValue::Integer(1)));
    assert_eq!(e.get_property("n"), None);
}

// ── Payload encoding ─────────────────────────────────────────────

#[test]
fn payload_carries_properties_and_master_key_only_acl() {
    let mut e = Entity::new("notes");
    e.set_property("age", 30).unwrap();
    assert_eq!(
        Value::Object(e.to_payload().unwrap()),
        json!({
            "age": 30,
            "aclRead": [],
            "aclWrite": [],
            "publicRead": null,
            "publicWrite": null
        })
    );
}

#[test]
fn envelope_wraps_payload_under_entity() {
    let mut e = Entity::new("notes");
    e.set_acl(Some(Acl::new().with_public_read(true).grant_write("u1")));
    let envelope = e.to_envelope().unwrap();
    assert_eq!(envelope["entity"]["publicRead"], json!(true));
    assert_eq!(envelope["entity"]["aclWrite"], json!([{"entityId": "u1"}]));
}

#[test]
fn unsupported_property_fails_payload() {
    let mut e = Entity::new("notes");
    e.set_property("bad", f64::NAN).unwrap();
    assert!(matches!(
        e.to_payload(),
        Err(ModelError::UnsupportedPropertyValue(_))
    ));
}

// ── Payload decoding ─────────────────────────────────────────────

#[test]
fn reserved_keys_never_become_properties() {
    let e = Entity::from_payload(
        "people",
        &obj(json!({
            "entityId": "e1",
            "publicRead": true,
            "aclWrite": [{"entityId": "u1"}],
            "age": 30
        })),
    );
    assert_eq!(e.properties().keys().collect::<Vec<_>>(), vec!["age"]);
    assert_eq!(e.get_property("age"), Some(&PropertyValue::Integer(30)));
    assert_eq!(e.entity_id(), Some("e1"));
    let acl = e.acl().unwrap();
    assert_eq!(acl.public_read, Some(true));
    assert_eq!(acl.acl_write, Some(vec!["u1".to_string()]));
    assert_eq!(acl.acl_read, None);
}

#[test]
fn dates_and_links_decode_into_dedicated_fields() {
    let e = Entity::from_payload(
        "people",
        &obj(json!({
            "entityId": "e1",
            "dateCreated": "2024-01-02T03:04:05Z",
            "dateUpdated": 1_704_164_645_000_i64,
            "links": {"linkName": "pet", "entities": {"entityId": "p1"}}
        })),
    );
    assert_eq!(e.date_created(), e.date_updated());
    assert!(e.date_created().is_some());
    assert_eq!(e.link("pet").map(|l| l.targets.len()), Some(1));
    assert!(e.properties().is_empty());
}

#[test]
fn payload_without_acl_fields_leaves_acl_untouched() {
    let mut e = Entity::new("notes");
    e.set_acl(Some(Acl::public()));
    e.merge_payload(&obj(json!({"entityId": "e1"})));
    assert_eq!(e.acl(), Some(&Acl::public()));
    assert_eq!(e.entity_id(), Some("e1"));
}

#[test]
fn merge_overwrites_only_mentioned_properties() {
    let mut e = Entity::new("notes");
    e.set_property("a", 1).unwrap();
    e.set_property("b", 2).unwrap();
    e.merge_payload(&obj(json!({"b": "two"})));
    assert_eq!(e.get_property("a"), Some(&PropertyValue::Integer(1)));
    assert_eq!(e.get_property("b").and_then(PropertyValue::as_str), Some("two"));
}

#[test]
fn envelope_decode_requires_entity_key() {
    assert!(Entity::from_envelope("s", &json!({"other": {}})).is_none());
    let e = Entity::from_envelope("s", &json!({"entity": {"entityId": "x"}})).unwrap();
    assert_eq!(e.entity_id(), Some("x"));
    assert_eq!(e.store(), "s");
}

#[test]
fn mark_deleted_clears_identity() {
    let mut e = Entity::from_payload(
        "s",
        &obj(json!({"entityId": "x", "dateCreated": "2024-01-02T03:04:05Z", "k": 1})),
    );
    e.mark_deleted();
    assert_eq!(e.entity_id(), None);
    assert_eq!(e.date_created(), None);
    assert!(matches!(e.require_id(), Err(ModelError::PreconditionFailed(_))));
    assert_eq!(e.get_property("k"), Some(&PropertyValue::Integer(1)));
}
