//! Shared wire-format vocabulary and tolerant decoders.
//!
//! The server is observed to send some list-valued fields either as an array
//! or, when there is exactly one element, as a bare object. Fields like that
//! are decoded with [`one_or_many`], which tries each shape in order.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ENTITY_ID: &str = "entityId";
pub const ENTITY_TYPE: &str = "entityType";
pub const PUBLIC_READ: &str = "publicRead";
pub const PUBLIC_WRITE: &str = "publicWrite";
pub const ACL_READ: &str = "aclRead";
pub const ACL_WRITE: &str = "aclWrite";
pub const DATE_CREATED: &str = "dateCreated";
pub const DATE_UPDATED: &str = "dateUpdated";
pub const LINKS: &str = "links";
pub const LINK_NAME: &str = "linkName";
pub const ENTITIES: &str = "entities";
pub const RESULTS: &str = "results";
pub const COUNT: &str = "count";

/// Keys consumed into dedicated fields and never exposed as user properties.
pub const RESERVED_KEYS: [&str; 8] = [
    ENTITY_ID,
    PUBLIC_READ,
    PUBLIC_WRITE,
    ACL_READ,
    ACL_WRITE,
    DATE_CREATED,
    DATE_UPDATED,
    LINKS,
];

/// Returns true if `key` is reserved by the entity envelope.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Minimal, non-owning reference to another entity.
///
/// Used both for ACL principals and for link targets. ACL principals carry
/// only the id; link targets may also name the target's store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStub {
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl EntityStub {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: None,
        }
    }

    pub fn typed(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: Some(entity_type.into()),
        }
    }

    /// Wire form used in ACL lists and request bodies: `{"entityId": id}`.
    pub fn id_only(entity_id: &str) -> Value {
        serde_json::json!({ ENTITY_ID: entity_id })
    }
}

type ShapeStrategy<T> = fn(&Value) -> Option<Vec<T>>;

/// Decodes a field that may be a list of `T` or a single bare `T`.
///
/// Returns `None` when neither shape parses, so callers can tell an
/// undecodable field apart from an empty list.
pub fn one_or_many<T: DeserializeOwned>(value: &Value) -> Option<Vec<T>> {
    let strategies: [ShapeStrategy<T>; 2] = [as_many::<T>, as_one::<T>];
    strategies.iter().find_map(|strategy| strategy(value))
}

fn as_many<T: DeserializeOwned>(value: &Value) -> Option<Vec<T>> {
    Vec::<T>::deserialize(value).ok()
}

fn as_one<T: DeserializeOwned>(value: &Value) -> Option<Vec<T>> {
    if !value.is_object() {
        return None;
    }
    T::deserialize(value).ok().map(|item| vec![item])
}

/// Decodes stub ids from a list-or-single field.
pub fn stub_ids(value: &Value) -> Option<Vec<String>> {
    one_or_many::<EntityStub>(value)
        .map(|stubs| stubs.into_iter().map(|stub| stub.entity_id).collect())
}

/// Encodes ids as a list of `{"entityId": id}` stubs.
pub fn stubs_value(ids: &[String]) -> Value {
    Value::Array(ids.iter().map(|id| EntityStub::id_only(id)).collect())
}

pub(crate) fn string_field(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Decodes a server timestamp: RFC 3339 text or epoch milliseconds.
pub fn decode_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}
