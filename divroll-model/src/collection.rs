//! Decoding of collection responses (`{"<key>": {"results": ..., "count": n}}`).

use crate::entity::{Entity, unwrap_envelope};
use crate::role::{ROLES_COLLECTION, Role};
use crate::user::{USERS_COLLECTION, User};
use crate::wire::{COUNT, ENTITY_TYPE, RESULTS, string_field};
use serde_json::{Map, Value};

/// Envelope key of entity query responses.
pub const ENTITIES_COLLECTION: &str = "entities";

/// One page of decoded records plus the total count, when it was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub count: Option<u64>,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: None,
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

pub type EntityCollection = Collection<Entity>;

type ResultsStrategy = for<'a> fn(&'a Value) -> Option<Vec<&'a Map<String, Value>>>;

/// Decodes a collection envelope with `decode` applied to each record.
///
/// `results` may be an array of record objects or, for a single hit, one bare
/// object. A missing envelope or an undecodable `results` yields no items; a
/// missing or non-numeric `count` yields `None`. Neither is an error.
pub fn decode_collection<T>(
    payload: &Value,
    envelope_key: &str,
    decode: impl Fn(&Map<String, Value>) -> T,
) -> Collection<T> {
    let Some(body) = unwrap_envelope(payload, envelope_key) else {
        return Collection::default();
    };
    let strategies: [ResultsStrategy; 2] = [results_many, results_one];
    let items = body
        .get(RESULTS)
        .and_then(|results| strategies.iter().find_map(|strategy| strategy(results)))
        .unwrap_or_default()
        .into_iter()
        .map(decode)
        .collect();
    let count = body.get(COUNT).and_then(Value::as_u64);
    Collection { items, count }
}

fn results_many(value: &Value) -> Option<Vec<&Map<String, Value>>> {
    value
        .as_array()?
        .iter()
        .map(Value::as_object)
        .collect::<Option<Vec<_>>>()
}

fn results_one(value: &Value) -> Option<Vec<&Map<String, Value>>> {
    value.as_object().map(|object| vec![object])
}

/// Decodes an entity query response; every entity belongs to `store`.
pub fn decode_entities(payload: &Value, store: &str) -> EntityCollection {
    decode_collection(payload, ENTITIES_COLLECTION, |object| {
        Entity::from_payload(store, object)
    })
}

/// Decodes the targets of one link. Each target's store comes from its
/// `entityType`, falling back to `default_store` when the server leaves it
/// out.
pub fn decode_linked_entities(payload: &Value, default_store: &str) -> EntityCollection {
    decode_collection(payload, ENTITIES_COLLECTION, |object| {
        let store = string_field(object, ENTITY_TYPE).unwrap_or_else(|| default_store.to_string());
        let mut entity = Entity::from_payload(store, object);
        entity.remove_property(ENTITY_TYPE);
        entity
    })
}

pub fn decode_users(payload: &Value, token_field: &str) -> Collection<User> {
    decode_collection(payload, USERS_COLLECTION, |object| {
        User::from_payload(object, token_field)
    })
}

pub fn decode_roles(payload: &Value) -> Collection<Role> {
    decode_collection(payload, ROLES_COLLECTION, Role::from_payload)
}
