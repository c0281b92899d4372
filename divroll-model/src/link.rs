//! Named relationships carried inside a record payload.

use crate::wire::{ENTITIES, EntityStub, LINK_NAME, one_or_many};
use serde_json::{Value, json};

/// A named, possibly many-valued link from one entity to others.
///
/// Targets are stubs; the linked entities live and die independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub targets: Vec<EntityStub>,
}

impl Link {
    pub fn new(name: impl Into<String>, targets: Vec<EntityStub>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }

    /// Decodes `{"linkName": ..., "entities": [...] | {...}}`.
    ///
    /// Yields `None` when the name is missing or `entities` is neither a list
    /// of stubs nor a single stub.
    pub fn decode(payload: &Value) -> Option<Link> {
        let object = payload.as_object()?;
        let name = object.get(LINK_NAME)?.as_str()?;
        let targets = one_or_many::<EntityStub>(object.get(ENTITIES)?)?;
        Some(Link::new(name, targets))
    }

    /// Decodes the `links` field of a record, which may itself be a list of
    /// link payloads or one bare link payload. Undecodable entries are
    /// dropped.
    pub fn decode_all(value: &Value) -> Vec<Link> {
        match value {
            Value::Array(items) => items.iter().filter_map(Link::decode).collect(),
            Value::Object(_) => Link::decode(value).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn to_wire(&self) -> Value {
        json!({
            LINK_NAME: self.name,
            ENTITIES: self.targets,
        })
    }

    /// Ids of every target, in server order.
    pub fn target_ids(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|stub| stub.entity_id.as_str())
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.target_ids().any(|id| id == entity_id)
    }
}

/// Finds a link by name.
pub fn find<'a>(links: &'a [Link], name: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.name == name)
}

/// Collects the link names into the comma-separated `include` form.
pub fn include_param(names: &[&str]) -> Option<String> {
    (!names.is_empty()).then(|| names.join(","))
}
