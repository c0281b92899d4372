//! Schema-less records in named stores and their payload encoding.

use crate::acl::Acl;
use crate::error::{ModelError, ModelResult};
use crate::link::{self, Link};
use crate::value::{self, PropertyMap, PropertyValue};
use crate::wire::{self, DATE_CREATED, DATE_UPDATED, ENTITY_ID, LINKS};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Envelope key wrapping a single entity payload.
pub const ENTITY_ENVELOPE: &str = "entity";

/// A schema-less record in a named store.
///
/// The store is fixed at construction. The id is absent until the server
/// assigns one on create and cannot be changed afterwards; deleting the
/// record clears it again.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    store: String,
    entity_id: Option<String>,
    acl: Option<Acl>,
    properties: PropertyMap,
    links: Vec<Link>,
    date_created: Option<DateTime<Utc>>,
    date_updated: Option<DateTime<Utc>>,
}

impl Entity {
    /// A new, unsaved entity.
    pub fn new(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            entity_id: None,
            acl: None,
            properties: PropertyMap::new(),
            links: Vec::new(),
            date_created: None,
            date_updated: None,
        }
    }

    /// A handle on an existing entity, typically to `retrieve` it.
    pub fn with_id(store: impl Into<String>, entity_id: impl Into<String>) -> Self {
        let mut entity = Self::new(store);
        entity.entity_id = Some(entity_id.into());
        entity
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// The id, or [`ModelError::PreconditionFailed`] if the entity is unsaved.
    pub fn require_id(&self) -> ModelResult<&str> {
        self.entity_id().ok_or_else(ModelError::unsaved)
    }

    pub fn acl(&self) -> Option<&Acl> {
        self.acl.as_ref()
    }

    /// Replaces the ACL; `None` means master-key-only on the next write.
    pub fn set_acl(&mut self, acl: Option<Acl>) {
        self.acl = acl;
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Stores a property. `Null` is kept as an explicit value so clearing a
    /// field reaches the server.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> ModelResult<()> {
        let name = name.into();
        if wire::is_reserved(&name) {
            return Err(ModelError::ReservedProperty(name));
        }
        self.properties.insert(name, value.into());
        Ok(())
    }

    /// Stores any serializable value as a property.
    pub fn set_property_from<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> ModelResult<()> {
        let value = PropertyValue::from_serialize(value)?;
        self.set_property(name, value)
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        link::find(&self.links, name)
    }

    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        self.date_created
    }

    pub fn date_updated(&self) -> Option<DateTime<Utc>> {
        self.date_updated
    }

    /// Builds the body sent on create and update: properties plus ACL fields.
    pub fn to_payload(&self) -> ModelResult<Map<String, Value>> {
        let mut payload = value::encode_map(&self.properties)?;
        Acl::to_wire(self.acl.as_ref()).write_into(&mut payload);
        Ok(payload)
    }

    /// `{"entity": {...}}`.
    pub fn to_envelope(&self) -> ModelResult<Value> {
        Ok(json!({ ENTITY_ENVELOPE: self.to_payload()? }))
    }

    /// Decodes a full entity payload into a fresh entity of `store`.
    pub fn from_payload(store: impl Into<String>, payload: &Map<String, Value>) -> Self {
        let mut entity = Self::new(store);
        entity.merge_payload(payload);
        entity
    }

    /// Folds a server payload into this entity.
    ///
    /// Reserved keys go to their dedicated fields; every other key replaces
    /// the property of the same name. Fields the payload does not mention are
    /// left alone, and an id already held is never overwritten.
    pub fn merge_payload(&mut self, payload: &Map<String, Value>) {
        if self.entity_id.is_none() {
            self.entity_id = wire::string_field(payload, ENTITY_ID);
        }
        if let Some(acl) = Acl::from_wire_if_present(payload) {
            self.acl = Some(acl);
        }
        if let Some(created) = payload.get(DATE_CREATED).and_then(wire::decode_timestamp) {
            self.date_created = Some(created);
        }
        if let Some(updated) = payload.get(DATE_UPDATED).and_then(wire::decode_timestamp) {
            self.date_updated = Some(updated);
        }
        if let Some(links) = payload.get(LINKS) {
            self.links = Link::decode_all(links);
        }
        for (key, wire_value) in payload {
            if !wire::is_reserved(key) {
                self.properties.insert(key.clone(), value::decode(wire_value));
            }
        }
    }

    /// Decodes `{"entity": {...}}`, or `None` if the envelope is missing.
    pub fn from_envelope(store: impl Into<String>, envelope: &Value) -> Option<Self> {
        unwrap_envelope(envelope, ENTITY_ENVELOPE).map(|payload| Self::from_payload(store, payload))
    }

    /// Forgets server-assigned state after a delete.
    pub fn mark_deleted(&mut self) {
        self.entity_id = None;
        self.date_created = None;
        self.date_updated = None;
        self.links.clear();
    }
}

/// Returns the object under `key` in a response envelope.
pub fn unwrap_envelope<'a>(envelope: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    envelope.get(key).and_then(Value::as_object)
}
