//! Named roles; users are granted access through the roles they hold.

use crate::acl::Acl;
use crate::entity::unwrap_envelope;
use crate::error::{ModelError, ModelResult};
use crate::wire::{self, DATE_CREATED, DATE_UPDATED, ENTITY_ID, string_field};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

pub const ROLE_ENVELOPE: &str = "role";
pub const ROLES_COLLECTION: &str = "roles";

const NAME: &str = "name";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Role {
    pub entity_id: Option<String>,
    pub name: Option<String>,
    pub acl: Option<Acl>,
    pub date_created: Option<DateTime<Utc>>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            ..Self::default()
        }
    }

    pub fn require_id(&self) -> ModelResult<&str> {
        self.entity_id.as_deref().ok_or_else(ModelError::unsaved)
    }

    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        if let Some(name) = &self.name {
            payload.insert(NAME.to_string(), Value::String(name.clone()));
        }
        Acl::to_wire(self.acl.as_ref()).write_into(&mut payload);
        payload
    }

    pub fn to_envelope(&self) -> Value {
        json!({ ROLE_ENVELOPE: self.to_payload() })
    }

    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let mut role = Self::default();
        role.merge_payload(payload);
        role
    }

    pub fn merge_payload(&mut self, payload: &Map<String, Value>) {
        if self.entity_id.is_none() {
            self.entity_id = string_field(payload, ENTITY_ID);
        }
        if let Some(name) = string_field(payload, NAME) {
            self.name = Some(name);
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
    }

    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        unwrap_envelope(envelope, ROLE_ENVELOPE).map(Self::from_payload)
    }

    pub fn mark_deleted(&mut self) {
        self.entity_id = None;
        self.date_created = None;
        self.date_updated = None;
    }
}
