//! Application users: principals that can log in and own roles.

use crate::acl::Acl;
use crate::entity::unwrap_envelope;
use crate::error::{ModelError, ModelResult};
use crate::link::{self, Link};
use crate::value::{self, PropertyMap, PropertyValue};
use crate::wire::{self, DATE_CREATED, DATE_UPDATED, ENTITY_ID, LINKS, string_field};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

pub const USER_ENVELOPE: &str = "user";
pub const USERS_COLLECTION: &str = "users";

const USERNAME: &str = "username";
const PASSWORD: &str = "password";
const ROLES: &str = "roles";
const ACCOUNT_KEYS: [&str; 3] = [USERNAME, PASSWORD, ROLES];

/// A user record. The password is write-only: it is sent when set and never
/// read back from the server.
///
/// Fields other than the account fields live in `properties`, as on an
/// [`crate::Entity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub entity_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_token: Option<String>,
    pub acl: Option<Acl>,
    /// Ids of the roles this user belongs to.
    pub roles: Vec<String>,
    pub properties: PropertyMap,
    /// Links expanded by the last read.
    pub links: Vec<Link>,
    pub date_created: Option<DateTime<Utc>>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
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

    /// Adds the user to a role.
    pub fn add_role(&mut self, role_id: impl Into<String>) {
        let role_id = role_id.into();
        if !self.roles.contains(&role_id) {
            self.roles.push(role_id);
        }
    }

    /// Stores a custom property. Reserved and account field names are
    /// refused.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> ModelResult<()> {
        let name = name.into();
        if wire::is_reserved(&name) || ACCOUNT_KEYS.contains(&name.as_str()) {
            return Err(ModelError::ReservedProperty(name));
        }
        self.properties.insert(name, value.into());
        Ok(())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        link::find(&self.links, name)
    }

    pub fn to_payload(&self) -> ModelResult<Map<String, Value>> {
        let mut payload = value::encode_map(&self.properties)?;
        if let Some(username) = &self.username {
            payload.insert(USERNAME.to_string(), Value::String(username.clone()));
        }
        if let Some(password) = &self.password {
            payload.insert(PASSWORD.to_string(), Value::String(password.clone()));
        }
        payload.insert(ROLES.to_string(), wire::stubs_value(&self.roles));
        Acl::to_wire(self.acl.as_ref()).write_into(&mut payload);
        Ok(payload)
    }

    pub fn to_envelope(&self) -> ModelResult<Value> {
        Ok(json!({ USER_ENVELOPE: self.to_payload()? }))
    }

    /// Decodes a user payload. `token_field` names the auth token key, which
    /// differs between server flavours.
    pub fn from_payload(payload: &Map<String, Value>, token_field: &str) -> Self {
        let mut user = Self::default();
        user.merge_payload(payload, token_field);
        user
    }

    /// Folds a server payload into this user, keeping fields it omits. Keys
    /// that are neither reserved nor account fields replace the property of
    /// the same name.
    pub fn merge_payload(&mut self, payload: &Map<String, Value>, token_field: &str) {
        if self.entity_id.is_none() {
            self.entity_id = string_field(payload, ENTITY_ID);
        }
        if let Some(username) = string_field(payload, USERNAME) {
            self.username = Some(username);
        }
        if let Some(token) = string_field(payload, token_field) {
            self.auth_token = Some(token);
        }
        if let Some(roles) = payload.get(ROLES).and_then(wire::stub_ids) {
            self.roles = roles;
        }
        if let Some(acl) = Acl::from_wire_if_present(payload) {
            self.acl = Some(acl);
        }
        if let Some(links) = payload.get(LINKS) {
            self.links = Link::decode_all(links);
        }
        if let Some(created) = payload.get(DATE_CREATED).and_then(wire::decode_timestamp) {
            self.date_created = Some(created);
        }
        if let Some(updated) = payload.get(DATE_UPDATED).and_then(wire::decode_timestamp) {
            self.date_updated = Some(updated);
        }
        for (key, wire_value) in payload {
            let account_field = ACCOUNT_KEYS.contains(&key.as_str()) || key == token_field;
            if !account_field && !wire::is_reserved(key) {
                self.properties.insert(key.clone(), value::decode(wire_value));
            }
        }
    }

    pub fn from_envelope(envelope: &Value, token_field: &str) -> Option<Self> {
        unwrap_envelope(envelope, USER_ENVELOPE)
            .map(|payload| Self::from_payload(payload, token_field))
    }

    pub fn mark_deleted(&mut self) {
        self.entity_id = None;
        self.auth_token = None;
        self.links.clear();
        self.date_created = None;
        self.date_updated = None;
    }
}
