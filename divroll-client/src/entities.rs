//! Entity create, read, update, delete and query.

use crate::client::{DivrollClient, require_envelope};
use crate::error::{ClientError, ClientResult};
use crate::query::{QueryParams, include_pair};
use crate::transport::Method;
use divroll_model::{
    Acl, ENTITY_ENVELOPE, Entity, EntityCollection, ModelError, decode_entities,
};
use serde_json::json;
use tracing::info;

const ENTITIES: &str = "entities";

impl DivrollClient {
    /// Creates `entity` in its store and adopts the id the server assigns.
    ///
    /// An entity without an ACL is created master-key-only. After success the
    /// entity's ACL reflects what the server returned, or what was sent if
    /// the response carries no ACL fields.
    pub async fn create(&self, entity: &mut Entity) -> ClientResult<()> {
        if entity.entity_id().is_some() {
            return Err(ModelError::PreconditionFailed("entity already created".into()).into());
        }
        let wire_acl = Acl::to_wire(entity.acl());
        let payload = entity.to_payload()?;
        let sent_acl = Acl::from_wire(&payload);

        let request = self
            .request(Method::Post, self.path(&[ENTITIES, entity.store()]))
            .headers(self.acl_headers(&wire_acl))
            .json(json!({ ENTITY_ENVELOPE: payload }));
        let body = self.execute_json(request).await?;
        let created = require_envelope(&body, ENTITY_ENVELOPE)?;

        entity.set_acl(Some(sent_acl));
        entity.merge_payload(created);
        let id = entity
            .entity_id()
            .ok_or_else(|| ClientError::InvalidResponse("created entity has no id".into()))?;
        info!("Created entity {} in {}", id, entity.store());
        Ok(())
    }

    /// Replaces `entity` with the server's copy, expanding the named links.
    pub async fn retrieve(&self, entity: &mut Entity, include: &[&str]) -> ClientResult<()> {
        let id = entity.require_id()?.to_string();
        let request = self
            .request(Method::Get, self.path(&[ENTITIES, entity.store(), id.as_str()]))
            .query(include_pair(include));
        let body = self.execute_json(request).await?;
        let payload = require_envelope(&body, ENTITY_ENVELOPE)?;

        let mut fresh = Entity::with_id(entity.store(), id);
        fresh.merge_payload(payload);
        *entity = fresh;
        Ok(())
    }

    /// Writes the entity's properties and ACL over the stored copy.
    pub async fn update(&self, entity: &mut Entity) -> ClientResult<()> {
        let id = entity.require_id()?.to_string();
        let wire_acl = Acl::to_wire(entity.acl());
        let payload = entity.to_payload()?;
        let sent_acl = Acl::from_wire(&payload);

        let request = self
            .request(Method::Put, self.path(&[ENTITIES, entity.store(), id.as_str()]))
            .headers(self.acl_headers(&wire_acl))
            .json(json!({ ENTITY_ENVELOPE: payload }));
        let body = self.execute_json(request).await?;

        entity.set_acl(Some(sent_acl));
        if let Ok(updated) = require_envelope(&body, ENTITY_ENVELOPE) {
            entity.merge_payload(updated);
        }
        Ok(())
    }

    /// Deletes the entity; on success it no longer has an id.
    pub async fn delete(&self, entity: &mut Entity) -> ClientResult<()> {
        let id = entity.require_id()?.to_string();
        let path = self.path(&[ENTITIES, entity.store(), id.as_str()]);
        let request = self.request(Method::Delete, path);
        self.execute(request).await?;

        info!("Deleted entity {} from {}", id, entity.store());
        entity.mark_deleted();
        Ok(())
    }

    /// Reads one page of `store`.
    pub async fn query(&self, store: &str, params: &QueryParams) -> ClientResult<EntityCollection> {
        let request = self
            .request(Method::Get, self.path(&[ENTITIES, store]))
            .query(params.to_pairs());
        let body = self.execute_json(request).await?;
        Ok(decode_entities(&body, store))
    }

    /// Deletes every entity in `store`. Usually needs the master key.
    pub async fn delete_all(&self, store: &str) -> ClientResult<()> {
        let request = self.request(Method::Delete, self.path(&[ENTITIES, store]));
        self.execute(request).await?;
        info!("Deleted all entities in {}", store);
        Ok(())
    }
}
