//! Link mutations and reads.
//!
//! Links are addressed by `(store, entityId, linkName[, targetId])`. There is
//! no local copy of the link graph; expand links on `retrieve`/`query` with
//! `include`, or list the targets of one link with [`DivrollClient::links`].

use crate::client::DivrollClient;
use crate::error::ClientResult;
use crate::transport::Method;
use divroll_model::{Entity, EntityCollection, decode_linked_entities};
use tracing::debug;

const ENTITIES: &str = "entities";
const LINKS: &str = "links";

impl DivrollClient {
    /// Makes `target_id` the only target of `link_name`.
    pub async fn set_link(
        &self,
        entity: &Entity,
        link_name: &str,
        target_id: &str,
    ) -> ClientResult<()> {
        self.link_request(Method::Put, entity, link_name, Some(target_id))
            .await
    }

    /// Appends `target_id` to `link_name`.
    pub async fn add_link(
        &self,
        entity: &Entity,
        link_name: &str,
        target_id: &str,
    ) -> ClientResult<()> {
        self.link_request(Method::Post, entity, link_name, Some(target_id))
            .await
    }

    /// Removes one target from `link_name`.
    pub async fn remove_link(
        &self,
        entity: &Entity,
        link_name: &str,
        target_id: &str,
    ) -> ClientResult<()> {
        self.link_request(Method::Delete, entity, link_name, Some(target_id))
            .await
    }

    /// Removes every target of `link_name`.
    pub async fn remove_links(&self, entity: &Entity, link_name: &str) -> ClientResult<()> {
        self.link_request(Method::Delete, entity, link_name, None).await
    }

    /// Lists the entities `link_name` points at.
    ///
    /// The response is an ordinary `entities` collection. Targets without an
    /// `entityType` are assumed to live in the linking entity's store.
    pub async fn links(&self, entity: &Entity, link_name: &str) -> ClientResult<EntityCollection> {
        let id = entity.require_id()?;
        let path = self.path(&[ENTITIES, entity.store(), id, LINKS, link_name]);
        let body = self.execute_json(self.request(Method::Get, path)).await?;
        Ok(decode_linked_entities(&body, entity.store()))
    }

    async fn link_request(
        &self,
        method: Method,
        entity: &Entity,
        link_name: &str,
        target_id: Option<&str>,
    ) -> ClientResult<()> {
        let id = entity.require_id()?;
        let mut segments = vec![ENTITIES, entity.store(), id, LINKS, link_name];
        segments.extend(target_id);
        let path = self.path(&segments);

        debug!("{method} link {link_name} on {id}");
        self.execute(self.request(method, path)).await?;
        Ok(())
    }
}
