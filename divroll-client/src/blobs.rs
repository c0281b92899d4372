//! Binary sub-resources of an entity, addressed by `(store, entityId, key)`.
//!
//! Blobs are opaque bytes outside the property map.

use crate::client::DivrollClient;
use crate::error::ClientResult;
use crate::transport::Method;
use divroll_model::Entity;
use tracing::info;

const ENTITIES: &str = "entities";
const BLOBS: &str = "blobs";

impl DivrollClient {
    /// Stores `data` under `blob_key`, replacing any previous blob.
    pub async fn set_blob(
        &self,
        entity: &Entity,
        blob_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ClientResult<()> {
        let path = self.blob_path(entity, blob_key)?;
        let size = data.len();
        let request = self.request(Method::Put, path).bytes(content_type, data);
        self.execute(request).await?;
        info!("Stored blob {} ({} bytes)", blob_key, size);
        Ok(())
    }

    pub async fn get_blob(&self, entity: &Entity, blob_key: &str) -> ClientResult<Vec<u8>> {
        let path = self.blob_path(entity, blob_key)?;
        let response = self.execute(self.request(Method::Get, path)).await?;
        Ok(response.body)
    }

    pub async fn delete_blob(&self, entity: &Entity, blob_key: &str) -> ClientResult<()> {
        let path = self.blob_path(entity, blob_key)?;
        self.execute(self.request(Method::Delete, path)).await?;
        info!("Deleted blob {}", blob_key);
        Ok(())
    }

    fn blob_path(&self, entity: &Entity, blob_key: &str) -> ClientResult<String> {
        let id = entity.require_id()?;
        Ok(self.path(&[ENTITIES, entity.store(), id, BLOBS, blob_key]))
    }
}
