//! Roles that group users for ACL grants.

use crate::client::{DivrollClient, require_envelope};
use crate::error::{ClientError, ClientResult};
use crate::query::QueryParams;
use crate::transport::Method;
use divroll_model::role::{ROLE_ENVELOPE, ROLES_COLLECTION};
use divroll_model::{Acl, Collection, ModelError, Role, decode_roles};
use tracing::info;

const ENTITIES: &str = "entities";

impl DivrollClient {
    pub async fn create_role(&self, role: &mut Role) -> ClientResult<()> {
        if role.entity_id.is_some() {
            return Err(ModelError::PreconditionFailed("role already created".into()).into());
        }
        let wire_acl = Acl::to_wire(role.acl.as_ref());
        let request = self
            .request(Method::Post, self.path(&[ENTITIES, ROLES_COLLECTION]))
            .headers(self.acl_headers(&wire_acl))
            .json(role.to_envelope());
        let body = self.execute_json(request).await?;
        let created = require_envelope(&body, ROLE_ENVELOPE)?;

        role.acl = Some(Acl::from_wire(&wire_acl.to_object()));
        role.merge_payload(created);
        let id = role
            .entity_id
            .as_deref()
            .ok_or_else(|| ClientError::InvalidResponse("created role has no id".into()))?;
        info!("Created role {}", id);
        Ok(())
    }

    pub async fn retrieve_role(&self, role: &mut Role) -> ClientResult<()> {
        let id = role.require_id()?.to_string();
        let path = self.path(&[ENTITIES, ROLES_COLLECTION, id.as_str()]);
        let request = self.request(Method::Get, path);
        let body = self.execute_json(request).await?;
        let payload = require_envelope(&body, ROLE_ENVELOPE)?;

        let mut fresh = Role::with_id(id);
        fresh.merge_payload(payload);
        *role = fresh;
        Ok(())
    }

    pub async fn update_role(&self, role: &mut Role) -> ClientResult<()> {
        let id = role.require_id()?.to_string();
        let wire_acl = Acl::to_wire(role.acl.as_ref());
        let request = self
            .request(Method::Put, self.path(&[ENTITIES, ROLES_COLLECTION, id.as_str()]))
            .headers(self.acl_headers(&wire_acl))
            .json(role.to_envelope());
        let body = self.execute_json(request).await?;

        role.acl = Some(Acl::from_wire(&wire_acl.to_object()));
        if let Ok(updated) = require_envelope(&body, ROLE_ENVELOPE) {
            role.merge_payload(updated);
        }
        Ok(())
    }

    pub async fn delete_role(&self, role: &mut Role) -> ClientResult<()> {
        let id = role.require_id()?.to_string();
        let path = self.path(&[ENTITIES, ROLES_COLLECTION, id.as_str()]);
        let request = self.request(Method::Delete, path);
        self.execute(request).await?;
        info!("Deleted role {}", id);
        role.mark_deleted();
        Ok(())
    }

    pub async fn query_roles(&self, params: &QueryParams) -> ClientResult<Collection<Role>> {
        let request = self
            .request(Method::Get, self.path(&[ENTITIES, ROLES_COLLECTION]))
            .query(params.to_pairs());
        let body = self.execute_json(request).await?;
        Ok(decode_roles(&body))
    }
}
