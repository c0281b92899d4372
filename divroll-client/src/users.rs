//! User accounts and login.

use crate::client::{DivrollClient, require_envelope};
use crate::error::{ClientError, ClientResult};
use crate::query::QueryParams;
use crate::transport::Method;
use divroll_model::user::{USER_ENVELOPE, USERS_COLLECTION};
use divroll_model::{Acl, Collection, ModelError, User, decode_users};
use tracing::info;

const ENTITIES: &str = "entities";
const LOGIN: &str = "login";

impl DivrollClient {
    /// Registers `user` and adopts the id the server assigns.
    pub async fn create_user(&self, user: &mut User) -> ClientResult<()> {
        if user.entity_id.is_some() {
            return Err(ModelError::PreconditionFailed("user already created".into()).into());
        }
        let wire_acl = Acl::to_wire(user.acl.as_ref());
        let request = self
            .request(Method::Post, self.path(&[ENTITIES, USERS_COLLECTION]))
            .headers(self.acl_headers(&wire_acl))
            .json(user.to_envelope()?);
        let body = self.execute_json(request).await?;
        let created = require_envelope(&body, USER_ENVELOPE)?;

        user.acl = Some(Acl::from_wire(&wire_acl.to_object()));
        user.merge_payload(created, &self.brand().auth_token_field);
        let id = user
            .entity_id
            .as_deref()
            .ok_or_else(|| ClientError::InvalidResponse("created user has no id".into()))?;
        info!("Created user {}", id);
        Ok(())
    }

    /// Replaces `user` with the server's copy. The password is kept locally
    /// since the server never returns it.
    pub async fn retrieve_user(&self, user: &mut User) -> ClientResult<()> {
        let id = user.require_id()?.to_string();
        let path = self.path(&[ENTITIES, USERS_COLLECTION, id.as_str()]);
        let request = self.request(Method::Get, path);
        let body = self.execute_json(request).await?;
        let payload = require_envelope(&body, USER_ENVELOPE)?;

        let mut fresh = User::with_id(id);
        fresh.password = user.password.take();
        fresh.auth_token = user.auth_token.take();
        fresh.merge_payload(payload, &self.brand().auth_token_field);
        *user = fresh;
        Ok(())
    }

    pub async fn update_user(&self, user: &mut User) -> ClientResult<()> {
        let id = user.require_id()?.to_string();
        let wire_acl = Acl::to_wire(user.acl.as_ref());
        let request = self
            .request(Method::Put, self.path(&[ENTITIES, USERS_COLLECTION, id.as_str()]))
            .headers(self.acl_headers(&wire_acl))
            .json(user.to_envelope()?);
        let body = self.execute_json(request).await?;

        user.acl = Some(Acl::from_wire(&wire_acl.to_object()));
        if let Ok(updated) = require_envelope(&body, USER_ENVELOPE) {
            user.merge_payload(updated, &self.brand().auth_token_field);
        }
        Ok(())
    }

    pub async fn delete_user(&self, user: &mut User) -> ClientResult<()> {
        let id = user.require_id()?.to_string();
        let path = self.path(&[ENTITIES, USERS_COLLECTION, id.as_str()]);
        let request = self.request(Method::Delete, path);
        self.execute(request).await?;
        info!("Deleted user {}", id);
        user.mark_deleted();
        Ok(())
    }

    /// Logs in and returns the user with its auth token.
    ///
    /// The token is read from the brand's token field. Store the user in a
    /// [`crate::Session`] and derive credentials from it; this client's own
    /// credentials are left unchanged.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        let request = self
            .request(Method::Get, self.path(&[ENTITIES, USERS_COLLECTION, LOGIN]))
            .query([
                ("username".to_string(), username.to_string()),
                ("password".to_string(), password.to_string()),
            ]);
        let body = self.execute_json(request).await?;
        let payload = require_envelope(&body, USER_ENVELOPE)?;
        let user = User::from_payload(payload, &self.brand().auth_token_field);
        if user.auth_token.is_none() {
            return Err(ClientError::InvalidResponse("login response has no auth token".into()));
        }
        info!("Logged in as {}", username);
        Ok(user)
    }

    pub async fn query_users(&self, params: &QueryParams) -> ClientResult<Collection<User>> {
        let request = self
            .request(Method::Get, self.path(&[ENTITIES, USERS_COLLECTION]))
            .query(params.to_pairs());
        let body = self.execute_json(request).await?;
        Ok(decode_users(&body, &self.brand().auth_token_field))
    }
}
