//! Credentials and the current-session holder.

use crate::config::Brand;
use divroll_model::User;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Immutable credentials attached to every request.
///
/// Builders return new values; nothing mutates a context in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub app_id: String,
    pub api_key: String,
    pub master_key: Option<String>,
    pub auth_token: Option<String>,
    pub namespace: Option<String>,
}

impl AuthContext {
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_master_key(&self, master_key: impl Into<String>) -> Self {
        Self {
            master_key: Some(master_key.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_auth_token(&self, auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(auth_token.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn without_auth_token(&self) -> Self {
        Self {
            auth_token: None,
            ..self.clone()
        }
    }

    pub fn has_master_key(&self) -> bool {
        self.master_key.is_some()
    }

    /// Credential headers for `brand`, skipping unset optional values.
    pub fn headers(&self, brand: &Brand) -> Vec<(String, String)> {
        let mut headers = vec![
            (brand.header("App-Id"), self.app_id.clone()),
            (brand.header("Api-Key"), self.api_key.clone()),
        ];
        let optional = [
            ("Master-Key", &self.master_key),
            ("Auth-Token", &self.auth_token),
            ("Namespace", &self.namespace),
        ];
        for (suffix, value) in optional {
            if let Some(value) = value {
                headers.push((brand.header(suffix), value.clone()));
            }
        }
        headers
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("master_key", &self.master_key.as_ref().map(|_| "<redacted>"))
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Holder for the logged-in user, owned by the application.
///
/// Cloning shares the same slot. The client never reads it on its own; the
/// caller derives an [`AuthContext`] from it explicitly.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Arc<RwLock<Option<User>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, user: User) {
        *self.current.write().await = Some(user);
    }

    pub async fn clear(&self) {
        *self.current.write().await = None;
    }

    /// A copy of the current user, if any.
    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .is_some_and(|user| user.auth_token.is_some())
    }

    /// `base` with the session's auth token applied, or without any token
    /// when nobody is logged in.
    pub async fn auth_context(&self, base: &AuthContext) -> AuthContext {
        let token = self
            .current
            .read()
            .await
            .as_ref()
            .and_then(|user| user.auth_token.clone());
        match token {
            Some(token) => base.with_auth_token(token),
            None => base.without_auth_token(),
        }
    }
}
