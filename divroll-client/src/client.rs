//! The client handle shared by every operation.

use crate::auth::AuthContext;
use crate::config::{Brand, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;
use crate::transport::{Method, Transport, WireRequest, WireResponse};
use divroll_model::AclWire;
use divroll_model::entity::unwrap_envelope;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Async client for one application on a Divroll server.
///
/// Holds configuration, immutable credentials and a transport. It keeps no
/// other state: every call is a single request/response cycle and nothing is
/// cached between calls.
#[derive(Clone)]
pub struct DivrollClient {
    config: ClientConfig,
    auth: AuthContext,
    transport: Arc<dyn Transport>,
}

impl DivrollClient {
    /// Creates a client that talks HTTP to `config.base_url`.
    pub fn new(config: ClientConfig, auth: AuthContext) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, auth, Arc::new(transport)))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(
        config: ClientConfig,
        auth: AuthContext,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            auth,
            transport,
        }
    }

    /// A client sharing this one's transport but sending other credentials.
    #[must_use]
    pub fn with_auth(&self, auth: AuthContext) -> Self {
        Self {
            auth,
            ..self.clone()
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn brand(&self) -> &Brand {
        &self.config.brand
    }

    /// `<api_root>/<segment>/...` with each segment percent-encoded.
    pub(crate) fn path(&self, segments: &[&str]) -> String {
        let root = self.config.brand.api_root.trim_end_matches('/');
        let mut path = String::from(root);
        for segment in segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }
        path
    }

    /// A request carrying the credential headers.
    pub(crate) fn request(&self, method: Method, path: String) -> WireRequest {
        WireRequest::new(method, path).headers(self.auth.headers(self.brand()))
    }

    /// The ACL echo headers, rendered from the same wire form as the body.
    pub(crate) fn acl_headers(&self, wire: &AclWire) -> [(String, String); 2] {
        [
            (self.brand().header("ACL-Read"), wire.read_header()),
            (self.brand().header("ACL-Write"), wire.write_header()),
        ]
    }

    /// Sends a request and maps non-success statuses to errors.
    pub(crate) async fn execute(&self, request: WireRequest) -> ClientResult<WireResponse> {
        let method = request.method;
        let path = request.path.clone();
        debug!("{method} {path}");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!("{method} {path} returned {}", response.status);
        }
        response.error_for_status()
    }

    /// Like [`execute`](Self::execute), parsing the body as JSON.
    pub(crate) async fn execute_json(&self, request: WireRequest) -> ClientResult<Value> {
        self.execute(request).await?.json()
    }
}

impl std::fmt::Debug for DivrollClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DivrollClient")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// The object under `key`, or [`ClientError::InvalidResponse`].
pub(crate) fn require_envelope<'a>(
    body: &'a Value,
    key: &str,
) -> ClientResult<&'a Map<String, Value>> {
    unwrap_envelope(body, key)
        .ok_or_else(|| ClientError::InvalidResponse(format!("missing `{key}` envelope")))
}
