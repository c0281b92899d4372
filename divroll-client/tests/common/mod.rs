//! Shared helpers for client tests.

#![allow(dead_code)]

use divroll_client::{AuthContext, Brand, ClientConfig, DivrollClient};
use wiremock::MockServer;

pub const APP_ID: &str = "app-123";
pub const API_KEY: &str = "key-456";
pub const MASTER_KEY: &str = "master-789";

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn auth() -> AuthContext {
    AuthContext::new(APP_ID, API_KEY)
}

pub fn client_for(server: &MockServer) -> DivrollClient {
    client_with(server, Brand::divroll(), auth())
}

pub fn master_client_for(server: &MockServer) -> DivrollClient {
    client_with(server, Brand::divroll(), auth().with_master_key(MASTER_KEY))
}

pub fn client_with(server: &MockServer, brand: Brand, auth: AuthContext) -> DivrollClient {
    init_tracing();
    let config = ClientConfig::new(server.uri()).with_brand(brand);
    DivrollClient::new(config, auth).expect("client should build")
}
