//! Async client for the Divroll object store.
//!
//! Moves the records of [`divroll_model`] over HTTP:
//!
//! - **Config**: server URL, timeout and [`Brand`] (header prefix, API root,
//!   token field) of the server flavour
//! - **Auth**: immutable [`AuthContext`] credentials per client, plus an
//!   application-owned [`Session`] for the logged-in user
//! - **Transport**: the [`Transport`] seam, with [`HttpTransport`] on `reqwest`
//! - **Operations**: entities, links, blobs, users and roles on [`DivrollClient`]
//!
//! Every operation is one request/response cycle. Nothing is cached and
//! nothing is retried; remote failures come back as [`ClientError`] mapped
//! from the status code.
//!
//! # Example
//!
//! ```no_run
//! use divroll_client::{AuthContext, ClientConfig, DivrollClient};
//! use divroll_model::{Acl, Entity};
//!
//! # async fn run() -> divroll_client::ClientResult<()> {
//! let config = ClientConfig::new("https://api.example.com");
//! let client = DivrollClient::new(config, AuthContext::new("app-id", "api-key"))?;
//!
//! let mut note = Entity::new("notes");
//! note.set_property("title", "Hello")?;
//! note.set_acl(Some(Acl::new().with_public_read(true)));
//! client.create(&mut note).await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod blobs;
mod client;
mod config;
mod entities;
mod error;
mod http;
mod links;
mod query;
mod roles;
pub mod transport;
mod users;

pub use auth::{AuthContext, Session};
pub use client::DivrollClient;
pub use config::{Brand, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use http::HttpTransport;
pub use query::QueryParams;
pub use transport::{Method, RequestBody, Transport, WireRequest, WireResponse};
