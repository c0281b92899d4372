//! Permission-aware entity model for the Divroll object store.
//!
//! Defines the records a client reads and writes and their wire encoding:
//! - [`PropertyValue`]: typed property values and the recursive coercion to
//!   and from untyped JSON
//! - [`Acl`]: per-record read/write visibility and its wire form
//! - [`Entity`]: a schema-less record in a named store
//! - [`Link`]: named entity-to-entity relationships carried in a payload
//! - [`User`] and [`Role`]: the principals an ACL refers to
//! - [`Collection`]: decoded query results
//!
//! Nothing here performs I/O or decides access. Decoding is tolerant: where
//! the server sends a field in more than one shape, each shape is tried in
//! order and an undecodable field is left unset rather than raising an error.

pub mod acl;
pub mod collection;
pub mod entity;
mod error;
pub mod link;
pub mod role;
pub mod user;
pub mod value;
pub mod wire;

pub use acl::{Acl, AclWire};
pub use collection::{
    Collection, ENTITIES_COLLECTION, EntityCollection, decode_collection, decode_entities,
    decode_linked_entities, decode_roles, decode_users,
};
pub use entity::{ENTITY_ENVELOPE, Entity};
pub use error::{ModelError, ModelResult};
pub use link::Link;
pub use role::Role;
pub use user::User;
pub use value::{PropertyMap, PropertyValue};
pub use wire::EntityStub;
