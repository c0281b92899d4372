//! Per-record access control lists.
//!
//! An operation on a record is permitted when the caller holds the master key,
//! or the matching `public*` flag is true, or one of the caller's principal
//! ids (its user id or any of its role ids) appears in the matching `acl*`
//! list. The server evaluates that predicate; this module only encodes and
//! decodes its operands.

use crate::wire::{ACL_READ, ACL_WRITE, PUBLIC_READ, PUBLIC_WRITE, stub_ids, stubs_value};
use serde_json::{Map, Value};

/// Read and write visibility for one record.
///
/// An absent ACL (`Option<Acl>::None`) on create means master-key-only.
/// Unset public flags are `None`, not `false`: the server sometimes omits
/// them, and omission is not the same statement as a denial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acl {
    pub public_read: Option<bool>,
    pub public_write: Option<bool>,
    pub acl_read: Option<Vec<String>>,
    pub acl_write: Option<Vec<String>>,
}

impl Acl {
    /// An ACL with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// No public access and no principal grants.
    pub fn master_key_only() -> Self {
        Self {
            public_read: None,
            public_write: None,
            acl_read: Some(Vec::new()),
            acl_write: Some(Vec::new()),
        }
    }

    /// Anyone may read and write.
    pub fn public() -> Self {
        Self {
            public_read: Some(true),
            public_write: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_public_read(mut self, allowed: bool) -> Self {
        self.public_read = Some(allowed);
        self
    }

    #[must_use]
    pub fn with_public_write(mut self, allowed: bool) -> Self {
        self.public_write = Some(allowed);
        self
    }

    /// Grants read access to a user or role id.
    #[must_use]
    pub fn grant_read(mut self, principal_id: impl Into<String>) -> Self {
        push_unique(self.acl_read.get_or_insert_with(Vec::new), principal_id.into());
        self
    }

    /// Grants write access to a user or role id.
    #[must_use]
    pub fn grant_write(mut self, principal_id: impl Into<String>) -> Self {
        push_unique(self.acl_write.get_or_insert_with(Vec::new), principal_id.into());
        self
    }

    /// Removes a principal from both lists.
    pub fn revoke(&mut self, principal_id: &str) {
        for list in [&mut self.acl_read, &mut self.acl_write].into_iter().flatten() {
            list.retain(|id| id != principal_id);
        }
    }

    /// Encodes an optional ACL into its wire fields.
    pub fn to_wire(acl: Option<&Acl>) -> AclWire {
        match acl {
            None => AclWire {
                acl_read: Some(Vec::new()),
                acl_write: Some(Vec::new()),
                public_read: None,
                public_write: None,
            },
            Some(acl) => AclWire {
                acl_read: acl.acl_read.clone(),
                acl_write: acl.acl_write.clone(),
                public_read: acl.public_read,
                public_write: acl.public_write,
            },
        }
    }

    /// Decodes ACL fields from a record payload. Never fails: undecodable
    /// lists become `None`, non-boolean public flags become `None`.
    pub fn from_wire(payload: &Map<String, Value>) -> Acl {
        Acl {
            public_read: payload.get(PUBLIC_READ).and_then(Value::as_bool),
            public_write: payload.get(PUBLIC_WRITE).and_then(Value::as_bool),
            acl_read: payload.get(ACL_READ).and_then(stub_ids),
            acl_write: payload.get(ACL_WRITE).and_then(stub_ids),
        }
    }

    /// Decodes the ACL only if the payload carries any ACL field.
    pub fn from_wire_if_present(payload: &Map<String, Value>) -> Option<Acl> {
        [ACL_READ, ACL_WRITE, PUBLIC_READ, PUBLIC_WRITE]
            .iter()
            .any(|key| payload.contains_key(*key))
            .then(|| Acl::from_wire(payload))
    }
}

fn push_unique(list: &mut Vec<String>, id: String) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Wire form of an ACL, ready to be merged into a record payload.
///
/// Principal lists go out as `[{"entityId": id}, ...]`. A list that was never
/// set on a present ACL is sent as `null` so that re-decoding yields `None`
/// again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclWire {
    pub acl_read: Option<Vec<String>>,
    pub acl_write: Option<Vec<String>>,
    pub public_read: Option<bool>,
    pub public_write: Option<bool>,
}

impl AclWire {
    /// JSON value of the read list.
    pub fn read_value(&self) -> Value {
        list_value(self.acl_read.as_deref())
    }

    /// JSON value of the write list.
    pub fn write_value(&self) -> Value {
        list_value(self.acl_write.as_deref())
    }

    /// Writes the four ACL fields into `payload`, replacing any present.
    pub fn write_into(&self, payload: &mut Map<String, Value>) {
        payload.insert(ACL_READ.to_string(), self.read_value());
        payload.insert(ACL_WRITE.to_string(), self.write_value());
        payload.insert(PUBLIC_READ.to_string(), flag_value(self.public_read));
        payload.insert(PUBLIC_WRITE.to_string(), flag_value(self.public_write));
    }

    /// The four fields as a standalone object.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        self.write_into(&mut object);
        object
    }

    /// Text for the ACL read echo header; always matches the body.
    pub fn read_header(&self) -> String {
        self.read_value().to_string()
    }

    /// Text for the ACL write echo header; always matches the body.
    pub fn write_header(&self) -> String {
        self.write_value().to_string()
    }
}

fn list_value(ids: Option<&[String]>) -> Value {
    ids.map_or(Value::Null, stubs_value)
}

fn flag_value(flag: Option<bool>) -> Value {
    flag.map_or(Value::Null, Value::Bool)
}
