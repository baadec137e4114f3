//! Registry data model
//!
//! - `SequenceId`: totally ordered record identity, never reused
//! - `Principal`: an identity able to own records and issue calls
//! - `ContentRecord`: the stored metadata for one registration
//! - `CallContext`: ambient inputs supplied by the host on every call

use std::fmt;

use serde::{Deserialize, Serialize};

/// A totally ordered, opaque record identity.
///
/// Issued by the sequence counter starting at 1. No `Default` exists so an
/// id cannot be fabricated by accident.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(u64);

impl SequenceId {
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a caller or record owner.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Ambient inputs of one invocation.
///
/// The host asserts who is calling and at which ordering index (e.g. block
/// height); the registry trusts both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub principal: Principal,
    pub height: u64,
}

impl CallContext {
    pub fn new(principal: impl Into<Principal>, height: u64) -> Self {
        Self {
            principal: principal.into(),
            height,
        }
    }
}

/// The caller-editable fields of a record, as submitted to register/modify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub display_name: String,
    pub byte_size: u64,
    pub description: String,
    pub classification_labels: Vec<String>,
}

impl RecordFields {
    pub fn new(
        display_name: impl Into<String>,
        byte_size: u64,
        description: impl Into<String>,
        classification_labels: Vec<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            byte_size,
            description: description.into(),
            classification_labels,
        }
    }
}

/// A registered content record.
///
/// `registration_height` is written once at creation. `proprietor` changes
/// only through transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub sequence_id: SequenceId,
    pub display_name: String,
    pub proprietor: Principal,
    pub byte_size: u64,
    pub registration_height: u64,
    pub description: String,
    pub classification_labels: Vec<String>,
}

impl ContentRecord {
    pub(crate) fn create(
        sequence_id: SequenceId,
        fields: RecordFields,
        ctx: &CallContext,
    ) -> Self {
        Self {
            sequence_id,
            display_name: fields.display_name,
            proprietor: ctx.principal.clone(),
            byte_size: fields.byte_size,
            registration_height: ctx.height,
            description: fields.description,
            classification_labels: fields.classification_labels,
        }
    }

    /// Copy of the editable fields.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            display_name: self.display_name.clone(),
            byte_size: self.byte_size,
            description: self.description.clone(),
            classification_labels: self.classification_labels.clone(),
        }
    }

    /// Replaces the editable fields, leaving identity, owner and height alone.
    pub(crate) fn apply(&mut self, fields: RecordFields) {
        self.display_name = fields.display_name;
        self.byte_size = fields.byte_size;
        self.description = fields.description;
        self.classification_labels = fields.classification_labels;
    }
}
