//! Registry image: a serializable copy of counter, records and grants
//!
//! Restoring an image re-checks every invariant the live registry relies
//! on, so a hand-edited or truncated file cannot produce a registry that
//! the operations would never have built.

use serde::{Deserialize, Serialize};

use super::errors::{SnapshotError, SnapshotResult};
use crate::registry::{
    validator, AccessMatrix, ContentRecord, Principal, RecordStore, Registry, SequenceCounter,
    SequenceId,
};
use crate::registry::RegistryState;

pub const IMAGE_FORMAT_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEntry {
    pub sequence_id: SequenceId,
    pub principal: Principal,
    pub granted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryImage {
    pub format_version: u8,
    /// Highest id ever issued
    pub sequence: u64,
    /// Active records, ascending by id
    pub records: Vec<ContentRecord>,
    /// Every access-matrix row, including orphaned ones
    pub grants: Vec<GrantEntry>,
}

impl RegistryImage {
    /// Canonical bytes the checksum is computed over
    pub fn canonical_bytes(&self) -> SnapshotResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| SnapshotError::format_error(format!("Failed to serialize image: {}", e)))
    }
}

impl Registry {
    /// Copy the full state under the read guard.
    pub fn export_image(&self) -> SnapshotResult<RegistryImage> {
        let state = self
            .read()
            .map_err(|e| SnapshotError::state_error(e.to_string()))?;

        Ok(RegistryImage {
            format_version: IMAGE_FORMAT_VERSION,
            sequence: state.sequence.highest(),
            records: state.records.iter().cloned().collect(),
            grants: state
                .access
                .entries()
                .map(|(id, principal, granted)| GrantEntry {
                    sequence_id: *id,
                    principal: principal.clone(),
                    granted,
                })
                .collect(),
        })
    }

    /// Rebuild a registry from an image, rejecting any invariant violation.
    pub fn from_image(image: RegistryImage) -> SnapshotResult<Registry> {
        if image.format_version != IMAGE_FORMAT_VERSION {
            return Err(SnapshotError::format_error(format!(
                "Unsupported image format version {}",
                image.format_version
            )));
        }

        let mut records = RecordStore::new();
        for record in image.records {
            let id = record.sequence_id;
            if id.value() == 0 || id.value() > image.sequence {
                return Err(SnapshotError::corrupt(format!(
                    "record {} outside issued range 1..={}",
                    id, image.sequence
                )));
            }
            validator::check_fields(&record.fields())
                .map_err(|e| SnapshotError::corrupt(format!("record {}: {}", id, e)))?;
            records
                .insert(record)
                .map_err(|_| SnapshotError::corrupt(format!("duplicate record {}", id)))?;
        }

        let mut access = AccessMatrix::new();
        for grant in image.grants {
            let id = grant.sequence_id;
            if id.value() == 0 || id.value() > image.sequence {
                return Err(SnapshotError::corrupt(format!(
                    "grant for {} outside issued range 1..={}",
                    id, image.sequence
                )));
            }
            access.set(id, grant.principal, grant.granted);
        }

        Ok(Registry::from_state(RegistryState {
            sequence: SequenceCounter::from_highest(image.sequence),
            records,
            access,
        }))
    }
}
