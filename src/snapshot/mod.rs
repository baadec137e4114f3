//! Snapshot subsystem
//!
//! Persists the sequence counter, record store and access matrix as one
//! checksummed JSON file.
//!
//! # Design Principles
//!
//! - Whole-state copy taken under the registry read guard
//! - Atomic visibility (temp file, fsync, rename)
//! - Explicit integrity verification (CRC32)
//! - Restore re-validates every record and id range
//! - Orphaned grants are persisted as-is

mod checksum;
mod errors;
mod image;
mod manifest;

pub use checksum::{compute_checksum, format_checksum, parse_checksum};
pub use errors::{SnapshotError, SnapshotErrorCode, SnapshotResult};
pub use image::{GrantEntry, RegistryImage, IMAGE_FORMAT_VERSION};
pub use manifest::{
    load_registry, read_snapshot, write_snapshot, SnapshotFile, SnapshotManifest,
};
