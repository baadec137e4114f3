//! Snapshot file layout and disk I/O
//!
//! Format:
//! ```json
//! {
//!   "manifest": {
//!     "format_version": 1,
//!     "created_at": "2026-10-18T11:30:00Z",
//!     "checksum": "crc32:deadbeef",
//!     "height": 42,
//!     "record_count": 3
//!   },
//!   "image": { "format_version": 1, "sequence": 5, "records": [...], "grants": [...] }
//! }
//! ```
//!
//! The checksum covers the canonical bytes of `image`. Writes go to a
//! sibling temp file which is fsynced and then renamed over the target.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::checksum::{compute_checksum, format_checksum, parse_checksum};
use super::errors::{SnapshotError, SnapshotResult};
use super::image::{RegistryImage, IMAGE_FORMAT_VERSION};
use crate::observability::Event;
use crate::registry::Registry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotManifest {
    pub format_version: u8,
    pub created_at: DateTime<Utc>,
    /// CRC32 of the image (format: "crc32:XXXXXXXX")
    pub checksum: String,
    /// Host ordering index at the time of writing
    pub height: u64,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotFile {
    pub manifest: SnapshotManifest,
    pub image: RegistryImage,
}

impl SnapshotFile {
    /// Seal an image with a fresh manifest.
    pub fn seal(image: RegistryImage, height: u64) -> SnapshotResult<Self> {
        let checksum = format_checksum(compute_checksum(&image.canonical_bytes()?));
        Ok(Self {
            manifest: SnapshotManifest {
                format_version: IMAGE_FORMAT_VERSION,
                created_at: Utc::now(),
                checksum,
                height,
                record_count: image.records.len(),
            },
            image,
        })
    }

    /// Recompute the image checksum and compare with the manifest.
    pub fn verify(&self) -> SnapshotResult<()> {
        let expected = parse_checksum(&self.manifest.checksum).ok_or_else(|| {
            SnapshotError::format_error(format!(
                "Malformed checksum '{}'",
                self.manifest.checksum
            ))
        })?;
        let actual = compute_checksum(&self.image.canonical_bytes()?);
        if actual != expected {
            return Err(SnapshotError::checksum_mismatch(
                &self.manifest.checksum,
                &format_checksum(actual),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> SnapshotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SnapshotError::format_error(format!("Failed to serialize snapshot: {}", e))
        })
    }

    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SnapshotError::format_error(format!("Failed to parse snapshot: {}", e)))
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Persist the registry to `path`.
pub fn write_snapshot(
    path: &Path,
    registry: &Registry,
    height: u64,
) -> SnapshotResult<SnapshotManifest> {
    let file = SnapshotFile::seal(registry.export_image()?, height)?;
    let json = file.to_json()?;

    let tmp = temp_path(path);
    {
        let mut out =
            File::create(&tmp).map_err(|e| SnapshotError::io_error_at_path(&tmp, e))?;
        out.write_all(json.as_bytes())
            .map_err(|e| SnapshotError::io_error_at_path(&tmp, e))?;
        out.sync_all()
            .map_err(|e| SnapshotError::io_error_at_path(&tmp, e))?;
    }
    fs::rename(&tmp, path).map_err(|e| SnapshotError::io_error_at_path(path, e))?;

    info!(
        event = Event::SnapshotWritten.as_str(),
        path = %path.display(),
        checksum = %file.manifest.checksum,
        records = file.manifest.record_count
    );
    Ok(file.manifest)
}

/// Read and verify a snapshot file.
pub fn read_snapshot(path: &Path) -> SnapshotResult<SnapshotFile> {
    let content =
        fs::read_to_string(path).map_err(|e| SnapshotError::io_error_at_path(path, e))?;
    let file = SnapshotFile::from_json(&content)?;
    file.verify()?;
    Ok(file)
}

/// Load a registry and the persisted height.
///
/// A missing file yields an empty registry and `None`.
pub fn load_registry(path: &Path) -> SnapshotResult<(Registry, Option<u64>)> {
    if !path.exists() {
        return Ok((Registry::new(), None));
    }

    let file = read_snapshot(path)?;
    let height = file.manifest.height;
    let registry = Registry::from_image(file.image)?;

    info!(
        event = Event::SnapshotLoaded.as_str(),
        path = %path.display(),
        records = file.manifest.record_count,
        height
    );
    Ok((registry, Some(height)))
}
