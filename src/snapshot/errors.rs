//! Snapshot error types
//!
//! Error codes:
//! - AERO_REG_SNAPSHOT_IO
//! - AERO_REG_SNAPSHOT_FORMAT
//! - AERO_REG_SNAPSHOT_CHECKSUM
//! - AERO_REG_SNAPSHOT_CORRUPT
//! - AERO_REG_SNAPSHOT_STATE

use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotErrorCode {
    /// Read, write, fsync or rename failed
    Io,
    /// File is not a parseable snapshot, or has an unknown format version
    Format,
    /// Stored checksum does not match the image
    Checksum,
    /// Image parsed but breaks a registry invariant
    Corrupt,
    /// Live registry state could not be read
    State,
}

impl SnapshotErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SnapshotErrorCode::Io => "AERO_REG_SNAPSHOT_IO",
            SnapshotErrorCode::Format => "AERO_REG_SNAPSHOT_FORMAT",
            SnapshotErrorCode::Checksum => "AERO_REG_SNAPSHOT_CHECKSUM",
            SnapshotErrorCode::Corrupt => "AERO_REG_SNAPSHOT_CORRUPT",
            SnapshotErrorCode::State => "AERO_REG_SNAPSHOT_STATE",
        }
    }

    /// A snapshot that cannot be trusted must stop boot.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SnapshotErrorCode::Checksum | SnapshotErrorCode::Corrupt)
    }
}

impl fmt::Display for SnapshotErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug)]
pub struct SnapshotError {
    code: SnapshotErrorCode,
    message: String,
    source: Option<io::Error>,
}

impl SnapshotError {
    pub fn new(code: SnapshotErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn io_error_at_path(path: &std::path::Path, source: io::Error) -> Self {
        Self {
            code: SnapshotErrorCode::Io,
            message: format!("I/O error at path: {}", path.display()),
            source: Some(source),
        }
    }

    pub fn format_error(message: impl Into<String>) -> Self {
        Self::new(SnapshotErrorCode::Format, message)
    }

    pub fn checksum_mismatch(expected: &str, actual: &str) -> Self {
        Self::new(
            SnapshotErrorCode::Checksum,
            format!("expected {}, computed {}", expected, actual),
        )
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(SnapshotErrorCode::Corrupt, message)
    }

    pub fn state_error(message: impl Into<String>) -> Self {
        Self::new(SnapshotErrorCode::State, message)
    }

    pub fn code(&self) -> SnapshotErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
