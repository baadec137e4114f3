//! Observable events
//!
//! Every log line carries one of these as its `event` field. Names are
//! stable and upper snake case.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Ready to serve requests
    BootComplete,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Input exhausted, state persisted
    ShutdownComplete,

    // Snapshot
    /// Registry restored from disk
    SnapshotLoaded,
    /// Registry written to disk
    SnapshotWritten,

    // Registry operations
    RecordRegistered,
    RecordModified,
    RecordTransferred,
    RecordDeleted,
    /// Any operation that returned an error
    OperationRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::SnapshotWritten => "SNAPSHOT_WRITTEN",
            Event::RecordRegistered => "RECORD_REGISTERED",
            Event::RecordModified => "RECORD_MODIFIED",
            Event::RecordTransferred => "RECORD_TRANSFERRED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::OperationRejected => "OPERATION_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
