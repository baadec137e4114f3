//! # Registry Errors
//!
//! Error codes:
//! - REGISTRY_NOT_FOUND (100)
//! - REGISTRY_ALREADY_EXISTS (101, reserved)
//! - REGISTRY_INVALID_NAME (102)
//! - REGISTRY_INVALID_SIZE (103)
//! - REGISTRY_INVALID_LABELS (104)
//! - REGISTRY_UNAUTHORIZED (105, reserved)
//! - REGISTRY_OWNERSHIP_MISMATCH (106)
//! - REGISTRY_CONTROLLER_PERMISSION (107, reserved)
//! - REGISTRY_VIEW_ACCESS_DENIED (108, reserved)
//! - REGISTRY_INTERNAL (500)

use thiserror::Error;

use super::types::SequenceId;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
///
/// Every operation either commits fully or returns one of these with no
/// state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Record not found: {0}")]
    NotFound(SequenceId),

    /// Never produced: the sequence counter always yields a fresh id.
    #[error("Record already exists: {0}")]
    AlreadyExists(SequenceId),

    /// Name or description length outside its bounds.
    #[error("Invalid {field}: length {length} outside [1, {max}]")]
    InvalidName {
        field: &'static str,
        length: usize,
        max: usize,
    },

    #[error("Invalid size: {0} bytes (must be in [1, 1000000000))")]
    InvalidSize(u64),

    #[error("Invalid labels: {0}")]
    InvalidLabels(String),

    /// Reserved.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Ownership mismatch on record {0}")]
    OwnershipMismatch(SequenceId),

    /// Reserved: no operation is restricted to a controller principal.
    #[error("Controller permission required")]
    ControllerPermission,

    /// Reserved for a future view operation gated by the access matrix.
    #[error("View access denied on record {0}")]
    ViewAccessDenied(SequenceId),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::NotFound(_) => "REGISTRY_NOT_FOUND",
            RegistryError::AlreadyExists(_) => "REGISTRY_ALREADY_EXISTS",
            RegistryError::InvalidName { .. } => "REGISTRY_INVALID_NAME",
            RegistryError::InvalidSize(_) => "REGISTRY_INVALID_SIZE",
            RegistryError::InvalidLabels(_) => "REGISTRY_INVALID_LABELS",
            RegistryError::Unauthorized => "REGISTRY_UNAUTHORIZED",
            RegistryError::OwnershipMismatch(_) => "REGISTRY_OWNERSHIP_MISMATCH",
            RegistryError::ControllerPermission => "REGISTRY_CONTROLLER_PERMISSION",
            RegistryError::ViewAccessDenied(_) => "REGISTRY_VIEW_ACCESS_DENIED",
            RegistryError::Internal(_) => "REGISTRY_INTERNAL",
        }
    }

    /// Stable numeric code
    pub fn numeric_code(&self) -> u32 {
        match self {
            RegistryError::NotFound(_) => 100,
            RegistryError::AlreadyExists(_) => 101,
            RegistryError::InvalidName { .. } => 102,
            RegistryError::InvalidSize(_) => 103,
            RegistryError::InvalidLabels(_) => 104,
            RegistryError::Unauthorized => 105,
            RegistryError::OwnershipMismatch(_) => 106,
            RegistryError::ControllerPermission => 107,
            RegistryError::ViewAccessDenied(_) => 108,
            RegistryError::Internal(_) => 500,
        }
    }

    pub(crate) fn lock_poisoned() -> Self {
        RegistryError::Internal("Lock poisoned".into())
    }
}
