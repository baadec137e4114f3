//! # Content Registry
//!
//! Assigns sequential ids to registered content records, stores their
//! metadata, tracks ownership and keeps a per-record access matrix.
//!
//! # Components
//!
//! - Validator: pure field checks, run before any mutation
//! - Sequence counter: highest id ever issued
//! - Record store: id -> record
//! - Access matrix: (id, principal) -> granted
//! - Registry: register / modify / transfer / delete
//!
//! Caller identity and ordering index arrive through [`CallContext`]; the
//! registry never derives them itself.

mod access;
mod errors;
mod sequence;
mod service;
mod store;
mod types;
pub mod validator;

pub use access::AccessMatrix;
pub use errors::{RegistryError, RegistryResult};
pub use sequence::{SequenceCounter, SequenceError};
pub use service::Registry;
pub use store::RecordStore;
pub use types::{CallContext, ContentRecord, Principal, RecordFields, SequenceId};

pub(crate) use service::RegistryState;
