//! aeroreg - A strict, deterministic content-registration registry
//!
//! Sequential ids, write-time validated metadata, per-record ownership and
//! an access matrix, with checksummed snapshots and a line-oriented host.

pub mod cli;
pub mod observability;
pub mod registry;
pub mod snapshot;
