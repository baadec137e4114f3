//! # Access Matrix
//!
//! Boolean grants keyed by (sequence id, principal). Registration writes the
//! creator's entry; nothing revokes or cleans up entries, so rows outlive
//! transfers and deletes.

use std::collections::BTreeMap;

use super::types::{Principal, SequenceId};

#[derive(Debug, Default)]
pub struct AccessMatrix {
    grants: BTreeMap<(SequenceId, Principal), bool>,
}

impl AccessMatrix {
    pub fn new() -> Self {
        Self {
            grants: BTreeMap::new(),
        }
    }

    /// Sets the grant to true. Idempotent.
    pub fn grant(&mut self, id: SequenceId, principal: &Principal) {
        self.grants.insert((id, principal.clone()), true);
    }

    /// False when no entry exists.
    pub fn is_granted(&self, id: SequenceId, principal: &Principal) -> bool {
        self.grants
            .get(&(id, principal.clone()))
            .copied()
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&SequenceId, &Principal, bool)> {
        self.grants.iter().map(|((id, p), g)| (id, p, *g))
    }

    pub(crate) fn set(&mut self, id: SequenceId, principal: Principal, granted: bool) {
        self.grants.insert((id, principal), granted);
    }
}
