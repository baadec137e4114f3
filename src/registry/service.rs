//! # Registry Operations
//!
//! The four mutating operations (register, modify, transfer, delete) plus
//! read-only lookups. All shared state sits behind one lock; each mutating
//! call takes the write guard once, reads before it writes, and either
//! commits everything or returns an error with nothing changed.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use super::access::AccessMatrix;
use super::errors::{RegistryError, RegistryResult};
use super::sequence::SequenceCounter;
use super::store::RecordStore;
use super::types::{CallContext, ContentRecord, Principal, RecordFields, SequenceId};
use super::validator;
use crate::observability::Event;

/// Counter, records and grants, always mutated together.
#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    pub(crate) sequence: SequenceCounter,
    pub(crate) records: RecordStore,
    pub(crate) access: AccessMatrix,
}

/// Content-registration registry
#[derive(Debug, Default)]
pub struct Registry {
    state: RwLock<RegistryState>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    pub(crate) fn from_state(state: RegistryState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub(crate) fn read(&self) -> RegistryResult<RwLockReadGuard<'_, RegistryState>> {
        self.state.read().map_err(|_| RegistryError::lock_poisoned())
    }

    fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, RegistryState>> {
        self.state.write().map_err(|_| RegistryError::lock_poisoned())
    }

    /// Register a new record owned by the caller.
    ///
    /// Returns the freshly issued id. Counter, record and the creator's
    /// grant are committed as one unit.
    pub fn register(&self, fields: RecordFields, ctx: &CallContext) -> RegistryResult<SequenceId> {
        let result = self.register_inner(fields, ctx);
        match &result {
            Ok(id) => info!(
                event = Event::RecordRegistered.as_str(),
                id = id.value(),
                principal = %ctx.principal,
                height = ctx.height
            ),
            Err(e) => log_rejection("register", None, ctx, e),
        }
        result
    }

    fn register_inner(
        &self,
        fields: RecordFields,
        ctx: &CallContext,
    ) -> RegistryResult<SequenceId> {
        validator::check_fields(&fields)?;

        let mut state = self.write()?;
        let id = state
            .sequence
            .next_id()
            .map_err(|e| RegistryError::Internal(e.to_string()))?;

        // Ids above the previous high-water mark are never stored.
        state.records.insert(ContentRecord::create(id, fields, ctx))?;
        state.access.grant(id, &ctx.principal);

        Ok(id)
    }

    /// Replace the editable fields of a record the caller owns.
    ///
    /// Checks existence, then ownership, then field bounds. Owner and
    /// registration height are preserved.
    pub fn modify(
        &self,
        id: SequenceId,
        fields: RecordFields,
        ctx: &CallContext,
    ) -> RegistryResult<()> {
        let result = self.modify_inner(id, fields, ctx);
        match &result {
            Ok(()) => info!(
                event = Event::RecordModified.as_str(),
                id = id.value(),
                principal = %ctx.principal
            ),
            Err(e) => log_rejection("modify", Some(id), ctx, e),
        }
        result
    }

    fn modify_inner(
        &self,
        id: SequenceId,
        fields: RecordFields,
        ctx: &CallContext,
    ) -> RegistryResult<()> {
        let mut state = self.write()?;
        let existing = owned_record(&state, id, &ctx.principal)?;

        validator::check_fields(&fields)?;

        let mut updated = existing.clone();
        updated.apply(fields);
        state.records.update(updated)
    }

    /// Hand ownership of a record to `new_owner`.
    ///
    /// Grants are left as they are; the previous owner's entry persists.
    pub fn transfer(
        &self,
        id: SequenceId,
        new_owner: Principal,
        ctx: &CallContext,
    ) -> RegistryResult<()> {
        let result = self.transfer_inner(id, &new_owner, ctx);
        match &result {
            Ok(()) => info!(
                event = Event::RecordTransferred.as_str(),
                id = id.value(),
                from = %ctx.principal,
                to = %new_owner
            ),
            Err(e) => log_rejection("transfer", Some(id), ctx, e),
        }
        result
    }

    fn transfer_inner(
        &self,
        id: SequenceId,
        new_owner: &Principal,
        ctx: &CallContext,
    ) -> RegistryResult<()> {
        let mut state = self.write()?;
        let mut updated = owned_record(&state, id, &ctx.principal)?.clone();
        updated.proprietor = new_owner.clone();
        state.records.update(updated)
    }

    /// Remove a record the caller owns. The id is never reissued.
    pub fn delete(&self, id: SequenceId, ctx: &CallContext) -> RegistryResult<()> {
        let result = self.delete_inner(id, ctx);
        match &result {
            Ok(()) => info!(
                event = Event::RecordDeleted.as_str(),
                id = id.value(),
                principal = %ctx.principal
            ),
            Err(e) => log_rejection("delete", Some(id), ctx, e),
        }
        result
    }

    fn delete_inner(&self, id: SequenceId, ctx: &CallContext) -> RegistryResult<()> {
        let mut state = self.write()?;
        owned_record(&state, id, &ctx.principal)?;
        state.records.remove(id)?;
        Ok(())
    }

    /// Look up a record by id
    pub fn get(&self, id: SequenceId) -> RegistryResult<ContentRecord> {
        let state = self.read()?;
        state.records.get(id).cloned().ok_or(RegistryError::NotFound(id))
    }

    /// Probe the access matrix. Absent entries read as `false`.
    ///
    /// No operation consults this yet; it is exposed for inspection only.
    pub fn is_granted(&self, id: SequenceId, principal: &Principal) -> RegistryResult<bool> {
        Ok(self.read()?.access.is_granted(id, principal))
    }

    /// Highest id ever issued, 0 when none
    pub fn last_issued(&self) -> RegistryResult<u64> {
        Ok(self.read()?.sequence.highest())
    }

    /// Number of active records
    pub fn record_count(&self) -> RegistryResult<usize> {
        Ok(self.read()?.records.len())
    }
}

/// Existence first, then ownership.
fn owned_record<'s>(
    state: &'s RegistryState,
    id: SequenceId,
    caller: &Principal,
) -> RegistryResult<&'s ContentRecord> {
    let record = state.records.get(id).ok_or(RegistryError::NotFound(id))?;
    if &record.proprietor != caller {
        return Err(RegistryError::OwnershipMismatch(id));
    }
    Ok(record)
}

fn log_rejection(
    op: &'static str,
    id: Option<SequenceId>,
    ctx: &CallContext,
    err: &RegistryError,
) {
    debug!(
        event = Event::OperationRejected.as_str(),
        op,
        id = id.map(|i| i.value()),
        principal = %ctx.principal,
        code = err.code(),
        "{}",
        err
    );
}
