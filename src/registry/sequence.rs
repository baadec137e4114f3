//! Sequence counter - record identity assignment
//!
//! - Holds the highest sequence id ever issued (0 when none)
//! - Advances by exactly one per successful registration
//! - Never decreases, never reissues an id
//!
//! Registration calls `next_id` under the registry write guard and only
//! then inserts the record. An exhausted counter fails before anything is
//! written.

use super::types::SequenceId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Attempted to advance to anything but `highest + 1`.
    OutOfOrder { attempted: u64, expected: u64 },
    /// The counter would wrap.
    Exhausted,
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceError::OutOfOrder { attempted, expected } => write!(
                f,
                "sequence advanced out of order: attempted {}, expected {}",
                attempted, expected
            ),
            SequenceError::Exhausted => write!(f, "sequence exhausted"),
        }
    }
}

impl std::error::Error for SequenceError {}

#[derive(Debug, Default)]
pub struct SequenceCounter {
    highest: u64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self { highest: 0 }
    }

    /// Rebuilds a counter from a persisted high-water mark.
    pub fn from_highest(highest: u64) -> Self {
        Self { highest }
    }

    /// The id the next registration will receive. Does not mutate.
    pub fn peek_next(&self) -> Result<SequenceId, SequenceError> {
        self.highest
            .checked_add(1)
            .map(SequenceId::new)
            .ok_or(SequenceError::Exhausted)
    }

    /// Marks `id` as issued. Only `highest + 1` is accepted.
    pub fn advance(&mut self, id: SequenceId) -> Result<(), SequenceError> {
        let expected = self.peek_next()?.value();
        if id.value() != expected {
            return Err(SequenceError::OutOfOrder {
                attempted: id.value(),
                expected,
            });
        }
        self.highest = expected;
        Ok(())
    }

    /// Increments and returns the new id.
    pub fn next_id(&mut self) -> Result<SequenceId, SequenceError> {
        let id = self.peek_next()?;
        self.advance(id)?;
        Ok(id)
    }

    /// Highest id ever issued, 0 if none.
    pub fn highest(&self) -> u64 {
        self.highest
    }
}
