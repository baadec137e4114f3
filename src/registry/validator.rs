//! Field validation for content records
//!
//! Constraints are enforced at write time only:
//! - display_name: 1..=64 characters
//! - description: 1..=128 characters
//! - byte_size: 1 <= size < 1,000,000,000
//! - classification_labels: 1..=10 tags, each 1..=32 characters
//!
//! Lengths count Unicode scalar values. Validation is pure and deterministic;
//! it never touches registry state.

use super::errors::{RegistryError, RegistryResult};
use super::types::RecordFields;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 128;
pub const MAX_BYTE_SIZE_EXCLUSIVE: u64 = 1_000_000_000;
pub const MAX_LABEL_LEN: usize = 32;
pub const MAX_LABELS: usize = 10;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn within(len: usize, max: usize) -> bool {
    (1..=max).contains(&len)
}

/// True iff `1 <= len(tag) <= 32`.
pub fn validate_label(tag: &str) -> bool {
    within(char_len(tag), MAX_LABEL_LEN)
}

/// True iff there are 1..=10 tags and every tag passes [`validate_label`].
pub fn validate_label_set<S: AsRef<str>>(tags: &[S]) -> bool {
    within(tags.len(), MAX_LABELS) && tags.iter().all(|t| validate_label(t.as_ref()))
}

pub fn validate_name(name: &str) -> bool {
    within(char_len(name), MAX_NAME_LEN)
}

pub fn validate_description(description: &str) -> bool {
    within(char_len(description), MAX_DESCRIPTION_LEN)
}

pub fn validate_size(size: u64) -> bool {
    size >= 1 && size < MAX_BYTE_SIZE_EXCLUSIVE
}

/// Checks all editable fields, in order: name, size, description, labels.
///
/// Used by both register and modify so the bounds cannot drift apart.
pub fn check_fields(fields: &RecordFields) -> RegistryResult<()> {
    if !validate_name(&fields.display_name) {
        return Err(RegistryError::InvalidName {
            field: "display_name",
            length: char_len(&fields.display_name),
            max: MAX_NAME_LEN,
        });
    }

    if !validate_size(fields.byte_size) {
        return Err(RegistryError::InvalidSize(fields.byte_size));
    }

    if !validate_description(&fields.description) {
        return Err(RegistryError::InvalidName {
            field: "description",
            length: char_len(&fields.description),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    if !validate_label_set(&fields.classification_labels) {
        return Err(RegistryError::InvalidLabels(describe_label_failure(
            &fields.classification_labels,
        )));
    }

    Ok(())
}

fn describe_label_failure(tags: &[String]) -> String {
    if !within(tags.len(), MAX_LABELS) {
        return format!("expected 1 to {} labels, got {}", MAX_LABELS, tags.len());
    }
    match tags.iter().position(|t| !validate_label(t)) {
        Some(i) => format!(
            "label {} has length {} (must be 1 to {})",
            i,
            char_len(&tags[i]),
            MAX_LABEL_LEN
        ),
        None => "labels rejected".to_string(),
    }
}
