//! Registry Invariant Tests
//!
//! - Ids are issued sequentially from 1 and never reused
//! - Rejected calls change nothing
//! - Existence is checked before ownership, ownership before field bounds
//! - Owner and registration height survive modify
//! - Grants are never revoked or cleaned up

use aeroreg::registry::{
    CallContext, Principal, RecordFields, Registry, RegistryError, SequenceId,
};
use proptest::prelude::*;

// =============================================================================
// Helper Functions
// =============================================================================

fn doc_fields() -> RecordFields {
    RecordFields::new("doc.pdf", 1024, "desc", vec!["a".into(), "b".into()])
}

fn p1(height: u64) -> CallContext {
    CallContext::new("P1", height)
}

fn p2(height: u64) -> CallContext {
    CallContext::new("P2", height)
}

fn assert_untouched(registry: &Registry) {
    assert_eq!(registry.last_issued().unwrap(), 0);
    assert_eq!(registry.record_count().unwrap(), 0);
    assert!(matches!(
        registry.get(SequenceId::new(1)),
        Err(RegistryError::NotFound(_))
    ));
}

// =============================================================================
// Registration
// =============================================================================

/// Registered record carries exactly the submitted fields, the caller and
/// the caller's height.
#[test]
fn test_register_stores_submitted_fields() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(77)).unwrap();

    assert_eq!(id, SequenceId::new(1));
    let record = registry.get(id).unwrap();
    assert_eq!(record.sequence_id, id);
    assert_eq!(record.fields(), doc_fields());
    assert_eq!(record.proprietor, Principal::new("P1"));
    assert_eq!(record.registration_height, 77);
}

/// Each rejected registration leaves counter and store untouched.
#[test]
fn test_invalid_registrations_have_no_effect() {
    let cases: Vec<(RecordFields, &str)> = vec![
        (RecordFields { display_name: String::new(), ..doc_fields() }, "REGISTRY_INVALID_NAME"),
        (RecordFields { display_name: "n".repeat(65), ..doc_fields() }, "REGISTRY_INVALID_NAME"),
        (RecordFields { byte_size: 0, ..doc_fields() }, "REGISTRY_INVALID_SIZE"),
        (RecordFields { byte_size: 1_000_000_000, ..doc_fields() }, "REGISTRY_INVALID_SIZE"),
        (RecordFields { description: String::new(), ..doc_fields() }, "REGISTRY_INVALID_NAME"),
        (RecordFields { description: "d".repeat(129), ..doc_fields() }, "REGISTRY_INVALID_NAME"),
        (RecordFields { classification_labels: vec![], ..doc_fields() }, "REGISTRY_INVALID_LABELS"),
        (
            RecordFields { classification_labels: vec!["t".to_string(); 11], ..doc_fields() },
            "REGISTRY_INVALID_LABELS",
        ),
        (
            RecordFields {
                classification_labels: vec!["ok".into(), String::new()],
                ..doc_fields()
            },
            "REGISTRY_INVALID_LABELS",
        ),
        (
            RecordFields { classification_labels: vec!["x".repeat(33)], ..doc_fields() },
            "REGISTRY_INVALID_LABELS",
        ),
    ];

    for (fields, code) in cases {
        let registry = Registry::new();
        let err = registry.register(fields.clone(), &p1(1)).unwrap_err();
        assert_eq!(err.code(), code, "fields: {:?}", fields);
        assert_untouched(&registry);
    }
}

/// Boundary values are accepted.
#[test]
fn test_register_accepts_boundaries() {
    let registry = Registry::new();
    let fields = RecordFields::new(
        "n".repeat(64),
        999_999_999,
        "d".repeat(128),
        vec!["x".repeat(32); 10],
    );
    assert!(registry.register(fields, &p1(1)).is_ok());
}

// =============================================================================
// Modify
// =============================================================================

#[test]
fn test_modify_missing_record() {
    let registry = Registry::new();
    let err = registry.modify(SequenceId::new(1), doc_fields(), &p1(1)).unwrap_err();
    assert_eq!(err, RegistryError::NotFound(SequenceId::new(1)));
}

#[test]
fn test_modify_by_non_owner() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    let err = registry.modify(id, doc_fields(), &p2(2)).unwrap_err();
    assert_eq!(err, RegistryError::OwnershipMismatch(id));
}

/// Owner and height are preserved; the four editable fields are replaced.
#[test]
fn test_modify_replaces_editable_fields_only() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(5)).unwrap();

    let new_fields = RecordFields::new("report.txt", 2, "updated", vec!["z".into()]);
    registry.modify(id, new_fields.clone(), &p1(9)).unwrap();

    let record = registry.get(id).unwrap();
    assert_eq!(record.fields(), new_fields);
    assert_eq!(record.proprietor, Principal::new("P1"));
    assert_eq!(record.registration_height, 5);
}

/// Modifying with the registered values is a no-op.
#[test]
fn test_modify_with_same_values_is_identity() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(5)).unwrap();
    let before = registry.get(id).unwrap();

    registry.modify(id, doc_fields(), &p1(6)).unwrap();

    let after = registry.get(id).unwrap();
    assert_eq!(before, after);
    assert_eq!(
        serde_json::to_vec(&before).unwrap(),
        serde_json::to_vec(&after).unwrap()
    );
}

// =============================================================================
// Transfer
// =============================================================================

#[test]
fn test_transfer_changes_only_owner() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(3)).unwrap();
    let before = registry.get(id).unwrap();

    registry.transfer(id, Principal::new("P2"), &p1(4)).unwrap();

    let after = registry.get(id).unwrap();
    assert_eq!(after.proprietor, Principal::new("P2"));
    assert_eq!(after.fields(), before.fields());
    assert_eq!(after.registration_height, before.registration_height);
}

#[test]
fn test_transfer_moves_authority() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    registry.transfer(id, Principal::new("P2"), &p1(2)).unwrap();

    assert_eq!(
        registry.modify(id, doc_fields(), &p1(3)).unwrap_err(),
        RegistryError::OwnershipMismatch(id)
    );
    assert_eq!(
        registry.transfer(id, Principal::new("P1"), &p1(3)).unwrap_err(),
        RegistryError::OwnershipMismatch(id)
    );
    assert!(registry.modify(id, doc_fields(), &p2(4)).is_ok());
}

/// The creator's grant survives a transfer; the new owner gets none.
#[test]
fn test_transfer_leaves_grants_alone() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    registry.transfer(id, Principal::new("P2"), &p1(2)).unwrap();

    assert!(registry.is_granted(id, &Principal::new("P1")).unwrap());
    assert!(!registry.is_granted(id, &Principal::new("P2")).unwrap());
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_makes_id_not_found_everywhere() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    registry.delete(id, &p1(2)).unwrap();

    let not_found = RegistryError::NotFound(id);
    assert_eq!(registry.get(id).unwrap_err(), not_found);
    assert_eq!(registry.modify(id, doc_fields(), &p1(3)).unwrap_err(), not_found);
    assert_eq!(
        registry.transfer(id, Principal::new("P2"), &p1(3)).unwrap_err(),
        not_found
    );
    assert_eq!(registry.delete(id, &p1(3)).unwrap_err(), not_found);
    assert_eq!(registry.last_issued().unwrap(), 1);
}

#[test]
fn test_delete_by_non_owner() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    assert_eq!(
        registry.delete(id, &p2(2)).unwrap_err(),
        RegistryError::OwnershipMismatch(id)
    );
    assert!(registry.get(id).is_ok());
}

/// Grant rows outlive the record they point at.
#[test]
fn test_delete_leaves_orphaned_grant() {
    let registry = Registry::new();
    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    registry.delete(id, &p1(2)).unwrap();
    assert!(registry.is_granted(id, &Principal::new("P1")).unwrap());
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[test]
fn test_register_transfer_modify_delete_scenario() {
    let registry = Registry::new();

    let id = registry.register(doc_fields(), &p1(1)).unwrap();
    assert_eq!(id, SequenceId::new(1));
    assert_eq!(registry.get(id).unwrap().proprietor, Principal::new("P1"));

    registry.transfer(id, Principal::new("P2"), &p1(2)).unwrap();
    assert_eq!(
        registry.modify(id, doc_fields(), &p1(3)).unwrap_err(),
        RegistryError::OwnershipMismatch(id)
    );
    registry.modify(id, doc_fields(), &p2(4)).unwrap();

    registry.delete(id, &p2(5)).unwrap();
    assert_eq!(registry.get(id).unwrap_err(), RegistryError::NotFound(id));

    let next = registry.register(doc_fields(), &p1(6)).unwrap();
    assert_eq!(next, SequenceId::new(2));
}

// =============================================================================
// Concurrency
// =============================================================================

/// Parallel registrations each get a distinct id with no gaps.
#[test]
fn test_parallel_registrations_get_distinct_ids() {
    use std::sync::Arc;
    use std::thread;

    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let ctx = CallContext::new(format!("worker-{}", t).as_str(), t);
                (0..25)
                    .map(|_| registry.register(doc_fields(), &ctx).unwrap().value())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    assert_eq!(registry.last_issued().unwrap(), 200);
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Debug, Clone)]
enum Step {
    Register(bool),
    Delete(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(Step::Register),
        (1u64..20).prop_map(Step::Delete),
    ]
}

proptest! {
    /// Successful registration returns previous counter + 1; deletes and
    /// rejections never move the counter, and ids are never reissued.
    #[test]
    fn prop_ids_monotonic_and_never_reused(steps in proptest::collection::vec(step(), 1..40)) {
        let registry = Registry::new();
        let ctx = p1(1);
        let mut issued = Vec::new();

        for step in steps {
            let before = registry.last_issued().unwrap();
            match step {
                Step::Register(valid) => {
                    let fields = if valid {
                        doc_fields()
                    } else {
                        RecordFields { byte_size: 0, ..doc_fields() }
                    };
                    match registry.register(fields, &ctx) {
                        Ok(id) => {
                            prop_assert!(valid);
                            prop_assert_eq!(id.value(), before + 1);
                            prop_assert!(!issued.contains(&id.value()));
                            issued.push(id.value());
                        }
                        Err(_) => {
                            prop_assert!(!valid);
                            prop_assert_eq!(registry.last_issued().unwrap(), before);
                        }
                    }
                }
                Step::Delete(raw) => {
                    let _ = registry.delete(SequenceId::new(raw), &ctx);
                    prop_assert_eq!(registry.last_issued().unwrap(), before);
                }
            }
        }
    }
}
