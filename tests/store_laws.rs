//! Property-based tests for the listing store.
//!
//! - listing order is insertion order
//! - an added record is found by its id
//! - a removed id is never found, whether it was present or not
//! - what one session saves, the next session loads unchanged

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use proptest::prelude::*;

use property_desk::storage::{MemoryStorage, StorageAdapter, DEFAULT_KEY};
use property_desk::{PropertyRecord, PropertyStore, PropertyType, RecordId, Status};

// =============================================================================
// Proptest strategies
// =============================================================================

fn arb_property_type() -> impl Strategy<Value = PropertyType> {
    prop_oneof![
        Just(PropertyType::Apartment),
        Just(PropertyType::House),
        Just(PropertyType::Commercial),
    ]
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::Available), Just(Status::Occupied)]
}

/// Free text as typed into the form, markup and quotes included
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.'&<>\"-]{0,24}"
}

fn arb_record() -> impl Strategy<Value = PropertyRecord> {
    (
        any::<RecordId>(),
        arb_text(),
        arb_text(),
        arb_property_type(),
        0.0f64..1.0e9, // rent
        arb_status(),
        arb_text(),
        "[0-3][0-9]/[01][0-9]/20[0-9]{2}", // date_added
    )
        .prop_map(
            |(id, name, location, property_type, rent, status, notes, date_added)| {
                PropertyRecord {
                    id,
                    name,
                    location,
                    property_type,
                    rent,
                    status,
                    notes,
                    date_added,
                }
            },
        )
}

/// Records with distinct ids, in no particular id order
fn arb_records() -> impl Strategy<Value = Vec<PropertyRecord>> {
    prop::collection::vec(arb_record(), 0..16).prop_map(|mut records| {
        let mut seen = HashSet::new();
        records.retain(|r| seen.insert(r.id));
        records
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

async fn filled_store(storage: Arc<MemoryStorage>, records: &[PropertyRecord]) -> PropertyStore {
    let mut store = PropertyStore::open(StorageAdapter::new(storage, DEFAULT_KEY))
        .await
        .unwrap();
    for record in records {
        store.add(record.clone()).await.unwrap();
    }
    store
}

fn ids(records: &[PropertyRecord]) -> Vec<RecordId> {
    records.iter().map(|r| r.id).collect()
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn listing_order_is_insertion_order(records in arb_records()) {
        let listed = block_on(async {
            let store = filled_store(Arc::new(MemoryStorage::new()), &records).await;
            ids(store.all())
        });

        prop_assert_eq!(listed, ids(&records));
    }

    #[test]
    fn added_records_are_found_by_id(records in arb_records()) {
        let store = block_on(filled_store(Arc::new(MemoryStorage::new()), &records));

        prop_assert_eq!(store.len(), records.len());
        for record in &records {
            prop_assert_eq!(store.find(record.id), Some(record));
        }
    }

    #[test]
    fn removed_id_is_never_found(
        records in arb_records(),
        pick in any::<prop::sample::Index>(),
        stray in any::<RecordId>(),
    ) {
        // one id that is present (when there is any) and one arbitrary id
        let mut targets = vec![stray];
        if !records.is_empty() {
            targets.push(records[pick.index(records.len())].id);
        }

        for target in targets {
            let (removed, found, left) = block_on(async {
                let mut store = filled_store(Arc::new(MemoryStorage::new()), &records).await;
                let removed = store.remove(target).await.unwrap();
                (removed, store.find(target).cloned(), ids(store.all()))
            });

            let before = records.iter().find(|r| r.id == target);
            let expected: Vec<RecordId> =
                ids(&records).into_iter().filter(|id| *id != target).collect();
            prop_assert_eq!(removed.as_ref(), before);
            prop_assert!(found.is_none(), "id {} still found after removal", target);
            prop_assert_eq!(left, expected);
        }
    }

    #[test]
    fn saved_collection_loads_unchanged(records in arb_records()) {
        let loaded = block_on(async {
            let storage = Arc::new(MemoryStorage::new());
            filled_store(storage.clone(), &records).await;

            let fresh = PropertyStore::open(StorageAdapter::new(storage, DEFAULT_KEY))
                .await
                .unwrap();
            fresh.all().to_vec()
        });

        prop_assert_eq!(loaded, records);
    }
}
