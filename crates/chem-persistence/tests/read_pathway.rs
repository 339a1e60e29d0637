
use chem_core::{InventoryError, InventoryService, InventoryStore};
use chem_domain::{format_timestamp, ActionType, NewChemical, PageRequest};
use chem_persistence::pg::{health_check, PgReadPathway};
use test_support::{provider, store, unique_name};

#[test]
fn get_by_id_matches_transactional_get() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let created = store.create(NewChemical::new(&unique_name("Nitrogen"), "7727-37-9", 12, "kg").unwrap()).unwrap();
    let via_reader = store.get_by_id(created.id).expect("reader");
    let via_coordinator = store.get(created.id).expect("coordinator").expect("present");
    assert_eq!(via_reader, via_coordinator);
    assert_eq!(via_reader, created);
}

#[test]
fn history_is_newest_first_and_paginated() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let created = store.create(NewChemical::new(&unique_name("Oxygen"), "7782-44-7", 1, "kg").unwrap()).unwrap();
    for q in 2..=5 {
        store.create_log(created.id, "add", q).unwrap();
    }

    let reader = PgReadPathway::new(provider().unwrap());
    let first = reader.logs_for_chemical(created.id, PageRequest::new(2, 0).unwrap()).unwrap();
    assert_eq!(first.total, 5);
    assert_eq!(first.results.iter().map(|e| e.log.quantity).collect::<Vec<_>>(), vec![5, 4]);

    let last = reader.logs_for_chemical(created.id, PageRequest::new(2, 4).unwrap()).unwrap();
    assert_eq!(last.total, 5);
    assert_eq!(last.results.len(), 1);
    assert_eq!(last.results[0].log.quantity, 1);

    let past_end = reader.logs_for_chemical(created.id, PageRequest::new(10, 50).unwrap()).unwrap();
    assert_eq!(past_end.total, 5);
    assert!(past_end.results.is_empty());
}

#[test]
fn missing_chemical_reads() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let missing = i32::MAX - 3;
    assert_eq!(store.get_by_id(missing).unwrap_err(), InventoryError::NotFound { id: missing });
    assert_eq!(store.get(missing).unwrap(), None);
    assert!(matches!(store.get_by_id(0), Err(InventoryError::Validation(_))));
}

#[test]
fn service_views_over_postgres() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let service = InventoryService::new(store);
    let name = unique_name("Water");
    let view = service.create(&name, "7732-18-5", 100, "L").expect("create");
    let logs = service.get_logs(view.id, 10, 0).expect("logs");
    assert_eq!(logs.total, 1);
    assert_eq!(logs.results[0].action_type, ActionType::Add);
    assert_eq!(logs.results[0].name, name);
    let raw = service.store().logs_for_chemical(view.id, PageRequest::default()).unwrap();
    assert_eq!(logs.results[0].timestamp, format_timestamp(&raw.results[0].log.timestamp));
}

#[test]
fn health_check_reports_reachable_database() {
    let Some(provider) = provider() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let health = health_check(&provider);
    assert_eq!(health.status, "ok");
    assert_eq!(health.database, "reachable");
    assert!(health.is_connected());
}
