//! Escenarios del core de inventario sobre el backend en memoria.

use chem_core::{seed_if_empty, InMemoryInventoryStore, InventoryError, InventoryService, InventoryStore};
use chem_domain::{ActionType, ChemicalUpdate, NewChemical, PageRequest};
use rayon::prelude::*;
use std::sync::Arc;

fn service() -> InventoryService<InMemoryInventoryStore> {
    InventoryService::new(InMemoryInventoryStore::new())
}

#[test]
fn scenario_a_create_then_list() {
    let svc = service();
    let water = svc.create("Water", "7732-18-5", 100, "L").expect("create");
    assert_eq!(water.id, 1);
    assert_eq!(water.quantity, 100);
    let page = svc.list(10, 0).expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Water");
}

#[test]
fn create_writes_exactly_one_add_log() {
    let svc = service();
    let c = svc.create("Ethanol", "64-17-5", 12, "L").unwrap();
    let logs = svc.get_logs(c.id, 10, 0).unwrap();
    assert_eq!(logs.total, 1);
    let log = &logs.results[0];
    assert_eq!(log.action_type, ActionType::Add);
    assert_eq!(log.quantity, 12);
    assert_eq!(log.chemical_id, c.id);
    assert_eq!(log.name, "Ethanol");
}

#[test]
fn scenario_b_update_then_history_descending() {
    let svc = service();
    svc.create("Water", "7732-18-5", 100, "L").unwrap();
    let before = svc.store().logs_for_chemical(1, PageRequest::default()).unwrap();

    let updated = svc.update(1, ChemicalUpdate::new().quantity(80).unwrap()).unwrap();
    assert_eq!(updated.quantity, 80);
    assert_eq!(updated.name, "Water", "campos no enviados se conservan");

    let logs = svc.get_logs(1, 10, 0).unwrap();
    let seq: Vec<(ActionType, i32)> = logs.results.iter().map(|l| (l.action_type, l.quantity)).collect();
    assert_eq!(seq, vec![(ActionType::Update, 80), (ActionType::Add, 100)]);

    // la fila previa no cambió
    let after = svc.store().logs_for_chemical(1, PageRequest::default()).unwrap();
    assert_eq!(after.results[1], before.results[0]);
}

#[test]
fn update_without_quantity_logs_current_quantity() {
    let svc = service();
    svc.create("Acetone", "67-64-1", 7, "L").unwrap();
    svc.update(1, ChemicalUpdate::new().unit("mL").unwrap()).unwrap();
    let logs = svc.get_logs(1, 10, 0).unwrap();
    assert_eq!(logs.results[0].action_type, ActionType::Update);
    assert_eq!(logs.results[0].quantity, 7);
    assert_eq!(logs.results[0].unit, "mL");
}

#[test]
fn scenario_c_delete_cascades_history() {
    let svc = service();
    svc.create("Water", "7732-18-5", 100, "L").unwrap();
    svc.update(1, ChemicalUpdate::new().quantity(80).unwrap()).unwrap();
    let confirmation = svc.delete(1).unwrap();
    assert!(confirmation.message.contains("Water"));

    assert_eq!(svc.get_by_id(1).unwrap_err(), InventoryError::NotFound { id: 1 });
    let logs = svc.get_logs(1, 10, 0).unwrap();
    assert_eq!(logs.total, 0);
    assert!(logs.results.is_empty());
    assert_eq!(svc.store().log_count().unwrap(), 0);
}

#[test]
fn scenario_d_unknown_action_writes_nothing() {
    let svc = service();
    svc.create("Water", "7732-18-5", 100, "L").unwrap();
    let before = svc.store().log_count().unwrap();
    let err = svc.create_log(1, "scrap", 5).unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));
    assert_eq!(svc.store().log_count().unwrap(), before);
}

#[test]
fn standalone_log_requires_existing_chemical() {
    let svc = service();
    assert_eq!(svc.create_log(42, "add", 1).unwrap_err(), InventoryError::NotFound { id: 42 });
    svc.create("Water", "7732-18-5", 100, "L").unwrap();
    let view = svc.create_log(1, "remove", 10).unwrap();
    assert_eq!(view.action_type, ActionType::Remove);
    assert_eq!(view.cas_number, "7732-18-5");
    // el log standalone no toca el registro
    assert_eq!(svc.get_by_id(1).unwrap().quantity, 100);
}

#[test]
fn missing_ids_are_stable() {
    let svc = service();
    for _ in 0..3 {
        assert_eq!(svc.get(9).unwrap(), None);
        assert_eq!(svc.get_by_id(9).unwrap_err(), InventoryError::NotFound { id: 9 });
        assert_eq!(svc.update(9, ChemicalUpdate::new().quantity(1).unwrap()).unwrap_err(),
                   InventoryError::NotFound { id: 9 });
        assert_eq!(svc.delete(9).unwrap_err(), InventoryError::NotFound { id: 9 });
    }
    assert_eq!(svc.store().log_count().unwrap(), 0);
}

#[test]
fn empty_update_is_rejected() {
    let svc = service();
    svc.create("Water", "7732-18-5", 100, "L").unwrap();
    assert!(matches!(svc.update(1, ChemicalUpdate::new()), Err(InventoryError::Validation(_))));
    assert_eq!(svc.get_logs(1, 10, 0).unwrap().total, 1);
}

#[test]
fn pagination_total_is_independent_of_window() {
    let svc = service();
    for i in 0..23 {
        svc.create(&format!("Reagent {i}"), "000-00-0", i, "g").unwrap();
    }
    for limit in [1, 5, 10, 100] {
        for offset in [0, 3, 22, 23, 50] {
            let page = svc.list(limit, offset).unwrap();
            assert_eq!(page.total, 23);
            assert!(page.results.len() as i64 <= limit);
            let ids: Vec<i32> = page.results.iter().map(|c| c.id).collect();
            let mut sorted = ids.clone();
            sorted.sort();
            assert_eq!(ids, sorted, "orden por id ascendente");
        }
    }
    assert_eq!(svc.list(5, 20).unwrap().results.len(), 3);
}

#[test]
fn concurrent_updates_each_append_one_log() {
    let store = Arc::new(InMemoryInventoryStore::new());
    let record = store.create(NewChemical::new("Toluene", "108-88-3", 0, "L").unwrap()).unwrap();
    (1..=64).into_par_iter().for_each(|q| {
        store.update(record.id, ChemicalUpdate::new().quantity(q).unwrap()).expect("update");
    });
    let logs = store.logs_for_chemical(record.id, PageRequest::new(100, 0).unwrap()).unwrap();
    assert_eq!(logs.total, 65);
    // la cantidad final coincide con el log más reciente
    let current = store.get_by_id(record.id).unwrap();
    assert_eq!(logs.results[0].log.quantity, current.quantity);
}

#[test]
fn seeding_is_idempotent() {
    let store = InMemoryInventoryStore::new();
    assert_eq!(seed_if_empty(&store).unwrap(), 3);
    assert_eq!(seed_if_empty(&store).unwrap(), 0);
    let page = store.list(PageRequest::default()).unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.results[2].unit, "m³");
    assert_eq!(store.log_count().unwrap(), 3);
}
