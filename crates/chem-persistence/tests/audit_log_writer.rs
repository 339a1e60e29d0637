
use chem_core::{InventoryError, InventoryStore};
use chem_domain::{ActionType, ChemicalUpdate, NewChemical, PageRequest};
use chem_persistence::pg::{PgAuditLogWriter, PoolProvider};
use chem_persistence::schema::chemicals;
use chem_persistence::{ConnectionProvider, PersistenceError};
use diesel::prelude::*;
use test_support::{provider, store, unique_name};

fn count_by_name(provider: &PoolProvider, name: &str) -> i64 {
    let mut conn = provider.connection().expect("conn");
    chemicals::table.filter(chemicals::name.eq(name))
                    .count()
                    .get_result(&mut conn)
                    .expect("count")
}

#[test]
fn staged_log_is_discarded_when_transaction_rolls_back() {
    let Some(provider) = provider() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let writer = PgAuditLogWriter::new(provider.clone());
    let name = unique_name("Rollback");
    let mut conn = provider.connection().expect("conn");

    let outcome = conn.build_transaction().read_committed().run(|tx| {
        let id: i32 = diesel::insert_into(chemicals::table)
            .values((chemicals::name.eq(&name),
                     chemicals::cas_number.eq("0-0-0"),
                     chemicals::quantity.eq(5),
                     chemicals::unit.eq("g")))
            .returning(chemicals::id)
            .get_result(tx)?;
        let staged = writer.append_in(tx, id, ActionType::Add, 5)?;
        assert_eq!(staged.chemical_id, id);
        Err::<(), _>(PersistenceError::Unknown("forced failure".into()))
    });
    assert!(outcome.is_err());
    drop(conn);

    assert_eq!(count_by_name(&provider, &name), 0);
}

#[test]
fn failing_log_insert_rolls_back_the_mutation() {
    let Some(provider) = provider() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let writer = PgAuditLogWriter::new(provider.clone());
    let name = unique_name("CheckViolation");
    let mut conn = provider.connection().expect("conn");

    // cantidad negativa: el CHECK de inventory_logs rechaza la fila de auditoría
    let outcome = conn.build_transaction().read_committed().run(|tx| {
        let id: i32 = diesel::insert_into(chemicals::table)
            .values((chemicals::name.eq(&name),
                     chemicals::cas_number.eq("0-0-0"),
                     chemicals::quantity.eq(5),
                     chemicals::unit.eq("g")))
            .returning(chemicals::id)
            .get_result(tx)?;
        writer.append_in(tx, id, ActionType::Add, -1)
    });
    assert!(matches!(outcome, Err(PersistenceError::CheckViolation(_))));
    drop(conn);

    assert_eq!(count_by_name(&provider, &name), 0);
}

#[test]
fn standalone_log_commits_without_touching_quantity() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let created = store.create(NewChemical::new(&unique_name("CO2"), "124-38-9", 50, "kg").unwrap()).unwrap();

    let entry = store.create_log(created.id, "remove", 10).expect("standalone log");
    assert_eq!(entry.log.action_type, ActionType::Remove);
    assert_eq!(entry.log.quantity, 10);
    assert_eq!(entry.chemical.cas_number, "124-38-9");

    assert_eq!(store.get_by_id(created.id).unwrap().quantity, 50);
    let logs = store.logs_for_chemical(created.id, PageRequest::default()).unwrap();
    assert_eq!(logs.total, 2);
    assert_eq!(logs.results[0].log.id, entry.log.id);
}

#[test]
fn standalone_log_rejects_unknown_action_and_missing_chemical() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let created = store.create(NewChemical::new(&unique_name("Neon"), "7440-01-9", 4, "L").unwrap()).unwrap();

    for bad in ["delete", "ADD", " add", ""] {
        assert!(matches!(store.create_log(created.id, bad, 1), Err(InventoryError::Validation(_))), "{bad:?}");
    }
    assert!(matches!(store.create_log(created.id, "add", -1), Err(InventoryError::Validation(_))));
    let missing = i32::MAX - 11;
    assert_eq!(store.create_log(missing, "add", 1).unwrap_err(), InventoryError::NotFound { id: missing });

    // sólo queda el log `add` de la creación
    assert_eq!(store.logs_for_chemical(created.id, PageRequest::default()).unwrap().total, 1);
}

#[test]
fn rejected_update_leaves_history_untouched() {
    let Some(store) = store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let created = store.create(NewChemical::new(&unique_name("Helium"), "7440-59-7", 9, "L").unwrap()).unwrap();
    assert!(ChemicalUpdate::new().quantity(-5).is_err());
    assert!(ChemicalUpdate::new().unit(&"x".repeat(11)).is_err());
    assert!(matches!(store.update(created.id, ChemicalUpdate::new()), Err(InventoryError::Validation(_))));
    assert_eq!(store.get(created.id).unwrap(), Some(created.clone()));
    let logs = store.logs_for_chemical(created.id, PageRequest::default()).unwrap();
    assert_eq!(logs.total, 1);
    assert_eq!(logs.results[0].log.action_type, ActionType::Add);
}
