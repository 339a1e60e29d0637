//! Escenarios de aceptación A–D ejecutables contra cualquier backend.
//!
//! Cada escenario devuelve lo que observó; `main-core --demo` los imprime y
//! los tests verifican los valores esperados.

use chem_core::{InventoryResult, InventoryService, InventoryStore};
use chem_domain::{ChemicalUpdate, ChemicalView, LogView, Page};
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub created: ChemicalView,
    pub listed_total: i64,
    pub history_after_update: Page<LogView>,
    pub get_by_id_after_delete: String,
    pub history_after_delete_total: i64,
    pub invalid_action: String,
}

/// A: alta de Water; B: update a 80 y lectura del historial; C: delete y
/// relecturas; D: log con acción inválida sobre un químico nuevo.
pub fn run_scenarios<S: InventoryStore>(service: &InventoryService<S>) -> InventoryResult<ScenarioReport> {
    let created = service.create("Water", "7732-18-5", 100, "L")?;
    let listed_total = service.list(10, 0)?.total;
    info!("demo:a id={} total={listed_total}", created.id);

    service.update(created.id, ChemicalUpdate::new().quantity(80)?)?;
    let history_after_update = service.get_logs(created.id, 10, 0)?;
    info!("demo:b logs={}", history_after_update.total);

    service.delete(created.id)?;
    let get_by_id_after_delete = describe(service.get_by_id(created.id).map(|_| ()));
    let history_after_delete_total = service.get_logs(created.id, 10, 0)?.total;
    info!("demo:c get_by_id={get_by_id_after_delete} logs={history_after_delete_total}");

    let other = service.create("Carbon Dioxide", "124-38-9", 50, "kg")?;
    let invalid_action = describe(service.create_log(other.id, "scrap", 5).map(|_| ()));
    info!("demo:d create_log={invalid_action}");

    Ok(ScenarioReport { created,
                        listed_total,
                        history_after_update,
                        get_by_id_after_delete,
                        history_after_delete_total,
                        invalid_action })
}

fn describe(outcome: InventoryResult<()>) -> String {
    match outcome {
        Ok(()) => "ok".to_string(),
        Err(e) => e.kind().to_string(),
    }
}

