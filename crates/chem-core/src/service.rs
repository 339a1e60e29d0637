//! Fachada con el contrato expuesto a los colaboradores externos: recibe
//! valores crudos, construye los comandos tipados y devuelve vistas.

use chem_domain::{ChemicalId, ChemicalUpdate, ChemicalView, DeleteConfirmation, LogView, NewChemical, Page, PageRequest};
use log::warn;

use crate::errors::{InventoryError, InventoryResult};
use crate::store::InventoryStore;

pub struct InventoryService<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create(&self, name: &str, cas_number: &str, quantity: i32, unit: &str) -> InventoryResult<ChemicalView> {
        let new = NewChemical::new(name, cas_number, quantity, unit)?;
        self.store.create(new).map(ChemicalView::from).map_err(|e| report("create", e))
    }

    pub fn update(&self, id: ChemicalId, changes: ChemicalUpdate) -> InventoryResult<ChemicalView> {
        self.store.update(id, changes).map(ChemicalView::from).map_err(|e| report("update", e))
    }

    pub fn delete(&self, id: ChemicalId) -> InventoryResult<DeleteConfirmation> {
        self.store.delete(id).map(DeleteConfirmation::from).map_err(|e| report("delete", e))
    }

    pub fn list(&self, limit: i64, offset: i64) -> InventoryResult<Page<ChemicalView>> {
        let page = PageRequest::new(limit, offset)?;
        Ok(self.store.list(page).map_err(|e| report("list", e))?.map(ChemicalView::from))
    }

    pub fn get(&self, id: ChemicalId) -> InventoryResult<Option<ChemicalView>> {
        Ok(self.store.get(id).map_err(|e| report("get", e))?.map(ChemicalView::from))
    }

    pub fn get_by_id(&self, id: ChemicalId) -> InventoryResult<ChemicalView> {
        self.store.get_by_id(id).map(ChemicalView::from).map_err(|e| report("get_by_id", e))
    }

    pub fn get_logs(&self, chemical_id: ChemicalId, limit: i64, offset: i64) -> InventoryResult<Page<LogView>> {
        let page = PageRequest::new(limit, offset)?;
        Ok(self.store
               .logs_for_chemical(chemical_id, page)
               .map_err(|e| report("get_logs", e))?
               .map(LogView::from))
    }

    pub fn create_log(&self, chemical_id: ChemicalId, action_type: &str, quantity: i32) -> InventoryResult<LogView> {
        self.store
            .create_log(chemical_id, action_type, quantity)
            .map(LogView::from)
            .map_err(|e| report("create_log", e))
    }
}

// El detalle de `Storage` sólo se escribe en el log; el caller ve el mensaje opaco.
fn report(op: &str, e: InventoryError) -> InventoryError {
    if let Some(detail) = e.detail() {
        warn!("{op}:error kind={} detail={detail}", e.kind());
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryInventoryStore;

    #[test]
    fn create_validates_before_storage() {
        let svc = InventoryService::new(InMemoryInventoryStore::new());
        let err = svc.create("Water", "7732-18-5", -3, "L").unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(svc.list(10, 0).unwrap().total, 0);
        assert_eq!(svc.store().log_count().unwrap(), 0);
    }

    #[test]
    fn list_rejects_out_of_range_window() {
        let svc = InventoryService::new(InMemoryInventoryStore::new());
        assert!(matches!(svc.list(0, 0), Err(InventoryError::Validation(_))));
        assert!(matches!(svc.list(101, 0), Err(InventoryError::Validation(_))));
        assert!(matches!(svc.get_logs(1, 10, -1), Err(InventoryError::Validation(_))));
    }
}
