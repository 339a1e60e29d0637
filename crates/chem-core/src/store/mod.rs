//! Puerto `InventoryStore` e implementación en memoria.
//!
//! El trait agrupa las tres piezas del core:
//! - coordinador transaccional (`create`, `update`, `delete`, `get`, `list`);
//! - escritor de auditoría standalone (`create_log`);
//! - vía de lectura sin transacción (`get_by_id`, `logs_for_chemical`).
//!
//! Contrato común a todas las implementaciones:
//! - Cada `create`/`update`/`delete` confirmado deja exactamente una fila
//!   nueva de auditoría (`add`/`update`/`remove`) en la misma unidad atómica.
//! - Las filas de auditoría nunca se modifican.
//! - `delete` elimina en cascada el historial del químico (incluida la fila
//!   `remove` recién escrita).

mod memory;

use std::sync::Arc;

use chem_domain::{AuditLogEntry, ChemicalId, ChemicalRecord, ChemicalUpdate, DeletedChemical, NewChemical, Page, PageRequest};

use crate::errors::InventoryResult;

pub use memory::InMemoryInventoryStore;

pub trait InventoryStore: Send + Sync {
    /// Inserta el químico y su log `add` en una sola unidad atómica.
    fn create(&self, new: NewChemical) -> InventoryResult<ChemicalRecord>;
    /// Aplica sólo los campos presentes y agrega un log `update` con la
    /// cantidad resultante. `NotFound` si el id no existe.
    fn update(&self, id: ChemicalId, changes: ChemicalUpdate) -> InventoryResult<ChemicalRecord>;
    /// Escribe el log `remove` con la cantidad actual y borra el químico.
    fn delete(&self, id: ChemicalId) -> InventoryResult<DeletedChemical>;
    /// Búsqueda simple; ausencia no es error.
    fn get(&self, id: ChemicalId) -> InventoryResult<Option<ChemicalRecord>>;
    /// Página ordenada por id ascendente + conteo total sin filtro.
    fn list(&self, page: PageRequest) -> InventoryResult<Page<ChemicalRecord>>;
    /// Lectura por la vía sin transacción; ausencia es `NotFound`.
    fn get_by_id(&self, id: ChemicalId) -> InventoryResult<ChemicalRecord>;
    /// Historial más reciente primero + conteo total del químico.
    fn logs_for_chemical(&self, id: ChemicalId, page: PageRequest) -> InventoryResult<Page<AuditLogEntry>>;
    /// Log standalone confirmado de inmediato (fuera de cualquier mutación).
    fn create_log(&self, chemical_id: ChemicalId, action_type: &str, quantity: i32) -> InventoryResult<AuditLogEntry>;
}

impl<S: InventoryStore + ?Sized> InventoryStore for Arc<S> {
    fn create(&self, new: NewChemical) -> InventoryResult<ChemicalRecord> {
        (**self).create(new)
    }
    fn update(&self, id: ChemicalId, changes: ChemicalUpdate) -> InventoryResult<ChemicalRecord> {
        (**self).update(id, changes)
    }
    fn delete(&self, id: ChemicalId) -> InventoryResult<DeletedChemical> {
        (**self).delete(id)
    }
    fn get(&self, id: ChemicalId) -> InventoryResult<Option<ChemicalRecord>> {
        (**self).get(id)
    }
    fn list(&self, page: PageRequest) -> InventoryResult<Page<ChemicalRecord>> {
        (**self).list(page)
    }
    fn get_by_id(&self, id: ChemicalId) -> InventoryResult<ChemicalRecord> {
        (**self).get_by_id(id)
    }
    fn logs_for_chemical(&self, id: ChemicalId, page: PageRequest) -> InventoryResult<Page<AuditLogEntry>> {
        (**self).logs_for_chemical(id, page)
    }
    fn create_log(&self, chemical_id: ChemicalId, action_type: &str, quantity: i32) -> InventoryResult<AuditLogEntry> {
        (**self).create_log(chemical_id, action_type, quantity)
    }
}
