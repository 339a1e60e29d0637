use chem_core::InventoryResult;
use chem_domain::{validate_id, validate_log_quantity, ActionType, AuditLogEntry, ChemicalId, InventoryAuditLog};
use diesel::prelude::*;
use log::debug;

use super::{ChemicalRow, ConnectionProvider, InventoryLogRow, NewLogRow};
use crate::error::{into_inventory, PersistenceError};
use crate::schema::{chemicals, inventory_logs};

/// Escritor del log de auditoría (append-only; no existe operación de update).
///
/// Dos modos de escritura:
/// - `append_in`: la fila se agrega a la transacción YA ABIERTA por el caller
///   (no hace commit propio; el caller decide commit o rollback).
/// - `record`: escritura standalone, verifica que el químico exista y confirma
///   de inmediato en su propia transacción.
pub struct PgAuditLogWriter<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> PgAuditLogWriter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Inserta la fila sobre la conexión transaccional del caller.
    pub fn append_in(&self,
                     tx: &mut PgConnection,
                     chemical_id: ChemicalId,
                     action: ActionType,
                     quantity: i32)
                     -> Result<InventoryAuditLog, PersistenceError> {
        let row: InventoryLogRow = diesel::insert_into(inventory_logs::table)
            .values(NewLogRow { chemical_id, action_type: action.as_str(), quantity })
            .returning(InventoryLogRow::as_returning())
            .get_result(tx)?;
        debug!("append_in:staged chemical_id={chemical_id} action={action} log_id={}", row.id);
        row.into_log()
    }

    /// Log standalone. El tipo de acción se parsea antes de cualquier acceso a
    /// la base; un valor fuera de {add, remove, update} es `Validation`.
    pub fn record(&self, chemical_id: ChemicalId, action_type: &str, quantity: i32) -> InventoryResult<AuditLogEntry> {
        let action = ActionType::parse(action_type)?;
        validate_id(chemical_id)?;
        validate_log_quantity(quantity)?;
        debug!("record:start chemical_id={chemical_id} action={action}");

        let mut conn = self.provider.connection().map_err(|e| into_inventory("create_log", chemical_id, e))?;
        let entry = conn.build_transaction()
                        .read_committed()
                        .read_write()
                        .run(|tx| {
                            // KEY SHARE: impide que un delete concurrente borre el químico
                            // entre la verificación y el INSERT.
                            let chemical: ChemicalRow = chemicals::table.find(chemical_id)
                                                                        .select(ChemicalRow::as_select())
                                                                        .for_key_share()
                                                                        .first(tx)
                                                                        .optional()?
                                                                        .ok_or(PersistenceError::NotFound)?;
                            let log = self.append_in(tx, chemical_id, action, quantity)?;
                            let chemical = chemical.into_record().summary();
                            Ok::<AuditLogEntry, PersistenceError>(AuditLogEntry { log, chemical })
                        })
                        .map_err(|e| into_inventory("create_log", chemical_id, e))?;
        debug!("record:done chemical_id={chemical_id} log_id={}", entry.log.id);
        Ok(entry)
    }
}

impl<P: ConnectionProvider + Clone> Clone for PgAuditLogWriter<P> {
    fn clone(&self) -> Self {
        Self { provider: self.provider.clone() }
    }
}
