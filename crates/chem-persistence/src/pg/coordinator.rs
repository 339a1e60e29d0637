use chem_core::InventoryResult;
use chem_domain::{validate_id, ActionType, ChemicalId, ChemicalRecord, ChemicalUpdate, DeletedChemical, NewChemical, Page, PageRequest};
use diesel::dsl::now;
use diesel::prelude::*;
use log::{debug, info};

use super::{ChemicalChangeset, ChemicalRow, ConnectionProvider, NewChemicalRow, PgAuditLogWriter};
use crate::error::{into_inventory, storage_failure, PersistenceError};
use crate::schema::chemicals;

/// Coordinador transaccional de mutaciones.
///
/// Cada llamada abre UNA transacción read-committed read-write sobre una
/// conexión del pool:
/// 1. muta/inserta/borra la fila de `chemicals`;
/// 2. agrega la fila de auditoría con `PgAuditLogWriter::append_in` sobre la
///    misma conexión;
/// 3. commit, o rollback completo ante cualquier error.
///
/// No hay locks de aplicación: updates concurrentes al mismo id se serializan
/// en el lock de fila (`FOR UPDATE`) y cada uno agrega su propio log.
pub struct PgMutationCoordinator<P: ConnectionProvider + Clone> {
    provider: P,
    audit: PgAuditLogWriter<P>,
}

impl<P: ConnectionProvider + Clone> PgMutationCoordinator<P> {
    pub fn new(provider: P) -> Self {
        Self { audit: PgAuditLogWriter::new(provider.clone()), provider }
    }

    pub fn audit(&self) -> &PgAuditLogWriter<P> {
        &self.audit
    }

    /// Inserta el químico + log `add`. Los timestamps asignados por el
    /// servidor vuelven vía `RETURNING` dentro de la misma transacción.
    pub fn create(&self, new: NewChemical) -> InventoryResult<ChemicalRecord> {
        debug!("create:start name={} quantity={}", new.name(), new.quantity());
        let mut conn = self.provider.connection().map_err(|e| storage_failure("create", e))?;
        let row = conn.build_transaction()
                      .read_committed()
                      .read_write()
                      .run(|tx| {
                          // Paso 1: insertar el químico y obtener el id generado
                          let row: ChemicalRow = diesel::insert_into(chemicals::table)
                              .values(NewChemicalRow { name: new.name(),
                                                       cas_number: new.cas_number(),
                                                       quantity: new.quantity(),
                                                       unit: new.unit() })
                              .returning(ChemicalRow::as_returning())
                              .get_result(tx)?;
                          // Paso 2: log `add` en la misma transacción
                          self.audit.append_in(tx, row.id, ActionType::Add, row.quantity)?;
                          Ok::<ChemicalRow, PersistenceError>(row)
                      })
                      .map_err(|e| storage_failure("create", e))?;
        debug!("create:done id={} quantity={}", row.id, row.quantity);
        Ok(row.into_record())
    }

    /// Aplica sólo los campos presentes en `changes` y registra un log
    /// `update` con la cantidad resultante.
    pub fn update(&self, id: ChemicalId, changes: ChemicalUpdate) -> InventoryResult<ChemicalRecord> {
        validate_id(id)?;
        changes.ensure_not_empty()?;
        debug!("update:start id={id}");
        let mut conn = self.provider.connection().map_err(|e| storage_failure("update", e))?;
        let row = conn.build_transaction()
                      .read_committed()
                      .read_write()
                      .run(|tx| {
                          // Existencia + lock de fila antes de cualquier efecto
                          chemicals::table.find(id)
                                          .select(chemicals::id)
                                          .for_update()
                                          .first::<i32>(tx)
                                          .optional()?
                                          .ok_or(PersistenceError::NotFound)?;
                          let changeset = ChemicalChangeset { name: changes.name_value(),
                                                              cas_number: changes.cas_number_value(),
                                                              quantity: changes.quantity_value(),
                                                              unit: changes.unit_value() };
                          let row: ChemicalRow = diesel::update(chemicals::table.find(id))
                              .set((&changeset, chemicals::updated_at.eq(now)))
                              .returning(ChemicalRow::as_returning())
                              .get_result(tx)?;
                          self.audit.append_in(tx, id, ActionType::Update, row.quantity)?;
                          Ok::<ChemicalRow, PersistenceError>(row)
                      })
                      .map_err(|e| into_inventory("update", id, e))?;
        debug!("update:done id={id} quantity={}", row.quantity);
        Ok(row.into_record())
    }

    /// Escribe el log `remove` con la cantidad actual y borra el químico. La
    /// FK `ON DELETE CASCADE` elimina todo su historial en el mismo commit.
    pub fn delete(&self, id: ChemicalId) -> InventoryResult<DeletedChemical> {
        validate_id(id)?;
        debug!("delete:start id={id}");
        let mut conn = self.provider.connection().map_err(|e| storage_failure("delete", e))?;
        let (deleted, quantity) = conn.build_transaction()
                                      .read_committed()
                                      .read_write()
                                      .run(|tx| {
                                          let row: ChemicalRow = chemicals::table.find(id)
                                                                                 .select(ChemicalRow::as_select())
                                                                                 .for_update()
                                                                                 .first(tx)
                                                                                 .optional()?
                                                                                 .ok_or(PersistenceError::NotFound)?;
                                          self.audit.append_in(tx, id, ActionType::Remove, row.quantity)?;
                                          diesel::delete(chemicals::table.find(id)).execute(tx)?;
                                          Ok::<_, PersistenceError>((DeletedChemical { id, name: row.name }, row.quantity))
                                      })
                                      .map_err(|e| into_inventory("delete", id, e))?;
        // El historial no sobrevive al borrado; esta línea queda como rastro.
        info!("delete:done id={id} name={} quantity={quantity}", deleted.name);
        Ok(deleted)
    }

    /// Búsqueda simple; ausencia no es error.
    pub fn get(&self, id: ChemicalId) -> InventoryResult<Option<ChemicalRecord>> {
        validate_id(id)?;
        let mut conn = self.provider.connection().map_err(|e| storage_failure("get", e))?;
        let row = chemicals::table.find(id)
                                  .select(ChemicalRow::as_select())
                                  .first(&mut conn)
                                  .optional()
                                  .map_err(|e| storage_failure("get", e.into()))?;
        Ok(row.map(ChemicalRow::into_record))
    }

    /// Conteo total + página por id ascendente, en un mismo snapshot
    /// (read-only, repeatable read) para que ambos valores sean coherentes.
    pub fn list(&self, page: PageRequest) -> InventoryResult<Page<ChemicalRecord>> {
        let mut conn = self.provider.connection().map_err(|e| storage_failure("list", e))?;
        let (total, rows) = conn.build_transaction()
                                .read_only()
                                .repeatable_read()
                                .run(|tx| {
                                    let total: i64 = chemicals::table.count().get_result(tx)?;
                                    let rows: Vec<ChemicalRow> = chemicals::table.order(chemicals::id.asc())
                                                                                 .limit(page.limit())
                                                                                 .offset(page.offset())
                                                                                 .select(ChemicalRow::as_select())
                                                                                 .load(tx)?;
                                    Ok::<_, PersistenceError>((total, rows))
                                })
                                .map_err(|e| storage_failure("list", e))?;
        debug!("list:done total={total} returned={}", rows.len());
        Ok(Page::new(page, total, rows.into_iter().map(ChemicalRow::into_record).collect()))
    }
}
