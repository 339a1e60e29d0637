use chem_core::{InventoryError, InventoryResult};
use chem_domain::{validate_id, ActionType, AuditLogEntry, ChemicalId, ChemicalRecord, ChemicalSummary, InventoryAuditLog, Page, PageRequest};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Timestamptz, Varchar};
use log::debug;

use super::{ChemicalRow, ConnectionProvider};
use crate::error::{storage_failure, PersistenceError};

const CHEMICAL_BY_ID: &str = "SELECT id, name, cas_number, quantity, unit, created_at, updated_at \
                              FROM chemicals WHERE id = $1";

const LOG_HISTORY: &str = "SELECT il.id, il.chemical_id, il.action_type, il.quantity, il.timestamp, \
                                  c.name, c.cas_number, c.unit \
                           FROM inventory_logs il \
                           JOIN chemicals c ON c.id = il.chemical_id \
                           WHERE il.chemical_id = $1 \
                           ORDER BY il.timestamp DESC, il.id DESC \
                           LIMIT $2 OFFSET $3";

const LOG_COUNT: &str = "SELECT COUNT(*) AS total FROM inventory_logs WHERE chemical_id = $1";

/// Fila del join historial + químico.
#[derive(QueryableByName, Debug)]
struct LogHistoryRow {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Integer)]
    chemical_id: i32,
    #[diesel(sql_type = Varchar)]
    action_type: String,
    #[diesel(sql_type = Integer)]
    quantity: i32,
    #[diesel(sql_type = Timestamptz)]
    timestamp: DateTime<Utc>,
    #[diesel(sql_type = Varchar)]
    name: String,
    #[diesel(sql_type = Varchar)]
    cas_number: String,
    #[diesel(sql_type = Varchar)]
    unit: String,
}

impl LogHistoryRow {
    fn into_entry(self) -> Result<AuditLogEntry, PersistenceError> {
        let action_type = ActionType::parse(&self.action_type).map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;
        Ok(AuditLogEntry { log: InventoryAuditLog { id: self.id,
                                                    chemical_id: self.chemical_id,
                                                    action_type,
                                                    quantity: self.quantity,
                                                    timestamp: self.timestamp },
                           chemical: ChemicalSummary { name: self.name, cas_number: self.cas_number, unit: self.unit } })
    }
}

#[derive(QueryableByName, Debug)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// Vía de lectura: SQL parametrizado en autocommit, sin transacción explícita
/// ni locks. Puede observar el estado previo a una mutación concurrente no
/// confirmada; nunca observa un estado parcial.
pub struct PgReadPathway<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> PgReadPathway<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn get_by_id(&self, id: ChemicalId) -> InventoryResult<ChemicalRecord> {
        validate_id(id)?;
        let mut conn = self.provider.connection().map_err(|e| storage_failure("get_by_id", e))?;
        let row = diesel::sql_query(CHEMICAL_BY_ID).bind::<Integer, _>(id)
                                                   .get_result::<ChemicalRow>(&mut conn)
                                                   .optional()
                                                   .map_err(|e| storage_failure("get_by_id", e.into()))?;
        row.map(ChemicalRow::into_record).ok_or(InventoryError::NotFound { id })
    }

    /// Historial más reciente primero (desempate por id descendente). Un
    /// químico inexistente produce una página vacía con `total = 0`.
    pub fn logs_for_chemical(&self, id: ChemicalId, page: PageRequest) -> InventoryResult<Page<AuditLogEntry>> {
        validate_id(id)?;
        let mut conn = self.provider.connection().map_err(|e| storage_failure("logs_for_chemical", e))?;
        let rows = diesel::sql_query(LOG_HISTORY).bind::<Integer, _>(id)
                                                 .bind::<BigInt, _>(page.limit())
                                                 .bind::<BigInt, _>(page.offset())
                                                 .load::<LogHistoryRow>(&mut conn)
                                                 .map_err(|e| storage_failure("logs_for_chemical", e.into()))?;
        let total = diesel::sql_query(LOG_COUNT).bind::<Integer, _>(id)
                                                .get_result::<CountRow>(&mut conn)
                                                .map_err(|e| storage_failure("logs_for_chemical", e.into()))?
                                                .total;
        let results = rows.into_iter()
                          .map(LogHistoryRow::into_entry)
                          .collect::<Result<Vec<_>, _>>()
                          .map_err(|e| storage_failure("logs_for_chemical", e))?;
        debug!("logs_for_chemical:done id={id} total={total} returned={}", results.len());
        Ok(Page::new(page, total, results))
    }
}
