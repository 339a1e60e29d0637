use chem_core::{InventoryResult, InventoryStore};
use chem_domain::{AuditLogEntry, ChemicalId, ChemicalRecord, ChemicalUpdate, DeletedChemical, NewChemical, Page, PageRequest};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use log::{error, info};
use serde::Serialize;

use super::{ConnectionProvider, PgMutationCoordinator, PgReadPathway};

/// Backend Postgres del puerto `InventoryStore`: el coordinador transaccional
/// y la vía de lectura comparten el mismo proveedor (y por lo tanto el mismo
/// pool).
pub struct PgInventoryStore<P: ConnectionProvider + Clone> {
    coordinator: PgMutationCoordinator<P>,
    reader: PgReadPathway<P>,
}

impl<P: ConnectionProvider + Clone> PgInventoryStore<P> {
    pub fn new(provider: P) -> Self {
        Self { coordinator: PgMutationCoordinator::new(provider.clone()), reader: PgReadPathway::new(provider) }
    }
}

impl<P: ConnectionProvider + Clone> InventoryStore for PgInventoryStore<P> {
    fn create(&self, new: NewChemical) -> InventoryResult<ChemicalRecord> {
        self.coordinator.create(new)
    }
    fn update(&self, id: ChemicalId, changes: ChemicalUpdate) -> InventoryResult<ChemicalRecord> {
        self.coordinator.update(id, changes)
    }
    fn delete(&self, id: ChemicalId) -> InventoryResult<DeletedChemical> {
        self.coordinator.delete(id)
    }
    fn get(&self, id: ChemicalId) -> InventoryResult<Option<ChemicalRecord>> {
        self.coordinator.get(id)
    }
    fn list(&self, page: PageRequest) -> InventoryResult<Page<ChemicalRecord>> {
        self.coordinator.list(page)
    }
    fn get_by_id(&self, id: ChemicalId) -> InventoryResult<ChemicalRecord> {
        self.reader.get_by_id(id)
    }
    fn logs_for_chemical(&self, id: ChemicalId, page: PageRequest) -> InventoryResult<Page<AuditLogEntry>> {
        self.reader.logs_for_chemical(id, page)
    }
    fn create_log(&self, chemical_id: ChemicalId, action_type: &str, quantity: i32) -> InventoryResult<AuditLogEntry> {
        self.coordinator.audit().record(chemical_id, action_type, quantity)
    }
}

/// Resultado del chequeo de salud: `ok`/`reachable`, o `error`/`unreachable`
/// (el detalle del fallo sólo va al log).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

impl HealthStatus {
    pub fn is_connected(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(QueryableByName)]
struct Probe {
    #[diesel(sql_type = Integer)]
    #[allow(dead_code)]
    one: i32,
}

/// Ejecuta `SELECT 1` sobre una conexión del pool. Nunca falla: un error se
/// reporta como `error`/`unreachable` y queda en el log.
pub fn health_check<P: ConnectionProvider>(provider: &P) -> HealthStatus {
    let probe = provider.connection().and_then(|mut conn| {
                                         diesel::sql_query("SELECT 1 AS one").get_result::<Probe>(&mut conn)
                                                                             .map_err(Into::into)
                                     });
    let (status, database) = match probe {
        Ok(_) => {
            info!("health_check:done database=reachable");
            ("ok", "reachable")
        }
        Err(e) => {
            error!("health_check:error err={e}");
            ("error", "unreachable")
        }
    };
    HealthStatus { status: status.to_string(), database: database.to_string() }
}
