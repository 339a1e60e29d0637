//! Implementación Postgres (Diesel + r2d2) del core de inventario.
//!
//! Objetivo general del módulo:
//! - Un único pool r2d2 compartido por las dos vías de acceso.
//! - Vía transaccional (`PgMutationCoordinator`): cada create/update/delete
//!   corre en una transacción read-committed y escribe su fila de auditoría
//!   (`PgAuditLogWriter::append_in`) sobre la MISMA conexión, de modo que
//!   ambas filas se confirman o se revierten juntas.
//! - Vía de lectura (`PgReadPathway`): SQL parametrizado en modo autocommit,
//!   sin transacción ni locks; acepta leer un estado anterior a una escritura
//!   concurrente aún no confirmada.
//! - Sin reintentos automáticos: cualquier fallo se propaga al caller.

mod audit;
mod coordinator;
mod reader;
mod store;

use chem_domain::{ActionType, ChemicalRecord, InventoryAuditLog};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use log::{info, warn};

use crate::config::DbConfig;
use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::{chemicals, inventory_logs};

pub use audit::PgAuditLogWriter;
pub use coordinator::PgMutationCoordinator;
pub use reader::PgReadPathway;
pub use store::{health_check, HealthStatus, PgInventoryStore};

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
///
/// Notas operativas:
/// - El pool se construye con `min_idle` (mínimo de conexiones inactivas) y
///   `max_size` (límite superior total).
/// - Al construirlo, se corre automáticamente el set de migraciones pendientes
///   (una sola vez).
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type PgPooledConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones.
///
/// Este trait permite:
/// - Inyectar un pool real (producción/tests de integración).
/// - Sustituir el origen de conexiones sin acoplar los componentes a r2d2.
///
/// Contrato:
/// - Debe devolver una conexión válida o `PersistenceError::TransientIo`.
pub trait ConnectionProvider: Send + Sync + 'static {
    /// Obtiene una conexión lista para ejecutar consultas Diesel.
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
/// Clonarla comparte el mismo pool.
#[derive(Clone)]
pub struct PoolProvider {
    pub pool: PgPool,
}
impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

/// Fila mapeada de la tabla `chemicals`.
///
/// Sirve tanto al DSL (`Selectable`, `RETURNING`) como a las consultas SQL
/// crudas de la vía de lectura (`QueryableByName`).
#[derive(Queryable, Selectable, QueryableByName, Debug, Clone)]
#[diesel(table_name = chemicals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChemicalRow {
    pub id: i32,
    pub name: String,
    pub cas_number: String,
    pub quantity: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChemicalRow {
    pub fn into_record(self) -> ChemicalRecord {
        ChemicalRecord { id: self.id,
                         name: self.name,
                         cas_number: self.cas_number,
                         quantity: self.quantity,
                         unit: self.unit,
                         created_at: self.created_at,
                         updated_at: self.updated_at }
    }
}

/// Estructura para inserción en `chemicals`; `id` y timestamps los asigna la
/// base de datos y vuelven vía `RETURNING`.
#[derive(Insertable, Debug)]
#[diesel(table_name = chemicals)]
pub struct NewChemicalRow<'a> {
    pub name: &'a str,
    pub cas_number: &'a str,
    pub quantity: i32,
    pub unit: &'a str,
}

/// Changeset parcial: los `None` no aparecen en el `SET`.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = chemicals)]
pub struct ChemicalChangeset<'a> {
    pub name: Option<&'a str>,
    pub cas_number: Option<&'a str>,
    pub quantity: Option<i32>,
    pub unit: Option<&'a str>,
}

/// Fila mapeada de la tabla `inventory_logs`.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = inventory_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InventoryLogRow {
    pub id: i32,
    pub chemical_id: i32,
    pub action_type: String,
    pub quantity: i32,
    pub timestamp: DateTime<Utc>,
}

impl InventoryLogRow {
    /// La columna tiene CHECK sobre el conjunto cerrado; un valor fuera de él
    /// indica una fila corrupta, no un error de validación del caller.
    pub fn into_log(self) -> Result<InventoryAuditLog, PersistenceError> {
        let action_type = ActionType::parse(&self.action_type).map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;
        Ok(InventoryAuditLog { id: self.id,
                               chemical_id: self.chemical_id,
                               action_type,
                               quantity: self.quantity,
                               timestamp: self.timestamp })
    }
}

/// Fila para insertar en `inventory_logs`. `timestamp` lo asigna
/// `clock_timestamp()` al momento del INSERT.
#[derive(Insertable, Debug)]
#[diesel(table_name = inventory_logs)]
pub struct NewLogRow<'a> {
    pub chemical_id: i32,
    pub action_type: &'a str,
    pub quantity: i32,
}

/// Construye un pool Postgres r2d2 a partir de URL.
///
/// Comportamiento:
/// - Valida y ajusta tamaños (si `min_size > max_size`, usa `min_size =
///   max_size`).
/// - Ejecuta migraciones inmediatamente tras el primer `get()`.
/// - Devuelve `PersistenceError::TransientIo` ante errores del pool/manager.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    build_pool_with_timeout(database_url, min_size, max_size, std::time::Duration::from_secs(30))
}

/// Igual que `build_pool`, con timeout explícito de checkout de conexiones.
pub fn build_pool_with_timeout(database_url: &str,
                               min_size: u32,
                               max_size: u32,
                               connection_timeout: std::time::Duration)
                               -> Result<PgPool, PersistenceError> {
    let validated_min = if min_size == 0 { 1 } else { min_size };
    let validated_max = if max_size == 0 { 1 } else { max_size };
    if validated_min > validated_max {
        warn!("build_pool:adjust min_size > max_size ({} > {}), usando min=max",
              validated_min, validated_max);
    }
    let final_min = validated_min.min(validated_max);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .connection_timeout(connection_timeout)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    // Ejecutar migraciones una sola vez al construir (primer connection checkout).
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    info!("build_pool:done min={final_min} max={validated_max}");
    Ok(pool)
}

/// Construye el pool (ya migrado) desde una `DbConfig`.
pub fn build_pool_from_config(cfg: &DbConfig) -> Result<PgPool, PersistenceError> {
    info!("build_pool:start url={}", cfg.redacted_url());
    build_pool_with_timeout(&cfg.url, cfg.min_connections, cfg.max_connections, cfg.connect_timeout)
}
