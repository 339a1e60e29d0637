//! chem-persistence
//!
//! Backend Postgres (Diesel + r2d2) del puerto `InventoryStore` de
//! `chem-core`, más utilidades de conexión, configuración y migraciones.
//!
//! Módulos:
//! - `pg`: coordinador transaccional, escritor de auditoría, vía de lectura y
//!   el store que los compone; pool y health check.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde entorno / .env.
//! - `schema`: tablas Diesel declaradas para compilar queries.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use pg::{build_pool, build_pool_from_config, health_check, ConnectionProvider, HealthStatus,
             PgAuditLogWriter, PgInventoryStore, PgMutationCoordinator, PgPool, PgReadPathway, PoolProvider};
