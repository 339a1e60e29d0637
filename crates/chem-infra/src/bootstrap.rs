//! Cableado del backend Postgres a partir de `AppConfig`.

use chem_core::{seed_if_empty, InventoryService};
use chem_persistence::pg::{build_pool_from_config, health_check, HealthStatus, PgInventoryStore, PoolProvider};
use log::{info, warn};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::InfraError;

pub type PgInventoryService = InventoryService<PgInventoryStore<PoolProvider>>;

/// Construye el pool (corriendo migraciones) y el store listo para usar.
pub fn connect(cfg: &AppConfig) -> Result<(PoolProvider, PgInventoryStore<PoolProvider>), InfraError> {
    let pool = build_pool_from_config(&cfg.database)?;
    let provider = PoolProvider { pool };
    let store = PgInventoryStore::new(provider.clone());
    Ok((provider, store))
}

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapSummary {
    pub project_name: String,
    pub health: HealthStatus,
    pub seeded: usize,
}

/// Arranque completo: pool + migraciones, health check y seeding opcional.
/// Una base desconectada aborta el arranque.
pub fn bootstrap(cfg: &AppConfig, force_seed: bool) -> Result<(PgInventoryService, BootstrapSummary), InfraError> {
    info!("bootstrap:start project={}", cfg.project_name);
    let (provider, store) = connect(cfg)?;
    let health = health_check(&provider);
    if !health.is_connected() {
        warn!("bootstrap:abort database={}", health.database);
        return Err(InfraError::DatabaseUnavailable);
    }
    let seeded = if cfg.seed_on_start || force_seed { seed_if_empty(&store)? } else { 0 };
    info!("bootstrap:done seeded={seeded}");
    Ok((InventoryService::new(store),
        BootstrapSummary { project_name: cfg.project_name.clone(), health, seeded }))
}
