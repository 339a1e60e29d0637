use chem_core::InventoryError;
use chem_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("database unavailable")]
    DatabaseUnavailable,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}
