//! chem-core: coordinación de mutaciones de inventario + auditoría.
//!
//! Define el puerto `InventoryStore`, su backend en memoria, la fachada
//! `InventoryService` con el contrato de vistas y el seeding inicial. La
//! implementación Postgres vive en `chem-persistence`.
pub mod errors;
pub mod seed;
pub mod service;
pub mod store;

pub use errors::{InventoryError, InventoryResult};
pub use seed::{seed_if_empty, SEED_CHEMICALS};
pub use service::InventoryService;
pub use store::{InMemoryInventoryStore, InventoryStore};
