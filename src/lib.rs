//! Chemical Inventory
//!
//! Fachada del workspace:
//! - `domain`: registros, comandos tipados, paginación y vistas.
//! - `core`: puerto `InventoryStore`, backend en memoria y `InventoryService`.
//! - `persistence`: backend Postgres (Diesel + r2d2) con auditoría
//!   transaccional.
//! - `infra`: configuración, logging y arranque.
//! - `demo`: escenarios de aceptación ejecutables.

pub mod demo;

pub use chem_core as core;
pub use chem_domain as domain;
pub use chem_infra as infra;
pub use chem_persistence as persistence;

pub use chem_core::{InMemoryInventoryStore, InventoryError, InventoryResult, InventoryService, InventoryStore};
pub use chem_domain::{ActionType, ChemicalUpdate, ChemicalView, DeleteConfirmation, LogView, Page};
