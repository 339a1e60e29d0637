//! Errores visibles para quien invoca el core de inventario.
//!
//! Tres clases, todas locales a una llamada y nunca reintentadas aquí:
//! - `NotFound`: el químico no existe; no se intentó ninguna escritura.
//! - `Validation`: entrada rechazada antes de tocar almacenamiento.
//! - `Storage`: fallo del motor; la unidad atómica se revirtió completa. El
//!   detalle interno queda fuera de `Display` (mensaje opaco) y sólo se expone
//!   vía `detail()` para logging.

use chem_domain::{ChemicalId, DomainError};
use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InventoryError {
    #[error("Chemical not found (id {id})")]
    NotFound { id: ChemicalId },
    #[error("{0}")]
    Validation(String),
    #[error("storage failure")]
    Storage { detail: String },
}

impl InventoryError {
    pub fn storage(detail: impl Into<String>) -> Self {
        InventoryError::Storage { detail: detail.into() }
    }

    /// Etiqueta estable para logs y códigos de salida.
    pub fn kind(&self) -> &'static str {
        match self {
            InventoryError::NotFound { .. } => "not_found",
            InventoryError::Validation(_) => "validation",
            InventoryError::Storage { .. } => "storage",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            InventoryError::Storage { detail } => Some(detail),
            _ => None,
        }
    }
}

impl From<DomainError> for InventoryError {
    fn from(e: DomainError) -> Self {
        InventoryError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_display_is_opaque() {
        let e = InventoryError::storage("duplicate key value violates unique constraint \"chemicals_pkey\"");
        assert_eq!(e.to_string(), "storage failure");
        assert!(e.detail().unwrap().contains("chemicals_pkey"));
        assert_eq!(e.kind(), "storage");
    }

    #[test]
    fn domain_errors_become_validation() {
        let e: InventoryError = DomainError::UnknownActionType("scrap".into()).into();
        assert!(matches!(e, InventoryError::Validation(ref m) if m.contains("scrap")));
    }
}
