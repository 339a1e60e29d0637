use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ActionType, ChemicalId, ChemicalSummary};

/// Fila inmutable del log de auditoría de inventario (append-only).
///
/// `quantity` es la cantidad asociada a la acción: la cantidad creada para
/// `add`, la resultante para `update` y la existente al borrar para `remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAuditLog {
    pub id: i32,
    pub chemical_id: ChemicalId,
    pub action_type: ActionType,
    pub quantity: i32,
    pub timestamp: DateTime<Utc>,
}

/// Entrada del historial: la fila de log unida a los datos de su químico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub log: InventoryAuditLog,
    pub chemical: ChemicalSummary,
}

/// Cantidad asociada a una entrada de log: nunca negativa.
pub fn validate_log_quantity(quantity: i32) -> Result<i32, crate::DomainError> {
    if quantity < 0 {
        return Err(crate::DomainError::validation(format!("quantity must be non-negative, got {quantity}")));
    }
    Ok(quantity)
}
