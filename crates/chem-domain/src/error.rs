use thiserror::Error;

/// Error de dominio: valores que no cumplen las reglas del inventario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    #[error("Acción de inventario desconocida: '{0}' (esperado add|remove|update)")]
    UnknownActionType(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::ValidationError(msg.into())
    }
}
