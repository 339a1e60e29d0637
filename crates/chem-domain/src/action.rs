//! Tipo de acción registrado en el log de auditoría.
//!
//! Conjunto cerrado: `add`, `remove`, `update`. La conversión desde texto es
//! explícita (`ActionType::parse`) y falla ante cualquier otro valor; nunca se
//! cae a un valor por defecto.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Add,
    Remove,
    Update,
}

impl ActionType {
    pub const ALL: [ActionType; 3] = [ActionType::Add, ActionType::Remove, ActionType::Update];

    /// Parsea la representación en minúsculas. Sin recorte ni normalización de
    /// mayúsculas: `"Add"` o `" add"` se rechazan igual que `"scrap"`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "add" => Ok(ActionType::Add),
            "remove" => Ok(ActionType::Remove),
            "update" => Ok(ActionType::Update),
            other => Err(DomainError::UnknownActionType(other.to_string())),
        }
    }

    /// Representación estable usada en la columna `action_type` y en las vistas.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Add => "add",
            ActionType::Remove => "remove",
            ActionType::Update => "update",
        }
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::parse(s)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
