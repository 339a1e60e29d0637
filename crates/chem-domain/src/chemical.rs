//! Registro de químico y comandos tipados de alta / modificación.
//!
//! Los comandos (`NewChemical`, `ChemicalUpdate`) se validan al construirse,
//! de modo que cualquier valor que llegue a la capa de almacenamiento ya
//! cumple los límites de las columnas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Identificador de químico (SERIAL en Postgres, siempre positivo).
pub type ChemicalId = i32;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_CAS_LEN: usize = 100;
pub const MAX_UNIT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalRecord {
    pub id: ChemicalId,
    pub name: String,
    pub cas_number: String,
    pub quantity: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChemicalRecord {
    pub fn summary(&self) -> ChemicalSummary {
        ChemicalSummary { name: self.name.clone(),
                          cas_number: self.cas_number.clone(),
                          unit: self.unit.clone() }
    }
}

/// Datos descriptivos del químico que acompañan a cada entrada del historial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalSummary {
    pub name: String,
    pub cas_number: String,
    pub unit: String,
}

/// Rechaza identificadores no positivos antes de tocar almacenamiento.
pub fn validate_id(id: ChemicalId) -> Result<ChemicalId, DomainError> {
    if id <= 0 {
        return Err(DomainError::validation(format!("id must be a positive integer, got {id}")));
    }
    Ok(id)
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be blank")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::validation(format!("{field} must be at most {max} characters, got {len}")));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity < 0 {
        return Err(DomainError::validation(format!("quantity must be non-negative, got {quantity}")));
    }
    Ok(())
}

/// Comando de alta: los cuatro campos son obligatorios. Deserializar pasa
/// por `NewChemical::new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewChemicalFields")]
pub struct NewChemical {
    name: String,
    cas_number: String,
    quantity: i32,
    unit: String,
}

impl NewChemical {
    pub fn new(name: &str, cas_number: &str, quantity: i32, unit: &str) -> Result<Self, DomainError> {
        validate_text("name", name, MAX_NAME_LEN)?;
        validate_text("cas_number", cas_number, MAX_CAS_LEN)?;
        validate_quantity(quantity)?;
        validate_text("unit", unit, MAX_UNIT_LEN)?;
        Ok(NewChemical { name: name.to_string(),
                         cas_number: cas_number.to_string(),
                         quantity,
                         unit: unit.to_string() })
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn cas_number(&self) -> &str { &self.cas_number }
    pub fn quantity(&self) -> i32 { self.quantity }
    pub fn unit(&self) -> &str { &self.unit }
}

#[derive(Deserialize)]
struct NewChemicalFields {
    name: String,
    cas_number: String,
    quantity: i32,
    unit: String,
}

impl TryFrom<NewChemicalFields> for NewChemical {
    type Error = DomainError;

    fn try_from(f: NewChemicalFields) -> Result<Self, Self::Error> {
        NewChemical::new(&f.name, &f.cas_number, f.quantity, &f.unit)
    }
}

/// Comando de modificación parcial. Enumera exactamente los campos mutables;
/// los `None` se dejan intactos. Deserializar pasa por los mismos builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChemicalUpdateFields")]
pub struct ChemicalUpdate {
    name: Option<String>,
    cas_number: Option<String>,
    quantity: Option<i32>,
    unit: Option<String>,
}

impl ChemicalUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Result<Self, DomainError> {
        validate_text("name", name, MAX_NAME_LEN)?;
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn cas_number(mut self, cas_number: &str) -> Result<Self, DomainError> {
        validate_text("cas_number", cas_number, MAX_CAS_LEN)?;
        self.cas_number = Some(cas_number.to_string());
        Ok(self)
    }

    pub fn quantity(mut self, quantity: i32) -> Result<Self, DomainError> {
        validate_quantity(quantity)?;
        self.quantity = Some(quantity);
        Ok(self)
    }

    pub fn unit(mut self, unit: &str) -> Result<Self, DomainError> {
        validate_text("unit", unit, MAX_UNIT_LEN)?;
        self.unit = Some(unit.to_string());
        Ok(self)
    }

    /// Construye un comando con todos los campos presentes (reemplazo completo).
    pub fn replace_all(name: &str, cas_number: &str, quantity: i32, unit: &str) -> Result<Self, DomainError> {
        Self::new().name(name)?.cas_number(cas_number)?.quantity(quantity)?.unit(unit)
    }

    /// Un update sin campos no tiene nada que auditar.
    pub fn ensure_not_empty(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation("update must set at least one field"));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cas_number.is_none() && self.quantity.is_none() && self.unit.is_none()
    }

    pub fn name_value(&self) -> Option<&str> { self.name.as_deref() }
    pub fn cas_number_value(&self) -> Option<&str> { self.cas_number.as_deref() }
    pub fn quantity_value(&self) -> Option<i32> { self.quantity }
    pub fn unit_value(&self) -> Option<&str> { self.unit.as_deref() }

    /// Aplica el comando sobre un registro en memoria. `updated_at` lo asigna
    /// quien persiste.
    pub fn apply_to(&self, record: &mut ChemicalRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(cas) = &self.cas_number {
            record.cas_number = cas.clone();
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(unit) = &self.unit {
            record.unit = unit.clone();
        }
    }
}

#[derive(Deserialize)]
struct ChemicalUpdateFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    cas_number: Option<String>,
    #[serde(default)]
    quantity: Option<i32>,
    #[serde(default)]
    unit: Option<String>,
}

impl TryFrom<ChemicalUpdateFields> for ChemicalUpdate {
    type Error = DomainError;

    fn try_from(f: ChemicalUpdateFields) -> Result<Self, Self::Error> {
        let mut update = ChemicalUpdate::new();
        if let Some(name) = f.name {
            update = update.name(&name)?;
        }
        if let Some(cas_number) = f.cas_number {
            update = update.cas_number(&cas_number)?;
        }
        if let Some(quantity) = f.quantity {
            update = update.quantity(quantity)?;
        }
        if let Some(unit) = f.unit {
            update = update.unit(&unit)?;
        }
        Ok(update)
    }
}

/// Resultado de un borrado: el nombre se captura antes de eliminar la fila.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedChemical {
    pub id: ChemicalId,
    pub name: String,
}
