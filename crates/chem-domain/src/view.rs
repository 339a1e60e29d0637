//! Vistas serializables expuestas a los colaboradores externos (CLI, etc.).
//!
//! Contrato de formato: toda marca de tiempo se renderiza en UTC como
//! `DD Mon YYYY hh:mm AM/PM` (ej. `05 Jan 2024 03:04 PM`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ActionType, AuditLogEntry, ChemicalId, ChemicalRecord, DeletedChemical};

pub const TIMESTAMP_FORMAT: &str = "%d %b %Y %I:%M %p";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalView {
    pub id: ChemicalId,
    pub name: String,
    pub cas_number: String,
    pub quantity: i32,
    pub unit: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&ChemicalRecord> for ChemicalView {
    fn from(r: &ChemicalRecord) -> Self {
        ChemicalView { id: r.id,
                       name: r.name.clone(),
                       cas_number: r.cas_number.clone(),
                       quantity: r.quantity,
                       unit: r.unit.clone(),
                       created_at: format_timestamp(&r.created_at),
                       updated_at: format_timestamp(&r.updated_at) }
    }
}

impl From<ChemicalRecord> for ChemicalView {
    fn from(r: ChemicalRecord) -> Self {
        ChemicalView::from(&r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogView {
    pub id: i32,
    pub chemical_id: ChemicalId,
    pub action_type: ActionType,
    pub quantity: i32,
    pub timestamp: String,
    pub name: String,
    pub cas_number: String,
    pub unit: String,
}

impl From<AuditLogEntry> for LogView {
    fn from(e: AuditLogEntry) -> Self {
        LogView { id: e.log.id,
                  chemical_id: e.log.chemical_id,
                  action_type: e.log.action_type,
                  quantity: e.log.quantity,
                  timestamp: format_timestamp(&e.log.timestamp),
                  name: e.chemical.name,
                  cas_number: e.chemical.cas_number,
                  unit: e.chemical.unit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl From<DeletedChemical> for DeleteConfirmation {
    fn from(d: DeletedChemical) -> Self {
        DeleteConfirmation { message: format!("Chemical {} (id {}) deleted successfully", d.name, d.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_contract_is_exact() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 59).unwrap();
        assert_eq!(format_timestamp(&ts), "05 Jan 2024 03:04 PM");
        let morning = Utc.with_ymd_and_hms(2023, 11, 30, 0, 7, 0).unwrap();
        assert_eq!(format_timestamp(&morning), "30 Nov 2023 12:07 AM");
    }

    #[test]
    fn delete_confirmation_carries_name() {
        let c: DeleteConfirmation = DeletedChemical { id: 3, name: "Methane".into() }.into();
        assert!(c.message.contains("Methane"));
    }
}
