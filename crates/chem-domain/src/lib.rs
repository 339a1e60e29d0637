// chem-domain library entry point
pub mod action;
pub mod audit_log;
pub mod chemical;
pub mod error;
pub mod pagination;
pub mod view;
pub use action::ActionType;
pub use audit_log::{validate_log_quantity, AuditLogEntry, InventoryAuditLog};
pub use chemical::{validate_id, ChemicalId, ChemicalRecord, ChemicalSummary, ChemicalUpdate, DeletedChemical, NewChemical};
pub use error::DomainError;
pub use pagination::{Page, PageRequest};
pub use view::{format_timestamp, ChemicalView, DeleteConfirmation, LogView};
