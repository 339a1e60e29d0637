//! chem-infra: configuración de aplicación, logging y arranque del backend.
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;

pub use bootstrap::{bootstrap, connect, BootstrapSummary, PgInventoryService};
pub use config::AppConfig;
pub use error::InfraError;
pub use logging::{default_log_level, init_logging};
