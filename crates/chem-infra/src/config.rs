//! Configuración de aplicación: settings generales + `DbConfig`.
//!
//! Variables reconocidas (además de las de `DbConfig`):
//! - `PROJECT_NAME` ("Chemical Inventory")
//! - `DEBUG` (false)
//! - `CHEM_LOG_LEVEL` (por defecto `debug` si `DEBUG`, si no según build)
//! - `CHEM_LOG_DIR` (ausente = sólo stderr)
//! - `SEED_ON_START` (false)

use std::env;
use std::path::PathBuf;

use chem_persistence::config::{init_dotenv, DbConfig};

use crate::error::InfraError;
use crate::logging::default_log_level;

const DEFAULT_PROJECT_NAME: &str = "Chemical Inventory";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub debug: bool,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub seed_on_start: bool,
    pub database: DbConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup_raw: F) -> Result<Self, InfraError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup_raw(key).filter(|v| !v.trim().is_empty());

        let debug = parse_bool(get("DEBUG"), "DEBUG")?.unwrap_or(false);
        let seed_on_start = parse_bool(get("SEED_ON_START"), "SEED_ON_START")?.unwrap_or(false);
        let log_level = match get("CHEM_LOG_LEVEL") {
            Some(level) => level.trim().to_string(),
            None if debug => "debug".to_string(),
            None => default_log_level().to_string(),
        };
        let database = DbConfig::from_lookup(&get)?;

        Ok(Self { project_name: get("PROJECT_NAME").unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
                  debug,
                  log_level,
                  log_dir: get("CHEM_LOG_DIR").map(|d| PathBuf::from(d.trim())),
                  seed_on_start,
                  database })
    }
}

fn parse_bool(raw: Option<String>, key: &str) -> Result<Option<bool>, InfraError> {
    let Some(raw) = raw else { return Ok(None) };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(InfraError::Config(format!("{key} inválido: '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://u:p@h/db")])).unwrap();
        assert_eq!(cfg.project_name, "Chemical Inventory");
        assert!(!cfg.debug);
        assert!(!cfg.seed_on_start);
        assert_eq!(cfg.log_dir, None);
        assert_eq!(cfg.log_level, default_log_level());
        assert_eq!(cfg.database.url, "postgres://u:p@h/db");
    }

    #[test]
    fn debug_raises_default_level_unless_overridden() {
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://h/db"), ("DEBUG", "True")])).unwrap();
        assert_eq!(cfg.log_level, "debug");
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://h/db"),
                                                  ("DEBUG", "1"),
                                                  ("CHEM_LOG_LEVEL", "warn"),
                                                  ("SEED_ON_START", "yes"),
                                                  ("CHEM_LOG_DIR", "/var/log/chem")])).unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert!(cfg.seed_on_start);
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/var/log/chem")));
    }

    #[test]
    fn malformed_flags_and_missing_database_fail() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://h/db"), ("SEED_ON_START", "maybe")])).unwrap_err();
        assert!(matches!(err, InfraError::Config(ref m) if m.contains("SEED_ON_START")));
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, InfraError::Persistence(_)));
    }
}
