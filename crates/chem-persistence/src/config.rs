//! Carga de configuración de conexión desde variables de entorno.
//!
//! Convenciones aceptadas (en orden de prioridad):
//! - `DATABASE_URL` completo.
//! - Componentes sueltos `DB_HOST`, `DB_PORT` (5432), `DB_NAME`, `DB_USER`,
//!   `DB_PASSWORD`.
//!
//! Tamaño del pool: `DATABASE_MIN_CONNECTIONS` / `DATABASE_MAX_CONNECTIONS`, o
//! bien `DB_POOL_SIZE` + `DB_MAX_OVERFLOW` (máximo = pool_size + overflow).

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::PersistenceError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

const DEFAULT_PORT: u16 = 5432;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_MAX_CONNECTIONS: u32 = 16;
const DEFAULT_MAX_OVERFLOW: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, PersistenceError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de una función de búsqueda (tests).
    pub fn from_lookup<F>(lookup_raw: F) -> Result<Self, PersistenceError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup_raw(key).filter(|v| !v.trim().is_empty());

        let url = match get("DATABASE_URL") {
            Some(url) => url,
            None => compose_url(&get)?,
        };

        let pool_size: Option<u32> = parse_opt(&get, "DB_POOL_SIZE")?;
        let overflow: Option<u32> = parse_opt(&get, "DB_MAX_OVERFLOW")?;
        let min_connections = parse_opt(&get, "DATABASE_MIN_CONNECTIONS")?.or(pool_size)
                                                                          .unwrap_or(DEFAULT_MIN_CONNECTIONS);
        let max_connections = parse_opt(&get, "DATABASE_MAX_CONNECTIONS")?
            .or_else(|| pool_size.map(|p| p.saturating_add(overflow.unwrap_or(DEFAULT_MAX_OVERFLOW))))
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let timeout_secs = parse_opt(&get, "DATABASE_CONNECT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        Ok(Self { url,
                  min_connections,
                  max_connections,
                  connect_timeout: Duration::from_secs(timeout_secs) })
    }

    /// URL apta para logs (sin contraseña).
    pub fn redacted_url(&self) -> String {
        redact(&self.url)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
         .field("url", &self.redacted_url())
         .field("min_connections", &self.min_connections)
         .field("max_connections", &self.max_connections)
         .field("connect_timeout", &self.connect_timeout)
         .finish()
    }
}

fn compose_url<F>(get: &F) -> Result<String, PersistenceError>
    where F: Fn(&str) -> Option<String>
{
    let require = |key: &str| {
        get(key).ok_or_else(|| {
                    PersistenceError::Config(format!("DATABASE_URL no definido y falta {key} (se requieren DB_HOST, DB_NAME, DB_USER, DB_PASSWORD)"))
                })
    };
    let host = require("DB_HOST")?;
    let name = require("DB_NAME")?;
    let user = require("DB_USER")?;
    let password = require("DB_PASSWORD")?;
    let port: u16 = parse_opt(get, "DB_PORT")?.unwrap_or(DEFAULT_PORT);
    Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
}

fn parse_opt<F, T>(get: &F, key: &str) -> Result<Option<T>, PersistenceError>
    where F: Fn(&str) -> Option<String>,
          T: FromStr
{
    match get(key) {
        None => Ok(None),
        Some(raw) => raw.trim()
                        .parse()
                        .map(Some)
                        .map_err(|_| PersistenceError::Config(format!("{key} inválido: '{raw}'"))),
    }
}

fn redact(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else { return url.to_string() };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else { return url.to_string() };
    let credentials = &rest[..at];
    match credentials.find(':') {
        Some(colon) => format!("{}{}:***{}", &url[..scheme_end + 3], &credentials[..colon], &rest[at..]),
        None => url.to_string(),
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }
