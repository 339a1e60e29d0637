//! Arranque del backend de logging (`flexi_logger`) detrás de la fachada `log`.
//!
//! - Sin directorio: líneas a stderr.
//! - Con directorio: archivos rotados por tamaño, con warnings duplicados a
//!   stderr.
//! - Se inicializa una vez por proceso; repetir con la misma configuración es
//!   idempotente y con otra distinta es un error.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

use crate::error::InfraError;

const LOG_FILE_BASENAME: &str = "chem-inventory";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), InfraError> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(normalize_log_dir).transpose()?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, InfraError> {
                                 let logger = start_logger(level, log_dir.as_deref())?;
                                 info!("logging:init level={level} log_dir={}",
                                       log_dir.as_deref().map(|d| d.display().to_string()).unwrap_or_else(|| "-".into()));
                                 Ok(LoggingState { level, log_dir: log_dir.clone(), _logger: logger })
                             })?;

    if state.level != level || state.log_dir != log_dir {
        return Err(InfraError::Logging(format!("logging ya inicializado con level={} log_dir={:?}; se rechaza level={level} log_dir={log_dir:?}",
                                               state.level, state.log_dir)));
    }
    Ok(())
}

fn start_logger(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, InfraError> {
    let logger = Logger::try_with_str(level).map_err(|e| InfraError::Logging(format!("nivel inválido '{level}': {e}")))?;
    let logger = match log_dir {
        None => logger.log_to_stderr().format(flexi_logger::default_format),
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| InfraError::Logging(format!("no se pudo crear {}: {e}", dir.display())))?;
            logger.log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                  .rotate(Criterion::Size(MAX_LOG_FILE_SIZE_BYTES), Naming::Numbers, Cleanup::KeepLogFiles(MAX_LOG_FILES))
                  .write_mode(WriteMode::BufferAndFlush)
                  .append()
                  .duplicate_to_stderr(Duplicate::Warn)
                  .format_for_files(flexi_logger::detailed_format)
        }
    };
    logger.start().map_err(|e| InfraError::Logging(format!("no se pudo iniciar el logger: {e}")))
}

/// `(level, log_dir)` activos, o `None` si no se inicializó.
pub fn logging_status() -> Option<(&'static str, Option<PathBuf>)> {
    LOGGING_STATE.get().map(|s| (s.level, s.log_dir.clone()))
}

/// `debug` en builds de desarrollo, `info` en release.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, InfraError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(InfraError::Logging(format!("nivel no soportado '{other}'; se espera trace|debug|info|warn|error"))),
    }
}

fn normalize_log_dir(dir: &Path) -> Result<PathBuf, InfraError> {
    if dir.as_os_str().is_empty() {
        return Err(InfraError::Logging("log_dir vacío".into()));
    }
    if !dir.is_absolute() {
        return Err(InfraError::Logging(format!("log_dir debe ser absoluto: {}", dir.display())));
    }
    Ok(dir.to_path_buf())
}
