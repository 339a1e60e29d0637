mod args;

use std::process::exit;

use chem_core::{seed_if_empty, InMemoryInventoryStore, InventoryError, InventoryService, InventoryStore};
use chem_infra::{connect, init_logging, AppConfig};
use chem_persistence::health_check;
use serde_json::{json, Value};

use args::{parse_command, ArgError, Command, Invocation, USAGE};

const EXIT_USAGE: i32 = 2;
const EXIT_VALIDATION: i32 = 3;
const EXIT_NOT_FOUND: i32 = 4;
const EXIT_STORAGE: i32 = 5;

fn exit_code(e: &InventoryError) -> i32 {
    match e {
        InventoryError::Validation(_) => EXIT_VALIDATION,
        InventoryError::NotFound { .. } => EXIT_NOT_FOUND,
        InventoryError::Storage { .. } => EXIT_STORAGE,
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, InventoryError> {
    serde_json::to_value(value).map_err(|e| InventoryError::storage(format!("serialize: {e}")))
}

/// Ejecuta un comando contra cualquier backend (salvo `health`, que requiere
/// el proveedor de conexiones y se resuelve en `main`).
fn execute<S: InventoryStore>(service: &InventoryService<S>, command: Command) -> Result<Value, InventoryError> {
    match command {
        Command::List { limit, offset } => to_json(service.list(limit, offset)?),
        Command::Get { id } => match service.get(id)? {
            Some(view) => to_json(view),
            None => Err(InventoryError::NotFound { id }),
        },
        Command::Show { id } => to_json(service.get_by_id(id)?),
        Command::Create { name, cas_number, quantity, unit } => to_json(service.create(&name, &cas_number, quantity, &unit)?),
        Command::Update { id, changes } => to_json(service.update(id, changes)?),
        Command::Delete { id } => to_json(service.delete(id)?),
        Command::Logs { id, limit, offset } => to_json(service.get_logs(id, limit, offset)?),
        Command::Log { id, action, quantity } => to_json(service.create_log(id, &action, quantity)?),
        Command::Seed => Ok(json!({ "seeded": seed_if_empty(service.store())? })),
        Command::Health => Ok(json!({ "status": "ok", "database": "memory" })),
    }
}

fn finish(result: Result<Value, InventoryError>) -> ! {
    match result {
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("[chem] error: {e}");
                    exit(EXIT_STORAGE);
                }
            }
            exit(0)
        }
        Err(e) => {
            eprintln!("[chem] {}: {e}", e.kind());
            exit(exit_code(&e))
        }
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Invocation { memory, command } = match parse_command(&argv) {
        Ok(inv) => inv,
        Err(ArgError::Usage(msg)) => {
            eprintln!("[chem] {msg}\n{USAGE}");
            exit(EXIT_USAGE);
        }
        Err(ArgError::Invalid(e)) => {
            eprintln!("[chem] validation: {e}");
            exit(EXIT_VALIDATION);
        }
    };

    // El store en memoria no sobrevive entre invocaciones: sólo sirve para probar la CLI.
    if memory {
        if let Err(e) = init_logging("warn", None) {
            eprintln!("[chem] {e}");
        }
        let service = InventoryService::new(InMemoryInventoryStore::new());
        finish(execute(&service, command));
    }

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[chem] requiere DATABASE_URL (o DB_HOST/DB_NAME/DB_USER/DB_PASSWORD): {e}");
            exit(EXIT_USAGE);
        }
    };
    if let Err(e) = init_logging(&cfg.log_level, cfg.log_dir.as_deref()) {
        eprintln!("[chem] {e}");
    }
    let (provider, store) = match connect(&cfg) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("[chem] storage: {e}");
            exit(EXIT_STORAGE);
        }
    };
    if command == Command::Health {
        let health = health_check(&provider);
        let code = if health.is_connected() { 0 } else { EXIT_STORAGE };
        println!("{}", json!({ "status": health.status, "database": health.database }));
        exit(code);
    }
    finish(execute(&InventoryService::new(store), command));
}
