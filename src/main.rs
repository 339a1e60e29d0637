//! `main-core`: arranque del servicio de inventario.
//!
//! Uso: `main-core [--seed] [--demo]`
//! - sin flags: config → logging → pool (+ migraciones) → health → seed
//!   opcional (`SEED_ON_START`), e imprime un resumen JSON;
//! - `--seed`: fuerza el seeding sobre un inventario vacío;
//! - `--demo`: corre los escenarios A–D sobre un store en memoria (no requiere
//!   base de datos).

use std::process::exit;

use chem_inventory::demo::run_scenarios;
use chem_inventory::infra::{bootstrap, default_log_level, init_logging, AppConfig, InfraError};
use chem_inventory::{InMemoryInventoryStore, InventoryService};
use log::error;

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("[main-core] serialize: {e}"),
    }
}

fn run_demo() -> i32 {
    if let Err(e) = init_logging(default_log_level(), None) {
        eprintln!("[main-core] {e}");
    }
    let service = InventoryService::new(InMemoryInventoryStore::new());
    match run_scenarios(&service) {
        Ok(report) => {
            print_json(&report);
            0
        }
        Err(e) => {
            error!("demo:error kind={} err={e}", e.kind());
            1
        }
    }
}

fn run(force_seed: bool) -> Result<(), InfraError> {
    let cfg = AppConfig::from_env()?;
    init_logging(&cfg.log_level, cfg.log_dir.as_deref())?;
    let (_service, summary) = bootstrap(&cfg, force_seed)?;
    print_json(&summary);
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut seed = false;
    let mut demo = false;
    for arg in &args {
        match arg.as_str() {
            "--seed" => seed = true,
            "--demo" => demo = true,
            other => {
                eprintln!("[main-core] argumento desconocido: {other}\nUso: main-core [--seed] [--demo]");
                exit(2);
            }
        }
    }

    if demo {
        exit(run_demo());
    }
    if let Err(e) = run(seed) {
        error!("bootstrap:error err={e}");
        eprintln!("[main-core] {e}");
        exit(1);
    }
}
