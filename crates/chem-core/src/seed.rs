//! Datos iniciales de inventario. Sólo se cargan sobre un inventario vacío y
//! cada alta pasa por `create` (su propia unidad atómica con log `add`).

use chem_domain::{NewChemical, PageRequest};
use log::info;

use crate::errors::InventoryResult;
use crate::store::InventoryStore;

/// (name, cas_number, quantity, unit)
pub const SEED_CHEMICALS: [(&str, &str, i32, &str); 3] = [("Water", "7732-18-5", 100, "L"),
                                                          ("Carbon Dioxide", "124-38-9", 50, "kg"),
                                                          ("Methane", "74-82-8", 200, "m³")];

/// Devuelve cuántos registros se crearon (0 si ya había datos).
pub fn seed_if_empty<S: InventoryStore + ?Sized>(store: &S) -> InventoryResult<usize> {
    let existing = store.list(PageRequest::new(1, 0)?)?.total;
    if existing != 0 {
        info!("seed:skip existing={existing}");
        return Ok(0);
    }
    let mut created = 0;
    for (name, cas, quantity, unit) in SEED_CHEMICALS {
        let record = store.create(NewChemical::new(name, cas, quantity, unit)?)?;
        info!("seed:created id={} name={}", record.id, record.name);
        created += 1;
    }
    Ok(created)
}
