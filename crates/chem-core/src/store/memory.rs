use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use log::debug;

use chem_domain::{validate_id, validate_log_quantity, ActionType, AuditLogEntry, ChemicalId, ChemicalRecord, ChemicalUpdate, DeletedChemical,
                  InventoryAuditLog, NewChemical, Page, PageRequest};

use super::InventoryStore;
use crate::errors::{InventoryError, InventoryResult};

/// Backend en memoria con la misma semántica que el de Postgres.
///
/// Todo el estado vive bajo un único `Mutex`; cada mutación se aplica dentro
/// de una sola sección crítica, que hace de unidad atómica: las validaciones
/// ocurren antes de tocar el estado y, una vez que se empieza a escribir, no
/// hay pasos que puedan fallar a mitad.
#[derive(Default)]
pub struct InMemoryInventoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    chemicals: BTreeMap<ChemicalId, ChemicalRecord>,
    logs: Vec<InventoryAuditLog>,
    last_chemical_id: ChemicalId,
    last_log_id: i32,
    last_ts: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Reloj estrictamente creciente (equivalente a `clock_timestamp()` por fila).
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_ts {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_ts = Some(ts);
        ts
    }

    fn next_chemical_id(&mut self) -> InventoryResult<ChemicalId> {
        self.last_chemical_id = self.last_chemical_id
                                    .checked_add(1)
                                    .ok_or_else(|| InventoryError::storage("chemical id sequence exhausted"))?;
        Ok(self.last_chemical_id)
    }

    fn append_log(&mut self, chemical_id: ChemicalId, action_type: ActionType, quantity: i32) -> InventoryResult<InventoryAuditLog> {
        let id = self.last_log_id
                     .checked_add(1)
                     .ok_or_else(|| InventoryError::storage("log id sequence exhausted"))?;
        self.last_log_id = id;
        let log = InventoryAuditLog { id, chemical_id, action_type, quantity, timestamp: self.tick() };
        self.logs.push(log.clone());
        Ok(log)
    }
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> InventoryResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| InventoryError::storage("in-memory inventory state poisoned"))
    }

    /// Número total de filas de auditoría retenidas (todas las sustancias).
    pub fn log_count(&self) -> InventoryResult<usize> {
        Ok(self.lock()?.logs.len())
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn create(&self, new: NewChemical) -> InventoryResult<ChemicalRecord> {
        let mut st = self.lock()?;
        let id = st.next_chemical_id()?;
        let ts = st.tick();
        let record = ChemicalRecord { id,
                                      name: new.name().to_string(),
                                      cas_number: new.cas_number().to_string(),
                                      quantity: new.quantity(),
                                      unit: new.unit().to_string(),
                                      created_at: ts,
                                      updated_at: ts };
        st.append_log(id, ActionType::Add, record.quantity)?;
        st.chemicals.insert(id, record.clone());
        debug!("create:done id={id} quantity={}", record.quantity);
        Ok(record)
    }

    fn update(&self, id: ChemicalId, changes: ChemicalUpdate) -> InventoryResult<ChemicalRecord> {
        validate_id(id)?;
        changes.ensure_not_empty()?;
        let mut st = self.lock()?;
        let mut record = st.chemicals.get(&id).cloned().ok_or(InventoryError::NotFound { id })?;
        changes.apply_to(&mut record);
        record.updated_at = st.tick();
        st.append_log(id, ActionType::Update, record.quantity)?;
        st.chemicals.insert(id, record.clone());
        debug!("update:done id={id} quantity={}", record.quantity);
        Ok(record)
    }

    fn delete(&self, id: ChemicalId) -> InventoryResult<DeletedChemical> {
        validate_id(id)?;
        let mut st = self.lock()?;
        let record = st.chemicals.get(&id).cloned().ok_or(InventoryError::NotFound { id })?;
        st.append_log(id, ActionType::Remove, record.quantity)?;
        st.chemicals.remove(&id);
        // cascada: el historial (incluido el `remove`) desaparece con el químico
        st.logs.retain(|l| l.chemical_id != id);
        debug!("delete:done id={id} name={}", record.name);
        Ok(DeletedChemical { id, name: record.name })
    }

    fn get(&self, id: ChemicalId) -> InventoryResult<Option<ChemicalRecord>> {
        validate_id(id)?;
        Ok(self.lock()?.chemicals.get(&id).cloned())
    }

    fn list(&self, page: PageRequest) -> InventoryResult<Page<ChemicalRecord>> {
        let st = self.lock()?;
        let total = st.chemicals.len() as i64;
        let results = st.chemicals
                        .values()
                        .skip(page.offset() as usize)
                        .take(page.limit() as usize)
                        .cloned()
                        .collect();
        Ok(Page::new(page, total, results))
    }

    fn get_by_id(&self, id: ChemicalId) -> InventoryResult<ChemicalRecord> {
        validate_id(id)?;
        self.lock()?.chemicals.get(&id).cloned().ok_or(InventoryError::NotFound { id })
    }

    fn logs_for_chemical(&self, id: ChemicalId, page: PageRequest) -> InventoryResult<Page<AuditLogEntry>> {
        validate_id(id)?;
        let st = self.lock()?;
        let Some(chemical) = st.chemicals.get(&id) else {
            return Ok(Page::new(page, 0, Vec::new()));
        };
        let mut logs: Vec<&InventoryAuditLog> = st.logs.iter().filter(|l| l.chemical_id == id).collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        let (start, end) = page.bounds(logs.len());
        let summary = chemical.summary();
        let results = logs[start..end].iter()
                                      .map(|l| AuditLogEntry { log: (*l).clone(), chemical: summary.clone() })
                                      .collect();
        Ok(Page::new(page, logs.len() as i64, results))
    }

    fn create_log(&self, chemical_id: ChemicalId, action_type: &str, quantity: i32) -> InventoryResult<AuditLogEntry> {
        let action = ActionType::parse(action_type)?;
        validate_id(chemical_id)?;
        validate_log_quantity(quantity)?;
        let mut st = self.lock()?;
        let summary = st.chemicals
                        .get(&chemical_id)
                        .map(ChemicalRecord::summary)
                        .ok_or(InventoryError::NotFound { id: chemical_id })?;
        let log = st.append_log(chemical_id, action, quantity)?;
        debug!("create_log:done chemical_id={chemical_id} action={action} log_id={}", log.id);
        Ok(AuditLogEntry { log, chemical: summary })
    }
}
