use std::collections::HashMap;

use chrono::{NaiveDate, Utc};

use super::{RunEvent, RunEventKind};

/// Almacenamiento de eventos append-only, keyeado por fecha de ejecución.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, execution_date: NaiveDate, kind: RunEventKind) -> RunEvent;
    /// Lista eventos de una fecha (orden ascendente por seq).
    fn list(&self, execution_date: NaiveDate) -> Vec<RunEvent>;
}

#[derive(Default)]
pub struct InMemoryEventStore {
    inner: HashMap<NaiveDate, Vec<RunEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, execution_date: NaiveDate, kind: RunEventKind) -> RunEvent {
        let vec = self.inner.entry(execution_date).or_default();
        let seq = vec.len() as u64;
        let ev = RunEvent { seq, execution_date, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, execution_date: NaiveDate) -> Vec<RunEvent> {
        self.inner.get(&execution_date).cloned().unwrap_or_default()
    }
}
