//! Contexto efímero de una corrida.
use std::path::PathBuf;

use chrono::NaiveDate;

/// Carrier de handoff entre etapas, con dueño único: la corrida que lo creó.
/// Lleva la ruta de la partición producida por la limpieza hacia las etapas
/// siguientes como valor explícito (sin side-channel global) y se descarta
/// al terminar la corrida.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub execution_date: NaiveDate,
    pub silver_csv_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

impl RunContext {
    pub fn new(execution_date: NaiveDate) -> Self {
        Self { execution_date,
               silver_csv_path: None,
               report_path: None }
    }
}
