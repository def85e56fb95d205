//! Eventos de una corrida y estructura `RunEvent`.
//!
//! Rol en el pipeline:
//! - Cada corrida emite eventos a un `EventStore` append-only, keyeados por
//!   fecha de ejecución (la fecha ES la clave de la corrida: no hay ids
//!   sintéticos).
//! - La secuencia de eventos es el contrato observable de la orquestación:
//!   permite distinguir a posteriori un `Failed` (fallo de invocación) de un
//!   `Completed` con checks fallidos.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

/// Tipos de evento de una corrida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Primer evento de una fecha: fija la cantidad de etapas.
    RunInitialized { execution_date: NaiveDate, stage_count: usize },
    /// Una etapa comenzó su invocación. No implica éxito.
    StageStarted { stage_index: usize, stage_id: String },
    /// Una etapa terminó correctamente. `outputs` lleva los identificadores
    /// de sus artefactos (ruta de la partición + digest, ruta del reporte).
    StageFinished {
        stage_index: usize,
        stage_id: String,
        outputs: Vec<String>,
    },
    /// Una etapa falló su invocación. La corrida no continúa
    /// (stop-on-failure); no se produce reporte.
    StageFailed {
        stage_index: usize,
        stage_id: String,
        error: PipelineError,
    },
    /// Cierre de la corrida. `passed` refleja el resultado de calidad de
    /// datos, no la salud del pipeline: una corrida con checks fallidos
    /// también emite este evento.
    RunCompleted { passed: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el EventStore (orden de append)
    pub execution_date: NaiveDate,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato, no participa de la semántica
}
