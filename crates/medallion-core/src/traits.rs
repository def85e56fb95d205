//! Capacidades inyectables de las etapas.
//!
//! Interfaces angostas para que el motor concreto (dbt por CLI, un mock en
//! tests) se pueda intercambiar sin tocar la orquestación.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::errors::PipelineError;
use crate::model::{QualityReport, TransformResult};

/// Resultado de la etapa de limpieza: la partición escrita y su identidad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    /// Ruta canónica de la partición Silver escrita.
    pub csv_path: PathBuf,
    /// Filas que quedaron en la partición (cero es válido).
    pub rows_written: usize,
    /// Digest sha256 de los bytes escritos; identidad del artefacto para el
    /// event log.
    pub content_hash: String,
}

/// Limpieza y particionado: dataset crudo + fecha -> partición.
///
/// Regenerar una fecha debe ser idempotente: mismo dataset y misma fecha
/// producen los mismos bytes, sobreescribiendo el artefacto anterior.
pub trait RecordCleaner {
    fn clean(&self, execution_date: NaiveDate) -> Result<CleanOutcome, PipelineError>;
}

/// Invocación del motor de transformación externo contra una partición.
///
/// `Err` significa invocación fallida (motor inalcanzable o sin resultado):
/// fatal para la corrida. `Ok` con `success == false` significa que el motor
/// corrió y reportó fallo; qué hacer con eso depende del modo (ver la
/// orquestación).
pub trait TransformEngine {
    /// Modo apply: ejecuta las unidades de transformación.
    fn apply(&self, silver_csv: &Path) -> Result<TransformResult, PipelineError>;
    /// Modo validate: ejecuta los checks y devuelve pass/fail por check.
    fn validate(&self, silver_csv: &Path) -> Result<TransformResult, PipelineError>;
}

/// Escritura del reporte de calidad. Idempotente: sobreescribe el reporte
/// previo de la misma fecha.
pub trait ReportWriter {
    fn write(&self, report: &QualityReport) -> Result<PathBuf, PipelineError>;
}
