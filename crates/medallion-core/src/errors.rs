//! Errores del pipeline.
//!
//! Taxonomía: `RawInput` (dataset crudo inválido a nivel contenedor),
//! `Clean`/`Engine`/`Report` (fallo de invocación de una etapa) e `Internal`.
//! Las filas inválidas NO son errores (se descartan en silencio) y los checks
//! de calidad que fallan tampoco: viajan en el reporte, no por acá.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    #[error("dataset crudo inválido: {0}")] RawInput(String),
    #[error("limpieza fallida: {0}")] Clean(String),
    #[error("invocación del motor fallida: {0}")] Engine(String),
    #[error("no se pudo escribir el reporte: {0}")] Report(String),
    #[error("internal: {0}")] Internal(String),
}
